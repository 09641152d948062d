use parking_lot::Mutex;
use pollinator_rs_config::{CredentialError, CredentialSet, CredentialSource};

/// Always returns the same credentials.
#[derive(Debug, Clone)]
pub struct StaticCredentials {
    credentials: CredentialSet,
}

impl StaticCredentials {
    pub fn new(credentials: CredentialSet) -> Self {
        Self { credentials }
    }
}

impl Default for StaticCredentials {
    fn default() -> Self {
        Self::new(CredentialSet::new("AKIATESTKEY", "test-secret").with_region("us-east-1"))
    }
}

impl CredentialSource for StaticCredentials {
    fn name(&self) -> &str {
        "static"
    }

    fn credentials(&self) -> Result<CredentialSet, CredentialError> {
        Ok(self.credentials.clone())
    }
}

/// Always fails as if no local credentials existed.
#[derive(Debug, Clone, Default)]
pub struct FailingCredentials;

impl CredentialSource for FailingCredentials {
    fn name(&self) -> &str {
        "failing"
    }

    fn credentials(&self) -> Result<CredentialSet, CredentialError> {
        Err(CredentialError::Unavailable(
            "no local credentials configured".to_string(),
        ))
    }
}

/// Wraps another source and counts lookups.
#[derive(Debug, Default)]
pub struct RecordingCredentials<S> {
    inner: S,
    calls: Mutex<usize>,
}

impl<S> RecordingCredentials<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            calls: Mutex::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock()
    }
}

impl<S: CredentialSource> CredentialSource for RecordingCredentials<S> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn credentials(&self) -> Result<CredentialSet, CredentialError> {
        *self.calls.lock() += 1;
        self.inner.credentials()
    }
}
