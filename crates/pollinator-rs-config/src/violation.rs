//! Structured schema violations and their aggregate.

use std::fmt;

/// One step from the document root towards a value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PathSegment {
    /// Object key.
    Key(String),
    /// Array index.
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => f.write_str(key),
            PathSegment::Index(idx) => write!(f, "{idx}"),
        }
    }
}

/// Hierarchical location of a value inside a config document.
///
/// Renders as dotted keys with `[i]` indices, e.g. `airflow.accounts[0].role`,
/// and as `root` when empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConfigPath(Vec<PathSegment>);

impl ConfigPath {
    /// The document root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Build a path made only of object keys.
    pub fn from_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(
            keys.into_iter()
                .map(|key| PathSegment::Key(key.into()))
                .collect(),
        )
    }

    /// Path of a child key.
    pub fn key(&self, key: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Key(key.into()));
        Self(segments)
    }

    /// Path of an array element.
    pub fn index(&self, idx: usize) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Index(idx));
        Self(segments)
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Final object key, if the path ends in one.
    pub fn last_key(&self) -> Option<&str> {
        match self.0.last() {
            Some(PathSegment::Key(key)) => Some(key),
            _ => None,
        }
    }
}

impl fmt::Display for ConfigPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("root");
        }
        for (pos, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Key(key) if pos == 0 => f.write_str(key)?,
                PathSegment::Key(key) => write!(f, ".{key}")?,
                PathSegment::Index(idx) => write!(f, "[{idx}]")?,
            }
        }
        Ok(())
    }
}

/// Constraint a violation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ViolationKind {
    /// A required key is absent from its object.
    MissingRequired,
    /// The value has the wrong JSON type.
    TypeMismatch,
    /// A restricted string is outside its allowed values.
    EnumViolation,
}

/// A single schema violation.
///
/// `path` always ends at the offending property: for a missing key it is the
/// enclosing object's path plus the key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ValidationError {
    path: ConfigPath,
    property: String,
    kind: ViolationKind,
    message: String,
}

impl ValidationError {
    pub(crate) fn new(
        path: ConfigPath,
        property: impl Into<String>,
        kind: ViolationKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            path,
            property: property.into(),
            kind,
            message: message.into(),
        }
    }

    pub fn path(&self) -> &ConfigPath {
        &self.path
    }

    /// Name of the offending property.
    pub fn property(&self) -> &str {
        &self.property
    }

    pub fn kind(&self) -> ViolationKind {
        self.kind
    }

    /// Human-readable constraint failure, without the path.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Path segments rendered as strings, root first.
    pub fn hierarchy(&self) -> Vec<String> {
        self.path
            .segments()
            .iter()
            .map(ToString::to_string)
            .collect()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Every violation found in one validation pass.
///
/// Entries are ordered by message text, then path, with exact duplicates
/// removed, so identical input always yields identical output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub fn new(mut errors: Vec<ValidationError>) -> Self {
        errors.sort_by(|left, right| {
            left.message
                .cmp(&right.message)
                .then_with(|| left.path.cmp(&right.path))
                .then_with(|| left.kind.cmp(&right.kind))
        });
        errors.dedup();
        Self(errors)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[ValidationError] {
        &self.0
    }

    /// Rendered `path: message` lines in report order.
    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }

    pub fn into_vec(self) -> Vec<ValidationError> {
        self.0
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (pos, error) in self.0.iter().enumerate() {
            if pos > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
