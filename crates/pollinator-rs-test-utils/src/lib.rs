//! Test helpers shared across Pollinator crates.

pub mod credentials;
pub mod fixtures;

pub use credentials::{FailingCredentials, RecordingCredentials, StaticCredentials};
pub use fixtures::{default_document, full_user_document, write_document};
