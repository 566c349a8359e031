//! Configuration module

mod source;

pub use source::SourceConfig;
pub use source::{DEFAULT_BRANCH, DEFAULT_PER_PAGE, DEFAULT_REPO};
