use strum::VariantNames;
use thiserror::Error;

use crate::bump::BumpLevel;

/// Errors raised while computing or publishing a version tag
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid version format: '{0}'")]
    InvalidVersionFormat(String),

    #[error("{0} is not a valid level (expected one of {})", BumpLevel::VARIANTS.join(", "))]
    InvalidLevel(String),

    #[error("tag {0} already exists")]
    TagAlreadyExists(String),

    #[error("repository error: {0}")]
    Repository(#[from] git2::Error),

    #[error("network error: {0}")]
    Network(String),

    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
