//! Error types for sectionkit operations.

use thiserror::Error;

/// Errors around the expansion pass.
///
/// Expansion itself cannot fail; these cover reading and writing pages and
/// compiling selectors.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize HTML: {0}")]
    Serialize(#[source] std::io::Error),

    #[error("invalid selector `{selector}`: {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("invalid arguments: {0}")]
    InvalidArguments(String),
}

pub type Result<T> = std::result::Result<T, Error>;
