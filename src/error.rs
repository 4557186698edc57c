//! Error types for navigation reshaping.

use thiserror::Error;

/// Errors that can occur while reshaping navigation markup.
#[derive(Error, Debug)]
pub enum Error {
    /// A chapter-member entry appeared before any chapter-start entry.
    ///
    /// Every well-formed navigation list begins with a chapter-start entry;
    /// the page generator owes us that. The index is the entry's position
    /// among its container's entries.
    #[error("navigation entry {index} has no preceding chapter to belong to")]
    OrphanEntry { index: usize },

    #[error("HTML serialization error: {0}")]
    Serialize(#[from] std::io::Error),

    #[error("UTF-8 decoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

pub type Result<T> = std::result::Result<T, Error>;
