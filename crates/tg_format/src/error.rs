use thiserror::Error;

use tg_reflect::ops::ArrayBuildError;

use crate::TagType;

// -----------------------------------------------------------------------------
// CodecError

/// A failure converting between values and tags.
///
/// Errors propagate to the caller unchanged; no partial result is returned.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum CodecError {
    #[error("Type `{type_path}` is not supported by {format}")]
    UnsupportedType {
        type_path: &'static str,
        format: &'static str,
    },

    #[error("Invalid tag type: expected {expected}, found {found}")]
    InvalidTagType {
        expected: &'static str,
        found: TagType,
    },

    #[error("Missing field `{0}`")]
    MissingField(&'static str),

    #[error("Failed to create an instance of `{0}`")]
    InstantiationError(&'static str),

    #[error("Malformed value for `{type_path}`: {message}")]
    FormatError {
        type_path: &'static str,
        message: String,
    },

    #[error("Invalid type `{type_path}`: {reason}")]
    InvalidType {
        type_path: &'static str,
        reason: &'static str,
    },

    #[error("Size mismatch: expected {expected} elements, found {found}")]
    SizeMismatch { expected: usize, found: usize },

    #[error("Cannot read a {found} tag as `{expected}`")]
    TypeMismatch {
        expected: &'static str,
        found: TagType,
    },

    #[error("Rank mismatch: expected {expected} dimensions, found {found}")]
    RankMismatch { expected: usize, found: usize },

    #[error("Invalid array extent {0}")]
    InvalidExtent(i64),

    #[error("Unexpected null item in `{0}`")]
    UnexpectedNull(&'static str),

    #[error("No format handles `{0}`")]
    NoFormat(&'static str),

    #[error("Failed to build array: {0}")]
    ArrayBuild(ArrayBuildError),
}

impl From<ArrayBuildError> for CodecError {
    fn from(err: ArrayBuildError) -> Self {
        match err {
            ArrayBuildError::RankMismatch { expected, found } => {
                Self::RankMismatch { expected, found }
            }
            ArrayBuildError::SizeMismatch { expected, found } => {
                Self::SizeMismatch { expected, found }
            }
            other => Self::ArrayBuild(other),
        }
    }
}
