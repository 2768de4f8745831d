//! Error taxonomy for corpus construction and detection.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building a [`crate::license_detection::Corpus`] or
/// calling [`crate::license_detection::Detector::detect`].
///
/// `NoMatch` is deliberately absent from this enum: an empty result list is
/// not an error condition, it's simply the answer.
#[derive(Debug, Error)]
pub enum DetectError {
    /// A reference directory contained a file that isn't a valid reference
    /// text: wrong extension, an invalid SPDX identifier, or invalid UTF-8.
    #[error("malformed corpus entry at {path}: {reason}")]
    CorpusMalformed { path: PathBuf, reason: String },

    /// A caller-supplied argument was out of its documented range, such as a
    /// confidence threshold outside `(0, 1]`.
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },

    /// Wraps an I/O failure encountered while walking a reference directory.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
