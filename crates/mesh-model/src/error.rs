use std::path::PathBuf;

use thiserror::Error;

use crate::state::{MAX_POINTS, MIN_POINTS};

/// Rejected point-set mutation.
///
/// These are precondition failures: the state is left untouched and callers are
/// expected to log and carry on rather than propagate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PointSetError {
    #[error("cannot add a point: already at the maximum of {max}", max = MAX_POINTS)]
    TooManyPoints,

    #[error("cannot remove a point: at least {min} are required", min = MIN_POINTS)]
    TooFewPoints,

    #[error("point index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("point count {len} outside [{min}, {max}]", min = MIN_POINTS, max = MAX_POINTS)]
    InvariantViolation { len: usize },
}

/// Failure while writing an export to disk.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode image")]
    Image(#[from] image::ImageError),
}
