use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::shared::constants;

/// Every way an extraction run can stop short. None of them are retried.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("video not found at '{}'", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to create output directory '{}'", path.display())]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to open video '{}': {reason}", path.display())]
    Open { path: PathBuf, reason: String },

    #[error("failed to decode frame {index}: {reason}")]
    FrameDecode { index: u64, reason: String },

    #[error("failed to write frame '{}'", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error(
        "frame index {index} does not fit in {} digits",
        constants::FRAME_INDEX_WIDTH
    )]
    IndexExhausted { index: u64 },
}

impl ExtractError {
    pub fn open(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Open {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn decode(index: u64, reason: impl ToString) -> Self {
        Self::FrameDecode {
            index,
            reason: reason.to_string(),
        }
    }
}
