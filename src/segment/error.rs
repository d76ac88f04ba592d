use std::path::PathBuf;

use crate::commands::OpsError;
use crate::formats::IoError;
use crate::model::{CoreError, Extent};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SegmentError>;

#[derive(Debug, Error)]
pub enum SegmentError {
    #[error("volume extent {volume:?} does not match {other:?}")]
    ExtentMismatch { volume: Extent, other: Extent },

    #[error("expected a single-channel volume, found {0} channels")]
    NotGrayscale(usize),

    #[error("cannot display a volume with {0} channels")]
    UnsupportedChannels(usize),

    #[error("region label space exhausted after {0} regions")]
    TooManyRegions(usize),

    #[error("failed to write session report {path}: {source}")]
    Report {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Ops(#[from] OpsError),

    #[error(transparent)]
    Io(#[from] IoError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
