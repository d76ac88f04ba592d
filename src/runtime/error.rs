use std::path::PathBuf;

use crate::commands::OpsError;
use crate::formats::IoError;
use crate::model::CoreError;
use crate::segment::SegmentError;
use crate::workflow::PipelineError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("dataset service error: {0}")]
    Dataset(#[from] CoreError),

    #[error("I/O service error: {0}")]
    Io(#[from] IoError),

    #[error("operation service error: {0}")]
    Ops(#[from] OpsError),

    #[error("pipeline service error: {0}")]
    Pipeline(#[from] PipelineError),

    #[error("segmentation error: {0}")]
    Segment(#[from] SegmentError),

    #[error("no reader for {0}")]
    UnsupportedInput(PathBuf),

    #[error("no volume selected")]
    NoInput,
}
