use std::path::PathBuf;

use crate::commands::OpsError;
use crate::model::CoreError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PipelineError>;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("invalid pipeline: {0}")]
    Parse(String),

    #[error("cannot access recipe or report {path}: {source}")]
    File {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("recipe JSON error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("recipe YAML error: {0}")]
    SerdeYaml(#[from] serde_yaml::Error),

    #[error("pipeline step failed: {0}")]
    Operation(#[from] OpsError),

    #[error("dataset validation failed: {0}")]
    Core(#[from] CoreError),
}
