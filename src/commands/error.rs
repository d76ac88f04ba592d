use crate::model::CoreError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, OpsError>;

#[derive(Debug, Error)]
pub enum OpsError {
    #[error("no operation named `{0}` is registered")]
    UnknownOperation(String),

    #[error("invalid operation parameters: {0}")]
    InvalidParams(String),

    #[error("unsupported dataset layout: {0}")]
    UnsupportedLayout(String),

    #[error("operation needs a single-channel volume, found {0} channels")]
    NotGrayscale(usize),

    #[error(transparent)]
    Core(#[from] CoreError),
}
