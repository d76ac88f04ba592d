mod context;
mod dataset_service;
mod error;
mod io_service;
mod ops_service;
mod pipeline_service;

#[cfg(test)]
mod tests;

pub use context::{AppContext, SegmentationController};
pub use dataset_service::{DatasetService, DatasetSummary};
pub use error::{AppError, Result};
pub use io_service::IoService;
pub use ops_service::OpsService;
pub use pipeline_service::PipelineService;
