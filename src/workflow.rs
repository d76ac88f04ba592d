mod error;
mod execute;
mod io;
mod preprocess;
mod report;
mod spec;

#[cfg(test)]
mod tests;

pub use error::{PipelineError, Result};
pub use execute::run_pipeline;
pub use io::{load_spec, save_report};
pub use preprocess::{CtWindow, DENOISE_SIGMA, normalize_window_width};
pub use report::{PipelineReport, StepReport};
pub use spec::{OpInvocation, PipelineSpec};
