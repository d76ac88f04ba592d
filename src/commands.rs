mod axes;
mod error;
mod gaussian;
mod intensity;
mod params;
mod region_grow;
mod registry;
mod schema;
mod util;

#[cfg(test)]
mod tests;

pub use error::{OpsError, Result};
pub use gaussian::GaussianBlurOp;
pub use intensity::{IntensityNormalizeOp, IntensityRescaleOp, IntensityWindowOp, rescale_to_display};
pub use region_grow::{ConfidenceConnectedOp, ConfidenceParams, GrowthResult, confidence_connected};
pub use registry::{
    Registry, default_registry, execute_operation, execute_operation_with_registry,
    list_operations, sorted_schemas,
};
pub use schema::{MeasurementTable, OpOutput, OpSchema, Operation, ParamSpec};

pub(crate) use axes::spatial_axes;
pub(crate) use params::{
    get_optional_bool, get_optional_f32, get_optional_usize, get_required_f32, get_required_seeds,
};
