mod axis;
mod dataset;
mod error;
mod extent;
mod metadata;

#[cfg(test)]
mod tests;

pub use axis::{AxisKind, PixelType, default_axes_for_rank};
pub use dataset::{Dataset, DatasetF32, DisplayVolume, LabelVolume};
pub use error::{CoreError, Result};
pub use extent::{Extent, Seed};
pub use metadata::{Dim, Metadata};
