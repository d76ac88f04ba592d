mod api;
mod codec;
mod error;
mod nii;
mod raster;
mod tiff;
mod util;

#[cfg(test)]
mod tests;

pub use api::{read_volume, supported_formats, write_labels, write_volume};
pub use codec::{DefaultVolumeCodec, VolumeReader, VolumeWriter};
pub use error::{IoError, Result};
