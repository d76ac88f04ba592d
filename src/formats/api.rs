use std::path::Path;

use crate::model::{DatasetF32, LabelVolume};

use super::nii::read_nifti;
use super::raster::{read_common_raster, write_common_raster};
use super::tiff::{read_tiff, write_tiff_labels, write_tiff_volume};
use super::util::{VolumeFormat, volume_format};
use super::{IoError, Result};

pub fn read_volume(path: impl AsRef<Path>) -> Result<DatasetF32> {
    let path = path.as_ref();
    let dataset = match volume_format(path)? {
        VolumeFormat::Nifti => read_nifti(path)?,
        VolumeFormat::Tiff => read_tiff(path)?,
        VolumeFormat::Raster => read_common_raster(path)?,
    };
    log::debug!("read {} with shape {:?}", path.display(), dataset.shape());
    Ok(dataset)
}

pub fn write_volume(path: impl AsRef<Path>, dataset: &DatasetF32) -> Result<()> {
    let path = path.as_ref();
    match volume_format(path)? {
        VolumeFormat::Tiff => write_tiff_volume(path, dataset),
        VolumeFormat::Raster => write_common_raster(path, dataset),
        VolumeFormat::Nifti => Err(IoError::UnsupportedFormat(
            "writing NIfTI is not supported, use .tif".to_string(),
        )),
    }
}

/// Writes a label volume as a 16-bit TIFF stack, one page per slice.
pub fn write_labels(path: impl AsRef<Path>, labels: &LabelVolume) -> Result<()> {
    let path = path.as_ref();
    match volume_format(path)? {
        VolumeFormat::Tiff => write_tiff_labels(path, labels),
        _ => Err(IoError::UnsupportedFormat(format!(
            "label volumes are written as TIFF stacks, got {}",
            path.display()
        ))),
    }
}

pub fn supported_formats() -> &'static [&'static str] {
    &["nii", "nii.gz", "tif", "tiff", "png", "jpg", "jpeg"]
}
