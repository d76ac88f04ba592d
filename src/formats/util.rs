use std::path::Path;

use crate::model::{Extent, Metadata, PixelType};

use super::{IoError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum VolumeFormat {
    Nifti,
    Tiff,
    Raster,
}

/// Lower-cased extension of `path`, keeping the `.nii.gz` double suffix intact.
pub(crate) fn extension(path: &Path) -> Result<String> {
    let name = path
        .file_name()
        .and_then(|value| value.to_str())
        .map(|value| value.to_ascii_lowercase())
        .ok_or_else(|| IoError::UnsupportedFormat(path.to_string_lossy().to_string()))?;
    if name.ends_with(".nii.gz") {
        return Ok("nii.gz".to_string());
    }
    path.extension()
        .and_then(|value| value.to_str())
        .map(|value| value.to_ascii_lowercase())
        .ok_or_else(|| IoError::UnsupportedFormat(path.to_string_lossy().to_string()))
}

pub(crate) fn volume_format(path: &Path) -> Result<VolumeFormat> {
    match extension(path)?.as_str() {
        "nii" | "nii.gz" => Ok(VolumeFormat::Nifti),
        "tif" | "tiff" => Ok(VolumeFormat::Tiff),
        "png" | "jpg" | "jpeg" => Ok(VolumeFormat::Raster),
        other => Err(IoError::UnsupportedFormat(other.to_string())),
    }
}

pub(crate) fn volume_metadata(path: &Path, extent: Extent, pixel_type: PixelType) -> Metadata {
    Metadata {
        source: Some(path.to_path_buf()),
        ..Metadata::volume(extent, pixel_type)
    }
}

pub(crate) fn to_u8_samples(values: &[f32]) -> Vec<u8> {
    let (min, max) = min_max(values);
    let use_unit_range = min >= 0.0 && max <= 1.0;
    values
        .iter()
        .map(|value| {
            let normalized = if use_unit_range {
                *value
            } else if (max - min).abs() < f32::EPSILON {
                0.0
            } else {
                (*value - min) / (max - min)
            };
            (normalized.clamp(0.0, 1.0) * 255.0).round() as u8
        })
        .collect()
}

pub(crate) fn min_max(values: &[f32]) -> (f32, f32) {
    let mut iter = values.iter().copied();
    let first = iter.next().unwrap_or(0.0);
    iter.fold((first, first), |(min, max), value| {
        (min.min(value), max.max(value))
    })
}
