use std::path::Path;

use crate::model::{Dataset, DatasetF32, Extent, PixelType};
use image::{DynamicImage, ImageBuffer, Luma};
use ndarray::Array3;

use super::util::{to_u8_samples, volume_metadata};
use super::{IoError, Result};

/// Reads a PNG/JPEG as a single-slice volume of luminance values in `[0, 1]`.
pub(crate) fn read_common_raster(path: &Path) -> Result<DatasetF32> {
    let image = image::open(path)?;
    let pixel_type = match &image {
        DynamicImage::ImageLuma16(_) | DynamicImage::ImageRgb16(_) => PixelType::U16,
        _ => PixelType::U8,
    };
    let luma = image.to_luma32f();
    let (width, height) = luma.dimensions();
    let extent = Extent::new(width as usize, height as usize, 1);
    let values = luma.pixels().map(|pixel| pixel.0[0]).collect::<Vec<_>>();
    let data = Array3::from_shape_vec(extent.shape_zyx(), values)
        .expect("shape checked")
        .into_dyn();
    Ok(Dataset::new(data, volume_metadata(path, extent, pixel_type))?)
}

pub(crate) fn write_common_raster(path: &Path, dataset: &DatasetF32) -> Result<()> {
    let extent = dataset.extent()?;
    if extent.depth != 1 || dataset.channels() != 1 {
        return Err(IoError::UnsupportedLayout(format!(
            "raster write expects a single grayscale slice, found shape {:?}",
            dataset.shape()
        )));
    }
    let bytes = to_u8_samples(&dataset.to_vec());
    let image =
        ImageBuffer::<Luma<u8>, _>::from_vec(extent.width as u32, extent.height as u32, bytes)
            .ok_or_else(|| IoError::UnsupportedLayout("failed to construct gray image".into()))?;
    image.save(path)?;
    Ok(())
}
