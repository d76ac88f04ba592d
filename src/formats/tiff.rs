use std::fs::File;
use std::path::Path;

use crate::model::{Dataset, DatasetF32, Extent, LabelVolume, PixelType};
use ndarray::Array3;
use tiff::decoder::{Decoder, DecodingResult};
use tiff::encoder::{TiffEncoder, colortype};

use super::util::volume_metadata;
use super::{IoError, Result};

/// Reads a (multi-page) grayscale TIFF; each page becomes one depth slice.
/// Samples keep their stored values so CT numbers survive the round trip.
pub(crate) fn read_tiff(path: &Path) -> Result<DatasetF32> {
    let file = File::open(path)?;
    let mut decoder = Decoder::new(file)?;
    let (width, height) = decoder.dimensions()?;
    let mut values = Vec::new();
    let mut pixel_type = PixelType::F32;
    let mut depth = 0usize;

    loop {
        let page = decode_tiff_page(&mut decoder, &mut pixel_type)?;
        if page.len() != width as usize * height as usize {
            return Err(IoError::UnsupportedLayout(
                "TIFF RGB/alpha pages are not supported".into(),
            ));
        }
        values.extend(page);
        depth += 1;
        if !decoder.more_images() {
            break;
        }
        decoder.next_image()?;
        if decoder.dimensions()? != (width, height) {
            return Err(IoError::UnsupportedLayout(
                "TIFF pages must have identical dimensions".into(),
            ));
        }
    }

    let extent = Extent::new(width as usize, height as usize, depth);
    let data = Array3::from_shape_vec(extent.shape_zyx(), values)
        .expect("page sizes checked")
        .into_dyn();
    Ok(Dataset::new(data, volume_metadata(path, extent, pixel_type))?)
}

fn decode_tiff_page(decoder: &mut Decoder<File>, pixel_type: &mut PixelType) -> Result<Vec<f32>> {
    let values = match decoder.read_image()? {
        DecodingResult::U8(buffer) => {
            *pixel_type = PixelType::U8;
            buffer.into_iter().map(f32::from).collect()
        }
        DecodingResult::U16(buffer) => {
            *pixel_type = PixelType::U16;
            buffer.into_iter().map(f32::from).collect()
        }
        DecodingResult::I16(buffer) => {
            *pixel_type = PixelType::I16;
            buffer.into_iter().map(f32::from).collect()
        }
        DecodingResult::F32(buffer) => {
            *pixel_type = PixelType::F32;
            buffer
        }
        other => {
            return Err(IoError::UnsupportedLayout(format!(
                "unsupported TIFF sample type: {other:?}"
            )));
        }
    };
    Ok(values)
}

pub(crate) fn write_tiff_volume(path: &Path, dataset: &DatasetF32) -> Result<()> {
    if dataset.channels() != 1 {
        return Err(IoError::UnsupportedLayout(format!(
            "TIFF volumes must be single-channel, found shape {:?}",
            dataset.shape()
        )));
    }
    let extent = dataset.extent()?;
    let values = dataset.to_vec();
    let mut encoder = TiffEncoder::new(File::create(path)?)?;
    for page in values.chunks(extent.slice_len()) {
        let image =
            encoder.new_image::<colortype::Gray32Float>(extent.width as u32, extent.height as u32)?;
        image.write_data(page)?;
    }
    Ok(())
}

pub(crate) fn write_tiff_labels(path: &Path, labels: &LabelVolume) -> Result<()> {
    let extent = labels.extent()?;
    let values = labels.to_vec();
    let mut encoder = TiffEncoder::new(File::create(path)?)?;
    for page in values.chunks(extent.slice_len()) {
        let image =
            encoder.new_image::<colortype::Gray16>(extent.width as u32, extent.height as u32)?;
        image.write_data(page)?;
    }
    log::info!("wrote {} label slices to {}", extent.depth, path.display());
    Ok(())
}
