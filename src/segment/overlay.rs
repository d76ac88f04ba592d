use ndarray::{Array, IxDyn};
use serde::{Deserialize, Serialize};

use crate::model::{Dataset, DisplayVolume, Extent, LabelVolume, Metadata, PixelType};

use super::{Region, Result, Rgb, SegmentError};

/// Weight of the label color when blending over the grayscale backdrop.
pub const OVERLAY_OPACITY: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayStyle {
    #[default]
    Fill,
    Contour,
}

/// Merges committed regions into one label volume. Regions are written in
/// commit order, so overlapping voxels keep the most recent label.
pub fn combine_regions(extent: Extent, regions: &[Region]) -> Result<LabelVolume> {
    let mut labels = vec![0u16; extent.voxel_count()];
    for region in regions {
        let region_extent = region.mask.extent()?;
        if region_extent != extent {
            return Err(SegmentError::ExtentMismatch {
                volume: extent,
                other: region_extent,
            });
        }
        for (label, value) in labels.iter_mut().zip(region.mask.data.iter()) {
            if *value != 0 {
                *label = *value;
            }
        }
    }
    let data = Array::from_shape_vec(IxDyn(&extent.shape_zyx()), labels)
        .expect("labels cover every voxel");
    Ok(Dataset::new(data, Metadata::volume(extent, PixelType::U16))?)
}

/// Palette indexed by `label - 1`: the newest color goes to label 1, so label
/// `k` of `N` is drawn with `colors[N - k]`.
pub fn label_palette(colors: &[Rgb]) -> Vec<Rgb> {
    colors.iter().rev().copied().collect()
}

/// Colors `labels` over the grayscale `background`, producing an RGB volume.
/// Labels without a palette entry are left uncolored.
pub fn overlay_labels(
    labels: &LabelVolume,
    background: &DisplayVolume,
    palette: &[Rgb],
    style: OverlayStyle,
) -> Result<DisplayVolume> {
    let extent = background.extent()?;
    if background.channels() != 1 {
        return Err(SegmentError::NotGrayscale(background.channels()));
    }
    let label_extent = labels.extent()?;
    if label_extent != extent {
        return Err(SegmentError::ExtentMismatch {
            volume: extent,
            other: label_extent,
        });
    }

    let gray = background.to_vec();
    let label_values = labels.to_vec();
    let mut rgb = Vec::with_capacity(gray.len() * 3);
    for (offset, (value, label)) in gray.iter().zip(&label_values).enumerate() {
        let color = (*label)
            .checked_sub(1)
            .and_then(|index| palette.get(usize::from(index)))
            .filter(|_| style == OverlayStyle::Fill || is_boundary(&label_values, extent, offset));
        match color {
            Some(Rgb(channels)) => {
                let opacity = match style {
                    OverlayStyle::Fill => OVERLAY_OPACITY,
                    OverlayStyle::Contour => 1.0,
                };
                rgb.extend(channels.iter().map(|channel| blend(*value, *channel, opacity)));
            }
            None => rgb.extend([*value; 3]),
        }
    }

    let mut shape = extent.shape_zyx().to_vec();
    shape.push(3);
    let data = Array::from_shape_vec(IxDyn(&shape), rgb).expect("three samples per voxel");
    let metadata = Metadata::volume(extent, PixelType::U8).with_rgb_channels(PixelType::U8);
    Ok(Dataset::new(data, metadata)?)
}

fn blend(background: u8, color: u8, opacity: f32) -> u8 {
    let mixed = f32::from(background) * (1.0 - opacity) + f32::from(color) * opacity;
    mixed.round().clamp(0.0, 255.0) as u8
}

/// In-plane boundary test: the slice border, or a 4-neighbour with another label.
fn is_boundary(labels: &[u16], extent: Extent, offset: usize) -> bool {
    let seed = extent.seed_at(offset);
    if seed.x == 0 || seed.y == 0 || seed.x + 1 == extent.width || seed.y + 1 == extent.height {
        return true;
    }
    let label = labels[offset];
    [
        offset - 1,
        offset + 1,
        offset - extent.width,
        offset + extent.width,
    ]
    .iter()
    .any(|neighbor| labels[*neighbor] != label)
}
