use ndarray::{Array, IxDyn};

use crate::commands::{ConfidenceParams, confidence_connected};
use crate::model::{Dataset, DatasetF32, LabelVolume, Metadata, PixelType, Seed};

use super::Result;

/// Grows one binary region (`1` inside, `0` outside) from a seed list.
pub trait RegionGrower {
    fn grow(&mut self, volume: &DatasetF32, seeds: &[Seed]) -> Result<LabelVolume>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ConfidenceConnectedGrower {
    pub params: ConfidenceParams,
}

impl ConfidenceConnectedGrower {
    pub fn new(params: ConfidenceParams) -> Self {
        Self { params }
    }
}

impl RegionGrower for ConfidenceConnectedGrower {
    fn grow(&mut self, volume: &DatasetF32, seeds: &[Seed]) -> Result<LabelVolume> {
        let growth = confidence_connected(volume, seeds, &self.params)?;
        log::debug!(
            "grew {} voxels from {} seeds within [{:.4}, {:.4}]",
            growth.voxel_count,
            seeds.len(),
            growth.lower,
            growth.upper
        );
        let values = growth.mask.iter().map(|inside| u16::from(*inside)).collect();
        let data = Array::from_shape_vec(IxDyn(&growth.extent.shape_zyx()), values)
            .expect("mask covers every voxel");
        let mut metadata = Metadata::volume(growth.extent, PixelType::U16);
        metadata.source = volume.metadata.source.clone();
        Ok(Dataset::new(data, metadata)?)
    }
}
