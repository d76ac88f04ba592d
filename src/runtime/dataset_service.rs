use serde::Serialize;

use crate::model::{AxisKind, DatasetF32, Extent, PixelType};

use super::Result;

/// What `info` prints and the viewer echoes after loading.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    pub shape: Vec<usize>,
    pub extent: Extent,
    pub pixel_type: PixelType,
    pub axes: Vec<AxisKind>,
    pub spacing: [Option<f32>; 3],
    pub source: Option<String>,
    pub min: Option<f32>,
    pub max: Option<f32>,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DatasetService;

impl DatasetService {
    pub fn validate(&self, dataset: &DatasetF32) -> Result<()> {
        dataset.validate()?;
        dataset.extent()?;
        Ok(())
    }

    pub fn summarize(&self, dataset: &DatasetF32) -> Result<DatasetSummary> {
        self.validate(dataset)?;
        let metadata = &dataset.metadata;
        let range = dataset.min_max();
        Ok(DatasetSummary {
            shape: dataset.shape().to_vec(),
            extent: dataset.extent()?,
            pixel_type: metadata.pixel_type,
            axes: metadata.axes(),
            spacing: [
                metadata.spacing(AxisKind::X),
                metadata.spacing(AxisKind::Y),
                metadata.spacing(AxisKind::Z),
            ],
            source: metadata
                .source
                .as_ref()
                .map(|path| path.display().to_string()),
            min: range.map(|(min, _)| min),
            max: range.map(|(_, max)| max),
        })
    }
}
