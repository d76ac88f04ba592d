use crate::model::{Dataset, DatasetF32, DisplayVolume, PixelType};
use ndarray::{Array, IxDyn};
use rayon::prelude::*;
use serde_json::Value;

use super::{
    OpOutput, OpSchema, Operation, OpsError, ParamSpec, Result, get_optional_f32, get_required_f32,
    util::min_max,
};

fn map_samples(
    dataset: &DatasetF32,
    pixel_type: PixelType,
    f: impl Fn(f32) -> f32 + Sync,
) -> Result<DatasetF32> {
    let mut values = dataset.to_vec();
    values.par_iter_mut().for_each(|value| *value = f(*value));
    let data = Array::from_shape_vec(IxDyn(dataset.shape()), values)
        .expect("shape is unchanged and valid");
    let mut metadata = dataset.metadata.clone();
    metadata.pixel_type = pixel_type;
    Ok(Dataset::new(data, metadata)?)
}

/// Clamps intensities to `[level - width/2, level + width/2]`, keeping the
/// window bounds as the output range.
#[derive(Debug, Clone, Copy)]
pub struct IntensityWindowOp;

impl Operation for IntensityWindowOp {
    fn name(&self) -> &'static str {
        "intensity.window"
    }

    fn schema(&self) -> OpSchema {
        OpSchema {
            name: self.name().to_string(),
            description: "Clip intensities to a CT window given by level and width.".to_string(),
            params: vec![
                ParamSpec::required("level", "float", "Window center (HU)."),
                ParamSpec::required("width", "float", "Window width (HU), must be > 0."),
            ],
        }
    }

    fn execute(&self, dataset: &DatasetF32, params: &Value) -> Result<OpOutput> {
        let level = get_required_f32(params, "level")?;
        let width = get_required_f32(params, "width")?;
        if width <= 0.0 {
            return Err(OpsError::InvalidParams(
                "`width` must be greater than 0".to_string(),
            ));
        }
        let half = (width / 2.0).floor();
        let (low, high) = (level - half, level + half);
        let windowed = map_samples(dataset, dataset.metadata.pixel_type, |value| {
            value.clamp(low, high)
        })?;
        Ok(OpOutput::dataset_only(windowed))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct IntensityNormalizeOp;

impl Operation for IntensityNormalizeOp {
    fn name(&self) -> &'static str {
        "intensity.normalize"
    }

    fn schema(&self) -> OpSchema {
        OpSchema {
            name: self.name().to_string(),
            description: "Normalize values into [0, 1] using optional min/max.".to_string(),
            params: vec![
                ParamSpec::optional(
                    "min",
                    "float",
                    "Optional lower bound. Uses dataset minimum when omitted.",
                ),
                ParamSpec::optional(
                    "max",
                    "float",
                    "Optional upper bound. Uses dataset maximum when omitted.",
                ),
            ],
        }
    }

    fn execute(&self, dataset: &DatasetF32, params: &Value) -> Result<OpOutput> {
        let (source_min, source_max) = dataset.min_max().unwrap_or((0.0, 1.0));
        let min = get_optional_f32(params, "min", source_min);
        let max = get_optional_f32(params, "max", source_max);
        let scale = if (max - min).abs() < f32::EPSILON {
            1.0
        } else {
            max - min
        };
        let normalized = map_samples(dataset, PixelType::F32, |value| {
            ((value - min) / scale).clamp(0.0, 1.0)
        })?;
        Ok(OpOutput::dataset_only(normalized))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct IntensityRescaleOp;

impl Operation for IntensityRescaleOp {
    fn name(&self) -> &'static str {
        "intensity.rescale"
    }

    fn schema(&self) -> OpSchema {
        OpSchema {
            name: self.name().to_string(),
            description: "Linearly map the data range onto [output_min, output_max].".to_string(),
            params: vec![
                ParamSpec::optional("output_min", "float", "Lower output bound (default 0)."),
                ParamSpec::optional("output_max", "float", "Upper output bound (default 255)."),
            ],
        }
    }

    fn execute(&self, dataset: &DatasetF32, params: &Value) -> Result<OpOutput> {
        let output_min = get_optional_f32(params, "output_min", 0.0);
        let output_max = get_optional_f32(params, "output_max", 255.0);
        if output_max < output_min {
            return Err(OpsError::InvalidParams(
                "`output_max` must not be below `output_min`".to_string(),
            ));
        }
        let (min, max) = dataset.min_max().unwrap_or((0.0, 0.0));
        let rescaled = map_samples(dataset, PixelType::F32, |value| {
            rescale(value, min, max, output_min, output_max)
        })?;
        Ok(OpOutput::dataset_only(rescaled))
    }
}

fn rescale(value: f32, min: f32, max: f32, output_min: f32, output_max: f32) -> f32 {
    if (max - min).abs() < f32::EPSILON {
        return output_min;
    }
    let unit = ((value - min) / (max - min)).clamp(0.0, 1.0);
    output_min + unit * (output_max - output_min)
}

/// Rescales the full intensity range onto `0..=255` for the grayscale backdrop.
pub fn rescale_to_display(dataset: &DatasetF32) -> DisplayVolume {
    let (min, max) = min_max(&dataset.to_vec());
    dataset.map_values(PixelType::U8, |value| {
        rescale(*value, min, max, 0.0, 255.0).round() as u8
    })
}
