use crate::model::{Dataset, DatasetF32};
use ndarray::{ArrayD, Axis, Zip};
use serde_json::Value;

use super::{
    OpOutput, OpSchema, Operation, OpsError, ParamSpec, Result, get_optional_bool,
    get_optional_f32, spatial_axes, util::gaussian_kernel,
};

#[derive(Debug, Clone, Copy)]
pub struct GaussianBlurOp;

impl Operation for GaussianBlurOp {
    fn name(&self) -> &'static str {
        "gaussian.blur"
    }

    fn schema(&self) -> OpSchema {
        OpSchema {
            name: self.name().to_string(),
            description: "Separable Gaussian smoothing across spatial axes (X/Y/Z).".to_string(),
            params: vec![
                ParamSpec::optional(
                    "sigma",
                    "float",
                    "Standard deviation, in physical units when axis spacing is known.",
                ),
                ParamSpec::optional(
                    "use_spacing",
                    "bool",
                    "Divide sigma by the axis spacing (default true).",
                ),
            ],
        }
    }

    fn execute(&self, dataset: &DatasetF32, params: &Value) -> Result<OpOutput> {
        let sigma = get_optional_f32(params, "sigma", 1.0);
        if sigma < 0.0 {
            return Err(OpsError::InvalidParams("`sigma` must be >= 0".to_string()));
        }
        if sigma <= f32::EPSILON {
            return Ok(OpOutput::dataset_only(dataset.clone()));
        }
        let axes = spatial_axes(dataset);
        if axes.is_empty() {
            return Err(OpsError::UnsupportedLayout(
                "dataset has no spatial axes".to_string(),
            ));
        }
        let use_spacing = get_optional_bool(params, "use_spacing", true);

        let mut data = dataset.data.as_standard_layout().into_owned();
        for axis in axes {
            if data.shape()[axis] <= 1 {
                continue;
            }
            let spacing = dataset.metadata.dims[axis]
                .spacing
                .filter(|_| use_spacing)
                .unwrap_or(1.0);
            blur_axis(&mut data, Axis(axis), &gaussian_kernel(sigma / spacing));
        }

        let output_dataset = Dataset::new(data, dataset.metadata.clone())?;
        Ok(OpOutput::dataset_only(output_dataset))
    }
}

/// Convolves every lane along `axis`, replicating edge samples at the borders.
fn blur_axis(data: &mut ArrayD<f32>, axis: Axis, kernel: &[f32]) {
    let radius = (kernel.len() / 2) as isize;
    Zip::from(data.lanes_mut(axis)).par_for_each(|mut lane| {
        let source = lane.to_vec();
        let last = source.len() as isize - 1;
        for (coord, output) in lane.iter_mut().enumerate() {
            *output = kernel
                .iter()
                .enumerate()
                .map(|(tap, weight)| {
                    let sample = (coord as isize + tap as isize - radius).clamp(0, last);
                    source[sample as usize] * weight
                })
                .sum();
        }
    });
}
