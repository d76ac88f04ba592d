use std::collections::{HashSet, VecDeque};

use crate::model::{Dataset, DatasetF32, Extent, PixelType, Seed};
use ndarray::{Array, IxDyn};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::{
    MeasurementTable, OpOutput, OpSchema, Operation, OpsError, ParamSpec, Result,
    get_optional_f32, get_optional_usize, get_required_seeds, util::mean_std,
};

/// Tuning of the confidence-connected criterion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceParams {
    /// Half-width of the accepted interval, in standard deviations.
    pub multiplier: f32,
    /// Re-estimation passes after the initial fill.
    pub iterations: usize,
    /// Radius of the cube around each seed used for the initial statistics.
    pub initial_radius: usize,
}

impl Default for ConfidenceParams {
    fn default() -> Self {
        Self {
            multiplier: 2.0,
            iterations: 1,
            initial_radius: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GrowthResult {
    pub extent: Extent,
    pub mask: Vec<bool>,
    pub lower: f32,
    pub upper: f32,
    pub voxel_count: usize,
}

impl GrowthResult {
    fn empty(extent: Extent) -> Self {
        Self {
            extent,
            mask: vec![false; extent.voxel_count()],
            lower: 0.0,
            upper: 0.0,
            voxel_count: 0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Interval {
    lower: f32,
    upper: f32,
}

impl Interval {
    fn around(mean: f32, std: f32, multiplier: f32, seed_values: &[f32]) -> Self {
        let mut interval = Self {
            lower: mean - multiplier * std,
            upper: mean + multiplier * std,
        };
        for value in seed_values {
            interval.lower = interval.lower.min(*value);
            interval.upper = interval.upper.max(*value);
        }
        interval
    }

    fn contains(&self, value: f32) -> bool {
        value >= self.lower && value <= self.upper
    }
}

/// Grows a region from `seeds` over face-connected voxels whose intensity lies
/// within `mean ± multiplier·σ`, re-estimating the statistics from the grown
/// region `iterations` times.
pub fn confidence_connected(
    volume: &DatasetF32,
    seeds: &[Seed],
    params: &ConfidenceParams,
) -> Result<GrowthResult> {
    let extent = volume.extent()?;
    if volume.channels() != 1 {
        return Err(OpsError::NotGrayscale(volume.channels()));
    }
    if !params.multiplier.is_finite() || params.multiplier < 0.0 {
        return Err(OpsError::InvalidParams(
            "`multiplier` must be a non-negative number".to_string(),
        ));
    }

    let seeds = seeds
        .iter()
        .copied()
        .filter(|seed| {
            let inside = extent.contains(*seed);
            if !inside {
                log::warn!("ignoring seed {seed:?} outside volume {extent:?}");
            }
            inside
        })
        .collect::<Vec<_>>();
    if seeds.is_empty() {
        return Ok(GrowthResult::empty(extent));
    }

    let values = volume.to_vec();
    let seed_values = seeds
        .iter()
        .map(|seed| values[extent.offset(*seed)])
        .collect::<Vec<_>>();

    let neighborhood = seed_neighborhood(extent, &seeds, params.initial_radius);
    let (mean, std) = mean_std(neighborhood.iter().map(|offset| values[*offset]))
        .unwrap_or((seed_values[0], 0.0));
    let mut interval = Interval::around(mean, std, params.multiplier, &seed_values);
    let mut mask = flood_fill(&values, extent, &seeds, interval);

    for pass in 0..params.iterations {
        let region = mask
            .iter()
            .zip(&values)
            .filter_map(|(inside, value)| inside.then_some(*value));
        let Some((mean, std)) = mean_std(region) else {
            break;
        };
        interval = Interval::around(mean, std, params.multiplier, &seed_values);
        mask = flood_fill(&values, extent, &seeds, interval);
        log::debug!(
            "confidence pass {pass}: mean {mean:.4} std {std:.4} -> [{:.4}, {:.4}]",
            interval.lower,
            interval.upper
        );
    }

    let voxel_count = mask.iter().filter(|inside| **inside).count();
    Ok(GrowthResult {
        extent,
        mask,
        lower: interval.lower,
        upper: interval.upper,
        voxel_count,
    })
}

fn seed_neighborhood(extent: Extent, seeds: &[Seed], radius: usize) -> HashSet<usize> {
    let mut offsets = HashSet::new();
    for seed in seeds {
        let z_range = seed.z.saturating_sub(radius)..=(seed.z + radius).min(extent.depth - 1);
        for z in z_range {
            for y in seed.y.saturating_sub(radius)..=(seed.y + radius).min(extent.height - 1) {
                for x in seed.x.saturating_sub(radius)..=(seed.x + radius).min(extent.width - 1) {
                    offsets.insert(extent.offset(Seed::new(x, y, z)));
                }
            }
        }
    }
    offsets
}

fn flood_fill(values: &[f32], extent: Extent, seeds: &[Seed], interval: Interval) -> Vec<bool> {
    let mut mask = vec![false; values.len()];
    let mut queue = VecDeque::new();
    for seed in seeds {
        let offset = extent.offset(*seed);
        if !mask[offset] && interval.contains(values[offset]) {
            mask[offset] = true;
            queue.push_back(offset);
        }
    }

    while let Some(offset) = queue.pop_front() {
        for neighbor in extent.face_neighbors(offset) {
            if mask[neighbor] || !interval.contains(values[neighbor]) {
                continue;
            }
            mask[neighbor] = true;
            queue.push_back(neighbor);
        }
    }
    mask
}

#[derive(Debug, Clone, Copy)]
pub struct ConfidenceConnectedOp;

impl Operation for ConfidenceConnectedOp {
    fn name(&self) -> &'static str {
        "segment.confidence_connected"
    }

    fn schema(&self) -> OpSchema {
        OpSchema {
            name: self.name().to_string(),
            description: "Seeded confidence-connected region growing; outputs label * mask."
                .to_string(),
            params: vec![
                ParamSpec::required("seeds", "array", "Seed voxels as [[x, y, z], ...]."),
                ParamSpec::optional("multiplier", "float", "Interval half-width in σ (2.0)."),
                ParamSpec::optional("iterations", "int", "Re-estimation passes (1)."),
                ParamSpec::optional("radius", "int", "Initial neighbourhood radius (1)."),
                ParamSpec::optional("label", "float", "Value written into the region (1)."),
            ],
        }
    }

    fn execute(&self, dataset: &DatasetF32, params: &Value) -> Result<OpOutput> {
        let defaults = ConfidenceParams::default();
        let seeds = get_required_seeds(params, "seeds")?;
        let growth = confidence_connected(
            dataset,
            &seeds,
            &ConfidenceParams {
                multiplier: get_optional_f32(params, "multiplier", defaults.multiplier),
                iterations: get_optional_usize(params, "iterations", defaults.iterations),
                initial_radius: get_optional_usize(params, "radius", defaults.initial_radius),
            },
        )?;
        let label = get_optional_f32(params, "label", 1.0);

        let values = growth
            .mask
            .iter()
            .map(|inside| if *inside { label } else { 0.0 })
            .collect::<Vec<_>>();
        let data = Array::from_shape_vec(IxDyn(dataset.shape()), values)
            .expect("mask covers every voxel");
        let mut metadata = dataset.metadata.clone();
        metadata.pixel_type = PixelType::U16;

        let measurements = MeasurementTable::default()
            .with("voxel_count", json!(growth.voxel_count))
            .with("lower", json!(growth.lower))
            .with("upper", json!(growth.upper));
        Ok(OpOutput {
            dataset: Dataset::new(data, metadata)?,
            measurements: Some(measurements),
        })
    }
}
