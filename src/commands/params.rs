use crate::model::Seed;
use serde_json::Value;

use super::{OpsError, Result};

pub(crate) fn get_required_f32(params: &Value, key: &str) -> Result<f32> {
    params
        .get(key)
        .and_then(Value::as_f64)
        .map(|v| v as f32)
        .ok_or_else(|| OpsError::InvalidParams(format!("missing float parameter `{key}`")))
}

pub(crate) fn get_optional_f32(params: &Value, key: &str, default: f32) -> f32 {
    params
        .get(key)
        .and_then(Value::as_f64)
        .map(|v| v as f32)
        .unwrap_or(default)
}

pub(crate) fn get_optional_usize(params: &Value, key: &str, default: usize) -> usize {
    params
        .get(key)
        .and_then(Value::as_u64)
        .map(|v| v as usize)
        .unwrap_or(default)
}

pub(crate) fn get_optional_bool(params: &Value, key: &str, default: bool) -> bool {
    params.get(key).and_then(Value::as_bool).unwrap_or(default)
}

/// Parses `[[x, y, z], ...]` voxel coordinates.
pub(crate) fn get_required_seeds(params: &Value, key: &str) -> Result<Vec<Seed>> {
    let entries = params
        .get(key)
        .and_then(Value::as_array)
        .ok_or_else(|| OpsError::InvalidParams(format!("missing seed list `{key}`")))?;
    entries
        .iter()
        .map(|entry| {
            let coords = entry
                .as_array()
                .filter(|coords| coords.len() == 3)
                .and_then(|coords| {
                    coords
                        .iter()
                        .map(|value| value.as_u64().map(|v| v as usize))
                        .collect::<Option<Vec<_>>>()
                })
                .ok_or_else(|| {
                    OpsError::InvalidParams(format!(
                        "seed {entry} must be three non-negative integers"
                    ))
                })?;
            Ok(Seed::new(coords[0], coords[1], coords[2]))
        })
        .collect()
}
