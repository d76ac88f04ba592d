use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use crate::model::DatasetF32;
use serde_json::Value;

use super::{
    ConfidenceConnectedOp, GaussianBlurOp, IntensityNormalizeOp, IntensityRescaleOp,
    IntensityWindowOp, OpOutput, OpSchema, Operation, OpsError, Result,
};

pub type Registry = HashMap<&'static str, Arc<dyn Operation>>;

fn register<O: Operation + 'static>(map: &mut Registry, operation: O) {
    map.insert(operation.name(), Arc::new(operation));
}

fn registry() -> &'static Registry {
    static REGISTRY: OnceLock<Registry> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        let mut map: Registry = HashMap::new();
        register(&mut map, IntensityWindowOp);
        register(&mut map, IntensityNormalizeOp);
        register(&mut map, IntensityRescaleOp);
        register(&mut map, GaussianBlurOp);
        register(&mut map, ConfidenceConnectedOp);
        map
    })
}

/// Owned copy of the built-in operations, for services that carry their own table.
pub fn default_registry() -> Registry {
    registry().clone()
}

/// Schemas of `registry`, sorted by operation name.
pub fn sorted_schemas(registry: &Registry) -> Vec<OpSchema> {
    let mut schemas = registry.values().map(|op| op.schema()).collect::<Vec<_>>();
    schemas.sort_by(|left, right| left.name.cmp(&right.name));
    schemas
}

pub fn list_operations() -> Vec<OpSchema> {
    sorted_schemas(registry())
}

pub fn execute_operation(name: &str, dataset: &DatasetF32, params: &Value) -> Result<OpOutput> {
    execute_operation_with_registry(registry(), name, dataset, params)
}

pub fn execute_operation_with_registry(
    registry: &Registry,
    name: &str,
    dataset: &DatasetF32,
    params: &Value,
) -> Result<OpOutput> {
    let op = registry
        .get(name)
        .ok_or_else(|| OpsError::UnknownOperation(name.to_string()))?;
    op.execute(dataset, params)
}
