use std::sync::Arc;

use crate::commands::{
    OpOutput, OpSchema, Registry, default_registry, execute_operation_with_registry,
    sorted_schemas,
};
use crate::model::DatasetF32;
use serde_json::Value;

use super::Result;

/// Operation table shared by the CLI and the pipeline service.
#[derive(Clone)]
pub struct OpsService {
    registry: Arc<Registry>,
}

impl std::fmt::Debug for OpsService {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names = self.registry.keys().copied().collect::<Vec<_>>();
        names.sort_unstable();
        formatter
            .debug_struct("OpsService")
            .field("operations", &names)
            .finish()
    }
}

impl Default for OpsService {
    fn default() -> Self {
        Self {
            registry: Arc::new(default_registry()),
        }
    }
}

impl OpsService {
    pub fn list(&self) -> Vec<OpSchema> {
        sorted_schemas(&self.registry)
    }

    pub fn contains(&self, op: &str) -> bool {
        self.registry.contains_key(op)
    }

    pub fn execute(&self, op: &str, dataset: &DatasetF32, params: &Value) -> Result<OpOutput> {
        log::debug!("executing {op}");
        Ok(execute_operation_with_registry(
            &self.registry,
            op,
            dataset,
            params,
        )?)
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}
