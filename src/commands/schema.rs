use crate::model::DatasetF32;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Result;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParamSpec {
    pub name: String,
    pub description: String,
    pub required: bool,
    pub kind: String,
}

impl ParamSpec {
    pub fn required(name: &str, kind: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            required: true,
            kind: kind.to_string(),
        }
    }

    pub fn optional(name: &str, kind: &str, description: &str) -> Self {
        Self {
            required: false,
            ..Self::required(name, kind, description)
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OpSchema {
    pub name: String,
    pub description: String,
    pub params: Vec<ParamSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct MeasurementTable {
    pub values: std::collections::BTreeMap<String, Value>,
}

impl MeasurementTable {
    pub fn with(mut self, key: &str, value: Value) -> Self {
        self.values.insert(key.to_string(), value);
        self
    }
}

#[derive(Debug, Clone)]
pub struct OpOutput {
    pub dataset: DatasetF32,
    pub measurements: Option<MeasurementTable>,
}

impl OpOutput {
    pub fn dataset_only(dataset: DatasetF32) -> Self {
        Self {
            dataset,
            measurements: None,
        }
    }
}

pub trait Operation: Send + Sync {
    fn name(&self) -> &'static str;
    fn schema(&self) -> OpSchema;
    fn execute(&self, dataset: &DatasetF32, params: &Value) -> Result<OpOutput>;
}
