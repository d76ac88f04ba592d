use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::{CtWindow, DENOISE_SIGMA, PipelineError, Result};

/// An ordered list of registry operations, loaded from a recipe or built in code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PipelineSpec {
    pub name: Option<String>,
    #[serde(default)]
    pub operations: Vec<OpInvocation>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OpInvocation {
    pub op: String,
    #[serde(default)]
    pub params: Value,
}

impl OpInvocation {
    pub fn new(op: &str, params: Value) -> Self {
        Self {
            op: op.to_string(),
            params,
        }
    }
}

impl PipelineSpec {
    /// Window (when the width is positive), normalize to `[0, 1]`, then denoise.
    pub fn preprocessing(window: CtWindow) -> Self {
        let mut operations = Vec::with_capacity(3);
        if window.width > 0 {
            operations.push(OpInvocation::new(
                "intensity.window",
                json!({"level": window.level, "width": window.width}),
            ));
        }
        operations.push(OpInvocation::new("intensity.normalize", json!({})));
        operations.push(OpInvocation::new(
            "gaussian.blur",
            json!({"sigma": DENOISE_SIGMA}),
        ));
        Self {
            name: Some("preprocess".to_string()),
            operations,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.operations.is_empty() {
            return Err(PipelineError::Parse(
                "pipeline must include at least one operation".to_string(),
            ));
        }
        for (index, step) in self.operations.iter().enumerate() {
            if step.op.trim().is_empty() {
                return Err(PipelineError::Parse(format!(
                    "operation at index {index} has an empty name"
                )));
            }
            if !step.params.is_object() && !step.params.is_null() {
                return Err(PipelineError::Parse(format!(
                    "operation `{}` parameters must be a JSON object",
                    step.op
                )));
            }
        }
        Ok(())
    }
}
