use std::path::Path;

use crate::model::DatasetF32;
use crate::workflow::{
    CtWindow, PipelineReport, PipelineSpec, load_spec, run_pipeline, save_report,
};

use super::{OpsService, Result};

#[derive(Debug, Clone, Default)]
pub struct PipelineService {
    ops: OpsService,
}

impl PipelineService {
    pub fn new(ops: OpsService) -> Self {
        Self { ops }
    }

    pub fn load_spec(&self, path: impl AsRef<Path>) -> Result<PipelineSpec> {
        Ok(load_spec(path)?)
    }

    pub fn run(
        &self,
        spec: &PipelineSpec,
        input: &DatasetF32,
    ) -> Result<(DatasetF32, PipelineReport)> {
        Ok(run_pipeline(spec, input, self.ops.registry())?)
    }

    /// Runs `recipe` when given, otherwise the default window/normalize/denoise chain.
    pub fn preprocess(
        &self,
        input: &DatasetF32,
        window: CtWindow,
        recipe: Option<&Path>,
    ) -> Result<(DatasetF32, PipelineReport)> {
        let spec = match recipe {
            Some(path) => self.load_spec(path)?,
            None => PipelineSpec::preprocessing(window),
        };
        log::info!(
            "preprocessing with {} ({} steps)",
            spec.name.as_deref().unwrap_or("unnamed pipeline"),
            spec.operations.len()
        );
        self.run(&spec, input)
    }

    pub fn save_report(&self, path: impl AsRef<Path>, report: &PipelineReport) -> Result<()> {
        save_report(path, report)?;
        Ok(())
    }
}
