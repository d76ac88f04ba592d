use std::path::Path;
use std::sync::Arc;

use crate::commands::ConfidenceParams;
use crate::model::DatasetF32;
use crate::segment::{ConfidenceConnectedGrower, Controller, SeededColors, SessionConfig};
use crate::workflow::CtWindow;

use super::{DatasetService, DatasetSummary, IoService, OpsService, PipelineService, Result};

/// Controller wired to the production grower and color source.
pub type SegmentationController = Controller<ConfidenceConnectedGrower, SeededColors>;

#[derive(Debug, Clone)]
pub struct AppContext {
    dataset_service: DatasetService,
    io_service: IoService,
    ops_service: OpsService,
    pipeline_service: PipelineService,
}

impl Default for AppContext {
    fn default() -> Self {
        let ops_service = OpsService::default();
        Self {
            dataset_service: DatasetService,
            io_service: IoService::default(),
            pipeline_service: PipelineService::new(ops_service.clone()),
            ops_service,
        }
    }
}

impl AppContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dataset_service(&self) -> &DatasetService {
        &self.dataset_service
    }

    pub fn io_service(&self) -> &IoService {
        &self.io_service
    }

    pub fn ops_service(&self) -> &OpsService {
        &self.ops_service
    }

    pub fn pipeline_service(&self) -> &PipelineService {
        &self.pipeline_service
    }

    /// Reads and preprocesses the volume a viewing session segments. The
    /// summary describes the volume as stored on disk.
    pub fn load_session_volume(
        &self,
        path: &Path,
        window: CtWindow,
        recipe: Option<&Path>,
    ) -> Result<(DatasetSummary, Arc<DatasetF32>)> {
        let raw = self.io_service.read(path)?;
        let summary = self.dataset_service.summarize(&raw)?;
        let (volume, _) = self.pipeline_service.preprocess(&raw, window, recipe)?;
        self.dataset_service.validate(&volume)?;
        Ok((summary, Arc::new(volume)))
    }

    pub fn segmentation_controller(
        &self,
        volume: Arc<DatasetF32>,
        params: ConfidenceParams,
        color_seed: Option<u64>,
        config: SessionConfig,
    ) -> Result<SegmentationController> {
        Ok(Controller::new(
            volume,
            ConfidenceConnectedGrower::new(params),
            SeededColors::new(color_seed),
            config,
        )?)
    }
}
