use std::path::Path;

use crate::formats::{DefaultVolumeCodec, VolumeReader, VolumeWriter, supported_formats};
use crate::model::DatasetF32;

use super::{AppError, Result};

#[derive(Debug, Default, Clone, Copy)]
pub struct IoService {
    codec: DefaultVolumeCodec,
}

impl IoService {
    pub fn read(&self, path: impl AsRef<Path>) -> Result<DatasetF32> {
        let path = path.as_ref();
        if !self.codec.supports(path) {
            return Err(AppError::UnsupportedInput(path.to_path_buf()));
        }
        let dataset = self.codec.read(path)?;
        log::info!("loaded {} ({:?})", path.display(), dataset.shape());
        Ok(dataset)
    }

    pub fn write(&self, path: impl AsRef<Path>, dataset: &DatasetF32) -> Result<()> {
        self.codec.write(path.as_ref(), dataset)?;
        Ok(())
    }

    /// Extensions offered by the open-file dialog.
    pub fn extensions(&self) -> Vec<&'static str> {
        supported_formats()
            .iter()
            .copied()
            .filter(|extension| !extension.contains('.'))
            .collect()
    }
}
