use std::path::Path;

use crate::model::DatasetF32;

use super::util::volume_format;
use super::{Result, read_volume, write_volume};

pub trait VolumeReader {
    fn supports(&self, path: &Path) -> bool;
    fn read(&self, path: &Path) -> Result<DatasetF32>;
}

pub trait VolumeWriter {
    fn write(&self, path: &Path, dataset: &DatasetF32) -> Result<()>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultVolumeCodec;

impl VolumeReader for DefaultVolumeCodec {
    fn supports(&self, path: &Path) -> bool {
        volume_format(path).is_ok()
    }

    fn read(&self, path: &Path) -> Result<DatasetF32> {
        read_volume(path)
    }
}

impl VolumeWriter for DefaultVolumeCodec {
    fn write(&self, path: &Path, dataset: &DatasetF32) -> Result<()> {
        write_volume(path, dataset)
    }
}
