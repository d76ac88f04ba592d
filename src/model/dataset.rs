use ndarray::{ArrayD, Axis};

use super::{AxisKind, CoreError, Extent, Metadata, PixelType, Result};

#[derive(Debug, Clone)]
pub struct Dataset<T> {
    pub data: ArrayD<T>,
    pub metadata: Metadata,
}

impl<T> Dataset<T> {
    pub fn new(data: ArrayD<T>, metadata: Metadata) -> Result<Self> {
        metadata.validate_shape(data.shape())?;
        Ok(Self { data, metadata })
    }

    pub fn from_data_with_default_metadata(data: ArrayD<T>, pixel_type: PixelType) -> Self {
        let metadata = Metadata::from_shape(data.shape(), pixel_type);
        Self { data, metadata }
    }

    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    pub fn ndim(&self) -> usize {
        self.data.ndim()
    }

    pub fn axis_index(&self, axis: AxisKind) -> Option<usize> {
        self.metadata.axis_index(axis)
    }

    pub fn validate(&self) -> Result<()> {
        self.metadata.validate_shape(self.data.shape())
    }

    /// Spatial size of a `[Z, Y, X]` or `[Y, X]` dataset, ignoring a trailing
    /// channel axis. Two-dimensional data counts as a single slice.
    pub fn extent(&self) -> Result<Extent> {
        let axes = self.metadata.axes();
        let shape = self.shape();
        match axes.as_slice() {
            [AxisKind::Z, AxisKind::Y, AxisKind::X]
            | [AxisKind::Z, AxisKind::Y, AxisKind::X, AxisKind::Channel] => {
                Ok(Extent::new(shape[2], shape[1], shape[0]))
            }
            [AxisKind::Y, AxisKind::X] | [AxisKind::Y, AxisKind::X, AxisKind::Channel] => {
                Ok(Extent::new(shape[1], shape[0], 1))
            }
            _ => Err(CoreError::UnsupportedLayout(axes)),
        }
    }

    pub fn channels(&self) -> usize {
        self.axis_index(AxisKind::Channel)
            .map(|index| self.shape()[index])
            .unwrap_or(1)
    }

    pub fn map_values<U>(&self, pixel_type: PixelType, f: impl Fn(&T) -> U) -> Dataset<U> {
        let mut metadata = self.metadata.clone();
        metadata.pixel_type = pixel_type;
        Dataset {
            data: self.data.map(f),
            metadata,
        }
    }
}

impl<T: Copy> Dataset<T> {
    /// All samples in logical `[Z, Y, X(, C)]` order.
    pub fn to_vec(&self) -> Vec<T> {
        self.data
            .as_slice()
            .map(<[T]>::to_vec)
            .unwrap_or_else(|| self.data.iter().copied().collect())
    }

    /// Samples of depth slice `z`, row-major with interleaved channels.
    pub fn slice_samples(&self, z: usize) -> Result<Vec<T>> {
        let extent = self.extent()?;
        if z >= extent.depth {
            return Err(CoreError::SliceOutOfRange {
                index: z,
                depth: extent.depth,
            });
        }
        let samples = match self.axis_index(AxisKind::Z) {
            Some(axis) => self.data.index_axis(Axis(axis), z).iter().copied().collect(),
            None => self.data.iter().copied().collect(),
        };
        Ok(samples)
    }
}

impl Dataset<f32> {
    pub fn min_max(&self) -> Option<(f32, f32)> {
        let mut iter = self.data.iter().copied().filter(|value| value.is_finite());
        let first = iter.next()?;
        Some(iter.fold((first, first), |(min, max), value| {
            (min.min(value), max.max(value))
        }))
    }
}

pub type DatasetF32 = Dataset<f32>;

/// 8-bit grayscale backdrop or RGB composite shown by the viewer.
pub type DisplayVolume = Dataset<u8>;

/// Per-voxel region labels, `0` meaning unlabeled.
pub type LabelVolume = Dataset<u16>;
