use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::{AxisKind, CoreError, Extent, PixelType, Result, default_axes_for_rank};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dim {
    pub axis: AxisKind,
    pub size: usize,
    pub spacing: Option<f32>,
    pub unit: Option<String>,
}

impl Dim {
    pub fn new(axis: AxisKind, size: usize) -> Self {
        Self {
            axis,
            size,
            spacing: None,
            unit: None,
        }
    }

    pub fn with_spacing(mut self, spacing: f32) -> Self {
        if spacing.is_finite() && spacing > 0.0 {
            self.spacing = Some(spacing);
            self.unit = Some("mm".to_string());
        }
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub dims: Vec<Dim>,
    pub pixel_type: PixelType,
    pub channel_names: Vec<String>,
    pub source: Option<PathBuf>,
    pub extras: BTreeMap<String, serde_json::Value>,
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            dims: Vec::new(),
            pixel_type: PixelType::F32,
            channel_names: Vec::new(),
            source: None,
            extras: BTreeMap::new(),
        }
    }
}

impl Metadata {
    pub fn from_shape(shape: &[usize], pixel_type: PixelType) -> Self {
        let dims = shape
            .iter()
            .zip(default_axes_for_rank(shape.len()))
            .map(|(size, axis)| Dim::new(axis, *size))
            .collect();
        Self {
            dims,
            pixel_type,
            ..Self::default()
        }
    }

    pub fn volume(extent: Extent, pixel_type: PixelType) -> Self {
        Self::from_shape(&extent.shape_zyx(), pixel_type)
    }

    /// Copy of `self` describing the same grid with a trailing RGB channel axis.
    pub fn with_rgb_channels(&self, pixel_type: PixelType) -> Self {
        let mut dims = self
            .dims
            .iter()
            .filter(|dim| dim.axis != AxisKind::Channel)
            .cloned()
            .collect::<Vec<_>>();
        dims.push(Dim::new(AxisKind::Channel, 3));
        Self {
            dims,
            pixel_type,
            channel_names: vec!["R".into(), "G".into(), "B".into()],
            source: self.source.clone(),
            extras: self.extras.clone(),
        }
    }

    pub fn shape(&self) -> Vec<usize> {
        self.dims.iter().map(|d| d.size).collect()
    }

    pub fn axes(&self) -> Vec<AxisKind> {
        self.dims.iter().map(|d| d.axis).collect()
    }

    pub fn axis_index(&self, axis: AxisKind) -> Option<usize> {
        self.dims.iter().position(|d| d.axis == axis)
    }

    pub fn spacing(&self, axis: AxisKind) -> Option<f32> {
        self.axis_index(axis).and_then(|index| self.dims[index].spacing)
    }

    pub fn validate_shape(&self, shape: &[usize]) -> Result<()> {
        if self.dims.len() != shape.len() {
            return Err(CoreError::DimensionalityMismatch {
                data_ndim: shape.len(),
                meta_ndim: self.dims.len(),
            });
        }
        for (axis, (dim, actual)) in self.dims.iter().zip(shape).enumerate() {
            if dim.size == 0 {
                return Err(CoreError::ZeroSizedDimension { axis });
            }
            if dim.size != *actual {
                return Err(CoreError::DimensionSizeMismatch {
                    axis,
                    data_size: *actual,
                    meta_size: dim.size,
                });
            }
        }
        Ok(())
    }
}
