use std::path::Path;

use crate::model::{AxisKind, Dataset, DatasetF32, Dim, Extent, PixelType};
use ndarray::Array3;
use nifti::{IntoNdArray, NiftiObject, ReaderOptions};

use super::util::volume_metadata;
use super::{IoError, Result};

pub(crate) fn read_nifti(path: &Path) -> Result<DatasetF32> {
    let object = ReaderOptions::new().read_file(path)?;
    let header = object.header().clone();
    let volume = object.into_volume().into_ndarray::<f32>()?;

    let extent = match volume.shape() {
        [width, height] => Extent::new(*width, *height, 1),
        [width, height, depth] | [width, height, depth, 1] => {
            Extent::new(*width, *height, *depth)
        }
        other => {
            return Err(IoError::UnsupportedLayout(format!(
                "NIfTI input must be a single 3D volume, found shape {other:?}"
            )));
        }
    };

    // NIfTI arrays are indexed [X, Y, Z]; the logical iteration order therefore
    // advances Z fastest and has to be scattered into the [Z, Y, X] buffer.
    let (width, height, depth) = (extent.width, extent.height, extent.depth);
    let mut values = vec![0.0_f32; extent.voxel_count()];
    for (index, value) in volume.iter().enumerate() {
        let z = index % depth;
        let y = (index / depth) % height;
        let x = index / (depth * height);
        values[(z * height + y) * width + x] = *value;
    }

    let data = Array3::from_shape_vec(extent.shape_zyx(), values)
        .expect("voxel count matches extent")
        .into_dyn();
    let mut metadata = volume_metadata(path, extent, pixel_type_for(header.datatype));
    metadata.dims = vec![
        Dim::new(AxisKind::Z, depth).with_spacing(header.pixdim[3]),
        Dim::new(AxisKind::Y, height).with_spacing(header.pixdim[2]),
        Dim::new(AxisKind::X, width).with_spacing(header.pixdim[1]),
    ];
    metadata
        .extras
        .insert("nifti_datatype".into(), serde_json::json!(header.datatype));
    Ok(Dataset::new(data, metadata)?)
}

fn pixel_type_for(datatype: i16) -> PixelType {
    match datatype {
        2 => PixelType::U8,
        4 => PixelType::I16,
        512 => PixelType::U16,
        _ => PixelType::F32,
    }
}
