use std::path::Path;

use image::{ImageBuffer, Luma};
use ndarray::{Array3, IxDyn};
use nifti::NiftiHeader;
use nifti::writer::WriterOptions;
use tempfile::tempdir;

use super::util::{VolumeFormat, extension, volume_format};
use super::{read_volume, write_labels, write_volume};
use crate::model::{AxisKind, Dataset, Extent, Metadata, PixelType};

fn ramp_volume(extent: Extent) -> Dataset<f32> {
    let values = (0..extent.voxel_count())
        .map(|index| index as f32 - 100.0)
        .collect();
    let data = Array3::from_shape_vec(extent.shape_zyx(), values)
        .expect("shape")
        .into_dyn();
    Dataset::new(data, Metadata::volume(extent, PixelType::F32)).expect("dataset")
}

#[test]
fn tiff_stack_roundtrip_keeps_depth_and_values() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("stack.tiff");
    let volume = ramp_volume(Extent::new(3, 2, 4));
    write_volume(&path, &volume).expect("write tiff");
    let restored = read_volume(&path).expect("read tiff");
    assert_eq!(restored.extent().expect("extent"), Extent::new(3, 2, 4));
    assert_eq!(restored.metadata.pixel_type, PixelType::F32);
    assert_eq!(restored.to_vec(), volume.to_vec());
}

#[test]
fn label_stack_is_written_as_sixteen_bit_pages() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("labels.tif");
    let extent = Extent::new(2, 2, 2);
    let values = vec![0_u16, 1, 1, 0, 0, 0, 2, 300];
    let data = Array3::from_shape_vec(extent.shape_zyx(), values)
        .expect("shape")
        .into_dyn();
    let labels = Dataset::new(data, Metadata::volume(extent, PixelType::U16)).expect("labels");
    write_labels(&path, &labels).expect("write labels");

    let restored = read_volume(&path).expect("read labels");
    assert_eq!(restored.metadata.pixel_type, PixelType::U16);
    assert_eq!(
        restored.to_vec(),
        vec![0.0, 1.0, 1.0, 0.0, 0.0, 0.0, 2.0, 300.0]
    );
}

#[test]
fn png_loads_as_single_slice_volume() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("slice.png");
    let image =
        ImageBuffer::<Luma<u8>, Vec<u8>>::from_vec(3, 2, vec![0, 51, 102, 153, 204, 255])
            .expect("image");
    image.save(&path).expect("save png");

    let volume = read_volume(&path).expect("read png");
    assert_eq!(volume.shape(), &[1, 2, 3]);
    assert_eq!(volume.axis_index(AxisKind::Z), Some(0));
    let (min, max) = volume.min_max().expect("values");
    assert!(min.abs() < 1e-6);
    assert!((max - 1.0).abs() < 1e-6);
}

#[test]
fn raster_write_rejects_stacks() {
    let dir = tempdir().expect("tempdir");
    let output = dir.path().join("bad.png");
    let volume = ramp_volume(Extent::new(2, 2, 3));
    let message = write_volume(Path::new(&output), &volume)
        .expect_err("must fail")
        .to_string();
    assert!(message.contains("single grayscale slice"));
}

#[test]
fn labels_require_tiff_output() {
    let dir = tempdir().expect("tempdir");
    let extent = Extent::new(1, 1, 1);
    let data = Array3::<u16>::zeros(extent.shape_zyx()).into_dyn();
    let labels = Dataset::new(data, Metadata::volume(extent, PixelType::U16)).expect("labels");
    assert!(write_labels(dir.path().join("labels.png"), &labels).is_err());
}

#[test]
fn compressed_nifti_extension_is_recognised() {
    assert_eq!(
        extension(Path::new("/data/CT_Scan.NII.GZ")).expect("ext"),
        "nii.gz"
    );
    assert_eq!(
        volume_format(Path::new("scan.nii.gz")).expect("format"),
        VolumeFormat::Nifti
    );
    assert!(volume_format(Path::new("scan.mha")).is_err());
    assert!(read_volume("missing-volume.nii").is_err());
}

#[test]
fn nifti_xyz_volume_is_read_as_zyx() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("scan.nii");
    let xyz = ndarray15::Array3::from_shape_fn((4, 3, 2), |(x, y, z)| {
        (100 * x + 10 * y + z) as f32
    });
    let mut header = NiftiHeader::default();
    header.pixdim = [1.0, 0.7, 0.8, 2.5, 1.0, 1.0, 1.0, 1.0];
    WriterOptions::new(&path)
        .reference_header(&header)
        .write_nifti(&xyz)
        .expect("write nifti");

    let volume = read_volume(&path).expect("read nifti");
    assert_eq!(volume.extent().expect("extent"), Extent::new(4, 3, 2));
    assert_eq!(volume.data.shape(), &[2, 3, 4]);
    assert_eq!(volume.data[IxDyn(&[1, 2, 3])], 321.0);
    assert_eq!(volume.data[IxDyn(&[0, 1, 2])], 210.0);
    assert_eq!(volume.data[IxDyn(&[1, 0, 0])], 1.0);
    assert_eq!(volume.metadata.spacing(AxisKind::X), Some(0.7));
    assert_eq!(volume.metadata.spacing(AxisKind::Y), Some(0.8));
    assert_eq!(volume.metadata.spacing(AxisKind::Z), Some(2.5));
}
