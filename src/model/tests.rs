use ndarray::{Array, Array3};

use super::{AxisKind, Dataset, Dim, Extent, Metadata, PixelType, Seed};

fn volume(extent: Extent) -> Dataset<f32> {
    let values = (0..extent.voxel_count()).map(|v| v as f32).collect();
    let data = Array3::from_shape_vec(extent.shape_zyx(), values)
        .expect("shape")
        .into_dyn();
    Dataset::new(data, Metadata::volume(extent, PixelType::F32)).expect("dataset")
}

#[test]
fn metadata_roundtrip_json() {
    let mut metadata = Metadata::from_shape(&[4, 5, 3], PixelType::I16);
    metadata.dims[2] = Dim::new(AxisKind::X, 3).with_spacing(0.7);
    metadata
        .extras
        .insert("modality".into(), serde_json::json!("CT"));
    let serialized = serde_json::to_string_pretty(&metadata).expect("serialize metadata");
    let restored: Metadata = serde_json::from_str(&serialized).expect("deserialize metadata");
    assert_eq!(restored, metadata);
    assert_eq!(restored.spacing(AxisKind::X), Some(0.7));
}

#[test]
fn dataset_rejects_invalid_metadata_shape() {
    let data = Array::from_shape_vec((2, 2), vec![0.0_f32, 1.0, 2.0, 3.0])
        .expect("shape")
        .into_dyn();
    let metadata = Metadata {
        dims: vec![Dim::new(AxisKind::X, 2)],
        ..Metadata::default()
    };
    assert!(Dataset::new(data, metadata).is_err());
}

#[test]
fn volume_extent_follows_depth_major_layout() {
    let dataset = volume(Extent::new(4, 3, 2));
    let extent = dataset.extent().expect("extent");
    assert_eq!(extent, Extent::new(4, 3, 2));
    assert_eq!(dataset.channels(), 1);
    assert_eq!(dataset.axis_index(AxisKind::Z), Some(0));
}

#[test]
fn unknown_axis_order_is_not_a_volume() {
    let data = Array::<f32, _>::zeros((2, 2, 2, 2, 2)).into_dyn();
    let dataset = Dataset::from_data_with_default_metadata(data, PixelType::F32);
    assert!(dataset.extent().is_err());
}

#[test]
fn slice_samples_pick_one_depth_plane() {
    let dataset = volume(Extent::new(2, 2, 3));
    assert_eq!(dataset.slice_samples(1).expect("slice"), vec![4.0, 5.0, 6.0, 7.0]);
    assert!(dataset.slice_samples(3).is_err());
}

#[test]
fn offsets_and_neighbors_stay_in_grid() {
    let extent = Extent::new(3, 3, 3);
    let corner = extent.offset(Seed::new(0, 0, 0));
    assert_eq!(extent.face_neighbors(corner).count(), 3);
    let center = extent.offset(Seed::new(1, 1, 1));
    assert_eq!(center, 13);
    assert_eq!(extent.seed_at(center), Seed::new(1, 1, 1));
    assert_eq!(extent.face_neighbors(center).count(), 6);
    assert_eq!(extent.clamp_slice(-4), 0);
    assert_eq!(extent.clamp_slice(9), 2);
}

#[test]
fn min_max_skips_non_finite_values() {
    let data = Array::from_shape_vec((1, 2, 2), vec![f32::NAN, -3.0, 5.0, 1.0])
        .expect("shape")
        .into_dyn();
    let dataset = Dataset::from_data_with_default_metadata(data, PixelType::F32);
    assert_eq!(dataset.min_max(), Some((-3.0, 5.0)));
}
