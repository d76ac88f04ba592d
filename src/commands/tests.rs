use ndarray::{Array, Array3, IxDyn};
use serde_json::json;

use crate::model::{AxisKind, Dataset, Dim, Extent, Metadata, PixelType, Seed};

use super::{
    ConfidenceParams, confidence_connected, execute_operation, list_operations,
    rescale_to_display,
};

fn test_dataset(values: Vec<f32>, shape: (usize, usize)) -> Dataset<f32> {
    let data = Array::from_shape_vec(shape, values)
        .expect("shape")
        .into_dyn();
    let metadata = Metadata {
        dims: vec![
            Dim::new(AxisKind::Y, shape.0),
            Dim::new(AxisKind::X, shape.1),
        ],
        pixel_type: PixelType::F32,
        ..Metadata::default()
    };
    Dataset::new(data, metadata).expect("dataset")
}

fn volume(extent: Extent, f: impl Fn(usize, usize, usize) -> f32) -> Dataset<f32> {
    let data = Array3::from_shape_fn(extent.shape_zyx(), |(z, y, x)| f(x, y, z)).into_dyn();
    Dataset::new(data, Metadata::volume(extent, PixelType::F32)).expect("volume")
}

/// Bright 3x3x3 cube centred in a dark 7x7x7 volume.
fn cube_volume() -> Dataset<f32> {
    volume(Extent::new(7, 7, 7), |x, y, z| {
        let inside = (2..=4).contains(&x) && (2..=4).contains(&y) && (2..=4).contains(&z);
        if inside { 100.0 } else { 0.0 }
    })
}

#[test]
fn contains_required_operations() {
    let names = list_operations()
        .into_iter()
        .map(|schema| schema.name)
        .collect::<Vec<_>>();
    for expected in [
        "gaussian.blur",
        "intensity.normalize",
        "intensity.rescale",
        "intensity.window",
        "segment.confidence_connected",
    ] {
        assert!(names.contains(&expected.to_string()), "missing {expected}");
    }
}

#[test]
fn unknown_operation_is_reported() {
    let dataset = test_dataset(vec![0.0; 4], (2, 2));
    assert!(execute_operation("threshold.otsu", &dataset, &json!({})).is_err());
}

#[test]
fn gaussian_blur_smooths_spike() {
    let dataset = test_dataset(vec![0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0], (3, 3));
    let output =
        execute_operation("gaussian.blur", &dataset, &json!({"sigma": 1.0})).expect("blur");
    let center = output.dataset.data[IxDyn(&[1, 1])];
    let corner = output.dataset.data[IxDyn(&[0, 0])];
    assert!(center < 1.0);
    assert!(center > corner);
}

#[test]
fn gaussian_blur_preserves_flat_volume() {
    let dataset = volume(Extent::new(4, 4, 3), |_, _, _| 5.0);
    let output =
        execute_operation("gaussian.blur", &dataset, &json!({"sigma": 0.75})).expect("blur");
    assert!(output.dataset.data.iter().all(|v| (v - 5.0).abs() < 1e-4));
}

#[test]
fn window_clamps_to_level_and_width() {
    let dataset = test_dataset(vec![-1000.0, 0.0, 40.0, 3000.0], (2, 2));
    let output = execute_operation(
        "intensity.window",
        &dataset,
        &json!({"level": 40.0, "width": 400.0}),
    )
    .expect("window");
    assert_eq!(output.dataset.to_vec(), vec![-160.0, 0.0, 40.0, 240.0]);
}

#[test]
fn window_rejects_non_positive_width() {
    let dataset = test_dataset(vec![0.0, 0.5, 0.75, 1.0], (2, 2));
    let error = execute_operation(
        "intensity.window",
        &dataset,
        &json!({"level": 0.0, "width": 0.0}),
    )
    .expect_err("zero width");
    assert!(error.to_string().contains("width"));
}

#[test]
fn normalize_maps_range_to_unit_interval() {
    let dataset = test_dataset(vec![10.0, 20.0, 30.0, 50.0], (2, 2));
    let output = execute_operation("intensity.normalize", &dataset, &json!({})).expect("norm");
    assert_eq!(output.dataset.to_vec(), vec![0.0, 0.25, 0.5, 1.0]);
}

#[test]
fn rescale_defaults_to_byte_range() {
    let dataset = test_dataset(vec![-1.0, 0.0, 1.0, 1.0], (2, 2));
    let output = execute_operation("intensity.rescale", &dataset, &json!({})).expect("rescale");
    assert_eq!(output.dataset.to_vec(), vec![0.0, 127.5, 255.0, 255.0]);

    let display = rescale_to_display(&dataset);
    assert_eq!(display.metadata.pixel_type, PixelType::U8);
    assert_eq!(display.to_vec(), vec![0, 128, 255, 255]);
}

#[test]
fn confidence_connected_fills_bright_cube() {
    let dataset = cube_volume();
    let growth = confidence_connected(
        &dataset,
        &[Seed::new(3, 3, 3)],
        &ConfidenceParams::default(),
    )
    .expect("grow");
    assert_eq!(growth.voxel_count, 27);
    let extent = growth.extent;
    assert!(growth.mask[extent.offset(Seed::new(2, 2, 2))]);
    assert!(!growth.mask[extent.offset(Seed::new(1, 3, 3))]);
    assert!(growth.lower <= 100.0 && growth.upper >= 100.0);
}

#[test]
fn confidence_connected_stays_face_connected() {
    // Two bright voxels touching only at an edge.
    let dataset = volume(Extent::new(4, 4, 1), |x, y, _| {
        if (x, y) == (1, 1) || (x, y) == (2, 2) { 1.0 } else { 0.0 }
    });
    let params = ConfidenceParams {
        multiplier: 0.0,
        iterations: 0,
        initial_radius: 0,
    };
    let growth = confidence_connected(&dataset, &[Seed::new(1, 1, 0)], &params).expect("grow");
    assert_eq!(growth.voxel_count, 1);
}

#[test]
fn confidence_connected_ignores_out_of_bounds_seeds() {
    let dataset = cube_volume();
    let growth = confidence_connected(
        &dataset,
        &[Seed::new(70, 3, 3)],
        &ConfidenceParams::default(),
    )
    .expect("grow");
    assert_eq!(growth.voxel_count, 0);
    assert!(growth.mask.iter().all(|inside| !inside));
}

#[test]
fn confidence_connected_always_keeps_seed_voxels() {
    let dataset = cube_volume();
    let seeds = [Seed::new(3, 3, 3), Seed::new(0, 0, 0)];
    let params = ConfidenceParams {
        multiplier: 0.0,
        ..ConfidenceParams::default()
    };
    let growth = confidence_connected(&dataset, &seeds, &params).expect("grow");
    let extent = growth.extent;
    for seed in seeds {
        assert!(growth.mask[extent.offset(seed)]);
    }
}

#[test]
fn confidence_connected_operation_writes_label() {
    let dataset = cube_volume();
    let output = execute_operation(
        "segment.confidence_connected",
        &dataset,
        &json!({"seeds": [[3, 3, 3]], "label": 4}),
    )
    .expect("segment");
    assert_eq!(output.dataset.data[IxDyn(&[3, 3, 3])], 4.0);
    assert_eq!(output.dataset.data[IxDyn(&[0, 0, 0])], 0.0);
    let count = output
        .measurements
        .as_ref()
        .and_then(|table| table.values.get("voxel_count"))
        .and_then(|value| value.as_u64())
        .expect("count");
    assert_eq!(count, 27);
}

#[test]
fn confidence_connected_operation_rejects_malformed_seeds() {
    let dataset = cube_volume();
    let error = execute_operation(
        "segment.confidence_connected",
        &dataset,
        &json!({"seeds": [[3, 3]]}),
    )
    .expect_err("bad seeds");
    assert!(error.to_string().contains("seed"));
}
