use std::collections::HashMap;
use std::sync::Arc;

use crate::commands::{Operation, default_registry};
use crate::model::{Dataset, Extent, Metadata, PixelType};
use ndarray::Array3;
use serde_json::json;

use super::{
    CtWindow, OpInvocation, PipelineSpec, load_spec, normalize_window_width, run_pipeline,
    save_report,
};

fn test_volume() -> Dataset<f32> {
    let extent = Extent::new(4, 4, 3);
    let data = Array3::from_shape_fn(extent.shape_zyx(), |(z, y, x)| {
        -1000.0 + 100.0 * (x + y + z) as f32
    })
    .into_dyn();
    Dataset::new(data, Metadata::volume(extent, PixelType::I16)).expect("dataset")
}

fn registry() -> HashMap<&'static str, Arc<dyn Operation>> {
    default_registry()
}

#[test]
fn negative_width_is_made_positive() {
    assert_eq!(normalize_window_width(-40), (40, true));
    assert_eq!(normalize_window_width(40), (40, false));
    assert_eq!(normalize_window_width(0), (0, false));
    let (once, _) = normalize_window_width(-40);
    let (twice, corrected) = normalize_window_width(once as i32);
    assert_eq!(twice, once);
    assert!(!corrected);
    assert_eq!(normalize_window_width(i32::MIN).0, 2_147_483_648);
}

#[test]
fn preprocessing_skips_window_without_width() {
    let spec = PipelineSpec::preprocessing(CtWindow::default());
    let names = spec
        .operations
        .iter()
        .map(|step| step.op.as_str())
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["intensity.normalize", "gaussian.blur"]);

    let (window, corrected) = CtWindow::from_args(40, -400);
    assert!(corrected);
    let spec = PipelineSpec::preprocessing(window);
    assert_eq!(spec.operations[0].op, "intensity.window");
    assert_eq!(spec.operations[0].params, json!({"level": 40, "width": 400}));
    assert_eq!(spec.operations[2].params, json!({"sigma": 0.75}));
}

#[test]
fn preprocessing_yields_unit_range() {
    let (window, _) = CtWindow::from_args(-500, 600);
    let spec = PipelineSpec::preprocessing(window);
    let (result, report) = run_pipeline(&spec, &test_volume(), &registry()).expect("pipeline");
    assert_eq!(report.steps.len(), 3);
    assert_eq!(report.input_metadata.pixel_type, PixelType::I16);
    assert_eq!(report.output_metadata.pixel_type, PixelType::F32);
    assert!(
        result
            .data
            .iter()
            .all(|value| (-1e-5..=1.0 + 1e-5).contains(value))
    );
}

#[test]
fn pipeline_executes_in_order() {
    let spec = PipelineSpec {
        name: Some("test".to_string()),
        operations: vec![
            OpInvocation::new("intensity.normalize", json!({})),
            OpInvocation::new("intensity.rescale", json!({"output_min": 0, "output_max": 10})),
        ],
    };
    let (result, report) = run_pipeline(&spec, &test_volume(), &registry()).expect("pipeline");
    let ops = report
        .steps
        .iter()
        .map(|step| step.op.as_str())
        .collect::<Vec<_>>();
    assert_eq!(ops, vec!["intensity.normalize", "intensity.rescale"]);
    assert_eq!(result.min_max(), Some((0.0, 10.0)));
}

#[test]
fn segmentation_measurements_reach_report() {
    let spec = PipelineSpec {
        name: None,
        operations: vec![OpInvocation::new(
            "segment.confidence_connected",
            json!({"seeds": [[0, 0, 0]]}),
        )],
    };
    let (_, report) = run_pipeline(&spec, &test_volume(), &registry()).expect("pipeline");
    assert!(report.final_measurements.contains_key("voxel_count"));
    assert!(report.final_measurements.contains_key("lower"));
}

#[test]
fn invalid_pipeline_is_rejected() {
    let spec = PipelineSpec {
        name: None,
        operations: vec![],
    };
    assert!(run_pipeline(&spec, &test_volume(), &registry()).is_err());

    let spec = PipelineSpec {
        name: None,
        operations: vec![OpInvocation::new("intensity.normalize", json!([1, 2]))],
    };
    assert!(spec.validate().is_err());
}

#[test]
fn recipe_loads_from_yaml_and_report_saves() {
    let dir = tempfile::tempdir().expect("tempdir");
    let recipe = dir.path().join("recipe.yaml");
    std::fs::write(
        &recipe,
        "name: lungs\noperations:\n  - op: intensity.window\n    params: {level: -600, width: 1500}\n  - op: intensity.normalize\n",
    )
    .expect("write recipe");
    let spec = load_spec(&recipe).expect("load");
    assert_eq!(spec.name.as_deref(), Some("lungs"));
    assert_eq!(spec.operations.len(), 2);
    assert!(spec.operations[1].params.is_null());

    let (_, report) = run_pipeline(&spec, &test_volume(), &registry()).expect("pipeline");
    let report_path = dir.path().join("report.json");
    save_report(&report_path, &report).expect("save");
    let raw = std::fs::read_to_string(&report_path).expect("read");
    assert!(raw.contains("\"pipeline_name\": \"lungs\""));
}
