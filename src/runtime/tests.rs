use std::path::Path;

use ndarray::Array3;

use crate::commands::ConfidenceParams;
use crate::formats::write_volume;
use crate::model::{Dataset, Extent, Metadata, PixelType};
use crate::segment::{InputEvent, Key, SessionConfig};
use crate::workflow::CtWindow;

use super::{AppContext, AppError};

fn write_ramp(path: &Path, extent: Extent) {
    let data = Array3::from_shape_fn(extent.shape_zyx(), |(z, y, x)| (x * 10 + y + z) as f32)
        .into_dyn();
    let dataset = Dataset::new(data, Metadata::volume(extent, PixelType::F32)).expect("dataset");
    write_volume(path, &dataset).expect("write");
}

#[test]
fn summary_reports_extent_and_range() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("ramp.tif");
    write_ramp(&path, Extent::new(3, 2, 4));

    let app = AppContext::new();
    let dataset = app.io_service().read(&path).expect("read");
    let summary = app.dataset_service().summarize(&dataset).expect("summary");
    assert_eq!(summary.extent, Extent::new(3, 2, 4));
    assert_eq!(summary.min, Some(0.0));
    assert_eq!(summary.max, Some(24.0));
}

#[test]
fn unsupported_input_is_rejected_before_reading() {
    let app = AppContext::new();
    let error = app.io_service().read("scan.dcm").expect_err("unsupported");
    assert!(matches!(error, AppError::UnsupportedInput(_)));
}

#[test]
fn session_volume_is_preprocessed() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("ramp.tif");
    write_ramp(&path, Extent::new(4, 4, 4));

    let app = AppContext::new();
    let (summary, volume) = app
        .load_session_volume(&path, CtWindow::default(), None)
        .expect("load");
    assert_eq!(summary.pixel_type, PixelType::F32);
    let (min, max) = volume.min_max().expect("range");
    assert!(min >= -1e-5 && max <= 1.0 + 1e-5);

    let mut controller = app
        .segmentation_controller(
            volume,
            ConfidenceParams::default(),
            Some(1),
            SessionConfig::default(),
        )
        .expect("controller");
    assert_eq!(controller.cursor(), 2);
    controller
        .dispatch(InputEvent::Key(Key::ToggleDrawing))
        .expect("toggle");
    controller
        .dispatch(InputEvent::Click { x: 1.0, y: 1.0 })
        .expect("click");
    controller
        .dispatch(InputEvent::Key(Key::CommitRegion))
        .expect("commit");
    assert_eq!(controller.session().regions.len(), 1);
    assert!(controller.session().regions[0].voxel_count >= 1);
}

#[test]
fn ops_service_lists_segmentation() {
    let app = AppContext::new();
    assert!(app.ops_service().contains("segment.confidence_connected"));
    assert!(!app.io_service().extensions().contains(&"nii.gz"));
}
