mod app;
mod interaction;

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use eframe::egui;
use rfd::FileDialog;

use crate::runtime::SegmentationController;

pub use app::SegmentationApp;

const VIEWER_DEFAULT_SIZE: [f32; 2] = [900.0, 900.0];
const VIEWER_MIN_SIZE: [f32; 2] = [320.0, 240.0];

/// Opens the viewer window and blocks until it closes. A failure raised by
/// the session while the window was open is returned as the error.
pub fn run(controller: SegmentationController, title: &str) -> Result<(), String> {
    for prompt in controller.startup_prompts() {
        println!("{prompt}");
    }

    let failure = Arc::new(Mutex::new(None));
    let app_failure = Arc::clone(&failure);
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(title)
            .with_inner_size(VIEWER_DEFAULT_SIZE)
            .with_min_inner_size(VIEWER_MIN_SIZE)
            .with_resizable(true),
        ..Default::default()
    };
    eframe::run_native(
        title,
        options,
        Box::new(move |_cc| Ok(Box::new(SegmentationApp::new(controller, app_failure)))),
    )
    .map_err(|error| error.to_string())?;

    let failure = failure
        .lock()
        .map_err(|_| "viewer state lock poisoned".to_string())?
        .take();
    failure.map_or(Ok(()), Err)
}

/// Native open dialog restricted to readable volume formats.
pub fn pick_volume(extensions: &[&str]) -> Option<PathBuf> {
    FileDialog::new()
        .set_title("Open CT volume")
        .add_filter("CT volume", extensions)
        .pick_file()
}
