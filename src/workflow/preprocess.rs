use serde::{Deserialize, Serialize};

/// Gaussian σ applied along every axis before segmentation, in millimetres
/// when the volume carries spacing.
pub const DENOISE_SIGMA: f32 = 0.75;

/// CT display window in Hounsfield units. A zero width disables windowing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CtWindow {
    pub level: i32,
    pub width: u32,
}

impl CtWindow {
    /// Builds a window from a user-supplied width, which may be negative.
    /// Returns the window and whether the width had to be flipped.
    pub fn from_args(level: i32, width: i32) -> (Self, bool) {
        let (width, corrected) = normalize_window_width(width);
        (Self { level, width }, corrected)
    }
}

/// Magnitude of `width`, and whether it was negative.
pub fn normalize_window_width(width: i32) -> (u32, bool) {
    (width.unsigned_abs(), width < 0)
}
