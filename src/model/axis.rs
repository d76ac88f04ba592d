use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisKind {
    X,
    Y,
    Z,
    Channel,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PixelType {
    U8,
    U16,
    I16,
    #[default]
    F32,
}

/// Axis order used for arrays without explicit metadata: volumes are stored
/// depth-major (`[Z, Y, X]`), composites append a trailing channel axis.
pub fn default_axes_for_rank(rank: usize) -> Vec<AxisKind> {
    match rank {
        2 => vec![AxisKind::Y, AxisKind::X],
        3 => vec![AxisKind::Z, AxisKind::Y, AxisKind::X],
        4 => vec![AxisKind::Z, AxisKind::Y, AxisKind::X, AxisKind::Channel],
        other => vec![AxisKind::Unknown; other],
    }
}
