use serde::Serialize;

use crate::model::{DisplayVolume, Seed};

use super::{Result, SegmentError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Palette {
    Grayscale,
    /// The composite's own RGB samples.
    Composite,
}

/// One rendered slice, ready for texture upload.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub width: usize,
    pub height: usize,
    pub slice: usize,
    pub palette: Palette,
    /// Row-major RGBA, four bytes per pixel.
    pub rgba: Vec<u8>,
    /// Pending seeds on this slice, drawn as markers.
    pub markers: Vec<Seed>,
}

pub fn render_frame(volume: &DisplayVolume, slice: usize, markers: Vec<Seed>) -> Result<Frame> {
    let extent = volume.extent()?;
    let samples = volume.slice_samples(slice)?;
    let (palette, rgba) = match volume.channels() {
        1 => (
            Palette::Grayscale,
            samples
                .iter()
                .flat_map(|value| [*value, *value, *value, u8::MAX])
                .collect::<Vec<_>>(),
        ),
        3 => (
            Palette::Composite,
            samples
                .chunks_exact(3)
                .flat_map(|rgb| [rgb[0], rgb[1], rgb[2], u8::MAX])
                .collect(),
        ),
        channels => return Err(SegmentError::UnsupportedChannels(channels)),
    };
    Ok(Frame {
        width: extent.width,
        height: extent.height,
        slice,
        palette,
        rgba,
        markers,
    })
}
