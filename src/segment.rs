mod colors;
mod controller;
mod display;
mod error;
mod event;
mod export;
mod grower;
mod overlay;
mod session;


pub use colors::{ColorSource, Rgb, SeededColors};
pub use controller::{Controller, SessionConfig};
pub use display::{Frame, Palette, render_frame};
pub use error::{Result, SegmentError};
pub use event::{InputEvent, Key, Outcome, Prompt};
pub use export::{RegionSummary, SessionReport, report_path_for, write_session};
pub use grower::{ConfidenceConnectedGrower, RegionGrower};
pub use overlay::{OVERLAY_OPACITY, OverlayStyle, combine_regions, label_palette, overlay_labels};
pub use session::{Mode, Region, Session};
