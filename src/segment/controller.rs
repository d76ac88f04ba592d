use std::path::PathBuf;
use std::sync::Arc;

use crate::commands::rescale_to_display;
use crate::model::{DatasetF32, DisplayVolume, Extent, LabelVolume, PixelType, Seed};

use super::export::{SessionReport, write_session};
use super::{
    ColorSource, Frame, InputEvent, Key, Mode, Outcome, OverlayStyle, Prompt, Region,
    RegionGrower, Result, SegmentError, Session, combine_regions, label_palette, overlay_labels,
    render_frame,
};

#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    pub overlay: OverlayStyle,
    /// Destination of the label stack written by the save key.
    pub labels_out: Option<PathBuf>,
}

/// Owns the session state and turns input events into state changes and
/// display updates.
pub struct Controller<G, C> {
    volume: Arc<DatasetF32>,
    backdrop: Arc<DisplayVolume>,
    displayed: Arc<DisplayVolume>,
    extent: Extent,
    session: Session,
    grower: G,
    colors: C,
    config: SessionConfig,
}

impl<G: RegionGrower, C: ColorSource> Controller<G, C> {
    pub fn new(volume: Arc<DatasetF32>, grower: G, colors: C, config: SessionConfig) -> Result<Self> {
        let extent = volume.extent()?;
        if volume.channels() != 1 {
            return Err(SegmentError::NotGrayscale(volume.channels()));
        }
        let backdrop = Arc::new(rescale_to_display(&volume));
        Ok(Self {
            volume,
            displayed: Arc::clone(&backdrop),
            backdrop,
            extent,
            session: Session::new(extent.depth),
            grower,
            colors,
            config,
        })
    }

    pub fn startup_prompts(&self) -> Vec<Prompt> {
        vec![Prompt::StartHint]
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn mode(&self) -> Mode {
        self.session.mode
    }

    pub fn cursor(&self) -> usize {
        self.session.cursor
    }

    pub fn extent(&self) -> Extent {
        self.extent
    }

    pub fn volume(&self) -> &DatasetF32 {
        &self.volume
    }

    pub fn displayed(&self) -> &DisplayVolume {
        &self.displayed
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn grower(&self) -> &G {
        &self.grower
    }

    pub fn dispatch(&mut self, event: InputEvent) -> Result<Outcome> {
        let outcome = match event {
            InputEvent::Scroll { delta } => self.scroll(delta),
            InputEvent::Click { x, y } => self.click(x, y),
            InputEvent::Key(Key::ToggleDrawing) => self.toggle_drawing(),
            InputEvent::Key(Key::CommitRegion) => self.commit_region()?,
            InputEvent::Key(Key::Cancel) => self.cancel(),
            InputEvent::Key(Key::Save) => self.save()?,
        };
        Ok(outcome)
    }

    /// The slice under the cursor with its pending seed markers.
    pub fn frame(&self) -> Result<Frame> {
        let cursor = self.session.cursor;
        render_frame(&self.displayed, cursor, self.session.seeds_on_slice(cursor))
    }

    /// All committed regions merged into one label volume.
    pub fn combined_labels(&self) -> Result<LabelVolume> {
        combine_regions(self.extent, &self.session.regions)
    }

    fn scroll(&mut self, delta: i32) -> Outcome {
        let target = self.session.cursor as i64 + i64::from(delta);
        self.session.cursor = self.extent.clamp_slice(target);
        log::debug!("slice {} of {}", self.session.cursor, self.extent.depth);
        Outcome::redraw(self.session.mode)
    }

    fn click(&mut self, x: f32, y: f32) -> Outcome {
        if !self.session.drawing_enabled() {
            return Outcome::unchanged(self.session.mode);
        }
        // Half-way clicks go to the even voxel.
        let (column, row) = (x.round_ties_even(), y.round_ties_even());
        let inside = column >= 0.0
            && row >= 0.0
            && column < self.extent.width as f32
            && row < self.extent.height as f32;
        if !inside {
            return Outcome::unchanged(self.session.mode);
        }
        let seed = Seed::new(column as usize, row as usize, self.session.cursor);
        log::debug!("seed {seed:?} for region {}", self.session.next_label);
        self.session.seeds.push(seed);
        Outcome::redraw(self.session.mode)
    }

    fn toggle_drawing(&mut self) -> Outcome {
        match self.session.mode {
            Mode::Idle => {
                self.session.mode = Mode::CollectingSeeds;
                log::debug!("drawing enabled");
                Outcome::unchanged(self.session.mode).with_prompt(Prompt::SelectSeeds {
                    region: self.session.next_label,
                })
            }
            Mode::CollectingSeeds => {
                self.session.mode = Mode::Idle;
                log::debug!("drawing disabled");
                Outcome::unchanged(self.session.mode)
            }
        }
    }

    fn cancel(&mut self) -> Outcome {
        self.session.mode = Mode::Idle;
        Outcome::unchanged(self.session.mode)
    }

    fn commit_region(&mut self) -> Result<Outcome> {
        if self.session.seeds.is_empty() {
            return Ok(Outcome::unchanged(self.session.mode).with_prompt(Prompt::NoSeeds));
        }
        let label = self.session.next_label;
        let next_label = label
            .checked_add(1)
            .ok_or(SegmentError::TooManyRegions(self.session.regions.len()))?;

        let mask = self.grower.grow(&self.volume, &self.session.seeds)?;
        let mask_extent = mask.extent()?;
        if mask_extent != self.extent {
            return Err(SegmentError::ExtentMismatch {
                volume: self.extent,
                other: mask_extent,
            });
        }
        let mask = mask.map_values(PixelType::U16, |value| if *value != 0 { label } else { 0 });
        let voxel_count = mask.data.iter().filter(|value| **value != 0).count();
        log::info!("region {label}: {voxel_count} voxels");

        self.session.regions.push(Region {
            label,
            seeds: std::mem::take(&mut self.session.seeds),
            mask,
            voxel_count,
        });
        self.session.colors.push(self.colors.next_color());
        self.session.next_label = next_label;

        let labels = self.combined_labels()?;
        let palette = label_palette(&self.session.colors);
        self.displayed = Arc::new(overlay_labels(
            &labels,
            &self.backdrop,
            &palette,
            self.config.overlay,
        )?);

        Ok(Outcome::redraw(self.session.mode).with_prompt(Prompt::SelectSeeds {
            region: self.session.next_label,
        }))
    }

    fn save(&mut self) -> Result<Outcome> {
        let mode = self.session.mode;
        let Some(labels_path) = self.config.labels_out.clone() else {
            return Ok(Outcome::unchanged(mode).with_prompt(Prompt::NoOutputPath));
        };
        if self.session.regions.is_empty() {
            return Ok(Outcome::unchanged(mode).with_prompt(Prompt::NothingToSave));
        }
        let labels = self.combined_labels()?;
        let palette = label_palette(&self.session.colors);
        let report = SessionReport::new(
            self.volume.metadata.source.clone(),
            labels_path.clone(),
            self.extent,
            self.config.overlay,
            &self.session.regions,
            &palette,
        );
        let report_path = write_session(&labels_path, &labels, &report)?;
        Ok(Outcome::unchanged(mode).with_prompt(Prompt::Saved {
            regions: self.session.regions.len(),
            labels: labels_path,
            report: report_path,
        }))
    }
}
