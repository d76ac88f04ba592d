use std::fmt;
use std::path::PathBuf;

use super::Mode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// `D`
    ToggleDrawing,
    /// `Enter`
    CommitRegion,
    /// `Esc`
    Cancel,
    /// `S`
    Save,
}

/// Input delivered to [`Controller::dispatch`](super::Controller::dispatch).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Signed number of slices to move; positive moves deeper.
    Scroll { delta: i32 },
    /// Data coordinates on the displayed slice, pixel centres at integers.
    Click { x: f32, y: f32 },
    Key(Key),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    StartHint,
    SelectSeeds { region: u16 },
    NoSeeds,
    Saved {
        regions: usize,
        labels: PathBuf,
        report: PathBuf,
    },
    NothingToSave,
    NoOutputPath,
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StartHint => write!(f, "Press D to start segmenting"),
            Self::SelectSeeds { region } => write!(
                f,
                "Select seed points for region {region}\n\
                 Press Enter to finish selecting, press Esc to cancel segmentation"
            ),
            Self::NoSeeds => write!(
                f,
                "No seed points selected, continue selecting or press Esc to cancel segmentation"
            ),
            Self::Saved {
                regions,
                labels,
                report,
            } => write!(
                f,
                "Saved {regions} region(s) to {} (report: {})",
                labels.display(),
                report.display()
            ),
            Self::NothingToSave => write!(f, "No regions segmented yet, nothing to save"),
            Self::NoOutputPath => {
                write!(f, "No output path configured, pass --labels-out to enable saving")
            }
        }
    }
}

/// Result of dispatching one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub mode: Mode,
    pub redraw: bool,
    pub prompts: Vec<Prompt>,
}

impl Outcome {
    pub(crate) fn unchanged(mode: Mode) -> Self {
        Self {
            mode,
            redraw: false,
            prompts: Vec::new(),
        }
    }

    pub(crate) fn redraw(mode: Mode) -> Self {
        Self {
            redraw: true,
            ..Self::unchanged(mode)
        }
    }

    pub(crate) fn with_prompt(mut self, prompt: Prompt) -> Self {
        self.prompts.push(prompt);
        self
    }
}
