use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::commands::ConfidenceParams;
use crate::segment::{OverlayStyle, SessionConfig};

#[derive(Debug, Parser)]
#[command(
    name = "ctseg",
    version,
    about = "CT slice viewer with seeded region-growing segmentation",
    args_conflicts_with_subcommands = true
)]
pub(super) struct Cli {
    #[command(subcommand)]
    pub(super) command: Option<Commands>,

    #[command(flatten)]
    pub(super) view: ViewArgs,
}

#[derive(Debug, Subcommand)]
pub(super) enum Commands {
    /// Prints shape, axes, spacing and intensity range of a volume.
    Info { input: PathBuf },
    /// Runs a YAML/JSON recipe headlessly and writes the result.
    Run {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        recipe: PathBuf,
        #[arg(long)]
        output: PathBuf,
        #[arg(long)]
        report: Option<PathBuf>,
    },
    Ops {
        #[command(subcommand)]
        command: OpsCommand,
    },
}

#[derive(Debug, Subcommand)]
pub(super) enum OpsCommand {
    List,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(super) enum OverlayArg {
    Fill,
    Contour,
}

impl From<OverlayArg> for OverlayStyle {
    fn from(value: OverlayArg) -> Self {
        match value {
            OverlayArg::Fill => Self::Fill,
            OverlayArg::Contour => Self::Contour,
        }
    }
}

/// Options of the interactive viewer, the default command.
#[derive(Debug, Args)]
pub(super) struct ViewArgs {
    /// Volume to open; a file dialog asks when omitted.
    #[arg(short = 'f', long)]
    pub(super) filepath: Option<PathBuf>,

    /// CT window level in HU.
    #[arg(short = 'l', long, default_value_t = 0, allow_negative_numbers = true)]
    pub(super) level: i32,

    /// CT window width in HU; 0 disables windowing.
    #[arg(short = 'w', long, default_value_t = 0, allow_negative_numbers = true)]
    pub(super) width: i32,

    /// Where the S key writes the label stack (`.tif`) and its JSON report.
    #[arg(long)]
    pub(super) labels_out: Option<PathBuf>,

    /// Seed for region colors, for reproducible overlays.
    #[arg(long)]
    pub(super) color_seed: Option<u64>,

    #[arg(long, value_enum, default_value_t = OverlayArg::Fill)]
    pub(super) overlay: OverlayArg,

    /// Confidence interval half-width in standard deviations.
    #[arg(long, default_value_t = 2.0)]
    pub(super) multiplier: f32,

    /// Region-growing re-estimation passes.
    #[arg(long, default_value_t = 1)]
    pub(super) iterations: usize,

    /// Recipe replacing the default window/normalize/denoise preprocessing.
    #[arg(long)]
    pub(super) preprocess: Option<PathBuf>,
}

impl ViewArgs {
    pub(super) fn confidence_params(&self) -> ConfidenceParams {
        ConfidenceParams {
            multiplier: self.multiplier,
            iterations: self.iterations,
            ..ConfidenceParams::default()
        }
    }

    pub(super) fn session_config(&self) -> SessionConfig {
        SessionConfig {
            overlay: self.overlay.into(),
            labels_out: self.labels_out.clone(),
        }
    }

    /// `name: value` lines echoed at startup.
    pub(super) fn describe(&self) -> Vec<String> {
        let optional = |path: &Option<PathBuf>| {
            path.as_ref()
                .map_or_else(|| "None".to_string(), |path| path.display().to_string())
        };
        vec![
            format!("filepath: {}", optional(&self.filepath)),
            format!("level: {}", self.level),
            format!("width: {}", self.width),
            format!("labels_out: {}", optional(&self.labels_out)),
            format!(
                "color_seed: {}",
                self.color_seed
                    .map_or_else(|| "None".to_string(), |seed| seed.to_string())
            ),
            format!("overlay: {:?}", self.overlay),
            format!("multiplier: {}", self.multiplier),
            format!("iterations: {}", self.iterations),
            format!("preprocess: {}", optional(&self.preprocess)),
        ]
    }
}
