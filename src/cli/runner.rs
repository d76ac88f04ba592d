use std::path::PathBuf;

use clap::Parser;

use crate::runtime::{AppContext, AppError};
use crate::workflow::CtWindow;

use super::types::{Cli, Commands, OpsCommand, ViewArgs};

pub fn run_cli() -> Result<(), String> {
    let cli = Cli::parse();
    let app = AppContext::new();

    match cli.command {
        None => run_viewer(&app, cli.view)?,
        Some(Commands::Info { input }) => {
            let dataset = app
                .io_service()
                .read(&input)
                .map_err(|error| error.to_string())?;
            let summary = app
                .dataset_service()
                .summarize(&dataset)
                .map_err(|error| error.to_string())?;
            println!(
                "{}",
                serde_json::to_string_pretty(&summary).map_err(|error| error.to_string())?
            );
        }
        Some(Commands::Run {
            input,
            recipe,
            output,
            report,
        }) => {
            let dataset = app
                .io_service()
                .read(&input)
                .map_err(|error| error.to_string())?;
            let spec = app
                .pipeline_service()
                .load_spec(&recipe)
                .map_err(|error| error.to_string())?;
            let (result, run_report) = app
                .pipeline_service()
                .run(&spec, &dataset)
                .map_err(|error| error.to_string())?;
            app.io_service()
                .write(&output, &result)
                .map_err(|error| error.to_string())?;
            if let Some(report_path) = report {
                app.pipeline_service()
                    .save_report(report_path, &run_report)
                    .map_err(|error| error.to_string())?;
            }
            println!(
                "{}",
                serde_json::to_string_pretty(&run_report).map_err(|error| error.to_string())?
            );
        }
        Some(Commands::Ops { command }) => match command {
            OpsCommand::List => {
                let schemas = app.ops_service().list();
                println!(
                    "{}",
                    serde_json::to_string_pretty(&schemas).map_err(|error| error.to_string())?
                );
            }
        },
    }

    Ok(())
}

fn run_viewer(app: &AppContext, args: ViewArgs) -> Result<(), String> {
    println!("Executed with these arguments: ");
    for line in args.describe() {
        println!("{line}");
    }

    let (window, corrected) = CtWindow::from_args(args.level, args.width);
    if corrected {
        println!(
            "CT window width is negative ({} < 0), making it positive to avoid errors",
            args.width
        );
    }

    let path = match &args.filepath {
        Some(path) => path.clone(),
        None => pick_input(app).map_err(|error| error.to_string())?,
    };
    let (summary, volume) = app
        .load_session_volume(&path, window, args.preprocess.as_deref())
        .map_err(|error| error.to_string())?;
    println!(
        "({}, {}, {}) {:?}",
        summary.extent.width, summary.extent.height, summary.extent.depth, summary.pixel_type
    );

    let controller = app
        .segmentation_controller(
            volume,
            args.confidence_params(),
            args.color_seed,
            args.session_config(),
        )
        .map_err(|error| error.to_string())?;
    let title = format!(
        "ctseg: {}",
        path.file_name()
            .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned())
    );
    crate::ui::run(controller, &title)
}

fn pick_input(app: &AppContext) -> Result<PathBuf, AppError> {
    crate::ui::pick_volume(&app.io_service().extensions()).ok_or(AppError::NoInput)
}
