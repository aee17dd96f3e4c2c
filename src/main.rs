mod app;
mod config;
mod data;
mod error;
mod ui;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use app::{Collaborator, Outcome};
use config::{Config, WavelengthGrid};
use ui::dialog::DialogCollaborator;
use ui::terminal::TerminalCollaborator;

/// Resample a camera QE export onto a common wavelength grid and write
/// `QE_<brand>_<model>.tsv`.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// QE CSV export: colour labels in row 1, X/Y markers in row 2.
    /// With --dialog and no path, a file picker is shown.
    input: Option<PathBuf>,

    /// Camera brand written to every row; prompted for when absent
    #[arg(short, long)]
    brand: Option<String>,

    /// Camera model written to every row; prompted for when absent
    #[arg(short, long)]
    model: Option<String>,

    /// JSON config file overriding grid, required channels, decimals
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory for the output file (default: current directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Use native dialogs for file selection and result messages
    #[arg(short, long)]
    dialog: bool,

    /// Debug logging unless RUST_LOG says otherwise
    #[arg(short, long)]
    verbose: bool,
}

fn load_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(dir) = &args.output_dir {
        config.output_dir = Some(dir.clone());
    }
    config.validate()?;
    Ok(config)
}

fn main() {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            log::error!("{e:#}");
            std::process::exit(Outcome::Failed(String::new()).exit_code());
        }
    };
    let grid = WavelengthGrid::new(&config.grid);

    let mut collaborator: Box<dyn Collaborator> = if args.dialog {
        Box::new(DialogCollaborator {
            input: args.input,
            brand: args.brand,
            model: args.model,
        })
    } else {
        Box::new(TerminalCollaborator {
            input: args.input,
            brand: args.brand,
            model: args.model,
        })
    };

    let outcome = app::run(collaborator.as_mut(), &config, &grid);
    std::process::exit(outcome.exit_code());
}
