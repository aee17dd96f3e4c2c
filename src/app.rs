use std::fmt;
use std::path::{Path, PathBuf};

use log::{error, info};

use crate::config::{Config, WavelengthGrid};
use crate::data::{assemble, loader, reconstruct, writer};
use crate::error::{QeError, Result};

// ---------------------------------------------------------------------------
// Collaborator – whatever front-end supplies inputs and shows results
// ---------------------------------------------------------------------------

/// Front-end seam. The importer asks for a file and metadata, then reports
/// exactly one [`Outcome`].
pub trait Collaborator {
    /// `None` means the user cancelled.
    fn choose_input_path(&mut self) -> Option<PathBuf>;
    /// `(brand, model)`; `None` when the user gave up.
    fn prompt_brand_model(&mut self) -> Option<(String, String)>;
    fn report(&mut self, outcome: &Outcome);
}

/// Result of one import, as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Cancelled,
    MissingInfo,
    MalformedInput(String),
    MissingChannels(String),
    NoValidData(String),
    /// I/O, CSV or configuration failure.
    Failed(String),
    Success(PathBuf),
}

impl Outcome {
    /// Distinct process exit status per outcome.
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::Success(_) => 0,
            Outcome::Cancelled => 1,
            Outcome::MissingInfo => 2,
            Outcome::MalformedInput(_) => 3,
            Outcome::MissingChannels(_) => 4,
            Outcome::NoValidData(_) => 5,
            Outcome::Failed(_) => 6,
        }
    }

    /// Dialog title.
    pub fn title(&self) -> &'static str {
        match self {
            Outcome::Success(_) => "Success",
            Outcome::Cancelled => "Cancelled",
            Outcome::MissingInfo => "Missing Info",
            Outcome::MalformedInput(_) => "Malformed Input",
            Outcome::MissingChannels(_) => "Missing Channels",
            Outcome::NoValidData(_) => "No Valid Data",
            Outcome::Failed(_) => "Error",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Success(path) => {
                write!(f, "Interpolated QE data saved to:\n{}", path.display())
            }
            Outcome::Cancelled => write!(f, "No file selected."),
            Outcome::MissingInfo => write!(f, "{}", QeError::MissingInfo),
            Outcome::MalformedInput(msg)
            | Outcome::MissingChannels(msg)
            | Outcome::NoValidData(msg) => write!(f, "{msg}"),
            Outcome::Failed(msg) => write!(f, "Something went wrong:\n{msg}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

/// Brand and model must both contain something other than whitespace.
pub fn validate_metadata(brand: &str, model: &str) -> Result<()> {
    if brand.trim().is_empty() || model.trim().is_empty() {
        return Err(QeError::MissingInfo);
    }
    Ok(())
}

/// Run the whole pipeline on one file and write the TSV. Nothing is written
/// unless every fatal check has passed.
pub fn import_file(
    path: &Path,
    brand: &str,
    model: &str,
    config: &Config,
    grid: &WavelengthGrid,
) -> Result<PathBuf> {
    validate_metadata(brand, model)?;

    let raw = loader::load_file(path)?;
    let table = reconstruct::reconstruct(&raw, &config.required_channels)?;
    let assembly = assemble::assemble(
        &table,
        grid,
        &config.required_channels,
        brand,
        model,
        config.decimals,
    )?;

    let out = writer::save_table(&assembly.table, &config.output_dir())?;
    info!(
        "wrote {} (channels {:?}, {} skipped)",
        out.display(),
        assembly.table.channel_names(),
        assembly.skipped.len()
    );
    Ok(out)
}

/// Ask the collaborator for inputs, import, and report the outcome.
pub fn run(collaborator: &mut dyn Collaborator, config: &Config, grid: &WavelengthGrid) -> Outcome {
    let outcome = match collaborator.choose_input_path() {
        None => Outcome::Cancelled,
        Some(path) => match collaborator.prompt_brand_model() {
            None => Outcome::MissingInfo,
            Some((brand, model)) => match import_file(&path, &brand, &model, config, grid) {
                Ok(out) => Outcome::Success(out),
                Err(e) => {
                    error!("{e}");
                    e.outcome()
                }
            },
        },
    };
    collaborator.report(&outcome);
    outcome
}
