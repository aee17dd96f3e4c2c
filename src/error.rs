//! Error types for the QE importer

use std::path::PathBuf;

use thiserror::Error;

use crate::app::Outcome;

/// Result type alias for importer operations
pub type Result<T> = std::result::Result<T, QeError>;

/// Fatal conditions that abort an import. Per-channel problems are not
/// represented here; see [`crate::data::assemble::ChannelSkip`].
#[derive(Error, Debug)]
pub enum QeError {
    /// Brand or model was not supplied
    #[error("Brand and Model must be provided.")]
    MissingInfo,

    /// The file cannot be interpreted as a two-row-header QE table
    #[error("Malformed input: {reason}")]
    MalformedInput { reason: String },

    /// A required channel is absent after header reconstruction
    #[error("CSV must contain {} data. Found: [{}]", .required.join(", "), .found.join(", "))]
    MissingChannels {
        required: Vec<String>,
        found: Vec<String>,
    },

    /// Every channel was skipped during interpolation
    #[error("No valid QE data could be interpolated. Check that X/Y data is numeric and aligned.")]
    NoValidData,

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error in {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Configuration values that cannot produce a usable grid
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },
}

impl QeError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            reason: reason.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Csv {
            path: path.into(),
            source,
        }
    }

    /// The outcome reported to the collaborator for this failure.
    pub fn outcome(&self) -> Outcome {
        match self {
            QeError::MissingInfo => Outcome::MissingInfo,
            QeError::MalformedInput { .. } => Outcome::MalformedInput(self.to_string()),
            QeError::MissingChannels { .. } => Outcome::MissingChannels(self.to_string()),
            QeError::NoValidData => Outcome::NoValidData(self.to_string()),
            QeError::Io { .. } | QeError::Csv { .. } | QeError::InvalidConfig { .. } => {
                Outcome::Failed(self.to_string())
            }
        }
    }
}
