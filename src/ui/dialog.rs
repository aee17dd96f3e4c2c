use std::path::PathBuf;

use rfd::{FileDialog, MessageButtons, MessageDialog, MessageLevel};

use super::terminal;
use crate::app::{Collaborator, Outcome};

// ---------------------------------------------------------------------------
// Native dialog collaborator
// ---------------------------------------------------------------------------

/// Collaborator using native dialogs for the file picker and the outcome
/// message box. Native dialogs have no text entry, so brand and model come
/// from the arguments or the terminal.
#[derive(Debug, Default)]
pub struct DialogCollaborator {
    pub input: Option<PathBuf>,
    pub brand: Option<String>,
    pub model: Option<String>,
}

impl Collaborator for DialogCollaborator {
    fn choose_input_path(&mut self) -> Option<PathBuf> {
        if let Some(path) = self.input.take() {
            return Some(path);
        }
        FileDialog::new()
            .set_title("Select QE CSV file")
            .add_filter("CSV files", &["csv"])
            .add_filter("All files", &["*"])
            .pick_file()
    }

    fn prompt_brand_model(&mut self) -> Option<(String, String)> {
        terminal::brand_model(self.brand.take(), self.model.take())
    }

    fn report(&mut self, outcome: &Outcome) {
        let level = match outcome {
            Outcome::Success(_) | Outcome::Cancelled => MessageLevel::Info,
            _ => MessageLevel::Error,
        };
        MessageDialog::new()
            .set_level(level)
            .set_title(outcome.title())
            .set_description(outcome.to_string())
            .set_buttons(MessageButtons::Ok)
            .show();
    }
}
