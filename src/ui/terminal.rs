use std::io;
use std::path::PathBuf;

use log::warn;
use rprompt::prompt_reply;

use crate::app::{Collaborator, Outcome};

// ---------------------------------------------------------------------------
// Metadata prompts
// ---------------------------------------------------------------------------

/// Use the given value or ask for it on the terminal. A failed read
/// (no terminal attached) yields `None`.
fn value_or_prompt(value: Option<String>, prompt: &str) -> Option<String> {
    match value {
        Some(v) => Some(v),
        None => reply_or_warn(prompt_reply(prompt), prompt),
    }
}

fn reply_or_warn(reply: io::Result<String>, prompt: &str) -> Option<String> {
    match reply {
        Ok(v) => Some(v),
        Err(e) => {
            warn!("could not read '{}' from the terminal: {e}", prompt.trim_end());
            None
        }
    }
}

/// Brand and model from arguments, prompting for whichever is missing.
pub fn brand_model(brand: Option<String>, model: Option<String>) -> Option<(String, String)> {
    let brand = value_or_prompt(brand, "Enter Camera Brand: ")?;
    let model = value_or_prompt(model, "Enter Camera Model: ")?;
    Some((brand, model))
}

// ---------------------------------------------------------------------------
// Terminal collaborator
// ---------------------------------------------------------------------------

/// Collaborator for command-line use: the input path comes from the
/// arguments, missing metadata is prompted for, outcomes are printed.
#[derive(Debug, Default)]
pub struct TerminalCollaborator {
    pub input: Option<PathBuf>,
    pub brand: Option<String>,
    pub model: Option<String>,
}

impl Collaborator for TerminalCollaborator {
    fn choose_input_path(&mut self) -> Option<PathBuf> {
        self.input.take()
    }

    fn prompt_brand_model(&mut self) -> Option<(String, String)> {
        brand_model(self.brand.take(), self.model.take())
    }

    fn report(&mut self, outcome: &Outcome) {
        if outcome.is_success() {
            println!("{}: {outcome}", outcome.title());
        } else {
            eprintln!("{}: {outcome}", outcome.title());
        }
    }
}
