//! Front-ends that feed the importer and show its outcome.

pub mod dialog;
pub mod terminal;
