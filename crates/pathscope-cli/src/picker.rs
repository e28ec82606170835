//! File pickers for graph import.

use dialoguer::Input;
use pathscope_core::graph::exchange::FilePicker;
use std::path::PathBuf;

/// Picker fed by a path given on the command line.
pub struct ArgFilePicker {
    path: PathBuf,
}

impl ArgFilePicker {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl FilePicker for ArgFilePicker {
    fn pick_json_files(&self) -> Vec<PathBuf> {
        vec![self.path.clone()]
    }
}

/// Picker that asks for a path on the terminal. An empty answer (or an
/// aborted prompt) counts as picking nothing.
pub struct PromptFilePicker;

impl FilePicker for PromptFilePicker {
    fn pick_json_files(&self) -> Vec<PathBuf> {
        let input: String = Input::new()
            .with_prompt("Path to a JSON file")
            .allow_empty(true)
            .interact_text()
            .unwrap_or_default();

        let trimmed = input.trim();
        if trimmed.is_empty() {
            Vec::new()
        } else {
            vec![PathBuf::from(trimmed)]
        }
    }
}
