//! JSON export and import of graph data.
//!
//! Export serializes a value and hands it to a download sink under a fixed
//! file name. Import asks a file picker for a JSON file and feeds the parsed
//! value to a callback; every failure short-circuits without touching the
//! callback.

use crate::error::CoreResult;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use tracing::warn;

/// Fixed name of the exported graph file.
pub const GRAPH_EXPORT_FILE_NAME: &str = "bh-graph.json";

/// Media type attached to exported graph downloads.
pub const GRAPH_EXPORT_MEDIA_TYPE: &str = "text/json";

/// A file payload handed to a [`DownloadSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub file_name: String,
    pub media_type: String,
    pub data: String,
}

/// Destination for exported files.
pub trait DownloadSink {
    /// Persist the download, returning where it ended up.
    fn save(&self, download: Download) -> std::io::Result<PathBuf>;
}

/// Sink that writes downloads into a directory.
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl DownloadSink for DirectorySink {
    fn save(&self, download: Download) -> std::io::Result<PathBuf> {
        let path = self.dir.join(&download.file_name);
        fs::write(&path, download.data.as_bytes())?;
        Ok(path)
    }
}

/// Serialize `data` and hand it to the sink as `bh-graph.json`.
///
/// Serialization failures propagate to the caller.
pub fn export_to_json<T: Serialize>(data: &T, sink: &dyn DownloadSink) -> CoreResult<PathBuf> {
    let payload = serde_json::to_string(data)?;
    let path = sink.save(Download {
        file_name: GRAPH_EXPORT_FILE_NAME.to_string(),
        media_type: GRAPH_EXPORT_MEDIA_TYPE.to_string(),
        data: payload,
    })?;
    Ok(path)
}

/// Source of user-chosen files for import.
pub trait FilePicker {
    /// Prompt for JSON files. Empty when the user picked nothing.
    fn pick_json_files(&self) -> Vec<PathBuf>;
}

/// How an import attempt ended. The failure variants never reach the
/// callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportOutcome {
    Imported,
    NoFileSelected,
    ReadFailed,
    ParseFailed,
}

/// Ask the picker for a file, parse it as JSON and feed the value to
/// `callback`. Only the first file is used when several are selected.
pub fn import_from_json<F>(picker: &dyn FilePicker, callback: F) -> ImportOutcome
where
    F: FnOnce(serde_json::Value),
{
    let Some(path) = picker.pick_json_files().into_iter().next() else {
        warn!("no file selected for graph import");
        return ImportOutcome::NoFileSelected;
    };

    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed reading import file");
            return ImportOutcome::ReadFailed;
        }
    };

    match serde_json::from_str::<serde_json::Value>(&text) {
        Ok(value) => {
            callback(value);
            ImportOutcome::Imported
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "import file is not valid JSON");
            ImportOutcome::ParseFailed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::RefCell;

    struct CaptureSink {
        saved: RefCell<Vec<Download>>,
    }

    impl CaptureSink {
        fn new() -> Self {
            Self {
                saved: RefCell::new(Vec::new()),
            }
        }
    }

    impl DownloadSink for CaptureSink {
        fn save(&self, download: Download) -> std::io::Result<PathBuf> {
            let path = PathBuf::from(&download.file_name);
            self.saved.borrow_mut().push(download);
            Ok(path)
        }
    }

    struct FixedPicker {
        files: Vec<PathBuf>,
    }

    impl FilePicker for FixedPicker {
        fn pick_json_files(&self) -> Vec<PathBuf> {
            self.files.clone()
        }
    }

    fn temp_file(contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "pathscope-exchange-{}.json",
            uuid::Uuid::new_v4()
        ));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_export_payload_file_name_and_media_type() {
        let sink = CaptureSink::new();
        export_to_json(&json!({"a": 1}), &sink).unwrap();

        let saved = sink.saved.borrow();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].file_name, "bh-graph.json");
        assert_eq!(saved[0].media_type, "text/json");
        assert_eq!(saved[0].data, r#"{"a":1}"#);
    }

    #[test]
    fn test_import_valid_json_invokes_callback_once() {
        let path = temp_file(r#"{"a":1}"#);
        let picker = FixedPicker {
            files: vec![path.clone()],
        };

        let mut seen = None;
        let outcome = import_from_json(&picker, |value| seen = Some(value));

        assert_eq!(outcome, ImportOutcome::Imported);
        assert_eq!(seen, Some(json!({"a": 1})));
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_import_uses_only_first_of_multiple_files() {
        let first = temp_file(r#"{"first": true}"#);
        let second = temp_file(r#"{"second": true}"#);
        let picker = FixedPicker {
            files: vec![first.clone(), second.clone()],
        };

        let mut seen = None;
        let outcome = import_from_json(&picker, |value| seen = Some(value));

        assert_eq!(outcome, ImportOutcome::Imported);
        assert_eq!(seen, Some(json!({"first": true})));
        fs::remove_file(first).unwrap();
        fs::remove_file(second).unwrap();
    }

    #[test]
    fn test_import_no_file_selected() {
        let picker = FixedPicker { files: Vec::new() };

        let mut called = false;
        let outcome = import_from_json(&picker, |_| called = true);

        assert_eq!(outcome, ImportOutcome::NoFileSelected);
        assert!(!called);
    }

    #[test]
    fn test_import_unreadable_file() {
        let picker = FixedPicker {
            files: vec![PathBuf::from("/nonexistent/pathscope-missing.json")],
        };

        let mut called = false;
        let outcome = import_from_json(&picker, |_| called = true);

        assert_eq!(outcome, ImportOutcome::ReadFailed);
        assert!(!called);
    }

    #[test]
    fn test_import_malformed_json_never_invokes_callback() {
        let path = temp_file("not json");
        let picker = FixedPicker {
            files: vec![path.clone()],
        };

        let mut called = false;
        let outcome = import_from_json(&picker, |_| called = true);

        assert_eq!(outcome, ImportOutcome::ParseFailed);
        assert!(!called);
        fs::remove_file(path).unwrap();
    }
}
