use crate::title::extract_filename;

use std::path::{Path, PathBuf};

/// Outcome of deriving the recorder's current output path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLookup {
    /// No visible window carries the recorder marker.
    NoRecorderWindow,
    /// Recorder window found, but its title does not embed a filename.
    UnparsableTitle {
        /// The recorder's window title.
        title: String,
    },
    /// Title parsed; `path` is the configured directory plus the filename.
    Found {
        /// The recorder's window title.
        title: String,
        /// Resolved output file path.
        path: PathBuf,
    },
}

impl SourceLookup {
    /// Resolved path, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            SourceLookup::Found { path, .. } => Some(path),
            _ => None,
        }
    }

    /// Recorder window title, if a recorder window was visible.
    pub fn title(&self) -> Option<&str> {
        match self {
            SourceLookup::NoRecorderWindow => None,
            SourceLookup::UnparsableTitle { title } | SourceLookup::Found { title, .. } => {
                Some(title)
            }
        }
    }
}

/// Resolve the recorder's output path from its window title.
///
/// The recorder writes into the same directory this tool renames into, so
/// `source_dir` is the configured destination directory.
pub fn resolve_source_path(source_dir: &Path, title: Option<&str>) -> SourceLookup {
    let Some(title) = title else {
        return SourceLookup::NoRecorderWindow;
    };

    match extract_filename(title) {
        Some(filename) => SourceLookup::Found {
            title: title.to_string(),
            path: source_dir.join(filename),
        },
        None => SourceLookup::UnparsableTitle {
            title: title.to_string(),
        },
    }
}
