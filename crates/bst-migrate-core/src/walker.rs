use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::WalkDir;

/// Files found under one root
#[derive(Debug, Default)]
pub struct Discovery {
    /// Matching files, in file-name order within each directory
    pub files: Vec<PathBuf>,
    /// Entries the walk could not read, with the reason
    pub failures: Vec<(PathBuf, String)>,
}

/// Recursively collect the files under `root` whose extension is `extension`.
///
/// Symlinked files are included. Unreadable entries do not stop the walk.
pub fn discover(root: &Path, extension: &str) -> Discovery {
    let mut discovery = Discovery::default();

    for entry in WalkDir::new(root).sort_by_file_name() {
        match entry {
            Ok(entry) => {
                let path = entry.path();
                if path.is_file() && has_extension(path, extension) {
                    discovery.files.push(path.to_path_buf());
                }
            }
            Err(err) => {
                let path = err.path().unwrap_or(root).to_path_buf();
                warn!(path = %path.display(), error = %err, "skipping unreadable entry");
                discovery.failures.push((path, err.to_string()));
            }
        }
    }

    discovery
}

/// Check if a file name ends in `.<extension>`.
///
/// A bare `.bst` counts, the same as a `*.bst` glob.
pub fn has_extension(path: &Path, extension: &str) -> bool {
    path.file_name()
        .and_then(OsStr::to_str)
        .and_then(|name| name.strip_suffix(extension))
        .is_some_and(|stem| stem.ends_with('.'))
}
