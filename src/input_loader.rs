use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
#[error("could not read term list {path}: {source}")]
pub struct LoadError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// Loads a newline-delimited term list: one entry per line, trimmed and
/// lower-cased, blank lines dropped. An empty file yields an empty list.
/// Used for both the keyword list and the excluded-subreddit list.
pub fn load_terms<P: AsRef<Path>>(path: P) -> Result<Vec<String>, LoadError> {
    let path_ref = path.as_ref();
    let content = fs::read_to_string(path_ref).map_err(|e| LoadError {
        path: path_ref.to_path_buf(),
        source: e,
    })?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_lowercase)
        .collect())
}
