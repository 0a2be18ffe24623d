//! Candidate source files selected by a glob pattern under a working directory.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::PeekError;

/// Identity of a source file: its path relative to the working directory,
/// with `/` separators.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct FileId(pub String);

impl FileId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FileId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    pub id: FileId,
    pub path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct CandidateSet {
    pub pattern: String,
    pub dir: PathBuf,
    pub files: Vec<CandidateFile>,
}

impl CandidateSet {
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Expand `pattern` under `dir` into regular files, in glob (path-sorted) order.
///
/// `exclude` names a file that must never be a candidate even if the pattern
/// matches it (the combined file itself, typically). An empty result is not
/// an error here; the signature builder rejects it.
pub fn expand(dir: &Path, pattern: &str, exclude: Option<&Path>) -> Result<CandidateSet, PeekError> {
    let full = if Path::new(pattern).is_absolute() {
        pattern.to_string()
    } else {
        let base = glob::Pattern::escape(&dir.to_string_lossy());
        format!("{}/{}", base.trim_end_matches('/'), pattern)
    };
    let excluded = exclude.and_then(|p| fs::canonicalize(p).ok());

    // Like shell globbing, `*` and `?` never match a leading dot.
    let options = glob::MatchOptions { require_literal_leading_dot: true, ..glob::MatchOptions::new() };
    let entries = glob::glob_with(&full, options).map_err(|source| PeekError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| PeekError::Read {
            path: e.path().to_path_buf(),
            source: e.into(),
        })?;
        if !path.is_file() {
            log::debug!("candidates: skip non-file {}", path.display());
            continue;
        }
        if excluded.is_some() && fs::canonicalize(&path).ok() == excluded {
            log::debug!("candidates: skip combined file {}", path.display());
            continue;
        }
        files.push(CandidateFile { id: file_id(dir, &path), path });
    }
    log::info!("candidates: pattern={} files={}", pattern, files.len());

    Ok(CandidateSet { pattern: pattern.to_string(), dir: dir.to_path_buf(), files })
}

fn file_id(dir: &Path, path: &Path) -> FileId {
    let rel = path.strip_prefix(dir).unwrap_or(path);
    FileId(rel.to_string_lossy().replace('\\', "/"))
}
