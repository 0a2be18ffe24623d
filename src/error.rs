use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::candidates::FileId;

#[derive(Debug, Error)]
pub enum PeekError {
    #[error("no files match pattern \"{pattern}\" under {}", .dir.display())]
    NoMatchingFiles { pattern: String, dir: PathBuf },
    #[error("invalid file pattern \"{pattern}\": {source}")]
    InvalidPattern {
        pattern: String,
        source: glob::PatternError,
    },
    #[error("the first line of file \"{file}\" is empty")]
    EmptySignature { file: FileId },
    #[error("the line \"{signature}\" is identical for file \"{first}\" and \"{second}\"")]
    DuplicateSignature {
        signature: String,
        first: FileId,
        second: FileId,
    },
    #[error("line {line} is not inside any known file{}", describe_first(.first_boundary))]
    NoEnclosingBoundary {
        line: u32,
        first_boundary: Option<u32>,
    },
    #[error("failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
}

fn describe_first(first_boundary: &Option<u32>) -> String {
    match first_boundary {
        Some(first) => format!(" (first file boundary is at line {})", first),
        None => " (no file boundary found in the combined file)".to_string(),
    }
}
