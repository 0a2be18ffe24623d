use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::io::{self, BufRead};

use crate::candidates::FileId;
use crate::error::PeekError;
use crate::signature::{SignatureMap, SignatureScheme};

/// A line in the combined file where a source file starts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Boundary {
    pub line: u32, // 1-based, in the combined file
    pub file: FileId,
}

/// A combined-file line translated back to its source file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Location {
    pub file: FileId,
    pub line: u32,     // 1-based, in `file`
    pub boundary: u32, // combined-file line where `file` starts
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line {} in file {}", self.line, self.file)
    }
}

/// Combined-file line -> file starting at that line.
#[derive(Debug, Clone, Default)]
pub struct BoundaryMap {
    starts: BTreeMap<u32, FileId>,
}

impl BoundaryMap {
    /// Scan the combined file once, recording every line whose normalized
    /// content is a known signature.
    ///
    /// A signature repeated inside a file body is recorded as another
    /// boundary; this is logged but not rejected.
    pub fn scan<R: BufRead>(
        signatures: &SignatureMap,
        scheme: &dyn SignatureScheme,
        combined: R,
    ) -> io::Result<Self> {
        let mut starts = BTreeMap::new();
        let mut seen: HashMap<&FileId, Vec<u32>> = HashMap::new();
        // Raw bytes: lines need not be valid UTF-8.
        for (idx, line) in combined.split(b'\n').enumerate() {
            let line = line?;
            let Some(file) = signatures.get(scheme.normalize(&line)) else { continue };
            let line_no = u32::try_from(idx + 1).map_err(|_| {
                io::Error::new(io::ErrorKind::InvalidData, "combined file has too many lines")
            })?;
            starts.insert(line_no, file.clone());
            seen.entry(file).or_default().push(line_no);
        }
        for (file, lines) in seen.iter().filter(|(_, l)| l.len() > 1) {
            log::warn!(
                "boundary: signature of {} found {} times (lines {:?}); later hits split the file",
                file,
                lines.len(),
                lines
            );
        }
        log::info!("boundary: detected {} boundaries", starts.len());
        Ok(Self { starts })
    }

    /// Translate a 1-based combined-file line to its source file and local line.
    pub fn resolve(&self, line: u32) -> Result<Location, PeekError> {
        let Some((&start, file)) = self.starts.range(..=line).next_back() else {
            return Err(PeekError::NoEnclosingBoundary {
                line,
                first_boundary: self.first_line(),
            });
        };
        Ok(Location { file: file.clone(), line: line - start + 1, boundary: start })
    }

    pub fn first_line(&self) -> Option<u32> {
        self.starts.keys().next().copied()
    }

    pub fn len(&self) -> usize {
        self.starts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }

    /// Boundaries in combined-file order.
    pub fn boundaries(&self) -> Vec<Boundary> {
        self.starts
            .iter()
            .map(|(&line, file)| Boundary { line, file: file.clone() })
            .collect()
    }
}
