//! Signature extraction and the signature -> file index.
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader};

use crate::candidates::{CandidateSet, FileId};
use crate::error::PeekError;

/// How a source file is recognized inside the combined file.
pub trait SignatureScheme {
    /// Extract the signature of a source file. The returned bytes are already
    /// normalized; an empty value means the file has no usable signature.
    fn extract(&self, source: &mut dyn BufRead) -> io::Result<Vec<u8>>;

    /// Normalize one line of the combined file for comparison with signatures.
    fn normalize<'a>(&self, line: &'a [u8]) -> &'a [u8];
}

/// The first line of a file, trimmed of ASCII whitespace, is its signature.
/// Lines are compared as raw bytes, so any text encoding works.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstLine;

impl SignatureScheme for FirstLine {
    fn extract(&self, source: &mut dyn BufRead) -> io::Result<Vec<u8>> {
        let mut line = Vec::new();
        source.read_until(b'\n', &mut line)?;
        Ok(self.normalize(&line).to_vec())
    }

    fn normalize<'a>(&self, line: &'a [u8]) -> &'a [u8] {
        line.trim_ascii()
    }
}

/// Signature -> file. Keys are unique and non-empty.
#[derive(Debug, Clone, Default)]
pub struct SignatureMap {
    by_signature: HashMap<Vec<u8>, FileId>,
}

impl SignatureMap {
    /// Read the signature of every candidate, rejecting an empty set, empty
    /// signatures and duplicates.
    pub fn build(scheme: &dyn SignatureScheme, candidates: &CandidateSet) -> Result<Self, PeekError> {
        if candidates.is_empty() {
            return Err(PeekError::NoMatchingFiles {
                pattern: candidates.pattern.clone(),
                dir: candidates.dir.clone(),
            });
        }
        let mut map = Self::default();
        for cand in &candidates.files {
            let read_err = |source| PeekError::Read { path: cand.path.clone(), source };
            let file = File::open(&cand.path).map_err(read_err)?;
            let signature = scheme.extract(&mut BufReader::new(file)).map_err(read_err)?;
            log::debug!("signature: {} -> {:?}", cand.id, String::from_utf8_lossy(&signature));
            map.insert(signature, cand.id.clone())?;
        }
        log::info!("signature: indexed {} files", map.len());
        Ok(map)
    }

    /// Build from already extracted `(file, signature)` pairs.
    pub fn from_signatures<I, S>(entries: I) -> Result<Self, PeekError>
    where
        I: IntoIterator<Item = (FileId, S)>,
        S: Into<Vec<u8>>,
    {
        let mut map = Self::default();
        for (file, signature) in entries {
            map.insert(signature.into(), file)?;
        }
        Ok(map)
    }

    fn insert(&mut self, signature: Vec<u8>, file: FileId) -> Result<(), PeekError> {
        if signature.is_empty() {
            return Err(PeekError::EmptySignature { file });
        }
        if let Some(first) = self.by_signature.get(&signature) {
            return Err(PeekError::DuplicateSignature {
                signature: String::from_utf8_lossy(&signature).into_owned(),
                first: first.clone(),
                second: file,
            });
        }
        self.by_signature.insert(signature, file);
        Ok(())
    }

    pub fn get(&self, signature: impl AsRef<[u8]>) -> Option<&FileId> {
        self.by_signature.get(signature.as_ref())
    }

    pub fn len(&self) -> usize {
        self.by_signature.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_signature.is_empty()
    }
}
