use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::boundary::{BoundaryMap, Location};
use crate::candidates;
use crate::error::PeekError;
use crate::signature::{SignatureMap, SignatureScheme};

#[derive(Debug, Clone)]
pub struct IndexConfig {
    /// Directory the pattern and a relative combined path are evaluated in.
    pub workdir: PathBuf,
    /// Glob selecting candidate source files.
    pub pattern: String,
    pub combined: PathBuf,
}

impl IndexConfig {
    pub fn combined_path(&self) -> PathBuf {
        self.workdir.join(&self.combined)
    }
}

/// Both maps for one combined file, ready to answer queries.
#[derive(Debug, Clone)]
pub struct Index {
    pub signatures: SignatureMap,
    pub boundaries: BoundaryMap,
}

impl Index {
    pub fn build(cfg: &IndexConfig, scheme: &dyn SignatureScheme) -> Result<Self, PeekError> {
        let combined = cfg.combined_path();
        let set = candidates::expand(&cfg.workdir, &cfg.pattern, Some(&combined))?;
        let signatures = SignatureMap::build(scheme, &set)?;
        let boundaries = scan_file(&signatures, scheme, &combined)?;
        Ok(Self { signatures, boundaries })
    }

    pub fn resolve(&self, line: u32) -> Result<Location, PeekError> {
        self.boundaries.resolve(line)
    }
}

fn scan_file(signatures: &SignatureMap, scheme: &dyn SignatureScheme, path: &Path) -> Result<BoundaryMap, PeekError> {
    let read_err = |source| PeekError::Read { path: path.to_path_buf(), source };
    let file = File::open(path).map_err(read_err)?;
    BoundaryMap::scan(signatures, scheme, BufReader::new(file)).map_err(read_err)
}
