pub mod boundary;
pub mod candidates;
pub mod error;
pub mod index;
pub mod signature;

pub use boundary::{Boundary, BoundaryMap, Location};
pub use candidates::{CandidateFile, CandidateSet, FileId};
pub use error::PeekError;
pub use index::{Index, IndexConfig};
pub use signature::{FirstLine, SignatureMap, SignatureScheme};
