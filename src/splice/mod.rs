//! Marker-delimited replacement inside a single file.

mod marker_pair;
mod partial_replacer;

pub use marker_pair::{LocatedSpan, MarkerNotFoundError, MarkerPair, MarkerPairCreationError};
pub use partial_replacer::{PartialReplacer, SpliceError};
