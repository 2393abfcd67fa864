//! Literal find-and-replace across a project tree.

mod bulk_replacer;
mod extension_allowlist;
mod substitution;

pub use bulk_replacer::{BulkJob, BulkReplacer};
pub use extension_allowlist::{DEFAULT_EXTENSIONS, ExtensionAllowlist, ExtensionAllowlistCreationError};
pub use substitution::{Substitution, SubstitutionCreationError};
