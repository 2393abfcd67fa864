mod defaults;
mod job_config;

pub use defaults::*;
pub use job_config::{BulkSettings, JobConfig, JobConfigCreationError, SpliceSettings};
