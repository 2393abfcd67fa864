mod cli;

pub use cli::{BulkArgs, Cli, Command, SpliceArgs};
