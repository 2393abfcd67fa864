use std::path::PathBuf;
use std::string::FromUtf8Error;

use colored::Colorize;
use compio::fs;
use snafu::Snafu;
use snafu::prelude::*;
use tracing::debug;

use crate::application::runtime_config::{
    ReplacementSource, RuntimeConfig, RuntimeConfigCreationError, RuntimeJob, SpliceJob,
};
use crate::cli::Cli;
use crate::config::{JobConfig, JobConfigCreationError};
use crate::ext::PathExt;
use crate::replace::{BulkJob, BulkReplacer};
use crate::report::ChangeReport;
use crate::splice::{PartialReplacer, SpliceError};

pub struct Application;

impl Application {
    pub async fn run(cli: Cli) -> Result<(), ApplicationError> {
        let job_config = JobConfig::read(&cli.root).await.context(JobConfigSnafu)?;
        debug!("Loaded config: {:?}", job_config);

        let runtime_config = RuntimeConfig::resolve(cli, job_config).context(RuntimeConfigSnafu)?;
        debug!("Resolved runtime config: {:?}", runtime_config);

        match runtime_config.job {
            RuntimeJob::Bulk(job) => {
                Self::run_bulk(runtime_config.root, job).await.print();
                Ok(())
            }
            RuntimeJob::Splice(job) => Self::run_splice(job).await,
        }
    }

    async fn run_bulk(root: PathBuf, job: BulkJob) -> ChangeReport {
        debug!(
            "Searching for '{}' to replace with '{}'",
            job.substitution.source_literal(),
            job.substitution.target_literal()
        );
        BulkReplacer::new(root, job).run().await
    }

    async fn run_splice(job: SpliceJob) -> Result<(), ApplicationError> {
        let replacer = PartialReplacer::new(&job.file, job.markers.clone());

        if job.locate_only {
            let span = replacer.locate().await.context(SpliceSnafu)?;
            println!(
                "{}: '{}' at line {}, '{}' at line {} (bytes {}..{})",
                job.file.display().to_string().bold(),
                job.markers.start(),
                span.start_line,
                job.markers.end(),
                span.end_line,
                span.range.start,
                span.range.end
            );
            return Ok(());
        }

        let replacement = Self::replacement_text(&job.replacement).await?;
        let span = replacer.replace(&replacement).await.context(SpliceSnafu)?;
        println!(
            "Replaced lines {}-{} of {}",
            span.start_line,
            span.end_line,
            job.file.display().to_string().green()
        );
        Ok(())
    }

    async fn replacement_text(source: &ReplacementSource) -> Result<String, ApplicationError> {
        match source {
            ReplacementSource::Inline(text) => Ok(text.clone()),
            ReplacementSource::File(path) => {
                debug!("Reading replacement text from {}", path.best_effort_display());
                let bytes = fs::read(path).await.context(ReplacementReadSnafu {
                    path: path.clone(),
                })?;
                String::from_utf8(bytes).context(ReplacementDecodeSnafu { path: path.clone() })
            }
            ReplacementSource::Unset => Err(ApplicationError::RuntimeConfigError {
                source: RuntimeConfigCreationError::MissingReplacement,
            }),
        }
    }
}

#[derive(Debug, Snafu)]
pub enum ApplicationError {
    #[snafu(display("Critical failure encountered during configuration stage"))]
    JobConfigError { source: JobConfigCreationError },
    #[snafu(display("Invalid job settings"))]
    RuntimeConfigError { source: RuntimeConfigCreationError },
    #[snafu(display("Failed to read replacement text from {}", path.best_effort_display()))]
    ReplacementReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Replacement text in {} is not valid UTF-8", path.best_effort_display()))]
    ReplacementDecodeError {
        path: PathBuf,
        source: FromUtf8Error,
    },
    #[snafu(display("Critical failure encountered while splicing"))]
    SpliceError { source: SpliceError },
}
