use std::path::{Path, PathBuf};
use std::string::FromUtf8Error;

use colored::Colorize;
use compio::fs;
use snafu::{ResultExt, Snafu};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::ext::PathExt;
use crate::replace::{ExtensionAllowlist, Substitution};
use crate::report::ChangeReport;

/// Everything a bulk run needs to know, with paths relative to the project root.
#[derive(Debug, Clone)]
pub struct BulkJob {
    pub substitution: Substitution,
    pub allowlist: ExtensionAllowlist,
    pub roots: Vec<PathBuf>,
    pub files: Vec<PathBuf>,
}

pub struct BulkReplacer {
    project_root: PathBuf,
    job: BulkJob,
}

impl BulkReplacer {
    pub fn new(project_root: impl Into<PathBuf>, job: BulkJob) -> Self {
        Self {
            project_root: project_root.into(),
            job,
        }
    }

    /// Rewrites every candidate file in turn. Failures on a single file are
    /// printed, recorded and skipped; the run always completes.
    pub async fn run(&self) -> ChangeReport {
        info!(
            "Replacing {} in {} roots ({:?}) and {} named files",
            self.job.substitution,
            self.job.roots.len(),
            self.job.allowlist.suffixes(),
            self.job.files.len()
        );

        let mut report = ChangeReport::default();
        for path in self.candidate_files() {
            let shown = path.relative_to(&self.project_root);
            match self.rewrite_file(&path).await {
                Ok(true) => {
                    debug!("Rewrote {}", shown.display());
                    report.record_change(shown);
                }
                Ok(false) => debug!("No match in {}", shown.display()),
                Err(err) => {
                    warn!("Skipping {}: {}", path.best_effort_display(), err);
                    eprintln!(
                        "{}",
                        format!("Error processing {}: {}", shown.display(), err).red()
                    );
                    report.record_failure(shown, err.to_string());
                }
            }
        }

        info!(
            "Bulk run finished: {} changed, {} failed",
            report.changed().len(),
            report.failed().len()
        );
        report
    }

    /// Allowlisted files under each root in walk order, then the named files
    /// that exist.
    fn candidate_files(&self) -> Vec<PathBuf> {
        let mut candidates = Vec::new();

        for root in &self.job.roots {
            let dir = root.resolve_against(&self.project_root);
            if !dir.is_dir() {
                info!("Directory {} not found, skipping", dir.best_effort_display());
                continue;
            }
            candidates.extend(self.walk(&dir));
        }

        for file in &self.job.files {
            let path = file.resolve_against(&self.project_root);
            if path.exists() {
                candidates.push(path);
            } else {
                debug!("Named file {} not found, skipping", path.best_effort_display());
            }
        }

        debug!("Collected {} candidate files", candidates.len());
        candidates
    }

    fn walk(&self, dir: &Path) -> Vec<PathBuf> {
        WalkDir::new(dir)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(err) => {
                    warn!("Failed to walk {}: {}", dir.best_effort_display(), err);
                    None
                }
            })
            .filter(|entry| {
                entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file())
            })
            .map(walkdir::DirEntry::into_path)
            .filter(|path| self.job.allowlist.matches(path))
            .collect()
    }

    /// Returns whether the file was rewritten.
    async fn rewrite_file(&self, path: &Path) -> Result<bool, FileRewriteError> {
        let bytes = fs::read(path).await.context(ReadSnafu)?;
        let text = String::from_utf8(bytes).context(DecodeSnafu)?;

        let Some(rewritten) = self.job.substitution.apply(&text) else {
            return Ok(false);
        };

        fs::write(path, rewritten.into_bytes())
            .await
            .0
            .context(WriteSnafu)?;
        Ok(true)
    }
}

#[derive(Debug, Snafu)]
pub enum FileRewriteError {
    #[snafu(display("failed to read file: {source}"))]
    ReadError { source: std::io::Error },
    #[snafu(display("file is not valid UTF-8: {source}"))]
    DecodeError { source: FromUtf8Error },
    #[snafu(display("failed to write file: {source}"))]
    WriteError { source: std::io::Error },
}
