use std::path::PathBuf;
use std::string::FromUtf8Error;

use compio::fs;
use snafu::{ResultExt, Snafu};
use tracing::{debug, info};

use crate::ext::PathExt;
use crate::splice::{LocatedSpan, MarkerNotFoundError, MarkerPair};

/// Splices a replacement block into a single file between two markers.
pub struct PartialReplacer {
    path: PathBuf,
    markers: MarkerPair,
}

impl PartialReplacer {
    pub fn new(path: impl Into<PathBuf>, markers: MarkerPair) -> Self {
        Self {
            path: path.into(),
            markers,
        }
    }

    pub async fn locate(&self) -> Result<LocatedSpan, SpliceError> {
        let text = self.read_text().await?;
        self.markers.locate(&text).context(MarkerSnafu {
            path: self.path.clone(),
        })
    }

    /// Reads the file once, splices once and writes the whole content back.
    /// Nothing is written when a marker is missing.
    pub async fn replace(&self, replacement: &str) -> Result<LocatedSpan, SpliceError> {
        let text = self.read_text().await?;
        let span = self.markers.locate(&text).context(MarkerSnafu {
            path: self.path.clone(),
        })?;
        let spliced = span.splice(&text, replacement);
        debug!(
            "Replacing bytes {}..{} of {} ({} -> {} bytes)",
            span.range.start,
            span.range.end,
            self.path.best_effort_display(),
            span.range.len(),
            replacement.len()
        );

        fs::write(&self.path, spliced.into_bytes())
            .await
            .0
            .context(WriteSnafu {
                path: self.path.clone(),
            })?;
        info!("Spliced {} into {}", self.markers, self.path.best_effort_display());
        Ok(span)
    }

    async fn read_text(&self) -> Result<String, SpliceError> {
        let bytes = fs::read(&self.path).await.context(ReadSnafu {
            path: self.path.clone(),
        })?;
        String::from_utf8(bytes).context(DecodeSnafu {
            path: self.path.clone(),
        })
    }
}

#[derive(Debug, Snafu)]
pub enum SpliceError {
    #[snafu(display("Failed to read {}", path.best_effort_display()))]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("{} is not valid UTF-8", path.best_effort_display()))]
    DecodeError {
        path: PathBuf,
        source: FromUtf8Error,
    },
    #[snafu(display("Cannot locate the span to replace in {}", path.best_effort_display()))]
    MarkerError {
        path: PathBuf,
        source: MarkerNotFoundError,
    },
    #[snafu(display("Failed to write {}", path.best_effort_display()))]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
}
