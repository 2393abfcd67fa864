use std::ops::Range;

use derive_more::Display;
use snafu::Snafu;

/// Two literal markers delimiting a region of one file.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("'{start}' .. '{end}'")]
pub struct MarkerPair {
    start: String,
    end: String,
}

/// Where a [`MarkerPair`] was found inside a text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedSpan {
    pub range: Range<usize>,
    pub start_line: usize,
    pub end_line: usize,
}

impl MarkerPair {
    pub fn new(
        start: impl Into<String>,
        end: impl Into<String>,
    ) -> Result<Self, MarkerPairCreationError> {
        let start = start.into();
        let end = end.into();
        ensure_non_empty(&start, "start")?;
        ensure_non_empty(&end, "end")?;

        Ok(Self { start, end })
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn end(&self) -> &str {
        &self.end
    }

    /// First start marker, then the first end marker at or after it. The
    /// returned range covers the start marker up to, not including, the end
    /// marker.
    pub fn locate(&self, text: &str) -> Result<LocatedSpan, MarkerNotFoundError> {
        let start = text
            .find(&self.start)
            .ok_or_else(|| MarkerNotFoundError::StartMarkerNotFound {
                marker: self.start.clone(),
            })?;
        let end = text[start..]
            .find(&self.end)
            .map(|offset| start + offset)
            .ok_or_else(|| MarkerNotFoundError::EndMarkerNotFound {
                marker: self.end.clone(),
                after: start,
            })?;

        Ok(LocatedSpan {
            range: start..end,
            start_line: line_number(text, start),
            end_line: line_number(text, end),
        })
    }

    /// Replaces the located span with `replacement`, keeping the end marker.
    pub fn splice(&self, text: &str, replacement: &str) -> Result<String, MarkerNotFoundError> {
        Ok(self.locate(text)?.splice(text, replacement))
    }
}

impl LocatedSpan {
    /// `text` must be the text this span was located in.
    pub fn splice(&self, text: &str, replacement: &str) -> String {
        let mut spliced =
            String::with_capacity(text.len() - self.range.len() + replacement.len());
        spliced.push_str(&text[..self.range.start]);
        spliced.push_str(replacement);
        spliced.push_str(&text[self.range.end..]);
        spliced
    }
}

fn ensure_non_empty(marker: &str, which: &'static str) -> Result<(), MarkerPairCreationError> {
    if marker.is_empty() {
        return Err(MarkerPairCreationError::EmptyMarker { which });
    }
    Ok(())
}

fn line_number(text: &str, offset: usize) -> usize {
    text[..offset].matches('\n').count() + 1
}

#[derive(Debug, Snafu)]
pub enum MarkerPairCreationError {
    #[snafu(display("The {} marker must not be empty", which))]
    EmptyMarker { which: &'static str },
}

#[derive(Debug, Snafu)]
pub enum MarkerNotFoundError {
    #[snafu(display("Start marker '{}' not found", marker))]
    StartMarkerNotFound { marker: String },
    #[snafu(display("End marker '{}' not found after offset {}", marker, after))]
    EndMarkerNotFound { marker: String, after: usize },
}
