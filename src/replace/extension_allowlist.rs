use std::path::Path;

use snafu::Snafu;

pub const DEFAULT_EXTENSIONS: [&str; 6] = [".tsx", ".ts", ".js", ".jsx", ".html", ".css"];

/// File name suffixes eligible for rewriting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionAllowlist {
    suffixes: Vec<String>,
}

impl ExtensionAllowlist {
    pub fn new(suffixes: Vec<String>) -> Result<Self, ExtensionAllowlistCreationError> {
        if suffixes.is_empty() {
            return Err(ExtensionAllowlistCreationError::NoExtensions);
        }
        if suffixes.iter().any(String::is_empty) {
            return Err(ExtensionAllowlistCreationError::EmptyExtension);
        }

        Ok(Self { suffixes })
    }

    /// Plain case-sensitive suffix match on the file name, so `types.d.ts`
    /// matches `.ts` while `App.TSX` matches nothing.
    pub fn matches(&self, path: &Path) -> bool {
        let Some(file_name) = path.file_name() else {
            return false;
        };
        let file_name = file_name.to_string_lossy();

        self.suffixes
            .iter()
            .any(|suffix| file_name.ends_with(suffix.as_str()))
    }

    pub fn suffixes(&self) -> &[String] {
        &self.suffixes
    }
}

impl Default for ExtensionAllowlist {
    fn default() -> Self {
        Self {
            suffixes: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Snafu)]
pub enum ExtensionAllowlistCreationError {
    #[snafu(display("At least one file extension is required"))]
    NoExtensions,
    #[snafu(display("File extensions must not be empty"))]
    EmptyExtension,
}
