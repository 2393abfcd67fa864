use derive_more::Display;
use snafu::Snafu;

/// A literal find-and-replace pair.
///
/// Matching is plain substring matching: `#F54029AA` contains `#F54029`
/// and gets rewritten like any other occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("'{from}' -> '{to}'")]
pub struct Substitution {
    from: String,
    to: String,
}

impl Substitution {
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> Result<Self, SubstitutionCreationError> {
        let from = from.into();
        if from.is_empty() {
            return Err(SubstitutionCreationError::EmptySourceLiteral);
        }

        Ok(Self { from, to: to.into() })
    }

    pub fn source_literal(&self) -> &str {
        &self.from
    }

    pub fn target_literal(&self) -> &str {
        &self.to
    }

    /// Returns the rewritten text, or `None` when the text would stay the same.
    pub fn apply(&self, text: &str) -> Option<String> {
        if !text.contains(&self.from) {
            return None;
        }

        let rewritten = text.replace(&self.from, &self.to);
        (rewritten != text).then_some(rewritten)
    }
}

#[derive(Debug, Snafu)]
pub enum SubstitutionCreationError {
    #[snafu(display("The literal to search for must not be empty"))]
    EmptySourceLiteral,
}
