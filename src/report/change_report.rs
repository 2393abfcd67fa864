use std::fmt;
use std::path::PathBuf;

use colored::Colorize;

/// Files rewritten during a bulk run, in visiting order, plus the files that
/// could not be processed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeReport {
    changed: Vec<PathBuf>,
    failed: Vec<FailedFile>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedFile {
    pub path: PathBuf,
    pub message: String,
}

impl ChangeReport {
    pub fn record_change(&mut self, path: PathBuf) {
        self.changed.push(path);
    }

    pub fn record_failure(&mut self, path: PathBuf, message: String) {
        self.failed.push(FailedFile { path, message });
    }

    pub fn changed(&self) -> &[PathBuf] {
        &self.changed
    }

    pub fn failed(&self) -> &[FailedFile] {
        &self.failed
    }

    pub fn print(&self) {
        print!("{self}");
        if !self.failed.is_empty() {
            eprintln!(
                "{}",
                format!("Failed to process {} files", self.failed.len()).red()
            );
        }
    }
}

impl fmt::Display for ChangeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{}",
            format!("Updated {} files:", self.changed.len()).bold()
        )?;
        for path in &self.changed {
            writeln!(f, "  - {}", path.display().to_string().green())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_report_lists_nothing() {
        colored::control::set_override(false);
        let report = ChangeReport::default();
        assert_eq!(report.to_string(), "Updated 0 files:\n");
    }

    #[test]
    fn report_lists_changes_in_recorded_order() {
        colored::control::set_override(false);
        let mut report = ChangeReport::default();
        report.record_change(PathBuf::from("src/b.tsx"));
        report.record_change(PathBuf::from("src/a.css"));

        assert_eq!(
            report.to_string(),
            "Updated 2 files:\n  - src/b.tsx\n  - src/a.css\n"
        );
        assert_eq!(
            report.changed(),
            &[PathBuf::from("src/b.tsx"), PathBuf::from("src/a.css")]
        );
    }

    #[test]
    fn failures_are_kept_apart_from_changes() {
        let mut report = ChangeReport::default();
        report.record_failure(PathBuf::from("src/bad.ts"), "invalid UTF-8".to_string());

        assert!(report.changed().is_empty());
        assert_eq!(report.failed().len(), 1);
        assert_eq!(report.failed()[0].message, "invalid UTF-8");
    }
}
