use std::path::{Path, PathBuf};

use snafu::{ResultExt, Snafu};

use crate::cli::{BulkArgs, Cli, Command, SpliceArgs};
use crate::config::{
    BulkSettings, DEFAULT_END_MARKER, DEFAULT_NAMED_FILES, DEFAULT_ROOTS, DEFAULT_SOURCE_LITERAL,
    DEFAULT_SPLICE_FILE, DEFAULT_START_MARKER, DEFAULT_TARGET_LITERAL, JobConfig, SpliceSettings,
};
use crate::ext::PathExt;
use crate::replace::{
    BulkJob, DEFAULT_EXTENSIONS, ExtensionAllowlist, ExtensionAllowlistCreationError, Substitution,
    SubstitutionCreationError,
};
use crate::splice::{MarkerPair, MarkerPairCreationError};

/// The fully resolved job: command line first, then `recolor.yaml`, then
/// built-in defaults.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub root: PathBuf,
    pub job: RuntimeJob,
}

#[derive(Debug, Clone)]
pub enum RuntimeJob {
    Bulk(BulkJob),
    Splice(SpliceJob),
}

#[derive(Debug, Clone)]
pub struct SpliceJob {
    /// Resolved against the project root.
    pub file: PathBuf,
    pub markers: MarkerPair,
    pub replacement: ReplacementSource,
    pub locate_only: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplacementSource {
    Inline(String),
    /// Resolved against the project root.
    File(PathBuf),
    Unset,
}

impl RuntimeConfig {
    pub fn resolve(cli: Cli, job_config: JobConfig) -> Result<Self, RuntimeConfigCreationError> {
        let job = match cli.command {
            Command::Bulk(args) => RuntimeJob::Bulk(resolve_bulk(args, job_config.bulk)?),
            Command::Splice(args) => {
                RuntimeJob::Splice(resolve_splice(args, job_config.splice, &cli.root)?)
            }
        };

        Ok(Self {
            root: cli.root,
            job,
        })
    }
}

fn non_empty<T>(values: Vec<T>) -> Option<Vec<T>> {
    (!values.is_empty()).then_some(values)
}

fn owned(defaults: &[&str]) -> Vec<String> {
    defaults.iter().map(|s| s.to_string()).collect()
}

fn resolve_bulk(
    args: BulkArgs,
    settings: BulkSettings,
) -> Result<BulkJob, RuntimeConfigCreationError> {
    let from = args
        .from
        .or(settings.from)
        .unwrap_or_else(|| DEFAULT_SOURCE_LITERAL.to_string());
    let to = args
        .to
        .or(settings.to)
        .unwrap_or_else(|| DEFAULT_TARGET_LITERAL.to_string());
    let substitution = Substitution::new(from, to).context(SubstitutionSnafu)?;

    let extensions = non_empty(args.extensions)
        .or(settings.extensions)
        .unwrap_or_else(|| owned(&DEFAULT_EXTENSIONS));
    let allowlist = ExtensionAllowlist::new(extensions).context(AllowlistSnafu)?;

    let roots = non_empty(args.roots)
        .or(settings.roots)
        .unwrap_or_else(|| DEFAULT_ROOTS.iter().map(PathBuf::from).collect());
    let files = non_empty(args.files)
        .or(settings.files)
        .unwrap_or_else(|| DEFAULT_NAMED_FILES.iter().map(PathBuf::from).collect());

    Ok(BulkJob {
        substitution,
        allowlist,
        roots,
        files,
    })
}

fn resolve_splice(
    args: SpliceArgs,
    settings: SpliceSettings,
    root: &Path,
) -> Result<SpliceJob, RuntimeConfigCreationError> {
    let file = args
        .file
        .or(settings.file)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SPLICE_FILE))
        .resolve_against(root);

    let start = args
        .start
        .or(settings.start)
        .unwrap_or_else(|| DEFAULT_START_MARKER.to_string());
    let end = args
        .end
        .or(settings.end)
        .unwrap_or_else(|| DEFAULT_END_MARKER.to_string());
    let markers = MarkerPair::new(start, end).context(MarkersSnafu)?;

    // A replacement file given on the command line beats anything configured.
    let replacement = match (args.replacement_file, settings.replacement_file, settings.replacement)
    {
        (Some(path), _, _) | (None, Some(path), _) => {
            ReplacementSource::File(path.resolve_against(root))
        }
        (None, None, Some(text)) => ReplacementSource::Inline(text),
        (None, None, None) => ReplacementSource::Unset,
    };

    if replacement == ReplacementSource::Unset && !args.locate_only {
        return Err(RuntimeConfigCreationError::MissingReplacement);
    }

    Ok(SpliceJob {
        file,
        markers,
        replacement,
        locate_only: args.locate_only,
    })
}

#[derive(Debug, Snafu)]
pub enum RuntimeConfigCreationError {
    #[snafu(display("Invalid substitution"))]
    SubstitutionError { source: SubstitutionCreationError },
    #[snafu(display("Invalid extension allowlist"))]
    AllowlistError {
        source: ExtensionAllowlistCreationError,
    },
    #[snafu(display("Invalid splice markers"))]
    MarkersError { source: MarkerPairCreationError },
    #[snafu(display(
        "No replacement text configured; pass --with <FILE> or set splice.replacement_file"
    ))]
    MissingReplacement,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn resolve(args: &[&str], job_config: JobConfig) -> Result<RuntimeConfig, RuntimeConfigCreationError> {
        let cli = Cli::parse_from(std::iter::once("recolor").chain(args.iter().copied()));
        RuntimeConfig::resolve(cli, job_config)
    }

    fn bulk(config: RuntimeConfig) -> BulkJob {
        match config.job {
            RuntimeJob::Bulk(job) => job,
            RuntimeJob::Splice(_) => panic!("Expected bulk job"),
        }
    }

    fn splice(config: RuntimeConfig) -> SpliceJob {
        match config.job {
            RuntimeJob::Splice(job) => job,
            RuntimeJob::Bulk(_) => panic!("Expected splice job"),
        }
    }

    #[test]
    fn bulk_falls_back_to_builtin_defaults() {
        let job = bulk(resolve(&["bulk"], JobConfig::default()).unwrap());

        assert_eq!(job.substitution, Substitution::new("#F54029", "#4dd9cf").unwrap());
        assert_eq!(job.allowlist, ExtensionAllowlist::default());
        assert_eq!(job.roots, vec![PathBuf::from("src"), PathBuf::from("extension")]);
        assert_eq!(
            job.files,
            vec![PathBuf::from("base_console.txt"), PathBuf::from("replace_partial.py")]
        );
    }

    #[test]
    fn command_line_beats_config_file() {
        let mut job_config = JobConfig::default();
        job_config.bulk.from = Some("#111111".to_string());
        job_config.bulk.to = Some("#222222".to_string());
        job_config.bulk.roots = Some(vec![PathBuf::from("app")]);

        let job = bulk(resolve(&["bulk", "--to", "#333333"], job_config).unwrap());

        assert_eq!(job.substitution.source_literal(), "#111111");
        assert_eq!(job.substitution.target_literal(), "#333333");
        assert_eq!(job.roots, vec![PathBuf::from("app")]);
    }

    #[test]
    fn empty_source_literal_is_rejected() {
        let result = resolve(&["bulk", "--from", ""], JobConfig::default());
        assert!(matches!(
            result,
            Err(RuntimeConfigCreationError::SubstitutionError { .. })
        ));
    }

    #[test]
    fn empty_configured_extension_list_is_rejected() {
        let mut job_config = JobConfig::default();
        job_config.bulk.extensions = Some(vec![]);

        let result = resolve(&["bulk"], job_config);
        assert!(matches!(
            result,
            Err(RuntimeConfigCreationError::AllowlistError { .. })
        ));
    }

    #[test]
    fn splice_resolves_paths_against_root() {
        let job = splice(
            resolve(&["--root", "/project", "splice", "--with", "block.tsx"], JobConfig::default())
                .unwrap(),
        );

        assert_eq!(job.file, PathBuf::from("/project/src/app/console/page.tsx"));
        assert_eq!(job.markers, MarkerPair::new("type BoneState = {", "function EarIcon").unwrap());
        assert_eq!(
            job.replacement,
            ReplacementSource::File(PathBuf::from("/project/block.tsx"))
        );
        assert!(!job.locate_only);
    }

    #[test]
    fn inline_replacement_comes_from_config() {
        let mut job_config = JobConfig::default();
        job_config.splice.replacement = Some("type BoneState = {};\n".to_string());

        let job = splice(resolve(&["splice"], job_config).unwrap());
        assert_eq!(
            job.replacement,
            ReplacementSource::Inline("type BoneState = {};\n".to_string())
        );
    }

    #[test]
    fn splice_without_replacement_is_rejected_unless_locating() {
        assert!(matches!(
            resolve(&["splice"], JobConfig::default()),
            Err(RuntimeConfigCreationError::MissingReplacement)
        ));

        let job = splice(resolve(&["splice", "--locate-only"], JobConfig::default()).unwrap());
        assert_eq!(job.replacement, ReplacementSource::Unset);
        assert!(job.locate_only);
    }

    #[test]
    fn empty_marker_is_rejected() {
        let result = resolve(&["splice", "--locate-only", "--end", ""], JobConfig::default());
        assert!(matches!(
            result,
            Err(RuntimeConfigCreationError::MarkersError { .. })
        ));
    }
}
