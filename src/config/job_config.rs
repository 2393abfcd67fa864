use std::{
    borrow::Cow,
    io::ErrorKind,
    path::{Path, PathBuf},
    string::FromUtf8Error,
};

use compio::fs;
use hashlink::LinkedHashMap;
use saphyr::{LoadableYamlNode, Scalar, Yaml};
use snafu::prelude::*;
use tracing::{debug, info};

use crate::ext::PathExt;

const CONFIG_FILE_NAME: &str = "recolor.yaml";

fn get_config_file_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE_NAME)
}

fn key<'a>(name: &'static str) -> Yaml<'a> {
    Yaml::Value(Scalar::String(Cow::Borrowed(name)))
}

/// Settings read from `recolor.yaml`. Every field is optional; anything left
/// out falls back to the command line or the built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobConfig {
    pub bulk: BulkSettings,
    pub splice: SpliceSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkSettings {
    pub from: Option<String>,
    pub to: Option<String>,
    pub roots: Option<Vec<PathBuf>>,
    pub files: Option<Vec<PathBuf>>,
    pub extensions: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpliceSettings {
    pub file: Option<PathBuf>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub replacement: Option<String>,
    pub replacement_file: Option<PathBuf>,
}

impl JobConfig {
    /// Reads `recolor.yaml` from the project root. A missing file yields the
    /// empty configuration.
    pub async fn read(root: &Path) -> Result<Self, JobConfigCreationError> {
        let path = get_config_file_path(root);
        if !path.exists() {
            info!(
                "No {} found in {}, using defaults",
                CONFIG_FILE_NAME,
                root.best_effort_display()
            );
            return Ok(Self::default());
        }
        Self::from_path(path).await
    }

    pub async fn from_path(path: PathBuf) -> Result<Self, JobConfigCreationError> {
        debug!("Reading config file: {}", path.best_effort_display());
        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!("Config file disappeared before it could be read, using defaults");
                return Ok(Self::default());
            }
            Err(err) => {
                return Err(err).context(ReadSnafu {
                    file_path: path.best_effort_display(),
                });
            }
        };
        debug!("Successfully read config file: {} bytes", bytes.len());

        let contents = String::from_utf8(bytes).context(DecodeSnafu {
            file_path: path.best_effort_display(),
        })?;
        contents.as_str().try_into()
    }

    fn parse_bulk(section: &LinkedHashMap<Yaml, Yaml>) -> Result<BulkSettings, JobConfigCreationError> {
        log_unknown_keys("bulk", section, &["from", "to", "roots", "files", "extensions"]);
        Ok(BulkSettings {
            from: string_field("bulk", section, "from")?,
            to: string_field("bulk", section, "to")?,
            roots: string_list_field("bulk", section, "roots")?
                .map(|roots| roots.into_iter().map(PathBuf::from).collect()),
            files: string_list_field("bulk", section, "files")?
                .map(|files| files.into_iter().map(PathBuf::from).collect()),
            extensions: string_list_field("bulk", section, "extensions")?,
        })
    }

    fn parse_splice(
        section: &LinkedHashMap<Yaml, Yaml>,
    ) -> Result<SpliceSettings, JobConfigCreationError> {
        log_unknown_keys(
            "splice",
            section,
            &["file", "start", "end", "replacement", "replacement_file"],
        );
        Ok(SpliceSettings {
            file: string_field("splice", section, "file")?.map(PathBuf::from),
            start: string_field("splice", section, "start")?,
            end: string_field("splice", section, "end")?,
            replacement: string_field("splice", section, "replacement")?,
            replacement_file: string_field("splice", section, "replacement_file")?
                .map(PathBuf::from),
        })
    }
}

impl TryFrom<&str> for JobConfig {
    type Error = JobConfigCreationError;

    fn try_from(contents: &str) -> Result<Self, Self::Error> {
        let documents = Yaml::load_from_str(contents).context(ParseSnafu)?;
        let document = documents
            .first()
            .ok_or(JobConfigCreationError::MalformedConfig)?;
        let top_level = document
            .as_mapping()
            .ok_or(JobConfigCreationError::TopLevelNotMap)?;
        log_unknown_keys("top level", top_level, &["bulk", "splice"]);

        let bulk = match section(top_level, "bulk")? {
            Some(section) => Self::parse_bulk(section)?,
            None => BulkSettings::default(),
        };
        let splice = match section(top_level, "splice")? {
            Some(section) => Self::parse_splice(section)?,
            None => SpliceSettings::default(),
        };

        Ok(JobConfig { bulk, splice })
    }
}

fn is_null(value: &Yaml) -> bool {
    matches!(value, Yaml::Value(Scalar::Null))
}

fn section<'m, 'a>(
    top_level: &'m LinkedHashMap<Yaml<'a>, Yaml<'a>>,
    name: &'static str,
) -> Result<Option<&'m LinkedHashMap<Yaml<'a>, Yaml<'a>>>, JobConfigCreationError> {
    match top_level.get(&key(name)) {
        None => Ok(None),
        Some(value) if is_null(value) => Ok(None),
        Some(value) => value
            .as_mapping()
            .map(Some)
            .ok_or(JobConfigCreationError::SectionNotMap { section: name }),
    }
}

fn string_field(
    section: &'static str,
    data: &LinkedHashMap<Yaml, Yaml>,
    name: &'static str,
) -> Result<Option<String>, JobConfigCreationError> {
    match data.get(&key(name)) {
        None => Ok(None),
        Some(value) if is_null(value) => Ok(None),
        Some(value) => value
            .as_str()
            .map(|s| Some(s.to_string()))
            .ok_or(JobConfigCreationError::NotAString { section, key: name }),
    }
}

fn string_list_field(
    section: &'static str,
    data: &LinkedHashMap<Yaml, Yaml>,
    name: &'static str,
) -> Result<Option<Vec<String>>, JobConfigCreationError> {
    let value = match data.get(&key(name)) {
        None => return Ok(None),
        Some(value) if is_null(value) => return Ok(None),
        Some(value) => value,
    };

    value
        .as_sequence()
        .ok_or(JobConfigCreationError::NotAStringList { section, key: name })?
        .iter()
        .map(|item| {
            item.as_str()
                .map(|s| s.to_string())
                .ok_or(JobConfigCreationError::NotAStringList { section, key: name })
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

fn log_unknown_keys(section: &str, data: &LinkedHashMap<Yaml, Yaml>, known: &[&str]) {
    data.keys()
        .filter(|k| !k.as_str().is_some_and(|k| known.contains(&k)))
        .for_each(|k| debug!("Ignoring unknown key in {} section: {:?}", section, k));
}

#[derive(Debug, Snafu)]
pub enum JobConfigCreationError {
    #[snafu(display("Failed to read the config file: {}", file_path))]
    ReadError {
        file_path: String,
        source: std::io::Error,
    },
    #[snafu(display("The config file {} is not valid UTF-8", file_path))]
    DecodeError {
        file_path: String,
        source: FromUtf8Error,
    },
    #[snafu(display("Failed to parse the config file"))]
    ParseError { source: saphyr::ScanError },
    #[snafu(display("Improperly formatted config file"))]
    MalformedConfig,
    #[snafu(display("Top level of config should be a map"))]
    TopLevelNotMap,
    #[snafu(display("The '{}' section should be a map", section))]
    SectionNotMap { section: &'static str },
    #[snafu(display("'{}.{}' should be a string", section, key))]
    NotAString {
        section: &'static str,
        key: &'static str,
    },
    #[snafu(display("'{}.{}' should be a list of strings", section, key))]
    NotAStringList {
        section: &'static str,
        key: &'static str,
    },
}
