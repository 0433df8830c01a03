//! Raw document layer
//!
//! Turns an untyped document into typed, still-unresolved pieces: the
//! package-level overrides, the raw job list and, per job, its type,
//! trigger, metadata and overrides. Nothing here applies defaults or
//! inheritance; that is the resolver's job.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::common::CommonOverrides;
use crate::error::{Error, Result};
use crate::job::{JobConfigTriggerType, JobMetadataConfig, JobType};

/// Accepted spelling of `synced_files`.
pub const SYNCED_FILES_SYNONYM: &str = "files_to_sync";

/// Package-level part of a document.
#[derive(Debug, Clone, PartialEq)]
pub struct RawPackageConfig {
    pub config_file_path: Option<String>,
    pub common: CommonOverrides,
    /// `None` when the document has no `jobs` key at all; an explicit
    /// `jobs: []` (or `jobs: null`) is `Some` of an empty list.
    pub jobs: Option<Vec<Value>>,
}

impl RawPackageConfig {
    pub fn from_document(document: &Map<String, Value>) -> Result<Self> {
        let mut fields = normalize_synonyms(document.clone())?;

        let jobs = match fields.remove("jobs") {
            None => None,
            Some(Value::Null) => Some(Vec::new()),
            Some(Value::Array(jobs)) => Some(jobs),
            Some(other) => {
                return Err(Error::validation(
                    "jobs",
                    format!("expected a list, found {}", kind(&other)),
                ));
            }
        };

        let config_file_path = match fields.remove("config_file_path") {
            None | Some(Value::Null) => None,
            Some(Value::String(path)) => Some(path),
            Some(other) => {
                return Err(Error::validation(
                    "config_file_path",
                    format!("expected a string, found {}", kind(&other)),
                ));
            }
        };

        warn_unprocessed("package", &fields, &CommonOverrides::KEYS);
        let common = parse_fields(fields)?;

        Ok(Self {
            config_file_path,
            common,
            jobs,
        })
    }
}

/// One entry of the `jobs` list.
#[derive(Debug, Clone, PartialEq)]
pub struct RawJobConfig {
    pub job: JobType,
    pub trigger: JobConfigTriggerType,
    pub metadata: JobMetadataConfig,
    pub common: CommonOverrides,
}

impl RawJobConfig {
    pub fn from_value(raw: &Value) -> Result<Self> {
        let Value::Object(map) = raw else {
            return Err(Error::validation(
                "job",
                format!("expected a mapping, found {}", kind(raw)),
            ));
        };

        let mut fields = normalize_synonyms(map.clone())?;
        lift_nested_metadata(&mut fields)?;

        let job = take_required::<JobType>(&mut fields, "job")?;
        let trigger = take_required::<JobConfigTriggerType>(&mut fields, "trigger")?;

        let mut metadata_fields = Map::new();
        for key in JobMetadataConfig::KEYS {
            if let Some(value) = fields.remove(key) {
                metadata_fields.insert(key.to_string(), value);
            }
        }
        let metadata = parse_fields(metadata_fields)?;

        warn_unprocessed("job", &fields, &CommonOverrides::KEYS);
        let common = parse_fields(fields)?;

        Ok(Self {
            job,
            trigger,
            metadata,
            common,
        })
    }
}

/// Rename `files_to_sync` to `synced_files`; giving both is ambiguous.
fn normalize_synonyms(mut fields: Map<String, Value>) -> Result<Map<String, Value>> {
    if let Some(files) = fields.remove(SYNCED_FILES_SYNONYM) {
        if fields.contains_key("synced_files") {
            return Err(Error::validation(
                "synced_files",
                format!("'synced_files' and '{SYNCED_FILES_SYNONYM}' are mutually exclusive"),
            ));
        }
        fields.insert("synced_files".to_string(), files);
    }
    Ok(fields)
}

/// Older configs nest job-only keys under `metadata:`. Those keys are moved
/// to the job's top level unless already given there.
fn lift_nested_metadata(fields: &mut Map<String, Value>) -> Result<()> {
    match fields.remove("metadata") {
        None | Some(Value::Null) => Ok(()),
        Some(Value::Object(nested)) => {
            for (key, value) in nested {
                fields.entry(key).or_insert(value);
            }
            Ok(())
        }
        Some(other) => Err(Error::validation(
            "metadata",
            format!("expected a mapping, found {}", kind(&other)),
        )),
    }
}

fn take_required<T>(fields: &mut Map<String, Value>, key: &str) -> Result<T>
where
    T: std::str::FromStr<Err = Error>,
{
    match fields.remove(key) {
        None | Some(Value::Null) => Err(Error::validation(key, "missing required field")),
        Some(Value::String(value)) => value.parse(),
        Some(other) => Err(Error::validation(
            key,
            format!("expected a string, found {}", kind(&other)),
        )),
    }
}

/// Deserialize `fields` into `T`, reporting which key failed.
fn parse_fields<T: DeserializeOwned>(fields: Map<String, Value>) -> Result<T> {
    for (key, value) in &fields {
        let single = Map::from_iter([(key.clone(), value.clone())]);
        if let Err(e) = serde_json::from_value::<T>(Value::Object(single)) {
            return Err(Error::validation(key.as_str(), e.to_string()));
        }
    }
    serde_json::from_value(Value::Object(fields)).map_err(Error::from)
}

fn warn_unprocessed(scope: &str, fields: &Map<String, Value>, known: &[&str]) {
    let unknown: Vec<&str> = fields
        .keys()
        .map(String::as_str)
        .filter(|key| !known.contains(key))
        .collect();
    if !unknown.is_empty() {
        tracing::warn!(scope, keys = ?unknown, "Following keys were not processed");
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}
