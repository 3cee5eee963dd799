//! @ai:module:intent Rule options for the TODO task linter and their file formats
//! @ai:module:layer infrastructure
//! @ai:module:public_api ProjectId, RuleOptions, OptionOverrides, DEFAULT_CONFIG_FILE
//! @ai:module:depends_on error, violation
//! @ai:module:stateless true

use crate::error::{Error, Result};
use crate::violation::Severity;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// File name `init` writes and `check` picks up when present.
pub const DEFAULT_CONFIG_FILE: &str = "todo-task.toml";

const PROJECT_ID_MAX_LEN: usize = 10;
const DEFAULT_MIN_DESCRIPTION_LENGTH: usize = 10;

/// @ai:intent Issue tracker project prefix, e.g. `AB` in `AB-123`
/// @ai:invariant matches ^[A-Z0-9]{1,10}$
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProjectId(String);

impl ProjectId {
    /// @ai:intent Validate and wrap a project prefix
    /// @ai:example ("AB") -> Ok
    /// @ai:example ("ab") -> Err(InvalidProjectId)
    /// @ai:example ("ABCDEFGHIJK") -> Err(InvalidProjectId)
    /// @ai:effects pure
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        let valid = (1..=PROJECT_ID_MAX_LEN).contains(&value.len())
            && value
                .bytes()
                .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit());

        if valid {
            Ok(Self(value))
        } else {
            Err(Error::InvalidProjectId(value))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ProjectId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<ProjectId> for String {
    fn from(id: ProjectId) -> Self {
        id.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// @ai:intent Policy applied to every TODO/FIXME annotation line
/// @ai:effects pure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RuleOptions {
    /// Restricts task IDs to this prefix; any 1-10 letter prefix otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<ProjectId>,
    /// Task ID must directly follow the marker.
    #[serde(default)]
    pub project_id_first: bool,
    /// Minimum description length in characters, 0 disables the check.
    #[serde(default = "default_min_description_length")]
    pub min_description_length: usize,
    /// `error` fails the run, `warn` only reports.
    #[serde(default)]
    pub severity: Severity,
}

impl Default for RuleOptions {
    fn default() -> Self {
        Self {
            project_id: None,
            project_id_first: false,
            min_description_length: default_min_description_length(),
            severity: Severity::default(),
        }
    }
}

fn default_min_description_length() -> usize {
    DEFAULT_MIN_DESCRIPTION_LENGTH
}

/// @ai:intent Per-field overrides coming from the command line
#[derive(Debug, Clone, Default)]
pub struct OptionOverrides {
    pub project_id: Option<ProjectId>,
    pub project_id_first: Option<bool>,
    pub min_description_length: Option<usize>,
    pub severity: Option<Severity>,
}

impl RuleOptions {
    /// @ai:intent Parse options from TOML text
    /// @ai:effects pure
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// @ai:intent Parse options from a JSON object using the host option names
    /// @ai:example ({"projectId":"AB"}) -> project_id = Some(AB), rest default
    /// @ai:effects pure
    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// @ai:intent Load options from a TOML file
    /// @ai:pre path exists and is readable
    /// @ai:effects fs:read
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        let options = toml::from_str(&content).map_err(|e| Error::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })?;

        tracing::debug!("Loaded rule options from {}", path.display());
        Ok(options)
    }

    /// @ai:intent Save options to a TOML file
    /// @ai:effects fs:write
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// @ai:intent Apply command line overrides on top of these options
    /// @ai:effects pure
    pub fn merge_overrides(mut self, overrides: OptionOverrides) -> Self {
        if let Some(project_id) = overrides.project_id {
            self.project_id = Some(project_id);
        }
        if let Some(first) = overrides.project_id_first {
            self.project_id_first = first;
        }
        if let Some(min) = overrides.min_description_length {
            self.min_description_length = min;
        }
        if let Some(severity) = overrides.severity {
            self.severity = severity;
        }
        self
    }
}
