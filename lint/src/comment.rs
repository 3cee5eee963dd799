//! @ai:module:intent Define the comment blocks handed over by the host for validation
//! @ai:module:layer domain
//! @ai:module:public_api Comment, Document, Location
//! @ai:module:depends_on error
//! @ai:module:stateless true

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// @ai:intent Represents a source code location
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Location {
    pub file: PathBuf,
    pub line: usize,
    pub column: Option<usize>,
}

impl Location {
    /// @ai:intent Create a new Location
    pub fn new(file: PathBuf, line: usize) -> Self {
        Self {
            file,
            line,
            column: None,
        }
    }

    /// @ai:intent Location of a line further down inside the same comment
    /// @ai:example (line 4, offset 2) -> line 6, column dropped
    /// @ai:effects pure
    pub fn offset_lines(&self, offset: usize) -> Self {
        if offset == 0 {
            return self.clone();
        }
        Self {
            file: self.file.clone(),
            line: self.line + offset,
            column: None,
        }
    }
}

/// @ai:intent One comment as extracted by the host, body without delimiters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Comment {
    pub location: Location,
    pub body: String,
}

impl Comment {
    pub fn new(location: Location, body: impl Into<String>) -> Self {
        Self {
            location,
            body: body.into(),
        }
    }
}

/// @ai:intent All comments found in one source document, in document order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    pub path: PathBuf,
    pub comments: Vec<Comment>,
}

/// On-disk manifest: comments carry only line/column, the path is shared.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Manifest {
    path: PathBuf,
    #[serde(default)]
    comments: Vec<ManifestComment>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ManifestComment {
    line: usize,
    #[serde(default)]
    column: Option<usize>,
    body: String,
}

impl Document {
    /// @ai:intent Parse a comment manifest from JSON text
    /// @ai:effects pure
    pub fn from_json_str(content: &str) -> Result<Self> {
        let manifest: Manifest = serde_json::from_str(content)?;
        Ok(Self::from_manifest(manifest))
    }

    /// @ai:intent Load a comment manifest written by a comment extractor
    /// @ai:pre path exists and contains a JSON manifest
    /// @ai:effects fs:read
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        let manifest: Manifest =
            serde_json::from_str(&content).map_err(|e| Error::Manifest {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(Self::from_manifest(manifest))
    }

    fn from_manifest(manifest: Manifest) -> Self {
        let comments = manifest
            .comments
            .into_iter()
            .map(|c| Comment {
                location: Location {
                    file: manifest.path.clone(),
                    line: c.line,
                    column: c.column,
                },
                body: c.body,
            })
            .collect();

        Self {
            path: manifest.path,
            comments,
        }
    }
}
