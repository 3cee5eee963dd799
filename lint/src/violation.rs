//! @ai:module:intent Define the violation kinds reported for TODO/FIXME annotations
//! @ai:module:layer domain
//! @ai:module:public_api Violation, ViolationKind, Severity, RULE_ID, RULE_DESCRIPTION
//! @ai:module:stateless true

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Namespace of every message id this crate reports.
pub const RULE_ID: &str = "require-todo-task-number";

pub const RULE_DESCRIPTION: &str = "Enforces syntax for TODO and FIXME comments";

/// @ai:intent How a reported violation affects the run outcome
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Fails the run.
    #[default]
    Error,
    /// Reported only.
    #[serde(alias = "warn")]
    Warning,
}

/// @ai:intent The policy check an annotation line failed
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(tag = "messageId", rename_all = "camelCase")]
pub enum ViolationKind {
    /// Keyword present but not as the leading marker.
    NotStartingWithTodo,
    MissingTaskNumber,
    TaskNumberNotFirst,
    /// Description shorter than `chars`.
    NoDescription { chars: usize },
}

impl ViolationKind {
    /// @ai:intent Stable identifier used in reports
    /// @ai:effects pure
    pub fn message_id(&self) -> &'static str {
        match self {
            ViolationKind::NotStartingWithTodo => "notStartingWithTodo",
            ViolationKind::MissingTaskNumber => "missingTaskNumber",
            ViolationKind::TaskNumberNotFirst => "taskNumberNotFirst",
            ViolationKind::NoDescription { .. } => "noDescription",
        }
    }

    /// @ai:intent Human readable message with data interpolated
    /// @ai:effects pure
    pub fn message(&self) -> String {
        match self {
            ViolationKind::NotStartingWithTodo => {
                "Line with a TODO comment must start with a TODO".to_string()
            }
            ViolationKind::MissingTaskNumber => "TODO comment must include a task ID".to_string(),
            ViolationKind::TaskNumberNotFirst => {
                "Project ID must be the first part of the TODO comment".to_string()
            }
            ViolationKind::NoDescription { chars } => format!(
                "TODO comment must include a text description (min {} characters)",
                chars
            ),
        }
    }

    /// @ai:intent Interpolation payload for message templates
    /// @ai:example (NoDescription { chars: 10 }) -> {"chars": "10"}
    /// @ai:effects pure
    pub fn data(&self) -> BTreeMap<String, String> {
        let mut data = BTreeMap::new();
        if let ViolationKind::NoDescription { chars } = self {
            data.insert("chars".to_string(), chars.to_string());
        }
        data
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// @ai:intent A single violation found in a comment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Violation {
    #[serde(flatten)]
    pub kind: ViolationKind,
    /// 0-based offset of the offending line inside the comment body.
    pub line: usize,
}

impl Violation {
    pub fn new(kind: ViolationKind, line: usize) -> Self {
        Self { kind, line }
    }
}
