//! @ai:module:intent Compile the task ID pattern selected by the rule options
//! @ai:module:layer domain
//! @ai:module:public_api TaskIdPattern
//! @ai:module:depends_on config, whitespace, error
//! @ai:module:stateless true

use crate::config::ProjectId;
use crate::error::Result;
use crate::whitespace::{self, Whitespace};
use regex::{Match, Regex};

const ANY_PROJECT: &str = "[A-Z]{1,10}";

/// @ai:intent Task ID matcher, compiled once per set of rule options
/// @ai:invariant all three regexes share the same case-insensitive core
#[derive(Debug, Clone)]
pub struct TaskIdPattern {
    source: String,
    search: Regex,
    leading: Regex,
    spaced: Regex,
    whitespace: Whitespace,
}

impl TaskIdPattern {
    /// @ai:intent Build the pattern for a fixed project prefix or for any prefix
    /// @ai:example (Some(AB)) -> matches "AB-123", "ab-7"
    /// @ai:example (None) -> matches "X-3", "ZZZZZ-123"
    /// @ai:effects pure
    pub fn new(project_id: Option<&ProjectId>) -> Result<Self> {
        let prefix = match project_id {
            Some(id) => regex::escape(id.as_str()),
            None => ANY_PROJECT.to_string(),
        };
        // ASCII digits only; `\d` would also accept other Unicode digits.
        let source = format!("{prefix}-[0-9]+");

        Ok(Self {
            search: Regex::new(&format!("(?i){source}"))?,
            leading: Regex::new(&format!("(?i)^(?:{source})"))?,
            spaced: Regex::new(&format!(
                "(?i){ws}*(?:{source}){ws}*",
                ws = whitespace::CLASS
            ))?,
            whitespace: Whitespace::new()?,
            source,
        })
    }

    /// @ai:intent Find the first task ID in the text
    /// @ai:effects pure
    pub fn find<'t>(&self, text: &'t str) -> Option<Match<'t>> {
        self.search.find(text)
    }

    /// @ai:intent Check whether the text starts with a task ID
    /// @ai:effects pure
    pub fn is_first(&self, text: &str) -> bool {
        self.leading.is_match(text)
    }

    /// @ai:intent Remove the first task ID with its surrounding whitespace, then trim
    /// @ai:example ("AB-123 Implement feature") -> "Implement feature"
    /// @ai:example ("Too AB-123 short") -> "Tooshort"
    /// @ai:effects pure
    pub fn strip_first(&self, text: &str) -> String {
        let stripped = self.spaced.replacen(text, 1, "");
        self.whitespace.trim(&stripped).into_owned()
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}
