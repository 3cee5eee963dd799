//! @ai:module:intent Whitespace trimming and collapsing over the ECMAScript `\s` class
//! @ai:module:layer domain
//! @ai:module:public_api Whitespace, CLASS
//! @ai:module:depends_on error
//! @ai:module:stateless true

use crate::error::Result;
use regex::Regex;
use std::borrow::Cow;

/// Whitespace and line terminators as ECMAScript defines them.
/// Includes U+FEFF, excludes U+0085, unlike Rust's `White_Space`.
pub const CLASS: &str = r"[\t\n\x0B\x0C\r \x{A0}\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}]";

/// @ai:intent Compiled trim and collapse patterns for the whitespace class
#[derive(Debug, Clone)]
pub struct Whitespace {
    edges: Regex,
    runs: Regex,
}

impl Whitespace {
    pub fn new() -> Result<Self> {
        Ok(Self {
            edges: Regex::new(&format!("^{CLASS}+|{CLASS}+$"))?,
            runs: Regex::new(&format!("{CLASS}+"))?,
        })
    }

    /// @ai:intent Remove leading and trailing whitespace
    /// @ai:effects pure
    pub fn trim<'t>(&self, text: &'t str) -> Cow<'t, str> {
        self.edges.replace_all(text, "")
    }

    /// @ai:intent Trim, then collapse every whitespace run to one space
    /// @ai:example ("  TODO \t AB-1\u{FEFF}x ") -> "TODO AB-1 x"
    /// @ai:effects pure
    pub fn normalize(&self, text: &str) -> String {
        self.runs.replace_all(&self.trim(text), " ").into_owned()
    }
}
