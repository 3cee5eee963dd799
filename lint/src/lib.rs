//! @ai:module:intent Library for validating task IDs in TODO/FIXME comments
//! @ai:module:layer infrastructure
//! @ai:module:public_api comment, config, error, linter, output, pattern, validator, violation, whitespace
//! @ai:module:stateless true
//!
//! # TODO task linter
//!
//! Checks that every `TODO`/`FIXME` annotation in a comment names an issue
//! tracker task (`AB-123`) and carries a short description. Comments are
//! handed over already extracted, one body per comment block.
//!
//! ## Example
//!
//! ```rust
//! use todo_task_lint::{RuleOptions, Validator, ViolationKind};
//!
//! let validator = Validator::new(&RuleOptions::default()).unwrap();
//!
//! assert!(validator.validate(" TODO AB-123 Implement feature").is_none());
//!
//! let violation = validator.validate(" TODO").unwrap();
//! assert_eq!(violation.kind, ViolationKind::MissingTaskNumber);
//! ```

pub mod comment;
pub mod config;
pub mod error;
pub mod linter;
pub mod output;
pub mod pattern;
pub mod validator;
pub mod violation;
pub mod whitespace;

pub use comment::{Comment, Document, Location};
pub use config::{OptionOverrides, ProjectId, RuleOptions, DEFAULT_CONFIG_FILE};
pub use error::{Error, Result};
pub use linter::{
    lint_directory, lint_document, lint_file, IssueCollector, LintIssue, LintResult, ReportSink,
};
pub use output::{format_lint_result, format_violation, OutputFormat};
pub use pattern::TaskIdPattern;
pub use validator::{validate, Validator};
pub use violation::{Severity, Violation, ViolationKind, RULE_DESCRIPTION, RULE_ID};
pub use whitespace::Whitespace;
