//! @ai:module:intent Run the validator over host documents and collect reported issues
//! @ai:module:layer application
//! @ai:module:public_api ReportSink, IssueCollector, lint_document, lint_file, lint_directory, LintResult, LintIssue
//! @ai:module:depends_on validator, comment, violation, error
//! @ai:module:stateless true

use crate::comment::{Document, Location};
use crate::error::Result;
use crate::validator::Validator;
use crate::violation::{Severity, Violation, RULE_ID};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use walkdir::WalkDir;

/// @ai:intent Receiver for violations, keyed by the comment's location
pub trait ReportSink {
    /// @ai:intent Record one violation for the comment at `location`
    fn report(&mut self, location: &Location, violation: &Violation);
}

/// @ai:intent A single lint issue found in a comment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LintIssue {
    pub severity: Severity,
    /// Rule that produced the issue; absent for manifest read failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule: Option<String>,
    pub code: String,
    pub message: String,
    pub location: Location,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub data: BTreeMap<String, String>,
}

/// @ai:intent Result of linting one or more documents
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LintResult {
    pub files_checked: usize,
    pub comments_checked: usize,
    pub issues: Vec<LintIssue>,
    pub errors: usize,
    pub warnings: usize,
}

impl LintResult {
    /// @ai:intent Check if linting passed (no errors)
    pub fn passed(&self) -> bool {
        self.errors == 0
    }

    /// @ai:intent Merge another lint result into this one
    pub fn merge(&mut self, other: LintResult) {
        self.files_checked += other.files_checked;
        self.comments_checked += other.comments_checked;
        self.issues.extend(other.issues);
        self.errors += other.errors;
        self.warnings += other.warnings;
    }

    fn push(&mut self, issue: LintIssue) {
        match issue.severity {
            Severity::Error => self.errors += 1,
            Severity::Warning => self.warnings += 1,
        }
        self.issues.push(issue);
    }
}

/// @ai:intent Sink turning violations into issues at the configured severity
#[derive(Debug, Default)]
pub struct IssueCollector {
    severity: Severity,
    result: LintResult,
}

impl IssueCollector {
    pub fn new(severity: Severity) -> Self {
        Self {
            severity,
            result: LintResult::default(),
        }
    }

    pub fn into_result(self) -> LintResult {
        self.result
    }
}

impl ReportSink for IssueCollector {
    fn report(&mut self, location: &Location, violation: &Violation) {
        self.result.push(LintIssue {
            severity: self.severity,
            rule: Some(RULE_ID.to_string()),
            code: violation.kind.message_id().to_string(),
            message: violation.kind.message(),
            location: location.offset_lines(violation.line),
            data: violation.kind.data(),
        });
    }
}

/// @ai:intent Validate every comment of a document independently
/// @ai:post one comment's violation never stops the others from being checked
/// @ai:effects pure
pub fn lint_document(document: &Document, validator: &Validator) -> LintResult {
    let mut collector = IssueCollector::new(validator.options().severity);

    for comment in &document.comments {
        validator.check(comment, &mut collector);
    }

    let result = LintResult {
        files_checked: 1,
        comments_checked: document.comments.len(),
        ..collector.into_result()
    };

    tracing::debug!(
        "{}: {} comments, {} issues",
        document.path.display(),
        result.comments_checked,
        result.issues.len()
    );

    result
}

/// @ai:intent Lint a single comment manifest
/// @ai:effects fs:read
pub fn lint_file(path: &Path, validator: &Validator) -> Result<LintResult> {
    let document = Document::load(path)?;
    Ok(lint_document(&document, validator))
}

/// @ai:intent Lint all comment manifests (`*.json`) below a directory
/// @ai:effects fs:read
pub fn lint_directory(path: &Path, validator: &Validator) -> Result<LintResult> {
    let mut result = LintResult::default();

    for entry in WalkDir::new(path)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
    {
        let file_path = entry.path();

        if !is_manifest(file_path) {
            continue;
        }

        match lint_file(file_path, validator) {
            Ok(file_result) => result.merge(file_result),
            Err(e) => {
                tracing::warn!("Skipping manifest {}: {}", file_path.display(), e);
                result.push(LintIssue {
                    severity: Severity::Error,
                    rule: None,
                    code: "E000".to_string(),
                    message: format!("Failed to read comment manifest: {}", e),
                    location: Location::new(file_path.to_path_buf(), 0),
                    data: BTreeMap::new(),
                });
            }
        }
    }

    Ok(result)
}

fn is_manifest(path: &Path) -> bool {
    path.extension().and_then(|ext| ext.to_str()) == Some("json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comment::Comment;
    use crate::config::{ProjectId, RuleOptions};
    use crate::violation::ViolationKind;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn document(comments: &[(usize, &str)]) -> Document {
        let path = PathBuf::from("src/app.ts");
        Document {
            comments: comments
                .iter()
                .map(|(line, body)| Comment::new(Location::new(path.clone(), *line), *body))
                .collect(),
            path,
        }
    }

    #[test]
    fn test_lint_document_checks_every_comment() {
        let validator = Validator::new(&RuleOptions::default()).unwrap();
        let doc = document(&[
            (1, " TODO"),
            (3, " TODO AB-1 Implement feature"),
            (5, " FIXME just some description"),
            (9, " regular comment"),
        ]);

        let result = lint_document(&doc, &validator);

        assert_eq!(result.files_checked, 1);
        assert_eq!(result.comments_checked, 4);
        assert_eq!(result.errors, 2);
        assert!(!result.passed());
        assert_eq!(
            result
                .issues
                .iter()
                .map(|i| (i.location.line, i.code.as_str()))
                .collect::<Vec<_>>(),
            vec![(1, "missingTaskNumber"), (5, "missingTaskNumber")]
        );
        assert_eq!(result.issues[0].rule.as_deref(), Some(RULE_ID));
    }

    #[test]
    fn test_warn_severity_keeps_run_passing() {
        let options = RuleOptions {
            severity: Severity::Warning,
            ..Default::default()
        };
        let validator = Validator::new(&options).unwrap();
        let doc = document(&[(1, " TODO"), (2, " FIXME CD-1 Oops")]);

        let result = lint_document(&doc, &validator);

        assert!(result.passed());
        assert_eq!(result.errors, 0);
        assert_eq!(result.warnings, 2);
        assert!(result.issues.iter().all(|i| i.severity == Severity::Warning));
    }

    #[test]
    fn test_issue_points_at_offending_line() {
        let validator = Validator::new(&RuleOptions::default()).unwrap();
        let doc = document(&[(10, "*\n * Docs\n @todo AB-1 x\n ")]);

        let result = lint_document(&doc, &validator);

        assert_eq!(result.issues.len(), 1);
        let issue = &result.issues[0];
        assert_eq!(issue.location.line, 12);
        assert_eq!(issue.code, "noDescription");
        assert_eq!(issue.data.get("chars").map(String::as_str), Some("10"));
        assert_eq!(
            issue.message,
            "TODO comment must include a text description (min 10 characters)"
        );
    }

    #[test]
    fn test_lint_directory() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("a.json"),
            r#"{"path": "a.ts", "comments": [{"line": 1, "body": " TODO Implement feature CD-456"}]}"#,
        )
        .unwrap();
        std::fs::write(
            dir.path().join("b.json"),
            r#"{"path": "b.ts", "comments": [{"line": 2, "body": " TODO AB-2 Implement feature"}]}"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("broken.json"), "not json").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "TODO").unwrap();

        let options = RuleOptions {
            project_id: Some(ProjectId::new("AB").unwrap()),
            ..Default::default()
        };
        let validator = Validator::new(&options).unwrap();

        let result = lint_directory(dir.path(), &validator).unwrap();

        assert_eq!(result.files_checked, 2);
        assert_eq!(result.comments_checked, 2);
        assert_eq!(result.errors, 2);
        let codes: Vec<_> = result.issues.iter().map(|i| i.code.as_str()).collect();
        assert_eq!(codes, vec!["missingTaskNumber", "E000"]);
        assert_eq!(result.issues[0].location.file, PathBuf::from("a.ts"));
        assert_eq!(result.issues[1].rule, None);
    }

    #[test]
    fn test_merge() {
        let mut collector = IssueCollector::new(Severity::Error);
        collector.report(
            &Location::new(PathBuf::from("x.rs"), 1),
            &Violation::new(ViolationKind::TaskNumberNotFirst, 0),
        );
        let other = LintResult {
            files_checked: 1,
            comments_checked: 3,
            ..collector.into_result()
        };

        let mut total = LintResult::default();
        total.merge(other);

        assert_eq!(total.files_checked, 1);
        assert_eq!(total.comments_checked, 3);
        assert_eq!(total.errors, 1);
        assert_eq!(total.issues[0].code, "taskNumberNotFirst");
    }
}
