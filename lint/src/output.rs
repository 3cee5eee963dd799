//! @ai:module:intent Format lint results for terminals and machines
//! @ai:module:layer infrastructure
//! @ai:module:public_api OutputFormat, format_lint_result, format_violation
//! @ai:module:depends_on linter, violation
//! @ai:module:stateless true

use crate::linter::LintResult;
use crate::violation::{Severity, Violation, RULE_ID};
use colored::Colorize;

/// @ai:intent Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    JsonPretty,
}

/// @ai:intent Format lint results as a string
/// @ai:effects pure
pub fn format_lint_result(result: &LintResult, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => serde_json::to_string(result).unwrap_or_default(),
        OutputFormat::JsonPretty => serde_json::to_string_pretty(result).unwrap_or_default(),
        OutputFormat::Text => format_lint_result_text(result),
    }
}

/// @ai:intent Format lint results as human-readable text
/// @ai:effects pure
fn format_lint_result_text(result: &LintResult) -> String {
    let mut output = String::new();

    for issue in &result.issues {
        let severity_str = match issue.severity {
            Severity::Error => "ERROR".red().bold(),
            Severity::Warning => "WARN".yellow().bold(),
        };

        let code = match &issue.rule {
            Some(rule) => format!("{}/{}", rule, issue.code),
            None => issue.code.clone(),
        };

        let location = match issue.location.column {
            Some(column) => format!(
                "{}:{}:{}",
                issue.location.file.display(),
                issue.location.line,
                column
            ),
            None => format!("{}:{}", issue.location.file.display(), issue.location.line),
        };

        output.push_str(&format!(
            "{} {} - {} ({})\n",
            severity_str,
            location.dimmed(),
            issue.message,
            code.dimmed()
        ));
    }

    if !result.issues.is_empty() {
        output.push('\n');
    }
    output.push_str(&format!(
        "Checked {} files, {} comments\n",
        result.files_checked, result.comments_checked
    ));

    if result.errors > 0 {
        output.push_str(&format!(
            "{} errors, {} warnings\n",
            result.errors.to_string().red().bold(),
            result.warnings.to_string().yellow()
        ));
    } else if result.warnings > 0 {
        output.push_str(&format!(
            "{} {} warnings\n",
            "OK".green().bold(),
            result.warnings.to_string().yellow()
        ));
    } else {
        output.push_str(&format!("{} No issues found\n", "OK".green().bold()));
    }

    output
}

/// @ai:intent Format the outcome of checking a single comment body
/// @ai:effects pure
pub fn format_violation(violation: Option<&Violation>, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => serde_json::to_string(&violation).unwrap_or_default(),
        OutputFormat::JsonPretty => serde_json::to_string_pretty(&violation).unwrap_or_default(),
        OutputFormat::Text => match violation {
            Some(v) => format!(
                "{} line {} - {} ({})",
                "ERROR".red().bold(),
                v.line + 1,
                v.kind.message(),
                format!("{}/{}", RULE_ID, v.kind.message_id()).dimmed()
            ),
            None => format!("{} No issues found", "OK".green().bold()),
        },
    }
}
