//! @ai:module:intent Validate TODO/FIXME annotation lines inside one comment body
//! @ai:module:layer domain
//! @ai:module:public_api Validator, validate
//! @ai:module:depends_on config, pattern, whitespace, violation, comment, linter
//! @ai:module:stateless true
//! @ai:module:thread_safe true

use crate::comment::Comment;
use crate::config::RuleOptions;
use crate::error::Result;
use crate::linter::ReportSink;
use crate::pattern::TaskIdPattern;
use crate::violation::{Violation, ViolationKind};
use crate::whitespace::{self, Whitespace};
use regex::Regex;

/// @ai:intent Compiled rule options, reusable across comments and threads
#[derive(Debug, Clone)]
pub struct Validator {
    options: RuleOptions,
    keyword: Regex,
    marker: Regex,
    task_id: TaskIdPattern,
    whitespace: Whitespace,
}

impl Validator {
    /// @ai:intent Compile the patterns needed for the given options
    /// @ai:pre options were validated when they were parsed
    /// @ai:effects pure
    pub fn new(options: &RuleOptions) -> Result<Self> {
        Ok(Self {
            options: options.clone(),
            keyword: Regex::new(r"(?i)todo|fixme")?,
            marker: Regex::new(&format!("(?i)^@?(?:todo|fixme){}*", whitespace::CLASS))?,
            task_id: TaskIdPattern::new(options.project_id.as_ref())?,
            whitespace: Whitespace::new()?,
        })
    }

    pub fn options(&self) -> &RuleOptions {
        &self.options
    }

    /// @ai:intent Validate a comment body, returning the first violation
    /// @ai:post lines after the first offending line are never inspected
    /// @ai:example (" TODO AB-123 Implement feature") -> None
    /// @ai:example (" TODO") -> Some(missingTaskNumber)
    /// @ai:idempotent true
    /// @ai:effects pure
    pub fn validate(&self, body: &str) -> Option<Violation> {
        body.split('\n')
            .enumerate()
            .find_map(|(idx, line)| self.validate_line(line).map(|kind| Violation::new(kind, idx)))
    }

    /// @ai:intent Validate one comment and forward a violation to the sink
    /// @ai:effects sink:report
    pub fn check<S: ReportSink + ?Sized>(&self, comment: &Comment, sink: &mut S) -> bool {
        match self.validate(&comment.body) {
            Some(violation) => {
                tracing::debug!(
                    "{}:{} {}",
                    comment.location.file.display(),
                    comment.location.line,
                    violation.kind.message_id()
                );
                sink.report(&comment.location, &violation);
                true
            }
            None => false,
        }
    }

    fn validate_line(&self, raw: &str) -> Option<ViolationKind> {
        let line = self.whitespace.normalize(raw);

        if !self.keyword.is_match(&line) {
            return None;
        }

        if !self.marker.is_match(&line) {
            return Some(ViolationKind::NotStartingWithTodo);
        }

        let rest = self.marker.replace(&line, "");

        if self.task_id.find(&rest).is_none() {
            return Some(ViolationKind::MissingTaskNumber);
        }

        if self.options.project_id_first && !self.task_id.is_first(&rest) {
            return Some(ViolationKind::TaskNumberNotFirst);
        }

        let min = self.options.min_description_length;
        if min > 0 && self.task_id.strip_first(&rest).chars().count() < min {
            return Some(ViolationKind::NoDescription { chars: min });
        }

        None
    }
}

/// @ai:intent Validate a single comment body with freshly compiled options
/// @ai:effects pure
pub fn validate(body: &str, options: &RuleOptions) -> Result<Option<Violation>> {
    Ok(Validator::new(options)?.validate(body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comment::Location;
    use crate::config::ProjectId;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn with_project(id: &str) -> RuleOptions {
        RuleOptions {
            project_id: Some(ProjectId::new(id).unwrap()),
            ..Default::default()
        }
    }

    fn id_first() -> RuleOptions {
        RuleOptions {
            project_id_first: true,
            ..Default::default()
        }
    }

    fn min_length(chars: usize) -> RuleOptions {
        RuleOptions {
            min_description_length: chars,
            ..Default::default()
        }
    }

    fn message_id(body: &str, options: &RuleOptions) -> Option<&'static str> {
        validate(body, options)
            .unwrap()
            .map(|violation| violation.kind.message_id())
    }

    fn assert_valid(bodies: &[&str], options: &RuleOptions) {
        for body in bodies {
            assert_eq!(message_id(body, options), None, "expected {body:?} to pass");
        }
    }

    fn assert_invalid(bodies: &[&str], options: &RuleOptions, expected: &str) {
        for body in bodies {
            assert_eq!(
                message_id(body, options),
                Some(expected),
                "expected {body:?} to fail"
            );
        }
    }

    #[test]
    fn test_task_number_required() {
        let options = RuleOptions::default();
        assert_valid(
            &[
                " TODO Implement feature AB-123",
                " FIXME Implement feature AB-123",
                " @fixme Implement feature AB-123",
                "*\n         @fixme Implement feature AB-123\n         ",
            ],
            &options,
        );
        assert_invalid(
            &[
                " TODO",
                " FIXME",
                " @fixme",
                "*\n            @fixme\n            ",
                " TODO just some description",
                " FIXME just some description",
                " @fixme just some description",
                "*\n            @fixme just some description\n            ",
            ],
            &options,
            "missingTaskNumber",
        );
    }

    #[test]
    fn test_task_number_must_match_project() {
        assert_valid(&[" TODO Implement feature AB-123"], &with_project("AB"));
        assert_valid(&[" FIXME Implement feature CD-123"], &with_project("CD"));
        assert_valid(&[" @fixme Implement feature X-3"], &with_project("X"));
        assert_valid(
            &["*\n            @fixme Implement feature ZZZZZ-123\n            "],
            &with_project("ZZZZZ"),
        );

        assert_invalid(
            &[
                " TODO Implement feature CD-456",
                " FIXME Implement feature Z-456",
                " @fixme Implement feature W-456",
                "*\n            @fixme Implement feature U-456\n            ",
            ],
            &with_project("AB"),
            "missingTaskNumber",
        );
    }

    #[test]
    fn test_task_number_first() {
        let options = id_first();
        assert_valid(
            &[
                " TODO AB-123 Implement feature",
                " FIXME CD-123 Implement feature",
                " @fixme X-3 Implement feature",
                "*\n            @fixme ZZZZZ-123 Implement feature\n            ",
            ],
            &options,
        );
        assert_invalid(
            &[
                " TODO Implement feature AB-123",
                " FIXME Implement feature CD-123",
                " @fixme Implement feature X-3",
                "*\n            @fixme Implement feature ZZZZZ-123\n            ",
            ],
            &options,
            "taskNumberNotFirst",
        );
    }

    #[test]
    fn test_description_required_by_default() {
        let options = RuleOptions::default();
        assert_valid(
            &[
                " TODO AB-123 Implement feature",
                " FIXME CD-123 Implement feature",
                " @fixme X-3 Implement feature",
                "*\n        @fixme ZZZZZ-123 Implement feature\n        ",
                "*\n        @todo Can be ZZZZZ-123 around as well\n        ",
            ],
            &options,
        );
        assert_invalid(
            &[
                " TODO Too AB-123 short",
                " FIXME CD-123 Too short",
                " @fixme Too short X-3",
            ],
            &options,
            "noDescription",
        );
    }

    #[test]
    fn test_description_length_adjustable() {
        assert_valid(
            &[
                " TODO AB-123 All ok",
                " FIXME CD-123 Implement feature",
                " @fixme X-3 Implement feature",
                "*\n            @fixme Implement ZZZZZ-123 feature\n            ",
            ],
            &min_length(5),
        );
        assert_invalid(
            &[" TODO AB-123", " @fixme X-3 Oops"],
            &min_length(5),
            "noDescription",
        );
        assert_invalid(
            &[
                " FIXME Wil fix it here CD-123 or maybe not",
                "*\n            @fixme ZZZZZ-123 This is too short\n            ",
            ],
            &min_length(100),
            "noDescription",
        );
    }

    #[test]
    fn test_description_check_disabled() {
        assert_valid(
            &[
                "*\n            @fixme ABC-123\n            ",
                " TODO AB-1",
                " TODO AB-1 x",
            ],
            &min_length(0),
        );
    }

    #[test]
    fn test_extra_whitespace_does_not_pad_description() {
        let options = RuleOptions::default();
        assert_valid(
            &[
                " TODO AB-123 0123456789",
                " FIXME CD-123 0123456789",
                " @fixme X-3 0123456789",
                "*\n        @fixme ZZZZZ-123 0123456789\n        ",
            ],
            &options,
        );
        assert_invalid(
            &[
                " TODO              AB-123 x",
                " FIXME CD-123 xx       x",
                " @fixme X-3 xx     x           x ",
                "*\n            @fixme x              x ZZZZZ-123                     x                 x\n            ",
            ],
            &options,
            "noDescription",
        );
    }

    #[test]
    fn test_tabs_and_carriage_returns_normalized() {
        let options = RuleOptions::default();
        assert_valid(&["\tTODO\tAB-123\tImplement feature\r"], &options);
        assert_invalid(&["TODO AB-123\t\t\t\t\t\t\t\t\tx\r"], &options, "noDescription");
    }

    #[test]
    fn test_byte_order_mark_counts_as_whitespace() {
        let options = RuleOptions::default();
        assert_invalid(&["TODO AB-1\u{FEFF}abcdefghi"], &options, "noDescription");
        assert_invalid(&["\u{FEFF}TODO\u{FEFF}AB-1 abc\u{FEFF}\u{FEFF}defgh"], &options, "noDescription");
        assert_valid(&["\u{FEFF}TODO AB-1 abcdefghij\u{FEFF}"], &options);
    }

    #[test]
    fn test_next_line_counts_as_text() {
        let options = RuleOptions::default();
        assert_valid(&["TODO AB-1 abcdefghi\u{85}"], &options);
        assert_invalid(&["\u{85}TODO AB-1 Implement feature"], &options, "notStartingWithTodo");
    }

    #[test]
    fn test_lines_without_keyword_ignored() {
        let options = RuleOptions::default();
        assert_valid(
            &[
                "",
                " just a regular comment",
                "*\n * Returns the sum.\n ",
                " eslint-disable-next-line",
                " AB-123 but no marker",
            ],
            &options,
        );
    }

    #[test]
    fn test_keyword_not_leading() {
        let options = RuleOptions::default();
        assert_invalid(
            &[
                " I can do TODO here",
                " see the fixme list",
                " * @todo AB-123 Implement feature",
                " mastodon client",
            ],
            &options,
            "notStartingWithTodo",
        );
    }

    #[test]
    fn test_marker_is_case_insensitive() {
        let options = RuleOptions::default();
        assert_valid(
            &[
                " todo AB-123 Implement feature",
                " Fixme AB-123 Implement feature",
                " @TODO AB-123 Implement feature",
            ],
            &options,
        );
    }

    #[test]
    fn test_marker_without_space_before_task_id() {
        let options = id_first();
        assert_valid(&[" TODOAB-123 Implement feature"], &options);
        assert_invalid(&[" @todo: AB-123 Implement feature"], &options, "taskNumberNotFirst");
    }

    #[test]
    fn test_lowercase_prefix_accepted() {
        assert_valid(&[" TODO ab-123 Implement feature"], &RuleOptions::default());
        assert_valid(&[" TODO ab-123 Implement feature"], &with_project("AB"));
    }

    #[test]
    fn test_no_description_carries_threshold() {
        let violation = validate(" TODO AB-1 Oops", &min_length(7)).unwrap().unwrap();
        assert_eq!(violation.kind, ViolationKind::NoDescription { chars: 7 });
    }

    #[test]
    fn test_first_offending_line_wins() {
        let body = "*\n TODO AB-1 Implement feature\n @fixme\n TODO AB-2 x\n ";
        let violation = validate(body, &RuleOptions::default()).unwrap().unwrap();

        assert_eq!(violation, Violation::new(ViolationKind::MissingTaskNumber, 2));
    }

    #[test]
    fn test_all_annotation_lines_checked_until_violation() {
        let body = " TODO AB-1 Implement feature\n TODO AB-2 Implement another one";
        assert_eq!(validate(body, &RuleOptions::default()).unwrap(), None);
    }

    #[test]
    fn test_idempotent() {
        let validator = Validator::new(&id_first()).unwrap();
        let body = " TODO Implement feature AB-123";

        let first = validator.validate(body);
        let second = validator.validate(body);

        assert_eq!(first, second);
        assert!(first.is_some());
    }

    #[test]
    fn test_check_reports_once_to_sink() {
        #[derive(Default)]
        struct Recorder(Vec<(Location, Violation)>);

        impl ReportSink for Recorder {
            fn report(&mut self, location: &Location, violation: &Violation) {
                self.0.push((location.clone(), violation.clone()));
            }
        }

        let validator = Validator::new(&RuleOptions::default()).unwrap();
        let location = Location::new(PathBuf::from("a.ts"), 7);
        let mut sink = Recorder::default();

        assert!(validator.check(&Comment::new(location.clone(), " TODO\n FIXME"), &mut sink));
        assert!(!validator.check(
            &Comment::new(location.clone(), " TODO AB-1 Implement feature"),
            &mut sink
        ));

        assert_eq!(sink.0.len(), 1);
        assert_eq!(sink.0[0].0, location);
        assert_eq!(sink.0[0].1.kind, ViolationKind::MissingTaskNumber);
    }
}
