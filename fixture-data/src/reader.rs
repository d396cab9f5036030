// Copyright (c) The tapview Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! A minimal TAP reader for fixtures.
//!
//! Supported: the `1..N` plan, `ok` / `not ok` test lines with optional number, description and
//! `# SKIP` / `# TODO` directive, YAML-ish detail blocks between `---` and `...`, `#` comments
//! and `Bail out!` lines. Anything else is ignored.

use tap_report::{Directive, DirectiveKind, Plan, RawStatus, TapLine, TestResult, TestSet};

/// Reads a TAP stream into a test set.
pub fn read_test_set(file_name: &str, text: &str) -> TestSet {
    let mut test_set = TestSet::new(file_name);
    let mut state = State::Lines;

    for line in text.lines() {
        let trimmed = line.trim();

        match state {
            State::Detail => {
                if trimmed == "..." {
                    state = State::Lines;
                } else if let Some((key, value)) = trimmed.split_once(':')
                    && let Some(TapLine::Test(result)) = test_set.lines.last_mut()
                {
                    result.add_output(key.trim(), value.trim());
                }
                continue;
            }
            State::AfterTest if trimmed == "---" => {
                state = State::Detail;
                continue;
            }
            State::AfterTest | State::Lines => {
                state = State::Lines;
            }
        }

        if let Some(result) = parse_test_line(line) {
            test_set.add_test_result(result);
            state = State::AfterTest;
        } else if let Some(plan) = parse_plan(trimmed) {
            test_set.set_plan(plan);
        } else if let Some(reason) = trimmed.strip_prefix("Bail out!") {
            test_set.add_bail_out(reason.trim());
        } else if let Some(comment) = trimmed.strip_prefix('#') {
            test_set.add_comment(comment);
        }
    }

    test_set
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum State {
    Lines,
    AfterTest,
    Detail,
}

fn parse_plan(line: &str) -> Option<Plan> {
    let (first, rest) = line.split_once("..")?;
    let last: String = rest.chars().take_while(char::is_ascii_digit).collect();
    Some(Plan::new(first.parse().ok()?, last.parse().ok()?))
}

fn parse_test_line(line: &str) -> Option<TestResult> {
    let (status, rest) = if let Some(rest) = strip_keyword(line, "not ok") {
        (RawStatus::NotOk, rest)
    } else {
        (RawStatus::Ok, strip_keyword(line, "ok")?)
    };

    let rest = rest.trim_start();
    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let number = rest[..digits_end].parse().ok();
    let rest = rest[digits_end..].trim_start();

    let (description, directive) = match rest.split_once('#') {
        Some((description, directive)) => (description, parse_directive(directive)),
        None => (rest, None),
    };

    let mut result = TestResult::new(status, description);
    if let Some(number) = number {
        result.set_number(number);
    }
    if let Some(directive) = directive {
        result.set_directive(directive);
    }
    Some(result)
}

fn strip_keyword<'a>(line: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(keyword)?;
    (rest.is_empty() || rest.starts_with(char::is_whitespace)).then_some(rest)
}

fn parse_directive(text: &str) -> Option<Directive> {
    let text = text.trim_start();
    let keyword = text.get(..4)?;
    let kind = if keyword.eq_ignore_ascii_case("skip") {
        DirectiveKind::Skip
    } else if keyword.eq_ignore_ascii_case("todo") {
        DirectiveKind::Todo
    } else {
        return None;
    };
    let reason = text[4..].trim_start_matches(':').trim();
    Some(Directive::new(kind, reason))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::streams;
    use pretty_assertions::assert_eq;
    use tap_report::DisplayStatus;
    use test_case::test_case;

    #[test_case("ok 1 - Input file opened", RawStatus::Ok, Some(1), "- Input file opened", None ; "plain ok")]
    #[test_case("not ok 2 -  First line", RawStatus::NotOk, Some(2), "-  First line", None ; "double space kept")]
    #[test_case("ok -hi no space", RawStatus::Ok, None, "-hi no space", None ; "no number")]
    #[test_case("not ok 3 - Read# TODO", RawStatus::NotOk, Some(3), "- Read", Some(DirectiveKind::Todo) ; "todo without space")]
    #[test_case("not ok 4 - Done # TODO: not written yet", RawStatus::NotOk, Some(4), "- Done ", Some(DirectiveKind::Todo) ; "trailing space kept")]
    #[test_case("ok 6 - Summarized # skip written yet", RawStatus::Ok, Some(6), "- Summarized ", Some(DirectiveKind::Skip) ; "lowercase skip")]
    #[test_case("ok 7 - Hash # not a directive", RawStatus::Ok, Some(7), "- Hash ", None ; "unknown directive")]
    fn test_lines(
        line: &str,
        status: RawStatus,
        number: Option<u32>,
        description: &str,
        kind: Option<DirectiveKind>,
    ) {
        let result = parse_test_line(line).expect("line is a test line");
        assert_eq!(result.status, status);
        assert_eq!(result.number, number);
        assert_eq!(result.description, description);
        assert_eq!(result.directive.map(|directive| directive.kind), kind);
    }

    #[test_case("okay then" ; "ok prefix of a word")]
    #[test_case("# ok 1" ; "comment")]
    #[test_case("1..4" ; "plan")]
    fn non_test_lines(line: &str) {
        assert_eq!(parse_test_line(line), None);
    }

    #[test]
    fn directive_reason_is_trimmed() {
        let result = parse_test_line("not ok 4 - Done # TODO: not written yet").unwrap();
        assert_eq!(result.directive, Some(Directive::todo("not written yet")));
    }

    #[test]
    fn empty_stream() {
        let test_set = read_test_set("suite1.tap", "");
        assert_eq!(test_set, TestSet::new("suite1.tap"));
    }

    #[test]
    fn anchors_stream() {
        let test_set = streams::ANCHORS.test_set();
        assert_eq!(test_set.plan, Some(Plan::new(1, 4)));
        let descriptions: Vec<_> = test_set
            .test_results()
            .map(|result| result.description.as_str())
            .collect();
        assert_eq!(descriptions, streams::ANCHORS_DESCRIPTIONS);
        assert_eq!(test_set.comments().collect::<Vec<_>>(), vec!["TAP meta information"]);
        // Free-form indented output is not a detail block.
        assert!(test_set.test_results().all(|result| !result.has_detail_block()));
    }

    #[test]
    fn interactive_stream() {
        let test_set = streams::INTERACTIVE.test_set();
        assert_eq!(test_set.plan, Some(Plan::new(1, 8)));
        assert_eq!(
            test_set.comments().collect::<Vec<_>>(),
            vec![" cmnt01", " cmnt02", " cmnt03", "in results cmnt"],
        );
        assert_eq!(test_set.bail_outs().collect::<Vec<_>>(), vec!["", "with reason"]);

        let with_details: Vec<_> = test_set
            .test_results()
            .filter(|result| result.has_detail_block())
            .filter_map(|result| result.number)
            .collect();
        assert_eq!(with_details, vec![1, 2, 5, 7]);

        let second = test_set
            .find_test("-  First line of the input valid.")
            .expect("test 2 is present");
        assert_eq!(second.display_status(), DisplayStatus::Fail);
        let output: Vec<_> = second
            .output
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
            .collect();
        assert_eq!(output, vec![("detailid1", "detail3"), ("detailid2", "detail4")]);
    }

    #[test]
    fn fixture_counts() {
        for fixture in streams::all() {
            let counts = fixture.test_set().counts();
            assert_eq!(fixture.expected, counts, "counts for {}", fixture.file_name);
            assert_eq!(fixture.expected.total(), counts.total());
        }
    }
}
