//! Block validation — header checks and per-step formatting rules.

use super::Linter;
use crate::model::{BlockKind, Rule};
use regex::Regex;
use std::sync::LazyLock;

// -- Regex patterns -----------------------------------------------------------

static RE_STEP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(-|[0-9]+\.) ").unwrap());

static RE_LOWERCASE_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(-|[0-9]+\.)\s+[a-z]").unwrap());

static RE_ASSERT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(-|[0-9]+\.)\s*Assert([^:])").unwrap());

/// A `{...}` span, allowing one level of nesting so nested spans are seen
/// whole.
static RE_VALUE_LITERAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{((?:[^{}]|(?:\{[^{}]*\}))+)\}").unwrap());

static RE_CALL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z][A-Za-z0-9]+\(").unwrap());

static RE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

static RE_LITERAL_KEYWORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\b[rR]eturn |\bis (?:not )?)(?:true|false|null)\b").unwrap()
});

// -- Block entry points -------------------------------------------------------

/// Validate an algorithm block whose header is at `header`.
///
/// Returns the index of the first line after the block, or the line right
/// after the header when the blank line is missing, since that line may open
/// another block.
pub fn algorithm(lint: &mut Linter<'_>, name: &str, header: usize, bad_whitespace: bool) -> usize {
    if bad_whitespace {
        let message = format!(
            "Bad whitespace in definition of {} in '{}':",
            name, lint.document
        );
        let snippet = lint.lines[header].to_string();
        lint.emit(Rule::HeaderWhitespace, header, message, vec![snippet]);
    }
    let has_blank = check_blank_after_header(lint, BlockKind::Algorithm, name, header);
    let end = check_steps(lint, BlockKind::Algorithm, name, header + 2);
    if has_blank {
        end
    } else {
        header + 1
    }
}

/// Validate a grammar production whose header is at `header`.
///
/// Productions without a step list are only checked for the blank line
/// after an empty header.
pub fn grammar(
    lint: &mut Linter<'_>,
    name: &str,
    header: usize,
    needs_blank: bool,
    definition_end: usize,
    has_steps: bool,
) -> usize {
    if needs_blank {
        check_blank_after_header(lint, BlockKind::Grammar, name, header);
    }
    if !has_steps {
        return definition_end;
    }
    check_steps(lint, BlockKind::Grammar, name, definition_end + 1)
}

/// Returns whether the header is followed by a blank line.
fn check_blank_after_header(lint: &mut Linter<'_>, kind: BlockKind, name: &str, header: usize) -> bool {
    if lint.lines.get(header + 1) == Some(&"") {
        return true;
    }
    let message = format!(
        "No empty space after {} {} header in '{}'",
        kind.label(),
        name,
        lint.document
    );
    let snippet = lint.lines[header].to_string();
    lint.emit(Rule::MissingBlankAfterHeader, header, message, vec![snippet]);
    false
}

/// Check each step from `start` until the list ends. Returns the index of
/// the line that ended it.
fn check_steps(lint: &mut Linter<'_>, kind: BlockKind, name: &str, start: usize) -> usize {
    let mut j = start;
    while j < lint.lines.len() {
        let step = lint.lines[j];
        if !RE_STEP.is_match(step) {
            if !step.is_empty() {
                let message = format!(
                    "Bad {} {} step in '{}':",
                    kind.label(),
                    name,
                    lint.document
                );
                lint.emit(Rule::MalformedStepShape, j, message, vec![step.to_string()]);
            }
            return j;
        }
        check_step(lint, kind, name, j);
        j += 1;
    }
    j
}

fn check_step(lint: &mut Linter<'_>, kind: BlockKind, name: &str, j: usize) {
    let step = lint.lines[j];
    let document = lint.document;
    let mut report = |rule: Rule, message: String| {
        lint.emit(rule, j, message, vec![step.to_string()]);
    };

    if !has_terminal_punctuation(step) {
        report(
            Rule::StepPunctuation,
            format!("Bad formatting for '{name}' step (does not end in '.' or ':') in '{document}':"),
        );
    }
    if starts_lowercase(step) {
        report(
            Rule::StepCapitalization,
            format!("Bad formatting of '{name}' step (should start with a capital) in '{document}':"),
        );
    }
    if let Some(found) = assert_follower(step) {
        report(
            Rule::AssertFormatting,
            format!("Bad formatting of '{name}' step (Assert should be immediately followed by ':'; found '{found}') in '{document}':"),
        );
    }

    if kind == BlockKind::Algorithm {
        if has_bare_call(step) {
            report(
                Rule::UnwrappedAlgorithmCall,
                format!("Bad formatting of '{name}' step (algorithm call should be wrapped in braces: `{{MyAlgorithm(a, b, c)}}`) in '{document}':"),
            );
        }
        for literal in nested_value_literals(step) {
            report(
                Rule::NestedValueLiteral,
                format!("Bad formatting of '{name}' step (algorithm call should not contain braces: `{literal}`) in '{document}':"),
            );
        }
    }

    if has_unwrapped_literal(step) {
        report(
            Rule::UnwrappedLiteralKeyword,
            format!("Potential bad formatting of '{name}' step (true/false/null should be wrapped in curly braces, e.g. '{{true}}') in '{document}':"),
        );
    }
}

// -- Step rules ---------------------------------------------------------------

/// Steps end in `.` or `:`. A trailing newline at end of file is ignored.
fn has_terminal_punctuation(step: &str) -> bool {
    step.trim_end().ends_with(['.', ':'])
}

fn starts_lowercase(step: &str) -> bool {
    RE_LOWERCASE_START.is_match(step)
}

/// The character following a leading `Assert` when it is not `:`.
fn assert_follower(step: &str) -> Option<char> {
    let caps = RE_ASSERT.captures(step)?;
    caps[2].chars().next()
}

/// A `Name(` call left outside any value literal.
fn has_bare_call(step: &str) -> bool {
    let stripped = RE_VALUE_LITERAL.replace_all(step, "");
    RE_CALL.is_match(&stripped)
}

/// Value literals that contain another brace span.
fn nested_value_literals(step: &str) -> Vec<&str> {
    RE_VALUE_LITERAL
        .captures_iter(step)
        .filter(|caps| caps[1].contains('{'))
        .filter_map(|caps| caps.get(0).map(|m| m.as_str()))
        .collect()
}

fn has_unwrapped_literal(step: &str) -> bool {
    let collapsed = RE_WHITESPACE.replace_all(step, " ");
    RE_LITERAL_KEYWORD.is_match(&collapsed) && !collapsed.contains("null or empty")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("- Return {x}.", true)]
    #[case("- If {x}:", true)]
    #[case("- Return {x}.\n", true)]
    #[case("- Return {x}", false)]
    #[case("- Return {x};", false)]
    fn terminal_punctuation(#[case] step: &str, #[case] expected: bool) {
        assert_eq!(has_terminal_punctuation(step), expected);
    }

    #[rstest]
    #[case("- let {x} be 1.", true)]
    #[case("  12. otherwise.", true)]
    #[case("- Let {x} be 1.", false)]
    #[case("- {x} is 1.", false)]
    fn lowercase_start(#[case] step: &str, #[case] expected: bool) {
        assert_eq!(starts_lowercase(step), expected);
    }

    #[test]
    fn assert_must_be_followed_by_colon() {
        assert_eq!(assert_follower("- Assert: {x} is 1."), None);
        assert_eq!(assert_follower("- Assert {x} is 1."), Some(' '));
        assert_eq!(assert_follower("1. Assert that {x} is 1."), Some(' '));
        assert_eq!(assert_follower("- Asserting {x}."), Some('i'));
        assert_eq!(assert_follower("- Let {x} be Assert {y}."), None);
    }

    #[test]
    fn bare_calls() {
        assert!(!has_bare_call("- Return {CollectFields(a, b)}."));
        assert!(!has_bare_call("- Let {x} be {Foo({y}, b)}."));
        assert!(has_bare_call("- Return CollectFields(a, b)."));
        assert!(has_bare_call("- Let {x} be {a} and Foo(b)."));
        assert!(!has_bare_call("- Let {x} be the result (if any)."));
        assert!(!has_bare_call("- Let {x} be a(b)."));
    }

    #[test]
    fn nested_literals() {
        assert_eq!(nested_value_literals("- Let {x} be {a {b} c}."), vec!["{a {b} c}"]);
        assert_eq!(
            nested_value_literals("- Let {x} be {Foo({a}, {b})}."),
            vec!["{Foo({a}, {b})}"]
        );
        assert!(nested_value_literals("- Let {x} be {y}.").is_empty());
    }

    #[rstest]
    #[case("- Return true.", true)]
    #[case("- return false.", true)]
    #[case("- If {x} is not null:", true)]
    #[case("- If {x} is\n  null:", true)]
    #[case("- Return {true}.", false)]
    #[case("- If {x} is {null}:", false)]
    #[case("- If {x} is null or empty, return.", false)]
    #[case("- Return trueValue.", false)]
    #[case("- If this true value:", false)]
    fn unwrapped_literals(#[case] step: &str, #[case] expected: bool) {
        assert_eq!(has_unwrapped_literal(step), expected);
    }

    #[rstest]
    #[case("- Step.", true)]
    #[case("  1. Step.", true)]
    #[case("-Step.", false)]
    #[case("1.Step.", false)]
    #[case("Step.", false)]
    fn step_shape(#[case] line: &str, #[case] expected: bool) {
        assert_eq!(RE_STEP.is_match(line), expected);
    }
}
