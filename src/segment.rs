//! Logical-line segmentation.
//!
//! Markdown list items wrap onto indented continuation lines, so splitting on
//! every newline would tear a step apart. Instead a newline only starts a new
//! logical line when the text after it is unindented (or another newline), or
//! when it is an indented list item of its own:
//!
//! ```text
//! Foo(a):            <- "Foo(a):"
//!                    <- ""
//! - Let {x} be the   <- "- Let {x} be the\n  value of {a}."
//!   value of {a}.
//!   - Nested item.   <- "  - Nested item."
//! ```
//!
//! Joining the result with `"\n"` reproduces the input exactly.

use regex::Regex;
use std::sync::LazyLock;

/// Whitespace followed by a `-` or `N.` list marker and a space.
static RE_INDENTED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:-|[0-9]+\.) ").unwrap());

/// Split `text` into logical lines. Empty strings mark blank lines.
pub fn segment(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    for (pos, _) in text.match_indices('\n') {
        if starts_logical_line(&text[pos + 1..]) {
            lines.push(&text[start..pos]);
            start = pos + 1;
        }
    }
    lines.push(&text[start..]);
    lines
}

/// Does the text following a newline begin a new logical line?
fn starts_logical_line(rest: &str) -> bool {
    match rest.chars().next() {
        None => false,
        Some('\n') => true,
        Some(c) if !c.is_whitespace() => true,
        Some(_) => RE_INDENTED_ITEM.is_match(rest),
    }
}
