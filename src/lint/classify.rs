//! Block-kind detection at a cursor position.

use regex::Regex;
use std::sync::LazyLock;

/// `Name(args):` with the three whitespace slots captured.
static RE_ALGORITHM_HEAD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-zA-Z0-9]+)(\s*)\(([^)]*)\)(\s*):(\s*)$").unwrap()
});

/// `Name : rest` or `Name :: rest`.
static RE_GRAMMAR_HEAD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z0-9]+) ::?\s+(\S.*)$").unwrap());

/// What starts at a given logical line.
#[derive(Debug, PartialEq, Eq)]
pub enum Classification<'a> {
    /// An algorithm header; the body starts two lines further down.
    Algorithm { name: &'a str, bad_whitespace: bool },
    /// A grammar production.
    Grammar {
        name: &'a str,
        /// The header has nothing after the colon and so must be followed
        /// by a blank line. `RE_GRAMMAR_HEAD` requires a non-space character
        /// after the colon, so this is currently never set.
        needs_blank: bool,
        /// Index of the first blank line after the definition, or the
        /// number of lines if the document ends first.
        definition_end: usize,
        /// A `- ` list follows the blank line, so the production is
        /// checked like an algorithm starting at `definition_end + 1`.
        has_steps: bool,
    },
    None,
}

/// Decide the block kind at `cursor`.
///
/// Grammar productions are only recognized when `grammar_document` is set.
pub fn classify<'a>(lines: &[&'a str], cursor: usize, grammar_document: bool) -> Classification<'a> {
    let line = lines[cursor];

    if let Some(caps) = RE_ALGORITHM_HEAD.captures(line) {
        let bad_whitespace = [2, 4, 5].iter().any(|&i| !caps[i].is_empty());
        return Classification::Algorithm {
            name: caps.get(1).map_or("", |m| m.as_str()),
            bad_whitespace,
        };
    }

    if !grammar_document {
        return Classification::None;
    }

    let Some(caps) = RE_GRAMMAR_HEAD.captures(line) else {
        return Classification::None;
    };
    let name = caps.get(1).map_or("", |m| m.as_str());
    let rest = caps[2].trim();
    if rest == "one of" {
        return Classification::None;
    }

    // Multi-line definitions continue until the first blank line.
    let definition_end = (cursor + 1..lines.len())
        .find(|&i| lines[i].trim().is_empty())
        .unwrap_or(lines.len());
    let has_steps = lines
        .get(definition_end + 1)
        .is_some_and(|next| next.starts_with("- "));

    Classification::Grammar {
        name,
        needs_blank: rest.is_empty(),
        definition_end,
        has_steps,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::segment;

    fn classify_first(text: &str, grammar_document: bool) -> Classification<'_> {
        classify(&segment(text), 0, grammar_document)
    }

    #[test]
    fn algorithm_header() {
        assert_eq!(
            classify_first("CoerceResult(value, type):\n\n- Step.", false),
            Classification::Algorithm {
                name: "CoerceResult",
                bad_whitespace: false
            }
        );
    }

    #[test]
    fn algorithm_header_without_args() {
        assert_eq!(
            classify_first("Run():", false),
            Classification::Algorithm {
                name: "Run",
                bad_whitespace: false
            }
        );
    }

    #[test]
    fn algorithm_header_whitespace() {
        for text in ["Foo (a):", "Foo(a) :", "Foo(a): ", "Foo\t(a)\t:"] {
            assert_eq!(
                classify_first(text, false),
                Classification::Algorithm {
                    name: "Foo",
                    bad_whitespace: true
                },
                "{text:?}"
            );
        }
    }

    #[test]
    fn prose_is_not_a_header() {
        assert_eq!(classify_first("See Foo(a): for details.", false), Classification::None);
        assert_eq!(classify_first("- Foo(a):", false), Classification::None);
        assert_eq!(classify_first("Foo_bar(a):", false), Classification::None);
    }

    #[test]
    fn grammar_only_in_grammar_document() {
        let text = "Name :: /[_A-Za-z]/\n\nMore prose.";
        assert_eq!(classify_first(text, false), Classification::None);
        assert_eq!(
            classify_first(text, true),
            Classification::Grammar {
                name: "Name",
                needs_blank: false,
                definition_end: 1,
                has_steps: false
            }
        );
    }

    #[test]
    fn grammar_one_of_is_skipped() {
        assert_eq!(
            classify_first("Punctuator :: one of\n\n- ! $ &", true),
            Classification::None
        );
    }

    #[test]
    fn grammar_with_steps_after_multiline_definition() {
        let text = "Selection : Field\nFragmentSpread\nInlineFragment\n\n- Do it.";
        let lines = segment(text);
        assert_eq!(lines.len(), 5);
        assert_eq!(
            classify(&lines, 0, true),
            Classification::Grammar {
                name: "Selection",
                needs_blank: false,
                definition_end: 3,
                has_steps: true
            }
        );
    }

    #[test]
    fn grammar_numbered_list_is_not_steps() {
        assert_eq!(
            classify_first("Value : Variable\n\n1. Step.", true),
            Classification::Grammar {
                name: "Value",
                needs_blank: false,
                definition_end: 1,
                has_steps: false
            }
        );
    }

    #[test]
    fn grammar_at_end_of_document() {
        assert_eq!(
            classify_first("Alias : Name :", true),
            Classification::Grammar {
                name: "Alias",
                needs_blank: false,
                definition_end: 1,
                has_steps: false
            }
        );
    }
}
