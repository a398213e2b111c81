//! Document pass — walks logical lines and collects diagnostics.
//!
//! Each document is segmented once, then scanned with a single cursor. At
//! every position [`classify::classify`] decides whether a block starts
//! there; recognized blocks are handed to [`validate`], which consumes their
//! steps and returns where scanning resumes. The advisory indent check runs
//! over every logical line independently of block detection.

pub mod classify;
pub mod validate;

use crate::model::{Diagnostic, Document, DocumentReport, Outcome, Rule, Severity};
use crate::segment::segment;
use classify::Classification;
use regex::Regex;
use std::sync::LazyLock;

/// Name of the document whose grammar productions are also checked.
pub const DEFAULT_GRAMMAR_DOCUMENT: &str = "Section 2 -- Language.md";

/// `- ...:` list item, capturing its indent.
static RE_COLON_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*)- .*:\s*$").unwrap());

/// Linting policy.
#[derive(Debug, Clone)]
pub struct Options {
    /// File name of the language grammar document
    pub grammar_document: String,
    /// Promote advisory rules to enforced
    pub strict: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            grammar_document: DEFAULT_GRAMMAR_DOCUMENT.to_string(),
            strict: false,
        }
    }
}

impl Options {
    pub fn severity(&self, rule: Rule) -> Severity {
        if self.strict {
            Severity::Enforced
        } else {
            rule.default_severity()
        }
    }
}

/// Per-document scanning state shared with the block validator.
pub struct Linter<'a> {
    pub(crate) document: &'a str,
    pub(crate) lines: Vec<&'a str>,
    options: &'a Options,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Linter<'a> {
    fn new(doc: &'a Document, options: &'a Options) -> Self {
        Linter {
            document: &doc.name,
            lines: segment(&doc.text),
            options,
            diagnostics: Vec::new(),
        }
    }

    /// Record a diagnostic anchored at logical line `line`.
    pub(crate) fn emit(&mut self, rule: Rule, line: usize, message: String, snippets: Vec<String>) {
        self.diagnostics.push(Diagnostic {
            rule,
            severity: self.options.severity(rule),
            message,
            snippets,
            line,
        });
    }

    fn scan_blocks(&mut self) {
        let grammar_document = self.document == self.options.grammar_document;
        let mut cursor = 0;
        while cursor < self.lines.len() {
            let resume = match classify::classify(&self.lines, cursor, grammar_document) {
                Classification::Algorithm {
                    name,
                    bad_whitespace,
                } => validate::algorithm(self, name, cursor, bad_whitespace),
                Classification::Grammar {
                    name,
                    needs_blank,
                    definition_end,
                    has_steps,
                } => validate::grammar(self, name, cursor, needs_blank, definition_end, has_steps),
                Classification::None => cursor + 1,
            };
            cursor = resume.max(cursor + 1);
        }
    }

    /// A list item ending in `:` must be followed by a line indented two
    /// spaces deeper.
    fn check_indent_after_colon(&mut self) {
        for i in 0..self.lines.len() {
            let Some(caps) = RE_COLON_ITEM.captures(self.lines[i]) else {
                continue;
            };
            let Some(next) = self.lines.get(i + 1).copied() else {
                continue;
            };
            let expected = format!("{}  ", &caps[1]);
            if !next.starts_with(&expected) {
                let message = format!(
                    "Lacking indent in '{}' following ':' character:",
                    self.document
                );
                let snippets = vec![self.lines[i].to_string(), next.to_string()];
                self.emit(Rule::MissingIndentAfterColon, i, message, snippets);
            }
        }
    }

    fn finish(mut self) -> Vec<Diagnostic> {
        self.diagnostics.sort_by_key(|d| d.line);
        self.diagnostics
    }
}

/// Lint one document. Diagnostics come back in ascending logical-line order.
pub fn lint_document(doc: &Document, options: &Options) -> Vec<Diagnostic> {
    let mut linter = Linter::new(doc, options);
    linter.scan_blocks();
    linter.check_indent_after_colon();
    tracing::debug!(
        document = %doc.name,
        lines = linter.lines.len(),
        diagnostics = linter.diagnostics.len(),
        "linted document"
    );
    linter.finish()
}

/// Lint every document in order.
pub fn lint_documents(docs: &[Document], options: &Options) -> Outcome {
    let reports = docs
        .iter()
        .map(|doc| DocumentReport {
            document: doc.name.clone(),
            diagnostics: lint_document(doc, options),
        })
        .collect();
    Outcome { reports }
}
