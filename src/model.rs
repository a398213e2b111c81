//! Data model for lint results — independent of how they are printed.

/// A named document and its full text.
#[derive(Debug, Clone)]
pub struct Document {
    /// File name, used only in diagnostic messages
    pub name: String,
    pub text: String,
}

impl Document {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Document {
            name: name.into(),
            text: text.into(),
        }
    }
}

/// Whether a diagnostic fails the run or is only reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Enforced,
    Advisory,
}

/// Every formatting rule the linter checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    HeaderWhitespace,
    MissingBlankAfterHeader,
    MalformedStepShape,
    StepPunctuation,
    StepCapitalization,
    AssertFormatting,
    UnwrappedAlgorithmCall,
    NestedValueLiteral,
    UnwrappedLiteralKeyword,
    MissingIndentAfterColon,
}

impl Rule {
    /// Severity used when strict mode is off.
    pub fn default_severity(self) -> Severity {
        match self {
            Rule::UnwrappedLiteralKeyword | Rule::MissingIndentAfterColon => Severity::Advisory,
            _ => Severity::Enforced,
        }
    }
}

/// Kind of block a diagnostic was raised in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Algorithm,
    Grammar,
}

impl BlockKind {
    pub fn label(self) -> &'static str {
        match self {
            BlockKind::Algorithm => "algorithm",
            BlockKind::Grammar => "grammar",
        }
    }
}

/// A single reported violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub rule: Rule,
    pub severity: Severity,
    /// Fully rendered message line, naming the block and document
    pub message: String,
    /// Offending raw logical lines, printed quoted below the message
    pub snippets: Vec<String>,
    /// Index of the logical line the diagnostic is anchored to
    pub line: usize,
}

impl Diagnostic {
    pub fn is_enforced(&self) -> bool {
        self.severity == Severity::Enforced
    }
}

/// Diagnostics for one document, in emission order.
#[derive(Debug)]
pub struct DocumentReport {
    pub document: String,
    pub diagnostics: Vec<Diagnostic>,
}

/// Result of linting a whole document set.
#[derive(Debug, Default)]
pub struct Outcome {
    pub reports: Vec<DocumentReport>,
}

impl Outcome {
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.reports.iter().flat_map(|r| r.diagnostics.iter())
    }

    /// True when no enforced diagnostic was produced.
    pub fn passed(&self) -> bool {
        !self.diagnostics().any(Diagnostic::is_enforced)
    }
}
