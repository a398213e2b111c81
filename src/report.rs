//! Plain-text report writer.
//!
//! Each diagnostic is its message line, the offending logical lines quoted
//! one per line, then a blank separator. The report ends with a one-line
//! summary.

use crate::model::{Diagnostic, Outcome};
use std::io::{self, Write};

pub const SUMMARY_OK: &str = "Everything looks okay!";
pub const SUMMARY_FAILED: &str = "Please resolve the errors detailed above.";

pub fn write_diagnostic<W: Write>(out: &mut W, diagnostic: &Diagnostic) -> io::Result<()> {
    writeln!(out, "{}", diagnostic.message)?;
    for snippet in &diagnostic.snippets {
        writeln!(out, "{:?}", snippet)?;
    }
    writeln!(out)
}

/// Write every diagnostic in document order, followed by the summary line.
pub fn write_report<W: Write>(out: &mut W, outcome: &Outcome) -> io::Result<()> {
    for diagnostic in outcome.diagnostics() {
        write_diagnostic(out, diagnostic)?;
    }
    let summary = if outcome.passed() {
        SUMMARY_OK
    } else {
        SUMMARY_FAILED
    };
    writeln!(out, "{}", summary)
}
