use std::fmt::{Display, Formatter};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static DIAGNOSTIC_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(.*?):(\d+):(\d+):\s*(fatal error|error|warning|note):\s*(.*)$").unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Fatal,
    Error,
    Warning,
    Note,
}

impl Severity {
    pub fn is_error(self) -> bool {
        matches!(self, Self::Fatal | Self::Error)
    }
}

/// One line of compiler output, `file:line:column: severity: message`.
///
/// Lines and columns stay 1-based, as the compiler prints them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseDiagnostic {
    pub file: String,
    pub line: u32,
    pub column: u32,
    pub severity: Severity,
    pub message: String,
}

impl Display for ParseDiagnostic {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> std::fmt::Result {
        let severity = match self.severity {
            Severity::Fatal => "fatal error",
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Note => "note",
        };
        write!(f, "{}:{}:{}: {severity}: {}", self.file, self.line, self.column, self.message)
    }
}

/// Parse all diagnostics from the compiler's stderr.
///
/// Source excerpts, caret lines and summary lines ("1 error generated.")
/// do not match the diagnostic pattern and are dropped.
pub fn parse_diagnostics(output: &str) -> Vec<ParseDiagnostic> {
    output.lines().filter_map(parse_diagnostic_line).collect()
}

fn parse_diagnostic_line(line: &str) -> Option<ParseDiagnostic> {
    let caps = DIAGNOSTIC_RE.captures(line)?;

    let file = caps.get(1)?.as_str().to_owned();
    let line_num: u32 = caps.get(2)?.as_str().parse().ok()?;
    let column: u32 = caps.get(3)?.as_str().parse().ok()?;
    let severity = match caps.get(4)?.as_str() {
        "fatal error" => Severity::Fatal,
        "error" => Severity::Error,
        "warning" => Severity::Warning,
        _ => Severity::Note,
    };
    let message = caps.get(5)?.as_str().to_string();

    Some(ParseDiagnostic {
        file,
        line: line_num,
        column,
        severity,
        message,
    })
}

#[cfg(test)]
#[path = "../../tests/src/ast/diagnostics_tests.rs"]
mod tests;
