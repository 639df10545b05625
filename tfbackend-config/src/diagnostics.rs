//! Diagnostics collected while decoding configuration
//!
//! Decoding never stops at the first problem. Every problem found is
//! recorded here, in the order it was found, next to a best-effort result.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Severity of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// What went wrong
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiagnosticKind {
    #[error("Missing required argument: the argument \"{name}\" is required")]
    MissingAttribute { name: String },

    #[error("Duplicate argument: the argument \"{name}\" was already set")]
    DuplicateAttribute { name: String },

    #[error("Wrong number of labels for \"{block_type}\" block: expected {expected}, got {got}")]
    LabelCount { block_type: String, expected: usize, got: usize },

    #[error("Missing name for \"{block_type}\" block")]
    MissingLabel { block_type: String },

    #[error("Unsupported backend type \"{kind}\"")]
    UnsupportedBackend { kind: String },

    #[error("Incorrect value type for \"{name}\": string required, found {found}")]
    TypeMismatch { name: String, found: String },

    #[error("Invalid value for \"{name}\": value must not be null")]
    NullValue { name: String },

    #[error("Invalid expression for \"{name}\": {message}")]
    Evaluation { name: String, message: String },

    #[error("Duplicate backend configuration: a module may have only one backend")]
    DuplicateBackend,

    #[error("Failed to parse {file}: {message}")]
    Parse { file: String, message: String },

    #[error("Failed to read {file}: {message}")]
    Io { file: String, message: String },
}

/// One problem, with its severity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    #[serde(serialize_with = "serialize_kind", rename = "summary")]
    pub kind: DiagnosticKind,
}

fn serialize_kind<S: serde::Serializer>(kind: &DiagnosticKind, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(kind)
}

impl Diagnostic {
    pub fn error(kind: DiagnosticKind) -> Self {
        Self { severity: Severity::Error, kind }
    }

    pub fn warning(kind: DiagnosticKind) -> Self {
        Self { severity: Severity::Warning, kind }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.kind)
    }
}

/// Ordered list of diagnostics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.0.push(diagnostic);
    }

    pub fn error(&mut self, kind: DiagnosticKind) {
        self.push(Diagnostic::error(kind));
    }

    pub fn warning(&mut self, kind: DiagnosticKind) {
        self.push(Diagnostic::warning(kind));
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.0.extend(other.0);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.0.iter().any(Diagnostic::is_error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter().filter(|d| d.is_error())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.0.iter()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.0
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<Diagnostic> for Diagnostics {
    fn from_iter<I: IntoIterator<Item = Diagnostic>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, diagnostic) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", diagnostic)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_errors() {
        let mut diags = Diagnostics::new();
        assert!(!diags.has_errors());

        diags.warning(DiagnosticKind::UnsupportedBackend { kind: "gcs".to_string() });
        assert!(!diags.has_errors());

        diags.error(DiagnosticKind::MissingAttribute { name: "region".to_string() });
        assert!(diags.has_errors());
        assert_eq!(diags.errors().count(), 1);
        assert_eq!(diags.len(), 2);
    }

    #[test]
    fn test_extend_keeps_order() {
        let mut first = Diagnostics::new();
        first.error(DiagnosticKind::MissingAttribute { name: "bucket".to_string() });

        let mut second = Diagnostics::new();
        second.error(DiagnosticKind::MissingAttribute { name: "key".to_string() });

        first.extend(second);
        let names: Vec<_> = first
            .iter()
            .map(|d| match &d.kind {
                DiagnosticKind::MissingAttribute { name } => name.as_str(),
                _ => "",
            })
            .collect();
        assert_eq!(names, vec!["bucket", "key"]);
    }

    #[test]
    fn test_display() {
        let diag = Diagnostic::error(DiagnosticKind::MissingAttribute { name: "path".to_string() });
        assert_eq!(
            diag.to_string(),
            "error: Missing required argument: the argument \"path\" is required"
        );
    }

    #[test]
    fn test_serializes_summary() {
        let diag = Diagnostic::warning(DiagnosticKind::UnsupportedBackend { kind: "gcs".to_string() });
        let value = serde_json::to_value(&diag).unwrap();
        assert_eq!(value["severity"], "warning");
        assert_eq!(value["summary"], "Unsupported backend type \"gcs\"");
    }
}
