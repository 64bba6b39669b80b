//! Structured diagnostics for collection and resolution.
//!
//! The engine hands diagnostics back with its results instead of logging
//! from inside the algorithms; [`report`] forwards a batch to `tracing` for
//! hosts that just want log output.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
}

/// Stable diagnostic codes, one per failure class.
pub mod codes {
    /// A marker is present but its arguments are unusable
    pub const MALFORMED_METADATA: &str = "BW0001";
    /// No tier produced a channel name for a consumer
    pub const UNRESOLVABLE_CONSUMER: &str = "BW0002";
    /// A message type matched more than one event-group member
    pub const AMBIGUOUS_STRUCTURAL_MATCH: &str = "BW0003";
    /// The graph contributed nothing; a stable no-op artifact was emitted
    pub const EMPTY_INPUT: &str = "BW0004";
}

/// A single structured diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Stable code from [`codes`]
    pub code: String,
    /// Human-readable description of the problem
    pub message: String,
    /// Identity of the declaration the diagnostic is about
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
}

impl Diagnostic {
    pub fn info(code: &str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            code: code.to_string(),
            message: message.into(),
            subject: None,
        }
    }

    pub fn warning(code: &str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code: code.to_string(),
            message: message.into(),
            subject: None,
        }
    }

    /// Attach the declaration identity the diagnostic is about.
    pub fn with_subject(mut self, subject: &str) -> Self {
        self.subject = Some(subject.to_string());
        self
    }

    /// A marker whose arguments cannot be used. The marker is skipped; the
    /// declaration stays in play for the remaining strategies.
    pub fn malformed_marker(subject: &str, detail: &str) -> Self {
        Self::warning(
            codes::MALFORMED_METADATA,
            format!("malformed marker on {}: {}", subject, detail),
        )
        .with_subject(subject)
    }

    /// A consumer no strategy could bind. It is excluded from emission.
    pub fn unresolvable(subject: &str, detail: &str) -> Self {
        Self::warning(
            codes::UNRESOLVABLE_CONSUMER,
            format!("no channel binding for {}: {}", subject, detail),
        )
        .with_subject(subject)
    }

    /// A message type that matched several event-group members. The first
    /// match in declaration order wins.
    pub fn ambiguous_match(subject: &str, detail: &str) -> Self {
        Self::warning(
            codes::AMBIGUOUS_STRUCTURAL_MATCH,
            format!("ambiguous structural match for {}: {}", subject, detail),
        )
        .with_subject(subject)
    }

    /// An empty declaration set. Generation still runs and emits stable
    /// no-op artifacts.
    pub fn empty_input() -> Self {
        Self::info(
            codes::EMPTY_INPUT,
            "no message or consumer declarations found, emitting no-op wiring",
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

/// Forward a batch of diagnostics to `tracing`, one event per diagnostic.
pub fn report(diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        let subject = diagnostic.subject.as_deref().unwrap_or("-");
        match diagnostic.severity {
            Severity::Info => {
                info!(code = %diagnostic.code, subject = %subject, "{}", diagnostic.message)
            }
            Severity::Warning => {
                warn!(code = %diagnostic.code, subject = %subject, "{}", diagnostic.message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_malformed_marker_diagnostic() {
        let diagnostic = Diagnostic::malformed_marker("Sample.Events.Broken", "empty channel name");

        assert_eq!(diagnostic.severity, Severity::Warning);
        assert_eq!(diagnostic.code, codes::MALFORMED_METADATA);
        assert_eq!(diagnostic.subject.as_deref(), Some("Sample.Events.Broken"));
        assert!(diagnostic.message.contains("empty channel name"));
    }

    #[test]
    fn test_empty_input_is_informational() {
        let diagnostic = Diagnostic::empty_input();
        assert_eq!(diagnostic.severity, Severity::Info);
        assert_eq!(diagnostic.code, codes::EMPTY_INPUT);
    }

    #[test]
    fn test_display_includes_code() {
        let diagnostic = Diagnostic::unresolvable("Sample.Consumers.Orphan", "empty type name");
        let rendered = diagnostic.to_string();
        assert!(rendered.starts_with("[BW0002]"));
        assert!(rendered.contains("Sample.Consumers.Orphan"));
    }

    #[test]
    fn test_report_accepts_empty_batch() {
        report(&[]);
        report(&[Diagnostic::empty_input()]);
    }
}
