//! Base trait shared by all artifact emitters.

use anyhow::Result;

use crate::types::{BackendKind, Binding, GeneratedFile, MessageDeclaration};

/// Banner placed at the top of every generated artifact.
pub const GENERATED_BANNER: &str = "// Generated by buswire. Do not edit by hand.";

/// The core trait all backend emitters implement.
///
/// An emitter is pure formatting: it renders already-ordered inputs into
/// source text and derives no names of its own. Identical inputs in identical
/// order produce byte-identical artifacts.
pub trait Emitter: Send + Sync {
    /// Short name of this emitter.
    fn name(&self) -> &'static str;

    /// Backend this emitter renders for.
    fn backend(&self) -> BackendKind;

    /// Fixed logical file name of the endpoint artifact.
    fn endpoints_file_name(&self) -> &'static str;

    /// Fixed logical file name of the channel artifact.
    fn channels_file_name(&self) -> &'static str;

    /// Render the endpoint wiring artifact for the given bindings. An empty
    /// binding list still yields a valid no-op artifact.
    fn emit_endpoints(&self, bindings: &[Binding]) -> Result<GeneratedFile>;

    /// Render the channel registration artifact for the given channel-marked
    /// messages.
    fn emit_channels(&self, messages: &[&MessageDeclaration]) -> Result<GeneratedFile>;

    /// Human-readable description of the emitter.
    fn description(&self) -> &'static str {
        "Backend wiring emitter"
    }
}

/// Standard artifact header: banner plus a one-line description.
pub fn artifact_header(description: &str) -> String {
    format!("{}\n//\n// {}\n\n", GENERATED_BANNER, description)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_artifact_header_layout() {
        let header = artifact_header("Test artifact.");
        assert_eq!(
            header,
            "// Generated by buswire. Do not edit by hand.\n//\n// Test artifact.\n\n"
        );
    }
}
