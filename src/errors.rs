//! Typed errors for the crate boundary.
//!
//! Resolution problems are never errors; they surface as diagnostics. The
//! variants here cover the few places where a caller handed the generator
//! something it cannot work with at all.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeneratorError {
    /// The configured service name is blank, so no default endpoint name
    /// can be formed.
    #[error("service name must not be blank")]
    BlankServiceName,

    /// A backend name did not match any supported backend.
    #[error("unknown backend kind: {0}")]
    UnknownBackend(String),

    /// A declaration graph could not be deserialized.
    #[error("invalid declaration graph: {0}")]
    InvalidGraph(#[from] serde_json::Error),

    /// An artifact could not be written at the host boundary.
    #[error("failed to write artifact {path}: {source}")]
    WriteArtifact {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
