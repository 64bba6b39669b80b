//! Buswire
//!
//! Compile-time wiring generator for message-bus consumers. Walks a
//! host-extracted declaration graph, resolves each consumer to its logical
//! channel and endpoint through a three-tier matching strategy, and emits
//! registration source for topic/subscription and exchange/queue backends.

pub mod collector;
pub mod diagnostics;
pub mod emitters;
pub mod errors;
pub mod generator;
pub mod output;
pub mod resolver;
pub mod types;

pub use collector::DeclarationCollector;
pub use diagnostics::{Diagnostic, Severity};
pub use emitters::{ConsumerRegistryEmitter, Emitter, RabbitMqEmitter, ServiceBusEmitter};
pub use errors::GeneratorError;
pub use generator::{GenerationReport, Generator};
pub use output::write_artifacts;
pub use resolver::{infer_channel_name, BindingResolver};
pub use types::{
    BackendKind, Binding, ConsumerDeclaration, DeclarationGraph, DeclarationSet, EventGroup,
    GeneratedFile, GeneratorConfig, Marker, MessageDeclaration, Resolution, ResolutionTier,
    TypeDeclaration,
};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::collector::DeclarationCollector;
    pub use crate::diagnostics::{Diagnostic, Severity};
    pub use crate::emitters::{Emitter, RabbitMqEmitter, ServiceBusEmitter};
    pub use crate::generator::{GenerationReport, Generator};
    pub use crate::resolver::BindingResolver;
    pub use crate::types::*;
}

/// Default service name used when none is configured
pub const DEFAULT_SERVICE_NAME: &str = "service";

/// Default suffix appended to the service name for endpoint names
pub const DEFAULT_ENDPOINT_SUFFIX: &str = "subscription";
