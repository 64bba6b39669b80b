//! Core types for the wiring generator.

mod binding;
mod config;
mod declarations;
mod graph;

pub use binding::{BackendKind, Binding, GeneratedFile, Resolution, ResolutionTier};
pub use config::GeneratorConfig;
pub use declarations::{ConsumerDeclaration, DeclarationSet, EventGroup, MessageDeclaration};
pub use graph::{
    simple_name, DeclarationGraph, Marker, TypeDeclaration, MARKER_CHANNEL, MARKER_CONSUMER,
    MARKER_ENTITY_NAME, MARKER_SUBSCRIPTION,
};
