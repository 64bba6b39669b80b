//! Generation pipeline.
//!
//! One [`Generator::generate`] call runs the full pass: collect declaration
//! facts, resolve bindings, put everything into canonical order, and render
//! the artifacts for the requested backends. The pass is a pure recompute
//! over the graph it is handed; nothing is carried over between calls.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::collector::DeclarationCollector;
use crate::diagnostics::{Diagnostic, Severity};
use crate::emitters::{ConsumerRegistryEmitter, Emitter, RabbitMqEmitter, ServiceBusEmitter};
use crate::resolver::BindingResolver;
use crate::types::{
    BackendKind, Binding, ConsumerDeclaration, DeclarationGraph, DeclarationSet, GeneratedFile,
    GeneratorConfig, MessageDeclaration,
};

/// Everything one generation run produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    /// Endpoint and channel artifacts per backend, plus the shared registry
    pub artifacts: Vec<GeneratedFile>,
    /// Resolved bindings in canonical order
    pub bindings: Vec<Binding>,
    /// Consumers excluded because no strategy matched
    pub unresolved: Vec<ConsumerDeclaration>,
    /// Collection and resolution diagnostics, in discovery order
    pub diagnostics: Vec<Diagnostic>,
}

impl GenerationReport {
    /// Artifact by its logical file name.
    pub fn artifact(&self, file_name: &str) -> Option<&GeneratedFile> {
        self.artifacts.iter().find(|f| f.file_name == file_name)
    }

    pub fn has_warnings(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Warning)
    }
}

/// Orchestrates one pass over a declaration graph.
pub struct Generator {
    config: GeneratorConfig,
    service_bus: ServiceBusEmitter,
    rabbit_mq: RabbitMqEmitter,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new(GeneratorConfig::default())
    }
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            service_bus: ServiceBusEmitter::new(),
            rabbit_mq: RabbitMqEmitter::new(),
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Emitter for one backend kind.
    pub fn emitter(&self, kind: BackendKind) -> &dyn Emitter {
        match kind {
            BackendKind::ServiceBus => &self.service_bus,
            BackendKind::RabbitMq => &self.rabbit_mq,
        }
    }

    /// Emitter by backend name, accepting the common aliases.
    pub fn emitter_by_name(&self, name: &str) -> Option<&dyn Emitter> {
        name.parse::<BackendKind>()
            .ok()
            .map(|kind| self.emitter(kind))
    }

    /// Names and descriptions of all registered emitters.
    pub fn list_emitters(&self) -> Vec<(&'static str, &'static str)> {
        BackendKind::all()
            .iter()
            .map(|&kind| {
                let emitter = self.emitter(kind);
                (emitter.name(), emitter.description())
            })
            .collect()
    }

    /// Run the full pipeline for every supported backend.
    pub fn generate_all(&self, graph: &DeclarationGraph) -> Result<GenerationReport> {
        self.generate(graph, &BackendKind::all())
    }

    /// Run the full pipeline for the given backends. An empty or unusable
    /// graph still succeeds and yields stable no-op artifacts; only an
    /// unusable configuration is an error.
    pub fn generate(
        &self,
        graph: &DeclarationGraph,
        backends: &[BackendKind],
    ) -> Result<GenerationReport> {
        self.config.validate()?;

        let set = DeclarationCollector::collect(graph);
        let resolution = BindingResolver::resolve(&set, &self.config);

        let bindings = resolution.canonical_bindings();
        let channel_messages = Self::canonical_channel_messages(&set);
        let mut consumers = set.consumer_identities();
        consumers.sort_unstable();

        let mut artifacts = Vec::with_capacity(backends.len() * 2 + 1);
        for &kind in backends {
            let emitter = self.emitter(kind);

            let endpoints = emitter.emit_endpoints(&bindings)?;
            debug!(file = %endpoints.file_name, lines = endpoints.line_count(), "emitted artifact");
            artifacts.push(endpoints);

            let channels = emitter.emit_channels(&channel_messages)?;
            debug!(file = %channels.file_name, lines = channels.line_count(), "emitted artifact");
            artifacts.push(channels);
        }
        artifacts.push(ConsumerRegistryEmitter::emit(&consumers)?);

        info!(
            bindings = bindings.len(),
            unresolved = resolution.unresolved.len(),
            artifacts = artifacts.len(),
            "generation complete"
        );

        let empty = set.is_empty();
        let mut diagnostics = set.diagnostics;
        if empty {
            diagnostics.push(Diagnostic::empty_input());
        }
        diagnostics.extend(resolution.diagnostics);

        Ok(GenerationReport {
            artifacts,
            bindings,
            unresolved: resolution.unresolved,
            diagnostics,
        })
    }

    /// Channel-marked messages in canonical order: channel name, then
    /// identity.
    fn canonical_channel_messages(set: &DeclarationSet) -> Vec<&MessageDeclaration> {
        let mut messages = set.channel_marked_messages();
        messages.sort_by(|a, b| {
            a.channel_name
                .cmp(&b.channel_name)
                .then_with(|| a.identity.cmp(&b.identity))
        });
        messages
    }
}
