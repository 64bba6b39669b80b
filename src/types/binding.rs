//! Binding model and generated-artifact types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::diagnostics::Diagnostic;
use crate::errors::GeneratorError;
use crate::types::declarations::ConsumerDeclaration;

/// Which strategy resolved a binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionTier {
    /// Channel and endpoint taken verbatim from a consumer marker
    Explicit,
    /// Channel matched against an event-group member
    Structural,
    /// Channel inferred from the message type name
    Inferred,
}

impl fmt::Display for ResolutionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResolutionTier::Explicit => "explicit",
            ResolutionTier::Structural => "structural",
            ResolutionTier::Inferred => "inferred",
        };
        write!(f, "{}", name)
    }
}

/// Messaging backend flavor an artifact is rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// Topic/subscription backend, Azure Service Bus shape
    ServiceBus,
    /// Exchange/queue backend, RabbitMQ shape
    RabbitMq,
}

impl BackendKind {
    /// Both supported backends, in stable emission order.
    pub fn all() -> [BackendKind; 2] {
        [BackendKind::ServiceBus, BackendKind::RabbitMq]
    }

    /// Backend vocabulary for the channel side of a binding.
    pub fn channel_term(&self) -> &'static str {
        match self {
            BackendKind::ServiceBus => "topic",
            BackendKind::RabbitMq => "exchange",
        }
    }

    /// Backend vocabulary for the endpoint side of a binding.
    pub fn endpoint_term(&self) -> &'static str {
        match self {
            BackendKind::ServiceBus => "subscription",
            BackendKind::RabbitMq => "queue",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BackendKind::ServiceBus => "service_bus",
            BackendKind::RabbitMq => "rabbit_mq",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for BackendKind {
    type Err = GeneratorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "service_bus" | "servicebus" | "asb" => Ok(BackendKind::ServiceBus),
            "rabbit_mq" | "rabbitmq" | "amqp" => Ok(BackendKind::RabbitMq),
            other => Err(GeneratorError::UnknownBackend(other.to_string())),
        }
    }
}

/// A resolved consumer-to-channel binding. Every name is final; emitters
/// render bindings without deriving anything further.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Binding {
    /// Fully qualified consumer type name
    pub consumer: String,
    /// Fully qualified consumed message type name
    pub message_type: String,
    /// Logical channel name (topic or exchange)
    pub channel_name: String,
    /// Endpoint name (subscription or queue)
    pub endpoint_name: String,
    /// Strategy that produced the binding
    pub tier: ResolutionTier,
}

/// A generated source artifact under a fixed logical file name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedFile {
    pub file_name: String,
    pub contents: String,
}

impl GeneratedFile {
    pub fn new(file_name: &str, contents: String) -> Self {
        Self {
            file_name: file_name.to_string(),
            contents,
        }
    }

    pub fn line_count(&self) -> usize {
        self.contents.lines().count()
    }
}

/// Outcome of resolving one declaration set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Resolution {
    /// Resolved bindings, in consumer declaration order
    pub bindings: Vec<Binding>,
    /// Consumers no tier could bind, excluded from emission
    pub unresolved: Vec<ConsumerDeclaration>,
    /// Problems found while resolving, none of them fatal
    pub diagnostics: Vec<Diagnostic>,
}

impl Resolution {
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Bindings in canonical order: consumer identity, then message type.
    /// Emitting from this order makes artifacts independent of the graph's
    /// declaration order.
    pub fn canonical_bindings(&self) -> Vec<Binding> {
        let mut bindings = self.bindings.clone();
        bindings.sort_by(|a, b| {
            a.consumer
                .cmp(&b.consumer)
                .then_with(|| a.message_type.cmp(&b.message_type))
        });
        bindings
    }
}
