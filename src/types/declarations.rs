//! Typed declaration facts extracted from a graph.

use serde::{Deserialize, Serialize};

use crate::diagnostics::Diagnostic;
use crate::types::graph::simple_name;

/// A message type carrying a channel or entity-name marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageDeclaration {
    /// Fully qualified type name
    pub identity: String,
    /// Channel name from the entity-name marker
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,
    /// Channel name from the legacy channel marker
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_name: Option<String>,
    /// Identity of the enclosing grouping construct, if nested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

impl MessageDeclaration {
    pub fn simple_name(&self) -> &str {
        simple_name(&self.identity)
    }

    /// The channel name this message declares. The entity-name marker wins
    /// over the legacy channel marker when both are present.
    pub fn declared_channel(&self) -> Option<&str> {
        self.entity_name.as_deref().or(self.channel_name.as_deref())
    }
}

/// A consumer bound to exactly one message type. A type consuming several
/// message types yields one record per consumed type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumerDeclaration {
    /// Fully qualified type name of the consumer
    pub identity: String,
    /// Fully qualified name of the consumed message type
    pub message_type: String,
    /// Channel name from an explicit consumer marker
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explicit_channel: Option<String>,
    /// Endpoint name from an explicit consumer marker
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explicit_endpoint: Option<String>,
    /// Endpoint name from a subscription marker
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint_override: Option<String>,
}

impl ConsumerDeclaration {
    pub fn message_simple_name(&self) -> &str {
        simple_name(&self.message_type)
    }

    /// Whether an explicit channel marker binds this consumer.
    pub fn has_explicit_binding(&self) -> bool {
        self.explicit_channel.is_some()
    }
}

/// A named set of message declarations nested under one grouping construct.
/// Member order follows declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventGroup {
    /// Fully qualified name of the grouping construct
    pub identity: String,
    /// Channel-marked members in declaration order
    pub members: Vec<MessageDeclaration>,
}

/// Everything extracted from one declaration graph.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeclarationSet {
    pub messages: Vec<MessageDeclaration>,
    pub consumers: Vec<ConsumerDeclaration>,
    pub groups: Vec<EventGroup>,
    /// Problems found while collecting, none of them fatal
    pub diagnostics: Vec<Diagnostic>,
}

impl DeclarationSet {
    /// True when the graph contributed no messages and no consumers.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty() && self.consumers.is_empty()
    }

    /// Messages that carry the legacy channel marker.
    pub fn channel_marked_messages(&self) -> Vec<&MessageDeclaration> {
        self.messages
            .iter()
            .filter(|m| m.channel_name.is_some())
            .collect()
    }

    /// Distinct consumer identities, in first-appearance order.
    pub fn consumer_identities(&self) -> Vec<&str> {
        let mut identities: Vec<&str> = Vec::new();
        for consumer in &self.consumers {
            if !identities.contains(&consumer.identity.as_str()) {
                identities.push(&consumer.identity);
            }
        }
        identities
    }
}
