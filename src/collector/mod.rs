//! Declaration collector.
//!
//! Walks the declaration graph once and extracts typed facts: channel-marked
//! messages, consumers with their consumed message types, and event groups.
//! A malformed marker is skipped with a diagnostic; it never aborts the walk
//! and never disqualifies the declaration from other markers.

use tracing::debug;

use crate::diagnostics::Diagnostic;
use crate::types::{
    ConsumerDeclaration, DeclarationGraph, DeclarationSet, EventGroup, MessageDeclaration,
    TypeDeclaration, MARKER_CHANNEL, MARKER_CONSUMER, MARKER_ENTITY_NAME, MARKER_SUBSCRIPTION,
};

/// Turns a raw declaration graph into typed declaration facts.
pub struct DeclarationCollector;

impl DeclarationCollector {
    /// Collect every message, consumer, and event group from the graph.
    pub fn collect(graph: &DeclarationGraph) -> DeclarationSet {
        let mut set = DeclarationSet::default();

        for declaration in &graph.types {
            Self::collect_message(declaration, &mut set);
            Self::collect_consumers(declaration, &mut set);
        }
        set.groups = Self::build_groups(&set.messages);

        debug!(
            messages = set.messages.len(),
            consumers = set.consumers.len(),
            groups = set.groups.len(),
            "collected declaration facts"
        );
        set
    }

    fn collect_message(declaration: &TypeDeclaration, set: &mut DeclarationSet) {
        let entity_name = Self::single_name_arg(declaration, MARKER_ENTITY_NAME, &mut set.diagnostics);
        let channel_name = Self::single_name_arg(declaration, MARKER_CHANNEL, &mut set.diagnostics);
        if entity_name.is_none() && channel_name.is_none() {
            return;
        }

        set.messages.push(MessageDeclaration {
            identity: declaration.identity.clone(),
            entity_name,
            channel_name,
            group: declaration.enclosing_group.clone(),
        });
    }

    fn collect_consumers(declaration: &TypeDeclaration, set: &mut DeclarationSet) {
        if declaration.consumes.is_empty() {
            return;
        }

        let (explicit_channel, explicit_endpoint) =
            Self::explicit_binding(declaration, &mut set.diagnostics);
        let endpoint_override =
            Self::single_name_arg(declaration, MARKER_SUBSCRIPTION, &mut set.diagnostics);

        for message_type in &declaration.consumes {
            set.consumers.push(ConsumerDeclaration {
                identity: declaration.identity.clone(),
                message_type: message_type.clone(),
                explicit_channel: explicit_channel.clone(),
                explicit_endpoint: explicit_endpoint.clone(),
                endpoint_override: endpoint_override.clone(),
            });
        }
    }

    /// Extract the single name argument of a marker. Wrong arity or a blank
    /// value records a diagnostic and drops the marker.
    fn single_name_arg(
        declaration: &TypeDeclaration,
        marker_name: &str,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Option<String> {
        let marker = declaration.first_marker(marker_name)?;
        if marker.args.len() != 1 {
            diagnostics.push(Diagnostic::malformed_marker(
                &declaration.identity,
                &format!(
                    "{} marker takes one argument, found {}",
                    marker_name,
                    marker.args.len()
                ),
            ));
            return None;
        }

        let value = marker.args[0].trim();
        if value.is_empty() {
            diagnostics.push(Diagnostic::malformed_marker(
                &declaration.identity,
                &format!("{} marker has an empty name argument", marker_name),
            ));
            return None;
        }
        Some(value.to_string())
    }

    /// Read the channel/endpoint pair off an explicit consumer marker. Any
    /// arity or blank-argument problem invalidates the whole marker, leaving
    /// the consumer to the structural and inference strategies.
    fn explicit_binding(
        declaration: &TypeDeclaration,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> (Option<String>, Option<String>) {
        let Some(marker) = declaration.first_marker(MARKER_CONSUMER) else {
            return (None, None);
        };

        if marker.args.is_empty() || marker.args.len() > 2 {
            diagnostics.push(Diagnostic::malformed_marker(
                &declaration.identity,
                &format!(
                    "consumer marker takes one or two arguments, found {}",
                    marker.args.len()
                ),
            ));
            return (None, None);
        }

        let channel = marker.args[0].trim();
        if channel.is_empty() {
            diagnostics.push(Diagnostic::malformed_marker(
                &declaration.identity,
                "consumer marker has an empty channel name",
            ));
            return (None, None);
        }

        let endpoint = match marker.arg(1) {
            Some(raw) => {
                let endpoint = raw.trim();
                if endpoint.is_empty() {
                    diagnostics.push(Diagnostic::malformed_marker(
                        &declaration.identity,
                        "consumer marker has an empty endpoint name",
                    ));
                    return (None, None);
                }
                Some(endpoint.to_string())
            }
            None => None,
        };

        (Some(channel.to_string()), endpoint)
    }

    /// Group channel-marked messages by their enclosing construct, keeping
    /// first-appearance order for groups and declaration order for members.
    fn build_groups(messages: &[MessageDeclaration]) -> Vec<EventGroup> {
        let mut groups: Vec<EventGroup> = Vec::new();

        for message in messages {
            let Some(group_identity) = &message.group else {
                continue;
            };
            match groups.iter_mut().find(|g| g.identity == *group_identity) {
                Some(group) => group.members.push(message.clone()),
                None => groups.push(EventGroup {
                    identity: group_identity.clone(),
                    members: vec![message.clone()],
                }),
            }
        }
        groups
    }
}
