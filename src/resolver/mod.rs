//! Binding resolver.
//!
//! Maps each collected consumer to a channel and endpoint by trying three
//! strategies in fixed priority order: the consumer's own explicit marker,
//! a structural match against event-group members, and finally channel-name
//! inference from the message type name. A consumer that defeats all three
//! is reported and excluded, never fatal.

use regex::Regex;

use crate::diagnostics::Diagnostic;
use crate::types::{
    simple_name, Binding, ConsumerDeclaration, DeclarationSet, EventGroup, GeneratorConfig,
    MessageDeclaration, Resolution, ResolutionTier,
};

/// Resolves consumers against a declaration set.
pub struct BindingResolver;

impl BindingResolver {
    /// Resolve every consumer in the set. The result carries one binding per
    /// resolvable consumer record, plus the consumers nothing matched.
    pub fn resolve(set: &DeclarationSet, config: &GeneratorConfig) -> Resolution {
        let mut resolution = Resolution::default();

        for consumer in &set.consumers {
            match Self::resolve_consumer(consumer, &set.groups, config, &mut resolution.diagnostics)
            {
                Some(binding) => resolution.bindings.push(binding),
                None => {
                    resolution.diagnostics.push(Diagnostic::unresolvable(
                        &consumer.identity,
                        &format!(
                            "no strategy matched consumed type '{}'",
                            consumer.message_type
                        ),
                    ));
                    resolution.unresolved.push(consumer.clone());
                }
            }
        }
        resolution
    }

    fn resolve_consumer(
        consumer: &ConsumerDeclaration,
        groups: &[EventGroup],
        config: &GeneratorConfig,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Option<Binding> {
        if let Some(binding) = Self::resolve_explicit(consumer, config) {
            return Some(binding);
        }
        if let Some(binding) = Self::resolve_structural(consumer, groups, config, diagnostics) {
            return Some(binding);
        }
        Self::resolve_inferred(consumer, config)
    }

    /// Explicit strategy: the consumer marker's channel and endpoint,
    /// verbatim. A marker without an endpoint falls back to the subscription
    /// override or the configured default.
    fn resolve_explicit(
        consumer: &ConsumerDeclaration,
        config: &GeneratorConfig,
    ) -> Option<Binding> {
        let channel = consumer.explicit_channel.as_ref()?;
        let endpoint = consumer
            .explicit_endpoint
            .clone()
            .unwrap_or_else(|| Self::default_endpoint(consumer, config));

        Some(Binding {
            consumer: consumer.identity.clone(),
            message_type: consumer.message_type.clone(),
            channel_name: channel.clone(),
            endpoint_name: endpoint,
            tier: ResolutionTier::Explicit,
        })
    }

    /// Structural strategy: match the consumed type against event-group
    /// members across all groups, in declaration order. The first match wins;
    /// further matches only produce an ambiguity diagnostic.
    fn resolve_structural(
        consumer: &ConsumerDeclaration,
        groups: &[EventGroup],
        config: &GeneratorConfig,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Option<Binding> {
        let mut matches: Vec<&MessageDeclaration> = Vec::new();
        for group in groups {
            for member in &group.members {
                if Self::member_matches(&consumer.message_type, member) {
                    matches.push(member);
                }
            }
        }

        let first = matches.first()?;
        if matches.len() > 1 {
            let candidates: Vec<&str> = matches.iter().map(|m| m.identity.as_str()).collect();
            diagnostics.push(Diagnostic::ambiguous_match(
                &consumer.identity,
                &format!(
                    "'{}' matches {} group members ({}), binding to the first",
                    consumer.message_type,
                    matches.len(),
                    candidates.join(", ")
                ),
            ));
        }

        let channel = first.declared_channel()?;
        Some(Binding {
            consumer: consumer.identity.clone(),
            message_type: consumer.message_type.clone(),
            channel_name: channel.to_string(),
            endpoint_name: Self::default_endpoint(consumer, config),
            tier: ResolutionTier::Structural,
        })
    }

    /// A consumed type matches a group member when their simple names are
    /// equal, or when the consumed type's qualified name ends with `.` plus
    /// the member's qualified name. The suffix form tolerates members whose
    /// recorded identity carries only part of the namespace.
    fn member_matches(message_type: &str, member: &MessageDeclaration) -> bool {
        if simple_name(message_type) == member.simple_name() {
            return true;
        }
        message_type
            .strip_suffix(&member.identity)
            .is_some_and(|prefix| prefix.ends_with('.'))
    }

    /// Inference strategy: derive the channel name from the consumed type's
    /// simple name.
    fn resolve_inferred(
        consumer: &ConsumerDeclaration,
        config: &GeneratorConfig,
    ) -> Option<Binding> {
        let channel = infer_channel_name(consumer.message_simple_name())?;
        Some(Binding {
            consumer: consumer.identity.clone(),
            message_type: consumer.message_type.clone(),
            channel_name: channel,
            endpoint_name: Self::default_endpoint(consumer, config),
            tier: ResolutionTier::Inferred,
        })
    }

    fn default_endpoint(consumer: &ConsumerDeclaration, config: &GeneratorConfig) -> String {
        consumer
            .endpoint_override
            .clone()
            .unwrap_or_else(|| config.default_endpoint_name())
    }
}

/// Derive a dash-separated channel slug from a message type's simple name:
/// strip at most one trailing `Event` or `Message` suffix, dash each
/// lowercase-to-uppercase boundary, then lowercase the whole name.
///
/// `AccountSignedUpEvent` becomes `account-signed-up`, `OrderPlacedMessage`
/// becomes `order-placed`, `UserLoggedIn` becomes `user-logged-in`.
pub fn infer_channel_name(type_simple_name: &str) -> Option<String> {
    lazy_static::lazy_static! {
        static ref CAMEL_BOUNDARY: Regex = Regex::new("([a-z])([A-Z])").unwrap();
    }

    let name = type_simple_name.trim();
    if name.is_empty() {
        return None;
    }

    let stripped = strip_message_suffix(name);
    let dashed = CAMEL_BOUNDARY.replace_all(stripped, "$1-$2");
    Some(dashed.to_lowercase())
}

/// Strip one trailing `Event` or `Message`, case-insensitively, keeping the
/// name whole when stripping would leave nothing.
fn strip_message_suffix(name: &str) -> &str {
    for suffix in ["Event", "Message"] {
        if name.len() > suffix.len()
            && name.is_char_boundary(name.len() - suffix.len())
            && name[name.len() - suffix.len()..].eq_ignore_ascii_case(suffix)
        {
            return &name[..name.len() - suffix.len()];
        }
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::codes;
    use pretty_assertions::assert_eq;

    fn create_consumer(identity: &str, message_type: &str) -> ConsumerDeclaration {
        ConsumerDeclaration {
            identity: identity.to_string(),
            message_type: message_type.to_string(),
            explicit_channel: None,
            explicit_endpoint: None,
            endpoint_override: None,
        }
    }

    fn create_member(identity: &str, entity_name: &str, group: &str) -> MessageDeclaration {
        MessageDeclaration {
            identity: identity.to_string(),
            entity_name: Some(entity_name.to_string()),
            channel_name: None,
            group: Some(group.to_string()),
        }
    }

    fn create_group(identity: &str, members: Vec<MessageDeclaration>) -> EventGroup {
        EventGroup {
            identity: identity.to_string(),
            members,
        }
    }

    fn resolve_single(set: &DeclarationSet) -> Binding {
        let resolution = BindingResolver::resolve(set, &GeneratorConfig::new("account-service"));
        assert_eq!(resolution.bindings.len(), 1, "expected exactly one binding");
        resolution.bindings[0].clone()
    }

    #[test]
    fn test_explicit_marker_wins_over_structural_match() {
        let member = create_member(
            "Sample.Events.IAccountSignedUpIntegrationEvent.V1",
            "account-signed-up-v1",
            "Sample.Events.IAccountSignedUpIntegrationEvent",
        );
        let mut consumer = create_consumer(
            "Sample.Consumers.PinnedConsumer",
            "Sample.Events.IAccountSignedUpIntegrationEvent.V1",
        );
        consumer.explicit_channel = Some("pinned-topic".to_string());
        consumer.explicit_endpoint = Some("pinned-endpoint".to_string());

        let set = DeclarationSet {
            consumers: vec![consumer],
            groups: vec![create_group(
                "Sample.Events.IAccountSignedUpIntegrationEvent",
                vec![member],
            )],
            ..DeclarationSet::default()
        };

        let binding = resolve_single(&set);
        assert_eq!(binding.channel_name, "pinned-topic");
        assert_eq!(binding.endpoint_name, "pinned-endpoint");
        assert_eq!(binding.tier, ResolutionTier::Explicit);
    }

    #[test]
    fn test_explicit_marker_without_endpoint_uses_default_name() {
        let mut consumer = create_consumer("Sample.Consumers.Explicit", "Sample.Events.Anything");
        consumer.explicit_channel = Some("custom-topic".to_string());

        let set = DeclarationSet {
            consumers: vec![consumer],
            ..DeclarationSet::default()
        };

        let binding = resolve_single(&set);
        assert_eq!(binding.channel_name, "custom-topic");
        assert_eq!(binding.endpoint_name, "account-service-subscription");
    }

    #[test]
    fn test_structural_match_on_simple_name() {
        let member = create_member(
            "Sample.Events.IAccountSignedUpIntegrationEvent.V1",
            "account-signed-up-v1",
            "Sample.Events.IAccountSignedUpIntegrationEvent",
        );
        let consumer = create_consumer("Sample.Consumers.V1Consumer", "Other.Namespace.V1");

        let set = DeclarationSet {
            consumers: vec![consumer],
            groups: vec![create_group(
                "Sample.Events.IAccountSignedUpIntegrationEvent",
                vec![member],
            )],
            ..DeclarationSet::default()
        };

        let binding = resolve_single(&set);
        assert_eq!(binding.channel_name, "account-signed-up-v1");
        assert_eq!(binding.tier, ResolutionTier::Structural);
    }

    #[test]
    fn test_structural_match_on_qualified_suffix() {
        // The member identity carries only part of the namespace.
        let member = create_member(
            "IAccountSignedUpIntegrationEvent.V1",
            "account-signed-up-v1",
            "IAccountSignedUpIntegrationEvent",
        );
        let consumer = create_consumer(
            "Sample.Consumers.SuffixConsumer",
            "Sample.Events.IAccountSignedUpIntegrationEvent.V1",
        );

        let set = DeclarationSet {
            consumers: vec![consumer],
            groups: vec![create_group("IAccountSignedUpIntegrationEvent", vec![member])],
            ..DeclarationSet::default()
        };

        let binding = resolve_single(&set);
        assert_eq!(binding.channel_name, "account-signed-up-v1");
        assert_eq!(binding.tier, ResolutionTier::Structural);
    }

    #[test]
    fn test_structural_ignores_unrelated_types() {
        let member = create_member(
            "Sample.Events.IAccountSignedUpIntegrationEvent.V1",
            "account-signed-up-v1",
            "Sample.Events.IAccountSignedUpIntegrationEvent",
        );
        assert!(!BindingResolver::member_matches(
            "Sample.Events.SomethingElse",
            &member,
        ));
        assert!(!BindingResolver::member_matches("Sample.Events.V2", &member));
    }

    #[test]
    fn test_structural_default_endpoint_name() {
        let member = create_member(
            "Sample.Events.IAccountSignedUpIntegrationEvent.V2",
            "account-signed-up-v2",
            "Sample.Events.IAccountSignedUpIntegrationEvent",
        );
        let consumer = create_consumer(
            "Sample.Consumers.V2Consumer",
            "Sample.Events.IAccountSignedUpIntegrationEvent.V2",
        );

        let set = DeclarationSet {
            consumers: vec![consumer],
            groups: vec![create_group(
                "Sample.Events.IAccountSignedUpIntegrationEvent",
                vec![member],
            )],
            ..DeclarationSet::default()
        };

        let binding = resolve_single(&set);
        assert_eq!(binding.endpoint_name, "account-service-subscription");
    }

    #[test]
    fn test_ambiguous_structural_match_takes_first_and_reports() {
        let first = create_member("Sample.Events.GroupA.V1", "group-a-v1", "Sample.Events.GroupA");
        let second = create_member("Sample.Events.GroupB.V1", "group-b-v1", "Sample.Events.GroupB");
        let consumer = create_consumer("Sample.Consumers.V1Consumer", "Elsewhere.V1");

        let set = DeclarationSet {
            consumers: vec![consumer],
            groups: vec![
                create_group("Sample.Events.GroupA", vec![first]),
                create_group("Sample.Events.GroupB", vec![second]),
            ],
            ..DeclarationSet::default()
        };

        let resolution = BindingResolver::resolve(&set, &GeneratorConfig::new("account-service"));
        assert_eq!(resolution.bindings.len(), 1);
        assert_eq!(resolution.bindings[0].channel_name, "group-a-v1");

        let ambiguity: Vec<_> = resolution
            .diagnostics
            .iter()
            .filter(|d| d.code == codes::AMBIGUOUS_STRUCTURAL_MATCH)
            .collect();
        assert_eq!(ambiguity.len(), 1);
        assert!(ambiguity[0].message.contains("Sample.Events.GroupB.V1"));
    }

    #[test]
    fn test_inference_examples() {
        let cases = [
            ("AccountSignedUpEvent", "account-signed-up"),
            ("OrderPlacedMessage", "order-placed"),
            ("UserLoggedIn", "user-logged-in"),
        ];
        for (name, expected) in cases {
            assert_eq!(infer_channel_name(name).as_deref(), Some(expected));
        }
    }

    #[test]
    fn test_inference_strips_at_most_one_suffix() {
        assert_eq!(infer_channel_name("PaymentEventMessage").as_deref(), Some("payment-event"));
        assert_eq!(infer_channel_name("StorageEvent").as_deref(), Some("storage"));
    }

    #[test]
    fn test_inference_keeps_suffix_only_names_whole() {
        assert_eq!(infer_channel_name("Event").as_deref(), Some("event"));
        assert_eq!(infer_channel_name("Message").as_deref(), Some("message"));
    }

    #[test]
    fn test_inference_handles_digits_and_single_words() {
        assert_eq!(infer_channel_name("UserV2Event").as_deref(), Some("user-v2"));
        assert_eq!(infer_channel_name("Ping").as_deref(), Some("ping"));
    }

    #[test]
    fn test_inference_rejects_empty_name() {
        assert_eq!(infer_channel_name(""), None);
        assert_eq!(infer_channel_name("   "), None);
    }

    #[test]
    fn test_unresolvable_consumer_is_reported_and_excluded() {
        // A consumed type whose simple name is empty defeats every strategy.
        let consumer = create_consumer("Sample.Consumers.Orphan", "Sample.Events.");

        let set = DeclarationSet {
            consumers: vec![consumer],
            ..DeclarationSet::default()
        };

        let resolution = BindingResolver::resolve(&set, &GeneratorConfig::new("account-service"));
        assert!(resolution.bindings.is_empty());
        assert_eq!(resolution.unresolved.len(), 1);
        assert_eq!(resolution.diagnostics.len(), 1);
        assert_eq!(resolution.diagnostics[0].code, codes::UNRESOLVABLE_CONSUMER);
    }

    #[test]
    fn test_endpoint_override_applies_to_every_tier() {
        let member = create_member(
            "Sample.Events.IAccountSignedUpIntegrationEvent.V1",
            "account-signed-up-v1",
            "Sample.Events.IAccountSignedUpIntegrationEvent",
        );
        let group = create_group(
            "Sample.Events.IAccountSignedUpIntegrationEvent",
            vec![member],
        );

        // Explicit marker without an endpoint argument.
        let mut explicit = create_consumer("Sample.Consumers.A", "Sample.Events.X");
        explicit.explicit_channel = Some("x-topic".to_string());
        explicit.endpoint_override = Some("custom-endpoint".to_string());

        // Structural match.
        let mut structural = create_consumer(
            "Sample.Consumers.B",
            "Sample.Events.IAccountSignedUpIntegrationEvent.V1",
        );
        structural.endpoint_override = Some("custom-endpoint".to_string());

        // Inference.
        let mut inferred = create_consumer("Sample.Consumers.C", "Sample.Events.OrderPlacedMessage");
        inferred.endpoint_override = Some("custom-endpoint".to_string());

        let set = DeclarationSet {
            consumers: vec![explicit, structural, inferred],
            groups: vec![group],
            ..DeclarationSet::default()
        };

        let resolution = BindingResolver::resolve(&set, &GeneratorConfig::new("account-service"));
        assert_eq!(resolution.bindings.len(), 3);
        for binding in &resolution.bindings {
            assert_eq!(binding.endpoint_name, "custom-endpoint");
        }
    }

    #[test]
    fn test_explicit_endpoint_beats_override() {
        let mut consumer = create_consumer("Sample.Consumers.Both", "Sample.Events.X");
        consumer.explicit_channel = Some("x-topic".to_string());
        consumer.explicit_endpoint = Some("marker-endpoint".to_string());
        consumer.endpoint_override = Some("override-endpoint".to_string());

        let set = DeclarationSet {
            consumers: vec![consumer],
            ..DeclarationSet::default()
        };

        let binding = resolve_single(&set);
        assert_eq!(binding.endpoint_name, "marker-endpoint");
    }

    #[test]
    fn test_group_member_with_legacy_channel_marker_resolves() {
        let member = MessageDeclaration {
            identity: "Sample.Events.ITestEvents.One".to_string(),
            entity_name: None,
            channel_name: Some("legacy-topic".to_string()),
            group: Some("Sample.Events.ITestEvents".to_string()),
        };
        let consumer = create_consumer("Sample.Consumers.One", "Sample.Events.ITestEvents.One");

        let set = DeclarationSet {
            consumers: vec![consumer],
            groups: vec![create_group("Sample.Events.ITestEvents", vec![member])],
            ..DeclarationSet::default()
        };

        let binding = resolve_single(&set);
        assert_eq!(binding.channel_name, "legacy-topic");
        assert_eq!(binding.tier, ResolutionTier::Structural);
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let member = create_member(
            "Sample.Events.IAccountSignedUpIntegrationEvent.V1",
            "account-signed-up-v1",
            "Sample.Events.IAccountSignedUpIntegrationEvent",
        );
        let set = DeclarationSet {
            consumers: vec![
                create_consumer(
                    "Sample.Consumers.V1Consumer",
                    "Sample.Events.IAccountSignedUpIntegrationEvent.V1",
                ),
                create_consumer("Sample.Consumers.OrderConsumer", "Sample.Events.OrderPlacedMessage"),
            ],
            groups: vec![create_group(
                "Sample.Events.IAccountSignedUpIntegrationEvent",
                vec![member],
            )],
            ..DeclarationSet::default()
        };
        let config = GeneratorConfig::new("account-service");

        let first = BindingResolver::resolve(&set, &config);
        let second = BindingResolver::resolve(&set, &config);
        assert_eq!(first.bindings, second.bindings);
    }
}
