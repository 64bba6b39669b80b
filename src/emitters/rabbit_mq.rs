//! Exchange/queue artifact emitter, RabbitMQ shape.
//!
//! Each binding becomes one queue bound to the channel's exchange; the
//! channel artifact maps every channel-marked message type onto its named
//! exchange.

use anyhow::Result;

use crate::emitters::base::{artifact_header, Emitter};
use crate::types::{BackendKind, Binding, GeneratedFile, MessageDeclaration};

const ENDPOINTS_FILE: &str = "rabbit_mq_endpoints.rs";
const CHANNELS_FILE: &str = "rabbit_mq_channels.rs";
const CONFIGURATOR: &str = "RabbitMqConfigurator";
const CONFIGURATOR_PATH: &str = "crate::bus::RabbitMqConfigurator";

/// Emits queue-binding and exchange wiring.
#[derive(Debug, Default)]
pub struct RabbitMqEmitter;

impl RabbitMqEmitter {
    pub fn new() -> Self {
        Self
    }

    fn endpoint_block(binding: &Binding) -> String {
        format!(
            "    // {} consumes {} ({})\n    \
             cfg.queue_binding(\"{}\", \"{}\", |queue| {{\n        \
             queue.consumer(\"{}\");\n    \
             }});\n",
            binding.consumer,
            binding.message_type,
            binding.tier,
            binding.channel_name,
            binding.endpoint_name,
            binding.consumer,
        )
    }
}

impl Emitter for RabbitMqEmitter {
    fn name(&self) -> &'static str {
        "rabbit_mq"
    }

    fn backend(&self) -> BackendKind {
        BackendKind::RabbitMq
    }

    fn endpoints_file_name(&self) -> &'static str {
        ENDPOINTS_FILE
    }

    fn channels_file_name(&self) -> &'static str {
        CHANNELS_FILE
    }

    fn emit_endpoints(&self, bindings: &[Binding]) -> Result<GeneratedFile> {
        let mut contents = artifact_header("Queue bindings for the exchange/queue backend.");
        contents.push_str(&format!("use {};\n\n", CONFIGURATOR_PATH));

        if bindings.is_empty() {
            contents.push_str(&format!(
                "/// Nothing to wire: no resolvable consumers were found.\n\
                 /// Regenerating after consumers are declared replaces this stub.\n\
                 pub fn configure_endpoints(_cfg: &mut {}) {{}}\n",
                CONFIGURATOR
            ));
        } else {
            contents.push_str(&format!(
                "/// Binds every resolved consumer's queue to its exchange.\n\
                 pub fn configure_endpoints(cfg: &mut {}) {{\n",
                CONFIGURATOR
            ));
            let blocks: Vec<String> = bindings.iter().map(Self::endpoint_block).collect();
            contents.push_str(&blocks.join("\n"));
            contents.push_str("}\n");
        }

        Ok(GeneratedFile::new(ENDPOINTS_FILE, contents))
    }

    fn emit_channels(&self, messages: &[&MessageDeclaration]) -> Result<GeneratedFile> {
        let mut contents = artifact_header("Exchange mappings for the exchange/queue backend.");
        contents.push_str(&format!("use {};\n\n", CONFIGURATOR_PATH));

        if messages.is_empty() {
            contents.push_str(&format!(
                "/// Nothing to map: no channel-marked messages were found.\n\
                 pub fn configure_channels(_cfg: &mut {}) {{}}\n",
                CONFIGURATOR
            ));
        } else {
            contents.push_str(&format!(
                "/// Maps every channel-marked message onto its exchange.\n\
                 pub fn configure_channels(cfg: &mut {}) {{\n",
                CONFIGURATOR
            ));
            for message in messages {
                let Some(channel) = message.channel_name.as_deref() else {
                    continue;
                };
                contents.push_str(&format!(
                    "    cfg.message_exchange(\"{}\", \"{}\");\n",
                    message.identity, channel
                ));
            }
            contents.push_str("}\n");
        }

        Ok(GeneratedFile::new(CHANNELS_FILE, contents))
    }

    fn description(&self) -> &'static str {
        "Queue bindings and exchange mappings for the exchange/queue backend"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ResolutionTier;
    use pretty_assertions::assert_eq;

    fn create_binding(consumer: &str, message_type: &str, channel: &str) -> Binding {
        Binding {
            consumer: consumer.to_string(),
            message_type: message_type.to_string(),
            channel_name: channel.to_string(),
            endpoint_name: "account-service-subscription".to_string(),
            tier: ResolutionTier::Inferred,
        }
    }

    #[test]
    fn test_single_binding_endpoint_artifact() {
        let bindings = vec![create_binding(
            "Sample.Consumers.OrderConsumer",
            "Sample.Events.OrderPlacedMessage",
            "order-placed",
        )];

        let file = RabbitMqEmitter::new().emit_endpoints(&bindings).unwrap();
        assert_eq!(file.file_name, "rabbit_mq_endpoints.rs");
        assert_eq!(
            file.contents,
            "// Generated by buswire. Do not edit by hand.\n\
             //\n\
             // Queue bindings for the exchange/queue backend.\n\
             \n\
             use crate::bus::RabbitMqConfigurator;\n\
             \n\
             /// Binds every resolved consumer's queue to its exchange.\n\
             pub fn configure_endpoints(cfg: &mut RabbitMqConfigurator) {\n\
             \x20   // Sample.Consumers.OrderConsumer consumes Sample.Events.OrderPlacedMessage (inferred)\n\
             \x20   cfg.queue_binding(\"order-placed\", \"account-service-subscription\", |queue| {\n\
             \x20       queue.consumer(\"Sample.Consumers.OrderConsumer\");\n\
             \x20   });\n\
             }\n"
        );
    }

    #[test]
    fn test_empty_bindings_produce_no_op_artifact() {
        let file = RabbitMqEmitter::new().emit_endpoints(&[]).unwrap();
        assert!(file
            .contents
            .contains("pub fn configure_endpoints(_cfg: &mut RabbitMqConfigurator) {}"));
    }

    #[test]
    fn test_channel_artifact_maps_messages_to_exchanges() {
        let message = MessageDeclaration {
            identity: "Sample.Events.TestEventOne".to_string(),
            entity_name: Some("test-event-one".to_string()),
            channel_name: Some("test-topic-one".to_string()),
            group: None,
        };
        let messages = vec![&message];

        let file = RabbitMqEmitter::new().emit_channels(&messages).unwrap();
        assert_eq!(file.file_name, "rabbit_mq_channels.rs");
        assert!(file
            .contents
            .contains("cfg.message_exchange(\"Sample.Events.TestEventOne\", \"test-topic-one\");"));
    }

    #[test]
    fn test_empty_channel_artifact_is_no_op() {
        let file = RabbitMqEmitter::new().emit_channels(&[]).unwrap();
        assert!(file
            .contents
            .contains("pub fn configure_channels(_cfg: &mut RabbitMqConfigurator) {}"));
    }

    #[test]
    fn test_same_names_as_service_bus_artifact_vocabulary_differs() {
        let bindings = vec![create_binding(
            "Sample.Consumers.OrderConsumer",
            "Sample.Events.OrderPlacedMessage",
            "order-placed",
        )];

        let file = RabbitMqEmitter::new().emit_endpoints(&bindings).unwrap();
        assert!(file.contents.contains("\"order-placed\""));
        assert!(file.contents.contains("\"account-service-subscription\""));
        assert!(!file.contents.contains("subscription_endpoint"));
    }
}
