//! Topic/subscription artifact emitter, Azure Service Bus shape.
//!
//! Each binding becomes one named subscription endpoint on the channel's
//! topic, with consume-topology configuration disabled so the generated
//! wiring stays the single source of truth for subscriptions.

use anyhow::Result;

use crate::emitters::base::{artifact_header, Emitter};
use crate::types::{BackendKind, Binding, GeneratedFile, MessageDeclaration};

const ENDPOINTS_FILE: &str = "service_bus_endpoints.rs";
const CHANNELS_FILE: &str = "service_bus_channels.rs";
const CONFIGURATOR: &str = "ServiceBusConfigurator";
const CONFIGURATOR_PATH: &str = "crate::bus::ServiceBusConfigurator";

/// Emits subscription-endpoint and topic wiring.
#[derive(Debug, Default)]
pub struct ServiceBusEmitter;

impl ServiceBusEmitter {
    pub fn new() -> Self {
        Self
    }

    fn endpoint_block(binding: &Binding) -> String {
        format!(
            "    // {} consumes {} ({})\n    \
             cfg.subscription_endpoint(\"{}\", \"{}\", |sub| {{\n        \
             sub.configure_consume_topology(false);\n        \
             sub.consumer(\"{}\");\n    \
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

impl Emitter for ServiceBusEmitter {
    fn name(&self) -> &'static str {
        "service_bus"
    }

    fn backend(&self) -> BackendKind {
        BackendKind::ServiceBus
    }

    fn endpoints_file_name(&self) -> &'static str {
        ENDPOINTS_FILE
    }

    fn channels_file_name(&self) -> &'static str {
        CHANNELS_FILE
    }

    fn emit_endpoints(&self, bindings: &[Binding]) -> Result<GeneratedFile> {
        let mut contents =
            artifact_header("Subscription endpoints for the topic/subscription backend.");
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
                "/// Wires every resolved consumer into its subscription endpoint.\n\
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
        let mut contents = artifact_header("Topic declarations for the topic/subscription backend.");
        contents.push_str(&format!("use {};\n\n", CONFIGURATOR_PATH));

        if messages.is_empty() {
            contents.push_str(&format!(
                "/// Nothing to declare: no channel-marked messages were found.\n\
                 pub fn configure_channels(_cfg: &mut {}) {{}}\n",
                CONFIGURATOR
            ));
        } else {
            contents.push_str(&format!(
                "/// Declares a topic for every channel-marked message.\n\
                 pub fn configure_channels(cfg: &mut {}) {{\n",
                CONFIGURATOR
            ));
            for message in messages {
                let Some(channel) = message.channel_name.as_deref() else {
                    continue;
                };
                contents.push_str(&format!(
                    "    // {}\n    cfg.topic(\"{}\");\n",
                    message.identity, channel
                ));
            }
            contents.push_str("}\n");
        }

        Ok(GeneratedFile::new(CHANNELS_FILE, contents))
    }

    fn description(&self) -> &'static str {
        "Subscription endpoints and topics for the topic/subscription backend"
    }
}
