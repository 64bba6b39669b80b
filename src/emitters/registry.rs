//! Backend-neutral consumer registry emitter.
//!
//! Every discovered consumer is registered with the bus once, regardless of
//! which backend carries its messages.

use anyhow::Result;

use crate::emitters::base::artifact_header;
use crate::types::GeneratedFile;

/// Logical file name of the registry artifact.
pub const REGISTRY_FILE: &str = "consumer_registry.rs";

const REGISTRY: &str = "ConsumerRegistry";
const REGISTRY_PATH: &str = "crate::bus::ConsumerRegistry";

/// Emits the shared consumer registration artifact.
pub struct ConsumerRegistryEmitter;

impl ConsumerRegistryEmitter {
    /// Render the registration artifact for the given consumer identities,
    /// already deduplicated and ordered by the caller.
    pub fn emit(consumers: &[&str]) -> Result<GeneratedFile> {
        let mut contents = artifact_header("Consumer registrations shared by every backend.");
        contents.push_str(&format!("use {};\n\n", REGISTRY_PATH));

        if consumers.is_empty() {
            contents.push_str(&format!(
                "/// Nothing to register: no consumers were found.\n\
                 pub fn register_consumers(_registry: &mut {}) {{}}\n",
                REGISTRY
            ));
        } else {
            contents.push_str(&format!(
                "/// Adds every discovered consumer to the bus registry.\n\
                 pub fn register_consumers(registry: &mut {}) {{\n",
                REGISTRY
            ));
            for consumer in consumers {
                contents.push_str(&format!("    registry.add_consumer(\"{}\");\n", consumer));
            }
            contents.push_str("}\n");
        }

        Ok(GeneratedFile::new(REGISTRY_FILE, contents))
    }
}
