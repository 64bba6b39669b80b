//! Artifact emitters for each supported backend.

pub mod base;
pub mod rabbit_mq;
pub mod registry;
pub mod service_bus;

pub use base::{artifact_header, Emitter, GENERATED_BANNER};
pub use rabbit_mq::RabbitMqEmitter;
pub use registry::{ConsumerRegistryEmitter, REGISTRY_FILE};
pub use service_bus::ServiceBusEmitter;
