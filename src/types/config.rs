//! Generator configuration.

use serde::{Deserialize, Serialize};

use crate::errors::GeneratorError;
use crate::{DEFAULT_ENDPOINT_SUFFIX, DEFAULT_SERVICE_NAME};

/// Configuration for a generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Logical name of the service consuming the generated wiring
    pub service_name: String,

    /// Suffix appended to the service name for default endpoint names
    pub endpoint_suffix: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            endpoint_suffix: DEFAULT_ENDPOINT_SUFFIX.to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Create a config for the given service name.
    pub fn new(service_name: &str) -> Self {
        Self {
            service_name: service_name.to_string(),
            ..Default::default()
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            service_name: std::env::var("BUSWIRE_SERVICE_NAME")
                .unwrap_or_else(|_| DEFAULT_SERVICE_NAME.to_string()),
            endpoint_suffix: std::env::var("BUSWIRE_ENDPOINT_SUFFIX")
                .unwrap_or_else(|_| DEFAULT_ENDPOINT_SUFFIX.to_string()),
        }
    }

    /// Set the endpoint suffix.
    pub fn with_endpoint_suffix(mut self, suffix: &str) -> Self {
        self.endpoint_suffix = suffix.to_string();
        self
    }

    /// Default endpoint name applied when no marker names one:
    /// `{service_name}-{endpoint_suffix}`.
    pub fn default_endpoint_name(&self) -> String {
        format!("{}-{}", self.service_name, self.endpoint_suffix)
    }

    /// Reject configurations that would produce unusable endpoint names.
    pub fn validate(&self) -> Result<(), GeneratorError> {
        if self.service_name.trim().is_empty() {
            return Err(GeneratorError::BlankServiceName);
        }
        Ok(())
    }
}
