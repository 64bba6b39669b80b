//! Declaration-graph input model.
//!
//! The host front end walks its own symbol tables and hands the result over
//! as this plain data structure. Nothing in the crate reads live compiler
//! state, so a graph can equally come from a test fixture or a JSON dump.

use serde::{Deserialize, Serialize};

use crate::errors::GeneratorError;

/// Marker carrying the logical channel name of a message type.
pub const MARKER_ENTITY_NAME: &str = "entity_name";
/// Legacy channel marker, kept for older message declarations.
pub const MARKER_CHANNEL: &str = "channel";
/// Marker carrying an explicit channel (and optional endpoint) for a consumer.
pub const MARKER_CONSUMER: &str = "consumer";
/// Marker overriding the endpoint name of a consumer.
pub const MARKER_SUBSCRIPTION: &str = "subscription";

/// A metadata marker attached to a type declaration: a name plus the
/// positional string arguments it was declared with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marker {
    /// Marker name, one of the `MARKER_*` constants for the well-known set
    pub name: String,
    /// Positional arguments in declaration order
    #[serde(default)]
    pub args: Vec<String>,
}

impl Marker {
    pub fn new(name: &str, args: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Positional argument at `index`, if declared.
    pub fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }
}

/// A single type declaration extracted from the host compilation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDeclaration {
    /// Fully qualified, dot-separated type name
    pub identity: String,
    /// Metadata markers present on the declaration
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub markers: Vec<Marker>,
    /// Message types this declaration consumes, one entry per consumption
    /// interface the type implements
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub consumes: Vec<String>,
    /// Identity of the grouping construct the declaration is nested under
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enclosing_group: Option<String>,
}

impl TypeDeclaration {
    pub fn new(identity: &str) -> Self {
        Self {
            identity: identity.to_string(),
            markers: Vec::new(),
            consumes: Vec::new(),
            enclosing_group: None,
        }
    }

    /// Attach a marker to the declaration.
    pub fn with_marker(mut self, name: &str, args: &[&str]) -> Self {
        self.markers.push(Marker::new(name, args));
        self
    }

    /// Record that this declaration consumes `message_type`.
    pub fn with_consumes(mut self, message_type: &str) -> Self {
        self.consumes.push(message_type.to_string());
        self
    }

    /// Nest the declaration under a grouping construct.
    pub fn with_group(mut self, group_identity: &str) -> Self {
        self.enclosing_group = Some(group_identity.to_string());
        self
    }

    /// Last dot-separated segment of the identity.
    pub fn simple_name(&self) -> &str {
        simple_name(&self.identity)
    }

    /// First marker with the given name, if any.
    pub fn first_marker(&self, name: &str) -> Option<&Marker> {
        self.markers.iter().find(|m| m.name == name)
    }

    pub fn has_marker(&self, name: &str) -> bool {
        self.first_marker(name).is_some()
    }
}

/// The declaration graph handed over by the host, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclarationGraph {
    pub types: Vec<TypeDeclaration>,
}

impl DeclarationGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type(mut self, declaration: TypeDeclaration) -> Self {
        self.types.push(declaration);
        self
    }

    /// Deserialize a graph from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, GeneratorError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }
}

/// Last dot-separated segment of a fully qualified name.
pub fn simple_name(identity: &str) -> &str {
    identity.rsplit('.').next().unwrap_or(identity)
}
