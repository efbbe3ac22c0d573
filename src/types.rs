//! Resolved DID documents.
//!
//! A resolved document is kept as a generic JSON object: its shape depends on
//! the DID method and on the DID Core version the method follows. The typed
//! records here are a convenience view on top of it and never replace it.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A resolved DID document as a generic JSON object
pub type DidDocument = Map<String, Value>;

/// A verification method (or legacy public key) in a DID document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationMethod {
    /// The unique identifier for this verification method
    pub id: String,

    /// The type of the verification method
    #[serde(rename = "type")]
    pub method_type: String,

    /// The controller of this verification method
    #[serde(skip_serializing_if = "Option::is_none")]
    pub controller: Option<String>,

    /// Key material and any other members, e.g. `publicKeyJwk`
    #[serde(flatten)]
    pub properties: Map<String, Value>,
}

/// A service endpoint in a DID document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    /// The unique identifier for this service
    pub id: String,

    /// The type of the service
    #[serde(rename = "type")]
    pub service_type: String,

    /// The endpoint URL or object
    #[serde(rename = "serviceEndpoint")]
    pub service_endpoint: Value,

    /// Any other members of the service entry
    #[serde(flatten)]
    pub properties: Map<String, Value>,
}

/// Typed accessors over a [`DidDocument`]
pub trait DocumentExt {
    /// The document's `id`
    fn id(&self) -> Option<&str>;

    /// The `@context` entries, whether given as a string or an array
    fn context(&self) -> Vec<&str>;

    /// Entries of `verificationMethod`, or of the older `publicKey` member.
    /// Malformed entries are skipped.
    fn verification_methods(&self) -> Vec<VerificationMethod>;

    /// Entries of `service`. Malformed entries are skipped.
    fn services(&self) -> Vec<Service>;

    /// The service with the given `id`
    fn service(&self, id: &str) -> Option<Service> {
        self.services().into_iter().find(|s| s.id == id)
    }
}

impl DocumentExt for DidDocument {
    fn id(&self) -> Option<&str> {
        self.get("id").and_then(Value::as_str)
    }

    fn context(&self) -> Vec<&str> {
        match self.get("@context") {
            Some(Value::String(ctx)) => vec![ctx.as_str()],
            Some(Value::Array(ctx)) => ctx.iter().filter_map(Value::as_str).collect(),
            _ => Vec::new(),
        }
    }

    fn verification_methods(&self) -> Vec<VerificationMethod> {
        let entries = self
            .get("verificationMethod")
            .or_else(|| self.get("publicKey"));
        typed_entries(entries)
    }

    fn services(&self) -> Vec<Service> {
        typed_entries(self.get("service"))
    }
}

fn typed_entries<T>(entries: Option<&Value>) -> Vec<T>
where
    T: for<'de> Deserialize<'de>,
{
    match entries {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| T::deserialize(item).ok())
            .collect(),
        _ => Vec::new(),
    }
}
