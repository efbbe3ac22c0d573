//! Error types for DID resolution.
//!
//! Every variant is terminal: the resolver never retries. A backend that
//! finds no document is not an error, see [`crate::Resolver::resolve`].

use thiserror::Error;

use crate::options::ResultType;

/// Boxed error returned by a [`crate::DidMethod`] backend.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while resolving a DID
#[derive(Error, Debug)]
pub enum ResolutionError {
    /// The input is not shaped like `did:<method>:<id>`
    #[error("wrong format did input: {0}")]
    InvalidDidFormat(String),

    /// No backend was registered for the method
    #[error("did method {0} not supported")]
    MethodNotSupported(String),

    /// The method's backend failed to read the document
    #[error("did method read failed for {method}: {source}")]
    ReadFailed {
        method: String,
        #[source]
        source: BoxError,
    },

    /// The backend returned bytes that are not a JSON object
    #[error("failed to decode did document: {0}")]
    Decode(#[from] serde_json::Error),

    /// The requested result shape is not produced
    #[error("result type '{0}' not supported")]
    UnsupportedResultType(ResultType),
}

impl ResolutionError {
    /// The method name carried by the error, when there is one
    pub fn method(&self) -> Option<&str> {
        match self {
            Self::MethodNotSupported(method) | Self::ReadFailed { method, .. } => Some(method),
            _ => None,
        }
    }
}
