//! DID parsing.
//!
//! Only the minimal lexical shape `did:<method>:<method-specific-id>` is
//! checked here. Everything past the method name belongs to the method.

use std::fmt;

use crate::error::ResolutionError;

/// A DID split into its method and method-specific identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Did<'a> {
    /// The method name, e.g. `web` or `sov`
    pub method: &'a str,
    /// Everything after the second colon, colons included
    pub method_specific_id: &'a str,
}

impl<'a> Did<'a> {
    /// Parses and validates a DID string
    pub fn parse(did: &'a str) -> Result<Self, ResolutionError> {
        let mut parts = did.splitn(3, ':');

        // the id may hold further colons but needs one non-empty segment
        match (parts.next(), parts.next(), parts.next()) {
            (Some("did"), Some(method), Some(id)) if !method.is_empty() && !id.split(':').all(str::is_empty) => {
                Ok(Self {
                    method,
                    method_specific_id: id,
                })
            }
            _ => Err(ResolutionError::InvalidDidFormat(did.to_string())),
        }
    }
}

impl fmt::Display for Did<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "did:{}:{}", self.method, self.method_specific_id)
    }
}
