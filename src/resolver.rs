//! Core DID resolution functionality.
//!
//! The [`Resolver`] holds the method registry and dispatches each DID to the
//! backend registered for its method, shaping the returned bytes into the
//! result the caller asked for.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::did::Did;
use crate::error::ResolutionError;
use crate::method::{DidMethod, MethodRegistration};
use crate::options::{ResolveOption, ResolveOptions, ResultType};
use crate::types::DidDocument;

/// Dispatches DIDs to their method backends.
///
/// The registry is fixed at construction, so a `Resolver` can be shared
/// across threads and resolve concurrently.
#[derive(Clone, Default)]
pub struct Resolver {
    /// Backends by method name; `None` when a name was reserved unbound
    methods: HashMap<String, Option<Arc<dyn DidMethod>>>,
}

impl Resolver {
    /// Creates a resolver from method registrations, applied in order.
    /// A later registration for the same name replaces the earlier one.
    ///
    /// # Example
    /// ```
    /// use did_method_resolver::{from_fn, with_method, Resolver};
    ///
    /// let resolver = Resolver::new([
    ///     with_method("example", from_fn(|_, _, _, _| Ok(Some(br#"{"id":"did:example:1"}"#.to_vec())))),
    /// ]);
    /// let doc = resolver.resolve("did:example:1", []).unwrap().unwrap();
    /// assert_eq!(doc["id"], "did:example:1");
    /// ```
    pub fn new<I>(registrations: I) -> Self
    where
        I: IntoIterator<Item = MethodRegistration>,
    {
        let mut methods = HashMap::new();
        for registration in registrations {
            tracing::debug!(method = %registration.name, bound = registration.backend.is_some(), "registering did method");
            methods.insert(registration.name, registration.backend);
        }

        Self { methods }
    }

    /// Whether a backend name is registered for `method`
    pub fn supports(&self, method: &str) -> bool {
        self.methods.contains_key(method)
    }

    /// Registered method names, in no particular order
    pub fn methods(&self) -> impl Iterator<Item = &str> {
        self.methods.keys().map(String::as_str)
    }

    /// Resolves `did` into its DID document.
    ///
    /// Returns `Ok(None)` when the method's backend has no document for the
    /// DID. An error is only returned when resolution itself failed.
    pub fn resolve<I>(&self, did: &str, options: I) -> Result<Option<DidDocument>, ResolutionError>
    where
        I: IntoIterator<Item = ResolveOption>,
    {
        let parsed = Did::parse(did)?;

        let backend = self
            .methods
            .get(parsed.method)
            .ok_or_else(|| ResolutionError::MethodNotSupported(parsed.method.to_string()))?;

        let opts = ResolveOptions::from_directives(options);

        tracing::debug!(did, method = parsed.method, result_type = %opts.result_type, "resolving did");

        let bytes = match self.read(backend.as_deref(), parsed.method, did, &opts)? {
            Some(bytes) => bytes,
            None => {
                tracing::debug!(did, "no document found");
                return Ok(None);
            }
        };

        match opts.result_type {
            ResultType::DidDocument => decode_document(&bytes).map(Some),
            ResultType::ResolutionResult => Err(ResolutionError::UnsupportedResultType(opts.result_type)),
        }
    }

    fn read(
        &self,
        backend: Option<&dyn DidMethod>,
        method: &str,
        did: &str,
        opts: &ResolveOptions,
    ) -> Result<Option<Vec<u8>>, ResolutionError> {
        let result = match backend {
            Some(backend) => backend.read(did, opts.version_id.as_ref(), &opts.version_time, opts.no_cache),
            None => Err(format!("no backend bound to did method {method}").into()),
        };

        match result {
            Ok(Some(bytes)) if !bytes.is_empty() => Ok(Some(bytes)),
            Ok(_) => Ok(None),
            Err(source) => {
                tracing::warn!(did, method, error = %source, "did method read failed");
                Err(ResolutionError::ReadFailed {
                    method: method.to_string(),
                    source,
                })
            }
        }
    }
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("methods", &self.methods.keys().collect::<Vec<_>>())
            .finish()
    }
}

fn decode_document(bytes: &[u8]) -> Result<DidDocument, ResolutionError> {
    match serde_json::from_slice::<Value>(bytes)? {
        Value::Object(document) => Ok(document),
        other => Err(ResolutionError::Decode(serde::de::Error::custom(format!(
            "expected a JSON object, found {}",
            json_kind(&other)
        )))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::BoxError;
    use crate::method::{with_method, without_backend};
    use crate::options::{with_no_cache, with_result_type, with_version_id};

    struct MockMethod {
        read_value: Option<Vec<u8>>,
        read_err: Option<&'static str>,
    }

    impl MockMethod {
        fn value(value: &[u8]) -> Self {
            Self { read_value: Some(value.to_vec()), read_err: None }
        }
    }

    impl DidMethod for MockMethod {
        fn read(&self, _: &str, _: Option<&Value>, _: &str, _: bool) -> Result<Option<Vec<u8>>, BoxError> {
            match self.read_err {
                Some(err) => Err(err.into()),
                None => Ok(self.read_value.clone()),
            }
        }
    }

    #[test]
    fn test_new() {
        let resolver = Resolver::new([without_backend("test")]);
        assert!(resolver.supports("test"));
        assert!(!resolver.supports("Test"));
        assert_eq!(resolver.methods().collect::<Vec<_>>(), vec!["test"]);
    }

    #[test]
    fn test_format_checked_before_lookup() {
        let resolver = Resolver::new([without_backend("example")]);
        let err = resolver.resolve("did:example", []).unwrap_err();
        assert!(matches!(err, ResolutionError::InvalidDidFormat(_)));
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let resolver = Resolver::new([with_method("example", MockMethod::value(b"{}"))]);
        let err = resolver.resolve("did:Example:1234", []).unwrap_err();
        assert!(matches!(err, ResolutionError::MethodNotSupported(ref m) if m == "Example"));
    }

    #[test]
    fn test_empty_bytes_is_not_found() {
        let resolver = Resolver::new([with_method("example", MockMethod::value(b""))]);
        assert!(resolver.resolve("did:example:1234", []).unwrap().is_none());
    }

    #[test]
    fn test_unbound_backend_fails_at_resolution() {
        let resolver = Resolver::new([without_backend("example")]);
        let err = resolver.resolve("did:example:1234", []).unwrap_err();
        assert!(matches!(err, ResolutionError::ReadFailed { ref method, .. } if method == "example"));
        assert!(err.to_string().contains("did method read failed"));
    }

    #[test]
    fn test_non_object_json_is_decode_error() {
        let resolver = Resolver::new([with_method("example", MockMethod::value(b"[1, 2]"))]);
        let err = resolver.resolve("did:example:1234", []).unwrap_err();
        assert!(matches!(err, ResolutionError::Decode(_)));
        assert!(err.to_string().contains("found an array"));
    }

    #[test]
    fn test_malformed_json_is_decode_error() {
        let resolver = Resolver::new([with_method("example", MockMethod::value(b"{\"@context\":"))]);
        let err = resolver.resolve("did:example:1234", []).unwrap_err();
        assert!(matches!(err, ResolutionError::Decode(_)));
    }

    #[test]
    fn test_read_error_wins_over_result_type() {
        let resolver = Resolver::new([with_method(
            "example",
            MockMethod { read_value: None, read_err: Some("read error") },
        )]);
        let err = resolver
            .resolve("did:example:1234", [with_result_type(ResultType::ResolutionResult)])
            .unwrap_err();
        assert!(matches!(err, ResolutionError::ReadFailed { .. }));
    }

    #[test]
    fn test_not_found_wins_over_result_type() {
        let resolver = Resolver::new([with_method("example", MockMethod { read_value: None, read_err: None })]);
        let doc = resolver
            .resolve("did:example:1234", [with_result_type(ResultType::ResolutionResult)])
            .unwrap();
        assert!(doc.is_none());
    }

    #[test]
    fn test_options_reach_backend() {
        let backend = crate::method::from_fn(|_, version_id, version_time, no_cache| {
            let echo = json!({"versionId": version_id, "versionTime": version_time, "noCache": no_cache});
            Ok(Some(serde_json::to_vec(&echo)?))
        });
        let resolver = Resolver::new([with_method("example", backend)]);

        let doc = resolver
            .resolve("did:example:1234", [with_version_id("v1"), with_no_cache(true)])
            .unwrap()
            .unwrap();
        assert_eq!(Value::Object(doc), json!({"versionId": "v1", "versionTime": "", "noCache": true}));
    }
}
