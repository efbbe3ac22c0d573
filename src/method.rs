//! DID method backends and their registration.

use std::sync::Arc;

use serde_json::Value;

use crate::error::BoxError;

/// A resolution backend for one DID method.
///
/// The backend owns everything about its method: network or ledger access,
/// caching, version selection and retries. `no_cache` is advisory.
///
/// Returning `Ok(None)`, or `Ok(Some(_))` with no bytes, means the DID has no
/// document. That is a successful outcome, not an error.
pub trait DidMethod: Send + Sync {
    /// Fetches the raw document bytes for `did`
    fn read(
        &self,
        did: &str,
        version_id: Option<&Value>,
        version_time: &str,
        no_cache: bool,
    ) -> Result<Option<Vec<u8>>, BoxError>;
}

/// A backend built from a closure, see [`from_fn`]
#[derive(Clone)]
pub struct FnMethod<F>(F);

/// Wraps a closure of the [`DidMethod::read`] shape as a backend
pub fn from_fn<F>(f: F) -> FnMethod<F>
where
    F: Fn(&str, Option<&Value>, &str, bool) -> Result<Option<Vec<u8>>, BoxError> + Send + Sync,
{
    FnMethod(f)
}

impl<F> DidMethod for FnMethod<F>
where
    F: Fn(&str, Option<&Value>, &str, bool) -> Result<Option<Vec<u8>>, BoxError> + Send + Sync,
{
    fn read(
        &self,
        did: &str,
        version_id: Option<&Value>,
        version_time: &str,
        no_cache: bool,
    ) -> Result<Option<Vec<u8>>, BoxError> {
        (self.0)(did, version_id, version_time, no_cache)
    }
}

impl<T: DidMethod + ?Sized> DidMethod for Arc<T> {
    fn read(
        &self,
        did: &str,
        version_id: Option<&Value>,
        version_time: &str,
        no_cache: bool,
    ) -> Result<Option<Vec<u8>>, BoxError> {
        (**self).read(did, version_id, version_time, no_cache)
    }
}

impl<T: DidMethod + ?Sized> DidMethod for Box<T> {
    fn read(
        &self,
        did: &str,
        version_id: Option<&Value>,
        version_time: &str,
        no_cache: bool,
    ) -> Result<Option<Vec<u8>>, BoxError> {
        (**self).read(did, version_id, version_time, no_cache)
    }
}

/// An instruction to register a backend under a method name
pub struct MethodRegistration {
    pub(crate) name: String,
    pub(crate) backend: Option<Arc<dyn DidMethod>>,
}

impl MethodRegistration {
    /// The method name this registration targets
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Debug for MethodRegistration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MethodRegistration")
            .field("name", &self.name)
            .field("bound", &self.backend.is_some())
            .finish()
    }
}

/// Registers `backend` for DIDs of method `name`
pub fn with_method(name: impl Into<String>, backend: impl DidMethod + 'static) -> MethodRegistration {
    MethodRegistration {
        name: name.into(),
        backend: Some(Arc::new(backend)),
    }
}

/// Reserves `name` without a backend.
///
/// The registration is accepted as is; resolving a DID of this method fails
/// with a read error naming the method.
pub fn without_backend(name: impl Into<String>) -> MethodRegistration {
    MethodRegistration {
        name: name.into(),
        backend: None,
    }
}
