//! A pluggable resolver for Decentralized Identifiers.
//!
//! A [`Resolver`] maps DID method names (the `web` in `did:web:example.com`)
//! to backends implementing [`DidMethod`]. Resolving a DID validates its
//! shape, dispatches to the backend for its method and parses the returned
//! bytes into a generic [`DidDocument`]. Fetching, caching and proof checking
//! are entirely up to the backends.
//!
//! Both method registrations and per-call options are passed as ordered lists
//! of directives; later directives override earlier ones.
//!
//! # Example
//! ```no_run
//! use did_method_resolver::{with_method, with_no_cache, DocumentExt, Resolver, WebMethod};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let resolver = Resolver::new([with_method("web", WebMethod::new())]);
//!
//!     match resolver.resolve("did:web:example.com", [with_no_cache(true)])? {
//!         Some(doc) => println!("Resolved DID Document: {:?}", doc.id()),
//!         None => println!("No such DID"),
//!     }
//!     Ok(())
//! }
//! ```

mod did;
mod error;
mod method;
mod options;
mod resolver;
mod types;
pub mod web;

pub use did::Did;
pub use error::{BoxError, ResolutionError};
pub use method::{from_fn, with_method, without_backend, DidMethod, FnMethod, MethodRegistration};
pub use options::{
    with_no_cache, with_result_type, with_version_id, with_version_time, ResolveOption, ResolveOptions,
    ResultType,
};
pub use resolver::Resolver;
pub use types::{DidDocument, DocumentExt, Service, VerificationMethod};
pub use web::WebMethod;
