//! Per-call resolution options.
//!
//! Options are assembled from an ordered list of [`ResolveOption`] directives
//! applied on top of [`ResolveOptions::default`]. Each directive sets one
//! field; a later directive for the same field wins.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, TimeZone};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Shape of a successful resolution
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResultType {
    /// The parsed DID document, unwrapped
    #[default]
    DidDocument,
    /// The document wrapped with resolution metadata. Accepted as an
    /// option value but not produced yet.
    ResolutionResult,
}

impl ResultType {
    /// The hyphenated option value
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DidDocument => "did-document",
            Self::ResolutionResult => "resolution-result",
        }
    }
}

impl fmt::Display for ResultType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResultType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "did-document" => Ok(Self::DidDocument),
            "resolution-result" => Ok(Self::ResolutionResult),
            other => Err(format!("unknown result type '{other}'")),
        }
    }
}

/// Options for a single resolution
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResolveOptions {
    /// Requested result shape
    #[serde(rename = "accept")]
    pub result_type: ResultType,

    /// Method-defined identity of a document version, passed through as is
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_id: Option<Value>,

    /// Point in time to resolve at, RFC 3339; empty when unset
    #[serde(skip_serializing_if = "String::is_empty")]
    pub version_time: String,

    /// Asks the backend to bypass any cache it keeps
    pub no_cache: bool,
}

impl ResolveOptions {
    /// Applies `directives` in order on top of the defaults
    pub fn from_directives<I>(directives: I) -> Self
    where
        I: IntoIterator<Item = ResolveOption>,
    {
        directives.into_iter().fold(Self::default(), |mut opts, directive| {
            directive.apply(&mut opts);
            opts
        })
    }
}

/// A single resolution directive
#[derive(Debug, Clone, PartialEq)]
pub enum ResolveOption {
    ResultType(ResultType),
    VersionId(Value),
    /// Already normalized to RFC 3339
    VersionTime(String),
    NoCache(bool),
}

impl ResolveOption {
    /// Sets the field this directive targets
    pub fn apply(self, opts: &mut ResolveOptions) {
        match self {
            Self::ResultType(result_type) => opts.result_type = result_type,
            Self::VersionId(version_id) => opts.version_id = Some(version_id),
            Self::VersionTime(version_time) => opts.version_time = version_time,
            Self::NoCache(no_cache) => opts.no_cache = no_cache,
        }
    }
}

/// Selects the result shape
pub fn with_result_type(result_type: ResultType) -> ResolveOption {
    ResolveOption::ResultType(result_type)
}

/// Requests a specific document version
pub fn with_version_id(version_id: impl Into<Value>) -> ResolveOption {
    ResolveOption::VersionId(version_id.into())
}

/// Requests the document as of `time`, rendered as RFC 3339 to the second
pub fn with_version_time<Tz>(time: DateTime<Tz>) -> ResolveOption
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    ResolveOption::VersionTime(time.to_rfc3339_opts(SecondsFormat::Secs, true))
}

/// Asks the backend to skip its cache
pub fn with_no_cache(no_cache: bool) -> ResolveOption {
    ResolveOption::NoCache(no_cache)
}
