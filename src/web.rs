//! A `did:web` backend.
//!
//! `did:web` identifiers map onto HTTPS URLs:
//! `did:web:example.com` is fetched from `https://example.com/.well-known/did.json`,
//! `did:web:example.com:user:alice` from `https://example.com/user/alice/did.json`.
//! Each segment is percent-decoded, so a port is written as in
//! `did:web:localhost%3A8443`.

use percent_encoding::percent_decode_str;
use reqwest::blocking::Client;
use reqwest::header::CACHE_CONTROL;
use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;
use url::Url;

use crate::error::BoxError;
use crate::method::DidMethod;

/// Errors raised by the `did:web` backend
#[derive(Error, Debug)]
pub enum WebError {
    /// The DID is not a well-formed `did:web` identifier
    #[error("invalid did:web identifier: {0}")]
    InvalidDid(String),

    /// HTTP request error
    #[error("HTTP request error: {0}")]
    Request(#[from] reqwest::Error),

    /// URL parse error
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// The server answered with a non-success status other than 404
    #[error("HTTP {0} when fetching DID document")]
    Status(StatusCode),
}

/// Resolves `did:web` identifiers over HTTPS
#[derive(Debug, Clone, Default)]
pub struct WebMethod {
    client: Client,
}

impl WebMethod {
    /// Creates a backend with a default HTTP client
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend using `client`. Timeouts, proxies and TLS roots are
    /// configured on the client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    fn fetch(&self, url: Url, no_cache: bool) -> Result<Option<Vec<u8>>, WebError> {
        let mut request = self.client.get(url.clone());
        if no_cache {
            request = request.header(CACHE_CONTROL, "no-cache");
        }

        let response = request.send()?;
        let status = response.status();
        tracing::debug!(%url, %status, "fetched did:web document");

        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(WebError::Status(status));
        }

        Ok(Some(response.bytes()?.to_vec()))
    }
}

impl DidMethod for WebMethod {
    fn read(
        &self,
        did: &str,
        version_id: Option<&Value>,
        version_time: &str,
        no_cache: bool,
    ) -> Result<Option<Vec<u8>>, BoxError> {
        let mut url = to_url(did)?;

        if version_id.is_some() || !version_time.is_empty() {
            let mut query = url.query_pairs_mut();
            if let Some(version_id) = version_id {
                match version_id {
                    Value::String(id) => query.append_pair("versionId", id),
                    other => query.append_pair("versionId", &other.to_string()),
                };
            }
            if !version_time.is_empty() {
                query.append_pair("versionTime", version_time);
            }
        }

        Ok(self.fetch(url, no_cache)?)
    }
}

/// Converts a `did:web` identifier to the URL of its DID document
pub fn to_url(did: &str) -> Result<Url, WebError> {
    let invalid = || WebError::InvalidDid(did.to_string());

    let id = did.strip_prefix("did:web:").ok_or_else(invalid)?;
    let mut segments = id.split(':');

    let host = segments.next().filter(|h| !h.is_empty()).ok_or_else(invalid)?;
    let host = decode_segment(host).ok_or_else(invalid)?;
    if host.contains(&['/', '?', '#', '@'][..]) {
        return Err(invalid());
    }

    let path = segments
        .map(|segment| decode_segment(segment).filter(|s| !s.is_empty() && !s.contains('/')))
        .collect::<Option<Vec<_>>>()
        .ok_or_else(invalid)?;

    let mut url = Url::parse(&format!("https://{host}"))?;
    {
        let mut url_path = url.path_segments_mut().map_err(|_| invalid())?;
        url_path.clear();
        if path.is_empty() {
            url_path.push(".well-known");
        } else {
            url_path.extend(&path);
        }
        url_path.push("did.json");
    }

    Ok(url)
}

fn decode_segment(segment: &str) -> Option<String> {
    percent_decode_str(segment).decode_utf8().ok().map(|s| s.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_transformation() {
        let test_cases = vec![
            ("did:web:example.com", "https://example.com/.well-known/did.json"),
            ("did:web:example.com:user:alice", "https://example.com/user/alice/did.json"),
            ("did:web:localhost%3A8443", "https://localhost:8443/.well-known/did.json"),
            ("did:web:localhost%3A8443:path", "https://localhost:8443/path/did.json"),
            ("did:web:localhost%3a8443", "https://localhost:8443/.well-known/did.json"),
            ("did:web:example.com:user%20name", "https://example.com/user%20name/did.json"),
            ("did:web:example.com:caf%C3%A9", "https://example.com/caf%C3%A9/did.json"),
        ];

        for (did, expected_url) in test_cases {
            assert_eq!(to_url(did).unwrap().as_str(), expected_url);
        }
    }

    #[test]
    fn test_invalid_did_format() {
        let invalid_dids = vec![
            "did:tdw:example.com",
            "did:web:",
            "did:web:example.com::alice",
            "did:web:example.com%2Fevil",
            "did:web:example.com:a%2Fb",
            "did:web:example.com:%FF",
            "web:example.com",
        ];

        for did in invalid_dids {
            assert!(matches!(to_url(did), Err(WebError::InvalidDid(_))), "{did}");
        }
    }

    #[test]
    fn test_invalid_host() {
        assert!(matches!(to_url("did:web:exa mple.com"), Err(WebError::Url(_))));
    }

    #[test]
    fn test_invalid_did_is_backend_error() {
        let err = WebMethod::new().read("did:web:", None, "", false).unwrap_err();
        assert!(err.to_string().contains("invalid did:web identifier"));
    }
}
