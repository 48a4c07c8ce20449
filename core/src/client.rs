//! Libpostal client over a borrowed HTTP session.
//!
//! # Design
//! `LibpostalClient` holds an immutable `Endpoint` and a shared reference to
//! the caller's `Session`, and carries no mutable state between calls. Each
//! operation builds its URL, awaits exactly one `Session::get`, checks the
//! status and decodes the body. Session errors are returned as
//! `Error::Transport` without inspection, and nothing is retried.

use std::fmt;

use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::config::{ClientConfig, DEFAULT_EXPAND_METHOD, DEFAULT_PARSE_METHOD};
use crate::error::{ConfigError, Error};
use crate::http::{HttpResponse, Session};
use crate::request::{request_url, validate_base_url};
use crate::types::{Address, AddressComponent, UnknownLabels};

/// Validated service location plus the remote method names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    base: Url,
    parse_method: String,
    expand_method: String,
}

impl Endpoint {
    /// Validate `url` and keep it with the two method names, each of which
    /// must name at least one path segment.
    pub fn new(url: &str, parse_method: &str, expand_method: &str) -> Result<Self, ConfigError> {
        let blank = |method: &str| method.split('/').all(str::is_empty);
        if blank(parse_method) || blank(expand_method) {
            return Err(ConfigError::EmptyMethod);
        }
        Ok(Self {
            base: validate_base_url(url)?,
            parse_method: parse_method.to_string(),
            expand_method: expand_method.to_string(),
        })
    }

    /// Base service URL as validated at construction.
    pub fn base(&self) -> &Url {
        &self.base
    }

    pub fn parse_method(&self) -> &str {
        &self.parse_method
    }

    pub fn expand_method(&self) -> &str {
        &self.expand_method
    }
}

/// Client for the Libpostal `parse` and `expand` operations.
///
/// The session is borrowed, never owned: the client does not open, close or
/// reconfigure it, and any number of clients may share one session.
pub struct LibpostalClient<'s, S: ?Sized> {
    endpoint: Endpoint,
    unknown_labels: UnknownLabels,
    session: &'s S,
}

impl<'s, S> LibpostalClient<'s, S>
where
    S: Session + ?Sized,
{
    /// Client with the default `parse` / `expand` method names.
    pub fn new(url: &str, session: &'s S) -> Result<Self, ConfigError> {
        Ok(Self {
            endpoint: Endpoint::new(url, DEFAULT_PARSE_METHOD, DEFAULT_EXPAND_METHOD)?,
            unknown_labels: UnknownLabels::default(),
            session,
        })
    }

    /// Client with method names and label policy taken from `config`.
    pub fn with_config(config: &ClientConfig, session: &'s S) -> Result<Self, ConfigError> {
        Ok(Self {
            endpoint: Endpoint::new(&config.url, &config.parse_method, &config.expand_method)?,
            unknown_labels: config.unknown_labels,
            session,
        })
    }

    /// The validated endpoint this client talks to.
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// URL `parse(address)` would request.
    pub fn parse_url(&self, address: &str) -> Url {
        request_url(&self.endpoint.base, &self.endpoint.parse_method, address)
    }

    /// URL `expand(address)` would request.
    pub fn expand_url(&self, address: &str) -> Url {
        request_url(&self.endpoint.base, &self.endpoint.expand_method, address)
    }

    /// Split a free-text address into labeled components.
    pub async fn parse(&self, address: &str) -> Result<Address, Error<S::Error>> {
        let components: Vec<AddressComponent> = self.fetch(self.parse_url(address)).await?;
        Address::from_components(components, self.unknown_labels).map_err(Error::UnknownLabel)
    }

    /// Normalized variants of a free-text address, in the order the service
    /// returned them.
    pub async fn expand(&self, address: &str) -> Result<Vec<String>, Error<S::Error>> {
        self.fetch(self.expand_url(address)).await
    }

    async fn fetch<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error<S::Error>> {
        debug!(%url, "libpostal request");
        let response = self.session.get(&url).await.map_err(Error::Transport)?;
        debug!(%url, status = response.status, bytes = response.body.len(), "libpostal response");
        check_status(&response)?;
        serde_json::from_str(&response.body).map_err(|e| {
            debug!(%url, error = %e, "libpostal response did not decode");
            Error::Decode(e)
        })
    }
}

/// Map a non-2xx response handed back as `Ok` to `Error::Status`.
fn check_status<E>(response: &HttpResponse) -> Result<(), Error<E>>
where
    E: std::error::Error + 'static,
{
    if (200..300).contains(&response.status) {
        return Ok(());
    }
    Err(Error::Status {
        status: response.status,
        body: response.body.clone(),
    })
}

impl<S: ?Sized> Clone for LibpostalClient<'_, S> {
    fn clone(&self) -> Self {
        Self {
            endpoint: self.endpoint.clone(),
            unknown_labels: self.unknown_labels,
            session: self.session,
        }
    }
}

impl<S: ?Sized> fmt::Debug for LibpostalClient<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LibpostalClient")
            .field("endpoint", &self.endpoint)
            .field("unknown_labels", &self.unknown_labels)
            .finish_non_exhaustive()
    }
}
