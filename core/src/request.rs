//! Request URL composition.
//!
//! The service exposes one path per method and takes the address as a query
//! parameter: `<base>/<method>?address=<text>`. The address is encoded with
//! only the RFC 3986 unreserved characters left as-is, so a space becomes
//! `%20` and non-ASCII text is sent as percent-encoded UTF-8.

use url::Url;

use crate::error::ConfigError;

/// Parse and check a base service URL: it must be `http` or `https`. The
/// `url` parser already refuses special-scheme URLs without a host.
pub fn validate_base_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw)?;
    match url.scheme() {
        "http" | "https" => {}
        other => return Err(ConfigError::UnsupportedScheme(other.to_string())),
    }
    Ok(url)
}

/// Build the request URL for `method` and `address` on top of `base`.
///
/// `base` must come from `validate_base_url`; http(s) URLs always have a
/// path that segments can be appended to. A method containing `/` adds one
/// segment per non-empty piece.
pub fn request_url(base: &Url, method: &str, address: &str) -> Url {
    let mut url = base.clone();
    url.set_fragment(None);
    if let Ok(mut segments) = url.path_segments_mut() {
        segments
            .pop_if_empty()
            .extend(method.split('/').filter(|s| !s.is_empty()));
    }
    let query = format!("address={}", urlencoding::encode(address));
    url.set_query(Some(&query));
    url
}
