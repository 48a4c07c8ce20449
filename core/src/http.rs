//! The session seam between the client and the caller's HTTP stack.
//!
//! # Design
//! The client never opens, configures or closes connections. It only needs
//! "something that can GET a URL and hand back the body", which is what
//! [`Session`] captures. The caller owns the session and lends it to any
//! number of clients.
//!
//! `HttpResponse` uses owned fields so sessions can build it from whatever
//! their transport returns without lifetime concerns.

use async_trait::async_trait;
use url::Url;

/// An HTTP response described as plain data.
///
/// Produced by a `Session` after the exchange completes. The client checks
/// `status` before decoding `body`.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// Capability required from a caller-supplied HTTP session: issue a GET and
/// return the response body.
///
/// Implementations report connection failures and timeouts through
/// `Self::Error`, and may do the same for non-success statuses. The client
/// passes those errors to its caller unchanged and never retries, so any
/// resiliency policy belongs here. A non-2xx `HttpResponse` returned as `Ok`
/// fails the call with `Error::Status`.
#[async_trait]
pub trait Session: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    async fn get(&self, url: &Url) -> Result<HttpResponse, Self::Error>;
}

#[async_trait]
impl<S> Session for std::sync::Arc<S>
where
    S: Session + ?Sized,
{
    type Error = S::Error;

    async fn get(&self, url: &Url) -> Result<HttpResponse, Self::Error> {
        (**self).get(url).await
    }
}
