//! Parse and expand against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives `LibpostalClient`
//! through a real HTTP session backed by ureq. The session runs ureq on the
//! blocking pool and counts its calls, so the tests can check both the
//! decoded values and that every call is exactly one request.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use postal_client::{ClientConfig, Error, HttpResponse, LibpostalClient, Session, UnknownLabels};
use url::Url;

#[derive(Debug, thiserror::Error)]
enum UreqError {
    #[error(transparent)]
    Http(#[from] ureq::Error),
    #[error("blocking task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Caller-owned session backed by a ureq agent.
struct UreqSession {
    agent: ureq::Agent,
    calls: AtomicUsize,
}

impl UreqSession {
    fn new() -> Self {
        Self::with_status_errors(true)
    }

    /// `false` hands 4xx/5xx back as data, leaving the status check to the
    /// client.
    fn with_status_errors(enabled: bool) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(enabled)
            .build()
            .new_agent();
        Self {
            agent,
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Session for UreqSession {
    type Error = UreqError;

    async fn get(&self, url: &Url) -> Result<HttpResponse, UreqError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let agent = self.agent.clone();
        let url = url.to_string();
        let response = tokio::task::spawn_blocking(move || -> Result<HttpResponse, ureq::Error> {
            let mut response = agent.get(&url).call()?;
            let status = response.status().as_u16();
            let body = response.body_mut().read_to_string()?;
            Ok(HttpResponse {
                status,
                headers: Vec::new(),
                body,
            })
        })
        .await??;
        Ok(response)
    }
}

/// Start the mock server on a random port and return its base URL.
fn start_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

#[tokio::test]
async fn parse_over_http() {
    let base = start_server();
    let session = UreqSession::new();
    let client = LibpostalClient::new(&base, &session).unwrap();

    let address = client.parse("10 Downing St").await.unwrap();
    assert_eq!(address.house_number.as_deref(), Some("10"));
    assert_eq!(address.road.as_deref(), Some("downing st"));
    assert!(address.city.is_none());
    assert_eq!(session.calls(), 1);

    let address = client.parse("221 Baker Street, London").await.unwrap();
    assert_eq!(address.house_number.as_deref(), Some("221"));
    assert_eq!(address.road.as_deref(), Some("baker street"));
    assert_eq!(address.city.as_deref(), Some("london"));
    assert_eq!(session.calls(), 2);
}

#[tokio::test]
async fn non_ascii_address_survives_the_wire() {
    let base = start_server();
    let session = UreqSession::new();
    let client = LibpostalClient::new(&base, &session).unwrap();

    let address = client.parse("5 Straße, München").await.unwrap();
    assert_eq!(address.road.as_deref(), Some("straße"));
    assert_eq!(address.city.as_deref(), Some("münchen"));
}

#[tokio::test]
async fn expand_over_http() {
    let base = start_server();
    let session = UreqSession::new();
    let client = LibpostalClient::new(&base, &session).unwrap();

    let expansions = client.expand("123 Main St").await.unwrap();
    assert_eq!(expansions, vec!["123 main street", "123 main st"]);
    assert_eq!(session.calls(), 1);
}

#[tokio::test]
async fn not_found_status_is_a_transport_error() {
    let base = start_server();
    let session = UreqSession::new();
    let config = ClientConfig::new(&base).parse_method("normalize");
    let client = LibpostalClient::with_config(&config, &session).unwrap();

    let err = client.parse("10 Downing St").await.unwrap_err();
    assert!(
        matches!(err, Error::Transport(UreqError::Http(ureq::Error::StatusCode(404)))),
        "{err:?}"
    );
    assert_eq!(session.calls(), 1);
}

#[tokio::test]
async fn status_passed_through_as_data_is_still_an_error() {
    let base = start_server();
    let session = UreqSession::with_status_errors(false);
    let config = ClientConfig::new(&base).expand_method("normalize");
    let client = LibpostalClient::with_config(&config, &session).unwrap();

    let err = client.expand("123 Main St").await.unwrap_err();
    assert!(matches!(err, Error::Status { status: 404, .. }), "{err:?}");
    assert_eq!(session.calls(), 1);

    let client = LibpostalClient::new(&base, &session).unwrap();
    let expansions = client.expand("123 Main St").await.unwrap();
    assert_eq!(expansions, vec!["123 main street", "123 main st"]);
}

#[tokio::test]
async fn connection_refused_is_not_retried() {
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let session = UreqSession::new();
    let client = LibpostalClient::new(&format!("http://{addr}"), &session).unwrap();

    let err = client.expand("123 Main St").await.unwrap_err();
    assert!(matches!(err, Error::Transport(UreqError::Http(_))), "{err:?}");
    assert_eq!(session.calls(), 1);
}

#[tokio::test]
async fn reject_policy_passes_known_labels() {
    let base = start_server();
    let session = UreqSession::new();
    let config = ClientConfig::new(&base).unknown_labels(UnknownLabels::Reject);
    let client = LibpostalClient::with_config(&config, &session).unwrap();

    let address = client.parse("1 Rue de Rivoli, Paris").await.unwrap();
    assert_eq!(address.city.as_deref(), Some("paris"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_calls_share_one_session() {
    let base = start_server();
    let session = std::sync::Arc::new(UreqSession::new());

    let mut handles = Vec::new();
    for n in 1..=8 {
        let base = base.clone();
        let session = session.clone();
        handles.push(tokio::spawn(async move {
            let client = LibpostalClient::new(&base, &session).unwrap();
            client.parse(&format!("{n} Main St")).await.unwrap()
        }));
    }

    for (n, handle) in (1..=8).zip(handles) {
        let address = handle.await.unwrap();
        assert_eq!(address.house_number, Some(n.to_string()));
    }
    assert_eq!(session.calls(), 8);
}
