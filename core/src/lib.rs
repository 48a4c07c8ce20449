//! Asynchronous client for the Libpostal address service.
//!
//! # Overview
//! Sends plain-text addresses to a remote Libpostal service and maps its JSON
//! answers into typed values. The client never owns the HTTP transport: the
//! caller hands in a [`Session`] and keeps full control over its lifecycle,
//! pooling, TLS and retry policy.
//!
//! # Design
//! - `LibpostalClient` holds only the validated endpoint and a shared
//!   reference to the session. Every call is one independent GET.
//! - URL composition and body decoding are pure functions, so the I/O
//!   boundary is the single `Session::get` await.
//! - Session errors surface untouched inside `Error::Transport`; nothing is
//!   retried.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod request;
#[cfg(feature = "reqwest")]
pub mod session;
pub mod types;

pub use client::{Endpoint, LibpostalClient};
pub use config::ClientConfig;
pub use error::{ConfigError, Error};
pub use http::{HttpResponse, Session};
pub use types::{Address, AddressComponent, UnknownLabels};
