//! Typed Rust client for the SDK server OAuth consent flow.
//!
//! The crate is split into a domain layer of strong types, a transport layer
//! for wire-format details, and a small client layer that drives the
//! "is this scope authorized; if not, get consent" protocol.
//!
//! ```rust,no_run
//! use oauth_consent::{AuthorizationClient, AuthorizationRequest, MemoryLocation, Scope};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = AuthorizationClient::new("https://app.example.com")?;
//!     let location = MemoryLocation::new("https://app.example.com/inbox".parse()?);
//!     let request = AuthorizationRequest::new(Scope::parse("SMS,MIM")?);
//!     let _outcome = client.authorize(&request, &location).await?;
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{
    AuthorizationClient, AuthorizationClientBuilder, AuthorizationError, CONSENT_ERROR_PARAM,
    Location, MemoryLocation,
};
pub use domain::{
    AuthorizationRequest, AuthorizationStatus, AuthorizeOutcome, ConsentUrl, ConsentUrlRequest,
    DEFAULT_RETRY_PARAM, Redirect, RetryCount, ReturnUrl, Scope, ServiceName, ValidationError,
};
