//! # SideShift API Client
//!
//! Async client for the [SideShift.ai](https://sideshift.ai) v2 REST API.
//!
//! Features:
//!
//! - Typed request and response payloads with decimal amounts.
//! - Affiliate authentication: secret and commission headers, affiliate id
//!   injection into queries and bodies.
//! - Resilient request layer: per-attempt timeouts, error classification and
//!   capped exponential backoff with jitter for idempotent calls.
//! - Structured tracing of every request, with sensitive headers redacted.
//!
//! ## Example
//!
//! ```rust,no_run
//! use sideshift_api_client::SideShiftClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = SideShiftClient::new("account-secret", "affiliate-id")?;
//!     let pair = client.get_pair("btc-mainnet", "eth-ethereum", None).await?;
//!     println!("1 BTC = {} ETH", pair.rate);
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod http;
pub mod types;
mod validate;

pub use client::{SideShiftClient, SideShiftClientBuilder};
pub use config::RequestConfig;
pub use error::{HttpFailure, SideShiftError};

/// Convenience alias for results returned by this crate.
pub type Result<T> = std::result::Result<T, SideShiftError>;
