//! TruthVerse Connectors
//!
//! Third-party news and fact-check APIs exposed through the pipeline's
//! capability traits.
//!
//! # Connectors
//!
//! - [`NewsApiConnector`]: document fetch for URL-mode verification
//! - [`FactCheckConnector`]: evidence search over published claim reviews
//!
//! Every connector normalizes provider payloads into [`NormalizedItem`],
//! caches responses in a [`ResponseCache`] keyed by a hash of the call
//! parameters, and disables itself through [`ConnectorHealth`] after repeated
//! consecutive failures. A connector without an API key returns nothing.
//!
//! The capability methods are synchronous bridges over async HTTP calls and
//! must run on a runtime's blocking pool, which is how the retriever and the
//! verifier call them.

#![warn(missing_docs)]

pub mod base;
mod config;
mod error;
pub mod factcheck;
pub mod newsapi;

pub use base::{cache_key, ConnectorHealth, NormalizedItem, ResponseCache};
pub use config::{ConnectorConfig, FACTCHECK_BASE_URL, NEWSAPI_BASE_URL};
pub use error::ConnectorError;
pub use factcheck::FactCheckConnector;
pub use newsapi::NewsApiConnector;
