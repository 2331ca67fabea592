//! Query engine boundary
//!
//! This module provides:
//! - The response data model for the computational knowledge service
//! - The `QueryEngine` trait that the rest of the app talks to
//! - An HTTP client implementation for the hosted service

pub mod client;
pub mod types;

pub use client::WolframClient;
pub use types::{ContentElement, ErrorField, Pod, QueryOutcome, QueryResult, Subpod};

use crate::Result;

/// A blocking client for the external query service.
///
/// `query` performs one full question/answer round trip and must be called
/// off the UI thread. Implementations decide nothing about validity of the
/// input; empty strings are forwarded as-is.
pub trait QueryEngine: Send + Sync {
    fn query(&self, input: &str) -> Result<QueryOutcome>;
}
