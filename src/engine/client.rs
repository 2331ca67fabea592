//! HTTP client for the hosted query service

use crate::config::EngineConfig;
use crate::engine::types::{Envelope, QueryOutcome};
use crate::engine::QueryEngine;
use crate::{AskpodError, Result};
use tracing::{debug, info};

/// Client for the v2 full-results endpoint.
///
/// Constructed once with an application id and a requested answer format,
/// then shared across query workers. Each call is a single blocking GET;
/// the configured timeout is the only time limit a query inherits.
pub struct WolframClient {
    http: reqwest::blocking::Client,
    config: EngineConfig,
}

impl WolframClient {
    pub fn new(config: EngineConfig) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                AskpodError::ConfigError(format!("Failed to build HTTP client: {}", e))
            })?;

        info!("Query engine client ready: {}", config.base_url);

        Ok(Self { http, config })
    }

    fn endpoint(&self) -> String {
        format!("{}/v2/query", self.config.base_url.trim_end_matches('/'))
    }
}

impl QueryEngine for WolframClient {
    fn query(&self, input: &str) -> Result<QueryOutcome> {
        debug!("Sending query: {:?}", input);

        let response = self
            .http
            .get(self.endpoint())
            .query(&[
                ("appid", self.config.app_id.as_str()),
                ("input", input),
                ("output", "json"),
                ("format", self.config.format.as_str()),
            ])
            .send()
            .map_err(|e| AskpodError::EngineRequestError(e.to_string()))?
            .error_for_status()
            .map_err(|e| AskpodError::EngineRequestError(e.to_string()))?;

        let envelope: Envelope = response
            .json()
            .map_err(|e| AskpodError::EngineResponseError(e.to_string()))?;

        Ok(envelope.queryresult.into_outcome())
    }
}
