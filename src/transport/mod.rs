//! # Transport Seam
//!
//! The dispatch layer talks to the network exclusively through the
//! [`Transport`] trait: one GET-shaped call in, a [`RawResponse`] out. The
//! trait exists so tests can script upstream behavior without sockets; the
//! production implementation is a thin reqwest wrapper.
//!
//! A transport call fails only on network or body-level problems. Non-2xx
//! statuses are not errors here — the dispatch layer classifies them.

use crate::core::config::ClientConfig;
use crate::core::error::{ClientError, ClientResult};
use crate::core::types::RawResponse;
use async_trait::async_trait;
use std::collections::HashMap;

/// Header carrying the API key on authenticated requests
pub const API_KEY_HEADER: &str = "API-Key";

/// The external collaborator performing HTTP GET calls.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform a GET against `base_url` + `path` (or `path` alone when it is
    /// already absolute) with the given query parameters, attaching the API
    /// key header when one is supplied.
    async fn fetch(
        &self,
        base_url: &str,
        path: &str,
        query: &[(String, String)],
        api_key: Option<&str>,
    ) -> ClientResult<RawResponse>;
}

/// Production transport backed by a shared reqwest client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    /// Build a transport from the client configuration.
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ClientError::transport(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { http })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch(
        &self,
        base_url: &str,
        path: &str,
        query: &[(String, String)],
        api_key: Option<&str>,
    ) -> ClientResult<RawResponse> {
        // Lookup helpers point at other hosts with absolute URLs; everything
        // else is relative to the configured endpoint.
        let url = if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{base_url}{path}")
        };

        let mut request = self.http.get(url.as_str()).query(query);
        if let Some(key) = api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ClientError::transport(format!("GET {url} failed: {e}")))?;

        let status = response.status().as_u16();

        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_ascii_lowercase(), v.to_string()))
            })
            .collect();

        let text = response
            .text()
            .await
            .map_err(|e| ClientError::transport(format!("Reading body of {url} failed: {e}")))?;

        // Error statuses sometimes carry empty or non-JSON bodies; those are
        // still classifiable by status alone, so decode failures become null
        // rather than transport errors.
        let body = serde_json::from_str(&text).unwrap_or(serde_json::Value::Null);

        Ok(RawResponse {
            body,
            status,
            headers,
        })
    }
}
