// SPDX-License-Identifier: MIT
// Copyright 2026 NearBuy Developers

//! NearBuy backend API client.
//!
//! Handles:
//! - Location update submission (returns geo alerts to surface)
//! - Device push token registration
//!
//! Authentication is an opaque access token sent in the `token` header;
//! the client never inspects it. No retry or backoff: the next
//! platform-scheduled invocation is the retry mechanism.

use crate::error::{AgentError, Result};
use crate::models::GeoAlert;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Location report submitted to the backend.
#[derive(Debug, Clone, Serialize)]
pub struct LocationUpdate {
    pub user_id: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Submission time (not the fix capture time)
    pub timestamp: DateTime<Utc>,
}

/// Response from the location-update endpoint.
#[derive(Debug, Deserialize)]
struct LocationUpdateResponse {
    #[serde(default)]
    alerts: Vec<GeoAlert>,
}

/// Device push token registration body.
#[derive(Debug, Serialize)]
struct DeviceTokenRequest<'a> {
    expo_push_token: &'a str,
}

/// Backend operations the pipeline depends on.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Submit a location report; returns any geo alerts to surface.
    async fn post_location_update(
        &self,
        access_token: &str,
        update: &LocationUpdate,
    ) -> Result<Vec<GeoAlert>>;

    /// Register a device push token (idempotent upsert server-side).
    async fn register_device_token(&self, access_token: &str, push_token: &str) -> Result<()>;
}

/// HTTP client for the NearBuy backend.
#[derive(Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// POST a JSON body with the `token` auth header.
    async fn post_json<B: Serialize>(
        &self,
        endpoint: &str,
        access_token: &str,
        body: &B,
    ) -> Result<reqwest::Response> {
        let url = format!("{}{}", self.base_url, endpoint);
        self.http
            .post(&url)
            .header("token", access_token)
            .json(body)
            .send()
            .await
            .map_err(|e| AgentError::Api(e.to_string()))
    }

    /// Check response status and parse the JSON body.
    async fn check_response_json<T: for<'de> Deserialize<'de>>(
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AgentError::Api(format!("HTTP {}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| AgentError::Api(format!("JSON parse error: {}", e)))
    }
}

#[async_trait]
impl Backend for BackendClient {
    async fn post_location_update(
        &self,
        access_token: &str,
        update: &LocationUpdate,
    ) -> Result<Vec<GeoAlert>> {
        let response = self
            .post_json("/location_update", access_token, update)
            .await?;
        let parsed: LocationUpdateResponse = Self::check_response_json(response).await?;
        Ok(parsed.alerts)
    }

    async fn register_device_token(&self, access_token: &str, push_token: &str) -> Result<()> {
        let response = self
            .post_json(
                "/device_token",
                access_token,
                &DeviceTokenRequest {
                    expo_push_token: push_token,
                },
            )
            .await?;

        // No significant response body on this endpoint
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AgentError::Api(format!("HTTP {}: {}", status, body)));
        }
        Ok(())
    }
}
