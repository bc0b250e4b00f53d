// SPDX-License-Identifier: MIT
// Copyright 2026 NearBuy Developers

//! Agent configuration loaded from environment variables.
//!
//! The reporting cadence and the de-duplication window have varied across
//! releases, so both are tunables with conservative defaults rather than
//! hard-coded contract.

use std::env;
use std::path::PathBuf;

/// Name under which the background location task is registered.
pub const LOCATION_TASK_NAME: &str = "background-location-task";

/// Persistent foreground-service notice shown while tracking runs.
pub const TRACKING_NOTICE_TITLE: &str = "NearBuy is running";
pub const TRACKING_NOTICE_BODY: &str = "Tracking your location for geo alerts";
pub const TRACKING_NOTICE_COLOR: &str = "#007AFF";

/// Android-style default notification channel id.
pub const DEFAULT_CHANNEL_ID: &str = "default";

/// Default minimum time between location reports (2 minutes).
pub const DEFAULT_REPORT_INTERVAL_MS: u64 = 120_000;

/// Default minimum gap between accepted fixes (5 seconds).
pub const DEFAULT_DEDUP_WINDOW_MS: i64 = 5_000;

/// Agent configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Environment Variables (non-sensitive) ---
    /// Base URL of the NearBuy backend
    pub api_base_url: String,
    /// Address of the gpsd endpoint supplying location fixes
    pub gpsd_addr: String,
    /// Path of the sealed credential store file
    pub store_path: PathBuf,
    /// Whether the operator consented to background tracking
    pub allow_background: bool,
    /// Minimum time between location reports (ms)
    pub report_interval_ms: u64,
    /// Minimum gap between accepted fixes (ms)
    pub dedup_window_ms: i64,

    // --- Secrets ---
    /// Secret the credential-store sealing key is derived from
    pub store_secret: String,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000".to_string(),
            gpsd_addr: "127.0.0.1:2947".to_string(),
            store_path: PathBuf::from("nearbuy-agent.cred"),
            allow_background: true,
            report_interval_ms: DEFAULT_REPORT_INTERVAL_MS,
            dedup_window_ms: DEFAULT_DEDUP_WINDOW_MS,
            store_secret: "test_store_secret_32_bytes_min!!".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            api_base_url: env::var("NEARBUY_API_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| "http://localhost:8000".to_string()),
            gpsd_addr: env::var("GPSD_ADDR").unwrap_or_else(|_| "127.0.0.1:2947".to_string()),
            store_path: env::var("NEARBUY_STORE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("nearbuy-agent.cred")),
            allow_background: env::var("NEARBUY_ALLOW_BACKGROUND")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
            report_interval_ms: env::var("NEARBUY_REPORT_INTERVAL_MS")
                .unwrap_or_else(|_| DEFAULT_REPORT_INTERVAL_MS.to_string())
                .parse()
                .unwrap_or(DEFAULT_REPORT_INTERVAL_MS),
            dedup_window_ms: env::var("NEARBUY_DEDUP_WINDOW_MS")
                .unwrap_or_else(|_| DEFAULT_DEDUP_WINDOW_MS.to_string())
                .parse()
                .unwrap_or(DEFAULT_DEDUP_WINDOW_MS),

            // Secrets - from env for local dev
            store_secret: env::var("NEARBUY_STORE_KEY")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("NEARBUY_STORE_KEY"))?,
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
