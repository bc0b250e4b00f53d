// SPDX-License-Identifier: MIT
// Copyright 2026 NearBuy Developers

//! gpsd-backed location service for headless hosts.
//!
//! Connects to a gpsd endpoint over TCP, issues a JSON `?WATCH`
//! subscription, and forwards TPV reports as location fixes. Delivery is
//! throttled to the configured time interval, and the stream reconnects
//! after a fixed pause when gpsd goes away.
//!
//! A headless host has no interactive permission prompt, so grants are
//! derived from operator configuration: foreground tracking is implied by
//! running the agent, background tracking requires explicit consent.

use crate::error::{AgentError, Result};
use crate::models::LocationFix;
use crate::platform::location::{FixSink, LocationService, UpdateOptions};
use crate::platform::PermissionStatus;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;

const WATCH_COMMAND: &str = "?WATCH={\"enable\":true,\"json\":true};\n";
const RECONNECT_PAUSE: Duration = Duration::from_secs(5);

/// TPV report fields the agent consumes.
#[derive(Debug, Deserialize)]
struct TpvReport {
    class: String,
    lat: Option<f64>,
    lon: Option<f64>,
    time: Option<DateTime<Utc>>,
}

/// Location service reading fixes from a gpsd watch stream.
pub struct GpsdLocationService {
    addr: String,
    allow_background: bool,
    worker: tokio::sync::Mutex<Option<tokio::task::JoinHandle<()>>>,
}

impl GpsdLocationService {
    pub fn new(addr: &str, allow_background: bool) -> Self {
        Self {
            addr: addr.to_string(),
            allow_background,
            worker: tokio::sync::Mutex::new(None),
        }
    }
}

#[async_trait]
impl LocationService for GpsdLocationService {
    async fn foreground_permission(&self) -> PermissionStatus {
        PermissionStatus::Granted
    }

    async fn request_foreground_permission(&self) -> PermissionStatus {
        PermissionStatus::Granted
    }

    async fn background_permission(&self) -> PermissionStatus {
        if self.allow_background {
            PermissionStatus::Granted
        } else {
            PermissionStatus::Denied
        }
    }

    async fn request_background_permission(&self) -> PermissionStatus {
        self.background_permission().await
    }

    async fn has_started(&self) -> bool {
        let guard = self.worker.lock().await;
        guard.as_ref().is_some_and(|h| !h.is_finished())
    }

    async fn start_updates(&self, options: &UpdateOptions, sink: Arc<dyn FixSink>) -> Result<()> {
        let mut guard = self.worker.lock().await;
        if guard.as_ref().is_some_and(|h| !h.is_finished()) {
            return Ok(());
        }

        let addr = self.addr.clone();
        let interval = Duration::from_millis(options.time_interval_ms);
        tracing::info!(
            addr = %addr,
            task = %options.task_name,
            interval_ms = options.time_interval_ms,
            "Starting gpsd watch"
        );

        *guard = Some(tokio::spawn(async move {
            stream_fixes(addr, interval, sink).await;
        }));
        Ok(())
    }

    async fn stop_updates(&self) -> Result<()> {
        let mut guard = self.worker.lock().await;
        if let Some(handle) = guard.take() {
            handle.abort();
            tracing::info!("Stopped gpsd watch");
        }
        Ok(())
    }
}

/// Connect-and-read loop. Runs until the worker task is aborted.
async fn stream_fixes(addr: String, interval: Duration, sink: Arc<dyn FixSink>) {
    let mut last_delivery: Option<Instant> = None;

    loop {
        match TcpStream::connect(&addr).await {
            Ok(mut stream) => {
                tracing::info!(addr = %addr, "Connected to gpsd");
                match stream.write_all(WATCH_COMMAND.as_bytes()).await {
                    Ok(()) => read_reports(stream, interval, &mut last_delivery, &sink).await,
                    Err(e) => {
                        tracing::warn!(error = %e, "Failed to send gpsd watch command");
                    }
                }
            }
            Err(e) => {
                tracing::warn!(addr = %addr, error = %e, "gpsd connection failed");
                sink.on_batch(Err(AgentError::Platform(format!("gpsd connect: {}", e))))
                    .await;
            }
        }

        tokio::time::sleep(RECONNECT_PAUSE).await;
    }
}

/// Read gpsd report lines until the stream ends or errors.
async fn read_reports(
    stream: TcpStream,
    interval: Duration,
    last_delivery: &mut Option<Instant>,
    sink: &Arc<dyn FixSink>,
) {
    let mut lines = BufReader::new(stream).lines();

    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                let Some(fix) = parse_tpv(&line) else {
                    continue;
                };

                // gpsd emits TPV at device rate; honor the configured cadence
                if let Some(last) = last_delivery {
                    if last.elapsed() < interval {
                        continue;
                    }
                }
                *last_delivery = Some(Instant::now());

                sink.on_batch(Ok(vec![fix])).await;
            }
            Ok(None) => {
                tracing::warn!("gpsd stream closed");
                return;
            }
            Err(e) => {
                tracing::warn!(error = %e, "gpsd read error");
                sink.on_batch(Err(AgentError::Platform(format!("gpsd read: {}", e))))
                    .await;
                return;
            }
        }
    }
}

/// Parse a gpsd report line, keeping only TPV records with a position.
fn parse_tpv(line: &str) -> Option<LocationFix> {
    let report: TpvReport = serde_json::from_str(line).ok()?;
    if report.class != "TPV" {
        return None;
    }

    let lat = report.lat?;
    let lon = report.lon?;
    let timestamp_ms = report
        .time
        .map(|t| t.timestamp_millis())
        .unwrap_or_else(|| Utc::now().timestamp_millis());

    Some(LocationFix::new(lat, lon, timestamp_ms))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tpv_report() {
        let line = r#"{"class":"TPV","mode":3,"time":"2026-08-06T10:15:30.000Z","lat":37.402,"lon":-122.114,"alt":12.0}"#;
        let fix = parse_tpv(line).expect("TPV with position should parse");

        assert!((fix.latitude - 37.402).abs() < 1e-9);
        assert!((fix.longitude - (-122.114)).abs() < 1e-9);
        assert_eq!(fix.timestamp_ms, 1_786_011_330_000);
    }

    #[test]
    fn skips_non_tpv_reports() {
        let line = r#"{"class":"SKY","satellites":[]}"#;
        assert!(parse_tpv(line).is_none());
    }

    #[test]
    fn skips_tpv_without_position() {
        // mode 1 = no fix; gpsd omits lat/lon
        let line = r#"{"class":"TPV","mode":1}"#;
        assert!(parse_tpv(line).is_none());
    }

    #[test]
    fn skips_malformed_lines() {
        assert!(parse_tpv("not json").is_none());
        assert!(parse_tpv("").is_none());
    }
}
