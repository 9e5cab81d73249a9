// Network capture - per-test recording of backend API calls
//
// The driver surfaces network traffic through route interception, so the
// monitor rides a catch-all route: every request is observed (feeding the
// idle clock), requests whose URL contains the API host substring are
// recorded in observation order, and the request is then continued
// unmodified. Bodies are never read.

use crate::error::{Error, Result};
use parking_lot::Mutex;
use playwright_rs::Page;
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// How long the network must stay quiet before it counts as idle.
///
/// Matches the driver's own `networkidle` definition: no connections for
/// 500ms.
pub const NETWORK_QUIET_WINDOW: Duration = Duration::from_millis(500);

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// One backend API call observed during a test.
///
/// Method, URL, and resource type are captured verbatim from the driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapturedRequest {
    pub url: String,
    pub method: String,
    pub resource_type: String,
}

/// Per-page request recorder and network-activity clock.
///
/// The recorded sequence is append-only for the lifetime of the page it is
/// attached to and ordered by when each request was observed, not by when
/// it completed.
pub struct NetworkMonitor {
    api_host: String,
    calls: Mutex<Vec<CapturedRequest>>,
    last_activity: Mutex<Instant>,
}

impl NetworkMonitor {
    fn new(api_host: &str) -> Arc<Self> {
        Arc::new(Self {
            api_host: api_host.to_string(),
            calls: Mutex::new(Vec::new()),
            last_activity: Mutex::new(Instant::now()),
        })
    }

    /// Installs a monitor on `page`, recording requests whose URL contains
    /// `api_host`.
    ///
    /// Must be attached before the first navigation or the initial burst of
    /// app requests is missed.
    pub async fn attach(page: &Page, api_host: &str) -> Result<Arc<Self>> {
        let monitor = Self::new(api_host);
        let observer = Arc::clone(&monitor);
        page.route("**/*", move |route| {
            let observer = Arc::clone(&observer);
            async move {
                let request = route.request();
                observer.observe(request.url(), request.method(), request.resource_type());
                route.continue_(None).await
            }
        })
        .await?;
        Ok(monitor)
    }

    fn observe(&self, url: &str, method: &str, resource_type: &str) {
        *self.last_activity.lock() = Instant::now();
        if url.contains(&self.api_host) {
            debug!(url, method, resource_type, "api call observed");
            self.calls.lock().push(CapturedRequest {
                url: url.to_string(),
                method: method.to_string(),
                resource_type: resource_type.to_string(),
            });
        }
    }

    /// All recorded API calls, oldest first.
    pub fn api_calls(&self) -> Vec<CapturedRequest> {
        self.calls.lock().clone()
    }

    /// Recorded API calls whose URL contains `needle`.
    pub fn calls_matching(&self, needle: &str) -> Vec<CapturedRequest> {
        self.calls
            .lock()
            .iter()
            .filter(|call| call.url.contains(needle))
            .cloned()
            .collect()
    }

    pub(crate) fn idle_for(&self) -> Duration {
        self.last_activity.lock().elapsed()
    }

    /// Waits until no request has been observed for `quiet`, erroring once
    /// `timeout` elapses first.
    pub async fn wait_until_idle(&self, quiet: Duration, timeout: Duration) -> Result<()> {
        let start = Instant::now();
        loop {
            // Sample after a poll tick so a request triggered just before
            // this wait can land first.
            tokio::time::sleep(POLL_INTERVAL).await;
            if self.idle_for() >= quiet {
                return Ok(());
            }
            if start.elapsed() >= timeout {
                return Err(Error::Timeout {
                    what: "network idle".to_string(),
                    timeout,
                });
            }
        }
    }
}
