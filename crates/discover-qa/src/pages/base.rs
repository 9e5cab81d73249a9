// Base page object - common interactions shared by all pages
//
// Thin wrapper over an injected page handle. All operations assume a live,
// open page; calling them after the session closed the handle fails with
// the driver's disposed-target error.

use crate::capture::{NETWORK_QUIET_WINDOW, NetworkMonitor};
use crate::error::{Error, Result};
use playwright_rs::Page;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

const READY_STATE_POLL: Duration = Duration::from_millis(50);

/// Load-state signals a page settle can wait for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    /// The `load` event has fired.
    #[default]
    Load,
    /// The `DOMContentLoaded` event has fired.
    DomContentLoaded,
    /// The document finished loading and the network has been quiet for
    /// [`NETWORK_QUIET_WINDOW`].
    NetworkIdle,
}

/// Common page interactions all page objects share.
pub struct BasePage {
    page: Page,
    net: Arc<NetworkMonitor>,
    timeout: Duration,
}

impl BasePage {
    pub fn new(page: Page, net: Arc<NetworkMonitor>, timeout: Duration) -> Self {
        Self { page, net, timeout }
    }

    /// The underlying driver page handle.
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Navigates to `url`, blocking until the driver's own
    /// navigation-commit criteria are met.
    pub async fn navigate_to(&self, url: &str) -> Result<()> {
        debug!(url, "navigating");
        self.page.goto(url, None).await?;
        Ok(())
    }

    /// Current page title.
    pub async fn title(&self) -> Result<String> {
        Ok(self.page.title().await?)
    }

    /// Current browser URL.
    pub fn url(&self) -> String {
        self.page.url()
    }

    /// Blocks until the page reaches `state`, bounded by the configured
    /// operation timeout.
    pub async fn wait_for_load(&self, state: LoadState) -> Result<()> {
        match state {
            LoadState::Load => self.wait_ready_state(&["complete"], state).await,
            LoadState::DomContentLoaded => {
                self.wait_ready_state(&["interactive", "complete"], state)
                    .await
            }
            LoadState::NetworkIdle => {
                self.wait_ready_state(&["complete"], state).await?;
                self.net
                    .wait_until_idle(NETWORK_QUIET_WINDOW, self.timeout)
                    .await
            }
        }
    }

    async fn wait_ready_state(&self, accept: &[&str], state: LoadState) -> Result<()> {
        let start = Instant::now();
        loop {
            let ready = self.page.evaluate_value("document.readyState").await?;
            if accept.contains(&ready.as_str()) {
                return Ok(());
            }
            if start.elapsed() >= self.timeout {
                return Err(Error::Timeout {
                    what: format!("load state {state:?}"),
                    timeout: self.timeout,
                });
            }
            tokio::time::sleep(READY_STATE_POLL).await;
        }
    }

    /// Writes a PNG of the current page at `path`, creating or overwriting
    /// it.
    pub async fn screenshot(&self, path: &Path) -> Result<()> {
        self.page.screenshot_to_file(path, None).await?;
        Ok(())
    }
}
