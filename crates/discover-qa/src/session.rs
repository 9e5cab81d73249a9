// Session fixtures and case lifecycle
//
// Resource ownership is strictly hierarchical: the driver owns the browser
// (harness scope), which owns each isolated context, which owns its page
// (one test each). Teardown runs in reverse order on every exit path. The
// case runner computes the outcome from the test body's verdict and the
// case's disposition, persisting a screenshot for failing and
// expected-failing cases before the page closes. Artifact capture is
// diagnosis only; it never changes a verdict.

use crate::capture::{CapturedRequest, NetworkMonitor};
use crate::config::{TestConfig, config};
use crate::error::{Error, Result};
use crate::logging;
use crate::pages::DiscoverPage;
use futures_util::FutureExt;
use playwright_rs::{
    Browser, BrowserContext, BrowserContextOptions, LaunchOptions, Page, Playwright, Viewport,
};
use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

const VIEWPORT_WIDTH: u32 = 1920;
const VIEWPORT_HEIGHT: u32 = 1080;

/// Per-case result, computed by the runner and consumed by teardown to
/// decide whether a screenshot is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestOutcome {
    Passed,
    Failed,
    ExpectedFailure,
}

impl TestOutcome {
    fn wants_artifact(&self) -> bool {
        matches!(self, TestOutcome::Failed | TestOutcome::ExpectedFailure)
    }

    /// Phase label used in artifact file names.
    pub fn phase(&self) -> &'static str {
        match self {
            TestOutcome::Passed => "passed",
            TestOutcome::Failed => "failed",
            TestOutcome::ExpectedFailure => "xfail",
        }
    }
}

/// How a case is expected to resolve.
#[derive(Debug, Clone, Copy)]
pub enum Disposition {
    /// The case must pass.
    Pass,
    /// The case pins a known, tracked application defect and is expected to
    /// fail; a pass means the defect no longer reproduces and is an error.
    KnownDefect(&'static str),
}

/// What a finished case produced.
#[derive(Debug)]
pub struct CaseReport {
    pub case: String,
    pub outcome: TestOutcome,
    pub artifact: Option<PathBuf>,
}

/// Harness scope: one launched driver and browser, shared read-only by the
/// cases run against it.
pub struct Harness {
    playwright: Playwright,
    browser: Browser,
    config: TestConfig,
}

impl Harness {
    /// Launches the driver and browser using the process-wide config.
    pub async fn launch() -> Result<Self> {
        Self::launch_with(config().clone()).await
    }

    /// Launches the driver and browser with an explicit config (local stub
    /// deployments, alternate browsers).
    pub async fn launch_with(config: TestConfig) -> Result<Self> {
        logging::init();
        let playwright = Playwright::launch().await?;
        let options = LaunchOptions::new()
            .headless(config.headless)
            .slow_mo(config.slow_mo.as_millis() as f64);
        let browser = config
            .browser
            .browser_type(&playwright)
            .launch_with_options(options)
            .await?;
        info!(
            browser = config.browser.as_str(),
            headless = config.headless,
            "browser launched"
        );
        Ok(Self {
            playwright,
            browser,
            config,
        })
    }

    pub fn config(&self) -> &TestConfig {
        &self.config
    }

    /// Builds the per-test scope: an isolated browsing context with a fixed
    /// viewport and default operation timeout, a fresh page, and the
    /// network monitor attached before any navigation.
    pub async fn new_session(&self, case: &str) -> Result<TestSession> {
        let options = BrowserContextOptions::builder()
            .viewport(Viewport {
                width: VIEWPORT_WIDTH,
                height: VIEWPORT_HEIGHT,
            })
            .timeout(self.config.timeout.as_millis() as f64)
            .build();
        let context = self.browser.new_context_with_options(options).await?;
        let page = context.new_page().await?;
        let net = NetworkMonitor::attach(&page, &self.config.api_host).await?;
        debug!(case, "session ready");
        Ok(TestSession {
            case: case.to_string(),
            config: self.config.clone(),
            context,
            page,
            net,
        })
    }

    /// Runs one scenario case through the full fixture lifecycle.
    ///
    /// The body's verdict (success, error, or assertion panic) is combined
    /// with the disposition the way pytest resolves xfail: a failing
    /// known-defect case reports [`TestOutcome::ExpectedFailure`] and stays
    /// green, a passing one surfaces [`Error::UnexpectedPass`]. Teardown
    /// (artifact capture, page and context close) runs on every path.
    pub async fn run_case<F, Fut>(
        &self,
        case: &str,
        disposition: Disposition,
        body: F,
    ) -> Result<CaseReport>
    where
        F: FnOnce(TestSession) -> Fut,
        Fut: Future<Output = anyhow::Result<()>>,
    {
        info!(case, "case started");
        let session = self.new_session(case).await?;

        let verdict = AssertUnwindSafe(body(session.clone())).catch_unwind().await;
        let failure = match verdict {
            Ok(Ok(())) => None,
            Ok(Err(err)) => Some(format!("{err:#}")),
            Err(payload) => Some(panic_message(payload)),
        };

        match (disposition, failure) {
            (Disposition::Pass, None) => {
                let report = session.finish(TestOutcome::Passed).await?;
                info!(case, "case passed");
                Ok(report)
            }
            (Disposition::Pass, Some(reason)) => {
                if let Err(teardown) = session.finish(TestOutcome::Failed).await {
                    warn!(case, %teardown, "teardown error after failure");
                }
                error!(case, %reason, "case failed");
                Err(Error::CaseFailed {
                    case: case.to_string(),
                    reason,
                })
            }
            (Disposition::KnownDefect(defect), Some(reason)) => {
                let report = session.finish(TestOutcome::ExpectedFailure).await?;
                warn!(case, defect, %reason, "expected failure confirmed");
                Ok(report)
            }
            (Disposition::KnownDefect(defect), None) => {
                if let Err(teardown) = session.finish(TestOutcome::Passed).await {
                    warn!(case, %teardown, "teardown error after unexpected pass");
                }
                error!(case, defect, "case passed despite known-defect pin");
                Err(Error::UnexpectedPass {
                    case: case.to_string(),
                    defect,
                })
            }
        }
    }

    /// Closes the browser and shuts the driver down.
    pub async fn close(self) -> Result<()> {
        self.browser.close().await?;
        self.playwright.shutdown().await?;
        Ok(())
    }
}

/// Function scope: one isolated context and page plus the request recorder,
/// owned for the duration of a single case.
#[derive(Clone)]
pub struct TestSession {
    case: String,
    config: TestConfig,
    context: BrowserContext,
    page: Page,
    net: Arc<NetworkMonitor>,
}

impl TestSession {
    pub fn case(&self) -> &str {
        &self.case
    }

    pub fn config(&self) -> &TestConfig {
        &self.config
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn network(&self) -> &NetworkMonitor {
        &self.net
    }

    /// All backend API calls observed so far, oldest first.
    pub fn api_calls(&self) -> Vec<CapturedRequest> {
        self.net.api_calls()
    }

    /// A discover page object bound to this session's page.
    pub fn discover(&self) -> DiscoverPage {
        DiscoverPage::new(self.page.clone(), Arc::clone(&self.net), &self.config)
    }

    /// Tears the session down: screenshot for failing and expected-failing
    /// outcomes, then page and context close, in that order.
    pub async fn finish(self, outcome: TestOutcome) -> Result<CaseReport> {
        let artifact = if outcome.wants_artifact() {
            match self.capture_artifact(outcome).await {
                Ok(path) => Some(path),
                Err(err) => {
                    warn!(case = %self.case, %err, "screenshot capture failed");
                    None
                }
            }
        } else {
            None
        };

        self.page.close().await?;
        self.context.close().await?;
        debug!(case = %self.case, ?outcome, "session closed");
        Ok(CaseReport {
            case: self.case,
            outcome,
            artifact,
        })
    }

    async fn capture_artifact(&self, outcome: TestOutcome) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.config.artifacts_dir)?;
        let path = artifact_path(&self.config.artifacts_dir, &self.case, outcome);
        self.page.screenshot_to_file(&path, None).await?;
        info!(case = %self.case, path = %path.display(), "failure screenshot written");
        Ok(path)
    }
}

fn artifact_path(dir: &Path, case: &str, outcome: TestOutcome) -> PathBuf {
    dir.join(format!("{case}-{}.png", outcome.phase()))
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
