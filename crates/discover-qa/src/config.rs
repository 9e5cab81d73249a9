// Test configuration
//
// A single process-wide settings record, constructed once and read-only
// thereafter. Tests that target a non-production deployment (e.g. a local
// stub of the app) build their own `TestConfig` and hand it to
// `Harness::launch_with` instead of mutating the global.

use playwright_rs::{BrowserType, Playwright};
use std::path::PathBuf;
use std::sync::LazyLock;
use std::time::Duration;

/// Which browser engine the harness launches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BrowserKind {
    #[default]
    Chromium,
    Firefox,
    Webkit,
}

impl BrowserKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BrowserKind::Chromium => "chromium",
            BrowserKind::Firefox => "firefox",
            BrowserKind::Webkit => "webkit",
        }
    }

    pub(crate) fn browser_type<'a>(&self, playwright: &'a Playwright) -> &'a BrowserType {
        match self {
            BrowserKind::Chromium => playwright.chromium(),
            BrowserKind::Firefox => playwright.firefox(),
            BrowserKind::Webkit => playwright.webkit(),
        }
    }
}

/// Test harness settings.
///
/// * `base_url` - navigation target of the app under test
/// * `browser` - engine to launch
/// * `headless` - visible vs invisible execution
/// * `timeout` - max wait per automation operation
/// * `slow_mo` - artificial delay between automation operations, for human
///   observability during debugging
/// * `expected_results_per_page` - oracle value for pagination-size
///   assertions
/// * `api_host` - substring that marks a request URL as a backend API call
///   worth recording
/// * `artifacts_dir` - where failure screenshots are written
#[derive(Debug, Clone)]
pub struct TestConfig {
    pub base_url: String,
    pub browser: BrowserKind,
    pub headless: bool,
    pub timeout: Duration,
    pub slow_mo: Duration,
    pub expected_results_per_page: usize,
    pub api_host: String,
    pub artifacts_dir: PathBuf,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            base_url: "https://tmdb-discover.surge.sh".to_string(),
            browser: BrowserKind::Chromium,
            headless: true,
            timeout: Duration::from_secs(30),
            slow_mo: Duration::ZERO,
            expected_results_per_page: 20,
            api_host: "api.themoviedb.org".to_string(),
            artifacts_dir: PathBuf::from("artifacts/screenshots"),
        }
    }
}

impl TestConfig {
    /// Builds the config, applying environment overrides.
    ///
    /// TODO: read DISCOVER_QA_BASE_URL / DISCOVER_QA_HEADLESS / DISCOVER_QA_SLOW_MO
    /// overrides; currently returns the defaults unchanged.
    pub fn from_env() -> Self {
        Self::default()
    }
}

static CONFIG: LazyLock<TestConfig> = LazyLock::new(TestConfig::from_env);

/// The process-wide configuration instance.
pub fn config() -> &'static TestConfig {
    &CONFIG
}
