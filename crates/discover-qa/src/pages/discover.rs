// Discover page object
//
// Encodes every UI and URL convention of the movie-discovery SPA so test
// cases never touch selector strings. Action helpers click and wait for the
// network to settle but never assert success; getters either wait-then-read
// (bounded) or parse pure state. "Not found" reads as false/empty/default,
// except exact-text click targets, which fail loudly.

use crate::capture::NetworkMonitor;
use crate::config::TestConfig;
use crate::error::Result;
use crate::pages::base::{BasePage, LoadState};
use playwright_rs::{Page, expect};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

// The results grid renders asynchronously after each API response; its
// absence past this bound is the primary broken-render signal.
const GRID_VISIBLE_TIMEOUT: Duration = Duration::from_secs(10);

const RESULTS_GRID: &str = ".grid";
const RESULT_CARDS: &str = ".grid > div";
const MOVIE_TITLE: &str = "p.text-blue-500.font-bold.py-1";

// Active filter items carry text-white; inactive ones text-blue-500.
const ACTIVE_MARKER: &str = "text-white";

/// Page object for the movie-discovery UI: category filters, pagination,
/// result extraction, and URL-state parsing.
pub struct DiscoverPage {
    base: BasePage,
    base_url: String,
}

impl DiscoverPage {
    pub fn new(page: Page, net: Arc<NetworkMonitor>, config: &TestConfig) -> Self {
        Self {
            base: BasePage::new(page, net, config.timeout),
            base_url: config.base_url.clone(),
        }
    }

    /// The underlying driver page handle.
    pub fn page(&self) -> &Page {
        self.base.page()
    }

    /// Current browser URL.
    pub fn url(&self) -> String {
        self.base.url()
    }

    /// Current page title.
    pub async fn title(&self) -> Result<String> {
        self.base.title().await
    }

    /// Navigates to an arbitrary URL (deep links, invalid pages).
    pub async fn navigate_to(&self, url: &str) -> Result<()> {
        self.base.navigate_to(url).await
    }

    /// See [`BasePage::wait_for_load`].
    pub async fn wait_for_load(&self, state: LoadState) -> Result<()> {
        self.base.wait_for_load(state).await
    }

    /// Writes a PNG of the current page at `path`.
    pub async fn screenshot(&self, path: &Path) -> Result<()> {
        self.base.screenshot(path).await
    }

    /// Loads the discover page and waits for it to settle.
    ///
    /// The app itself redirects a root entry to the default category path;
    /// this only navigates and waits.
    pub async fn load(&self) -> Result<()> {
        info!(url = %self.base_url, "loading discover page");
        self.base.navigate_to(&self.base_url).await?;
        self.base.wait_for_load(LoadState::NetworkIdle).await
    }

    async fn click_and_settle(&self, selector: &str) -> Result<()> {
        self.base.page().locator(selector).await.click(None).await?;
        self.base.wait_for_load(LoadState::NetworkIdle).await
    }

    /// Clicks the Popular category filter.
    pub async fn select_popular_filter(&self) -> Result<()> {
        info!("clicking Popular filter");
        self.click_and_settle("a[href='/popular']").await
    }

    /// Clicks the Trending category filter.
    pub async fn select_trending_filter(&self) -> Result<()> {
        info!("clicking Trending filter");
        self.click_and_settle("a[href='/trend']").await
    }

    /// Clicks the Newest category filter.
    pub async fn select_newest_filter(&self) -> Result<()> {
        info!("clicking Newest filter");
        self.click_and_settle("a[href='/new']").await
    }

    /// Clicks the Top Rated category filter.
    pub async fn select_top_rated_filter(&self) -> Result<()> {
        info!("clicking Top Rated filter");
        self.click_and_settle("a[href='/top']").await
    }

    /// Clicks the Next pagination control. Callers assert the
    /// post-conditions themselves.
    pub async fn click_next_page(&self) -> Result<()> {
        info!("clicking Next page control");
        self.click_and_settle("text=Next").await
    }

    /// Clicks the Previous pagination control. Callers assert the
    /// post-conditions themselves.
    pub async fn click_previous_page(&self) -> Result<()> {
        info!("clicking Previous page control");
        self.click_and_settle("text=Previous").await
    }

    /// Clicks the pagination control labelled `page_number`; fails with the
    /// driver's element-not-found error when no such control exists.
    pub async fn navigate_to_page(&self, page_number: u32) -> Result<()> {
        info!(page_number, "navigating to page");
        self.click_and_settle(&format!("a:has-text('{page_number}')"))
            .await
    }

    /// Number of movie cards displayed.
    ///
    /// Waits (bounded) for the results grid to become visible, then counts
    /// its immediate children. A grid that renders empty yields 0; a grid
    /// that never appears yields a timeout error.
    pub async fn results_count(&self) -> Result<usize> {
        let grid = self.base.page().locator(RESULTS_GRID).await;
        expect(grid)
            .with_timeout(GRID_VISIBLE_TIMEOUT)
            .to_be_visible()
            .await?;

        let count = self.base.page().locator(RESULT_CARDS).await.count().await?;
        debug!(count, "movie results on page");
        Ok(count)
    }

    /// Current page number, derived purely from the URL path.
    ///
    /// `/popular` → 1, `/popular/2` → 2; a non-numeric trailing segment
    /// defaults to 1. No DOM access, hence no wait.
    pub fn current_page(&self) -> u32 {
        let url = self.base.url();
        let page = trailing_page_number(&url);
        debug!(url, page, "current page from url");
        page
    }

    /// Movie titles in DOM order, substituting the empty string for
    /// textless elements. An empty page yields an empty vec, not an error.
    pub async fn movie_titles(&self) -> Result<Vec<String>> {
        let titles = self.base.page().locator(MOVIE_TITLE).await;
        let count = titles.count().await?;
        let mut out = Vec::with_capacity(count);
        for index in 0..count {
            let text = titles.nth(index as i32).text_content().await?;
            out.push(text.unwrap_or_default());
        }
        debug!(count = out.len(), "movie titles collected");
        Ok(out)
    }

    /// Whether the filter item labelled `label` is in its active state.
    ///
    /// An absent item reads as inactive, never as an error.
    pub async fn is_filter_active(&self, label: &str) -> Result<bool> {
        let item = self
            .base
            .page()
            .locator(&format!("li:has-text('{label}')"))
            .await;
        if item.count().await? == 0 {
            debug!(label, "filter item not present");
            return Ok(false);
        }
        let class = item.first().get_attribute("class").await?.unwrap_or_default();
        let active = class.contains(ACTIVE_MARKER);
        debug!(label, active, "filter state");
        Ok(active)
    }

    pub async fn is_popular_filter_active(&self) -> Result<bool> {
        self.is_filter_active("Popular").await
    }

    pub async fn is_trending_filter_active(&self) -> Result<bool> {
        self.is_filter_active("Trend").await
    }

    pub async fn is_newest_filter_active(&self) -> Result<bool> {
        self.is_filter_active("Newest").await
    }

    pub async fn is_top_rated_filter_active(&self) -> Result<bool> {
        self.is_filter_active("Top rated").await
    }
}

/// Parses the trailing numeric path segment of `url`, defaulting to page 1.
fn trailing_page_number(url: &str) -> u32 {
    let path = Url::parse(url)
        .map(|parsed| parsed.path().to_string())
        .unwrap_or_else(|_| url.to_string());
    let segment = path.trim_end_matches('/').rsplit('/').next().unwrap_or("");
    if !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit()) {
        segment.parse().unwrap_or(1)
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::trailing_page_number;

    #[test]
    fn category_path_is_page_one() {
        assert_eq!(
            trailing_page_number("https://tmdb-discover.surge.sh/popular"),
            1
        );
        assert_eq!(trailing_page_number("https://tmdb-discover.surge.sh/top"), 1);
    }

    #[test]
    fn trailing_number_is_the_page() {
        assert_eq!(
            trailing_page_number("https://tmdb-discover.surge.sh/popular/2"),
            2
        );
        assert_eq!(
            trailing_page_number("https://tmdb-discover.surge.sh/popular/17"),
            17
        );
    }

    #[test]
    fn trailing_slash_is_ignored() {
        assert_eq!(
            trailing_page_number("https://tmdb-discover.surge.sh/popular/3/"),
            3
        );
    }

    #[test]
    fn non_numeric_segment_defaults_to_one() {
        assert_eq!(trailing_page_number("https://tmdb-discover.surge.sh/"), 1);
        assert_eq!(
            trailing_page_number("https://tmdb-discover.surge.sh/popular/next"),
            1
        );
    }

    #[test]
    fn page_zero_parses_as_zero() {
        assert_eq!(
            trailing_page_number("https://tmdb-discover.surge.sh/popular/0"),
            0
        );
    }

    #[test]
    fn query_strings_do_not_leak_into_the_segment() {
        assert_eq!(
            trailing_page_number("https://tmdb-discover.surge.sh/popular/4?utm=x"),
            4
        );
    }
}
