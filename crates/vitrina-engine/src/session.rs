//! The top-level view controller: owns the catalog store, the view query,
//! the pagination cursor, URL sync, and the scroll driver, and enforces
//! the rules that tie them together.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use vitrina_core::{AppConfig, CatalogEvent, Product, SortMode, ViewQuery};
use vitrina_sync::{AddressBar, ClosedVia, SyncController};

use crate::paging::PageCursor;
use crate::pipeline::{derive_filtered, derive_view};
use crate::scroll::{ScrollDriver, ScrollMetrics};
use crate::store::{CatalogStore, LoadStatus};

/// The detail-view carousel shows the open product plus at most this many
/// related products.
const RELATED_LIMIT: usize = 4;

/// Engine tuning knobs, split out so the session does not need the full
/// app config.
#[derive(Debug, Clone, Copy)]
pub struct SessionConfig {
    pub page_size: usize,
    pub load_more_delay_ms: u64,
    pub scroll_threshold_px: f64,
    pub scroll_throttle_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            page_size: 4,
            load_more_delay_ms: 300,
            scroll_threshold_px: 500.0,
            scroll_throttle_ms: 100,
        }
    }
}

impl SessionConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            page_size: config.page_size,
            load_more_delay_ms: config.load_more_delay_ms,
            scroll_threshold_px: config.scroll_threshold_px,
            scroll_throttle_ms: config.scroll_throttle_ms,
        }
    }
}

/// One storefront browsing session.
///
/// Owns the full product list and the filter state; the derived view is
/// recomputed from them on demand and never cached. The session applies
/// the coupling rules: any query change resets the pagination cursor (and
/// draws a fresh seed while in random order), catalog replacements leave
/// the query untouched, and at most one load-more advance is in flight.
pub struct StorefrontSession<B: AddressBar> {
    store: CatalogStore,
    query: ViewQuery,
    cursor: PageCursor,
    sync: SyncController<B>,
    scroll: ScrollDriver,
    loading_more: Arc<AtomicBool>,
    load_more_delay: Duration,
}

impl<B: AddressBar> StorefrontSession<B> {
    /// Creates a session over the given address bar and adopts any
    /// deep-link state the bar already carries. A deep-linked product
    /// handle stays pending until products arrive.
    #[must_use]
    pub fn new(bar: B, config: &SessionConfig) -> Self {
        let mut session = Self {
            store: CatalogStore::new(),
            query: ViewQuery::default(),
            cursor: PageCursor::new(config.page_size),
            sync: SyncController::new(bar),
            scroll: ScrollDriver::new(config.scroll_threshold_px, config.scroll_throttle_ms),
            loading_more: Arc::new(AtomicBool::new(false)),
            load_more_delay: Duration::from_millis(config.load_more_delay_ms),
        };
        let update = session.sync.bootstrap(&[]);
        session.query.search = update.search_term;
        session
    }

    #[must_use]
    pub fn query(&self) -> &ViewQuery {
        &self.query
    }

    #[must_use]
    pub fn status(&self) -> &LoadStatus {
        &self.store.status
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.store.products
    }

    /// Applies a catalog event. `Loaded` and `Refreshed` replace the
    /// product list — the query is deliberately untouched, so filters
    /// re-apply to whichever list is current — and retry the pending
    /// deep-link handle. `Failed` records the user-visible error.
    pub fn ingest(&mut self, event: CatalogEvent) {
        match event {
            CatalogEvent::Loaded(products) | CatalogEvent::Refreshed(products) => {
                self.store.replace(products);
                if let Some(update) = self.sync.products_changed(&self.store.products) {
                    tracing::debug!(
                        handle = update.open_handle.as_deref().unwrap_or_default(),
                        "deep-linked product resolved after catalog change"
                    );
                }
            }
            CatalogEvent::Failed(message) => self.store.fail(message),
        }
    }

    pub fn set_search(&mut self, term: &str) {
        self.query.search = term.to_owned();
        self.after_query_change();
        self.sync.set_search(term);
    }

    pub fn set_collection(&mut self, collection: Option<String>) {
        self.query.collection = collection;
        self.after_query_change();
    }

    pub fn set_vendor(&mut self, vendor: Option<String>) {
        self.query.vendor = vendor;
        self.after_query_change();
    }

    pub fn set_sort(&mut self, sort: SortMode) {
        self.query.sort = sort;
        self.after_query_change();
    }

    /// Pins the shuffle seed, for reproducible random ordering.
    pub fn set_random_seed(&mut self, seed: f64) {
        self.query.seed = seed;
    }

    /// Every query change resets the cursor to one page; while the
    /// resulting order is random, a fresh seed is drawn so the shuffle
    /// changes too.
    fn after_query_change(&mut self) {
        self.cursor.reset();
        if self.query.sort == SortMode::Random {
            self.query.seed = rand::random();
        }
    }

    /// The derived view: filtered, ordered, truncated to the cursor.
    #[must_use]
    pub fn visible(&self) -> Vec<&Product> {
        derive_view(&self.store.products, &self.query, self.cursor.revealed())
    }

    /// How many products the current filters match, before pagination.
    #[must_use]
    pub fn matched_count(&self) -> usize {
        derive_filtered(&self.store.products, &self.query).len()
    }

    #[must_use]
    pub fn has_more(&self) -> bool {
        self.cursor.has_more(self.matched_count())
    }

    #[must_use]
    pub fn is_loading_more(&self) -> bool {
        self.loading_more.load(Ordering::SeqCst)
    }

    /// Reveals one more page after a short artificial delay that signals
    /// progress. A no-op while an advance is already pending or when
    /// nothing remains beyond the cursor.
    pub async fn load_more(&mut self) {
        if !self.has_more() {
            return;
        }
        if self.loading_more.swap(true, Ordering::SeqCst) {
            return;
        }
        tokio::time::sleep(self.load_more_delay).await;
        self.cursor.advance();
        self.loading_more.store(false, Ordering::SeqCst);
    }

    /// Feeds a scroll event through the driver and advances a page when it
    /// fires. Gated on the initial load having completed, no advance
    /// already in flight, and items remaining.
    pub async fn on_scroll(&mut self, now: Instant, metrics: ScrollMetrics) {
        if !self.store.is_ready() || self.is_loading_more() || !self.has_more() {
            return;
        }
        if self.scroll.observe(now, &metrics) {
            self.load_more().await;
        }
    }

    /// Opens the detail view for a product, pushing a history entry so
    /// back-navigation closes it.
    pub fn open_product(&mut self, handle: &str) {
        self.sync.open_product(handle);
    }

    /// Closes the detail view; when the URL encodes it, this navigates
    /// back and resynchronizes, keeping forward-navigation able to reopen.
    pub fn close_product(&mut self) {
        if self.sync.close_product() == ClosedVia::HistoryBack {
            self.navigated();
        }
    }

    /// The product whose detail view is open, if its handle resolved.
    #[must_use]
    pub fn open_product_view(&self) -> Option<&Product> {
        let handle = self.sync.open_handle()?;
        self.store.products.iter().find(|p| p.handle == handle)
    }

    /// Handles a back/forward navigation: re-reads the URL and restores
    /// search and open-product state. Runs inside the sync controller's
    /// applying-from-url mode, so it can never echo a URL write.
    pub fn navigated(&mut self) {
        let query = &mut self.query;
        let cursor = &mut self.cursor;
        self.sync.navigated(&self.store.products, |_, update| {
            if update.search_term != query.search {
                query.search = update.search_term.clone();
                cursor.reset();
                if query.sort == SortMode::Random {
                    query.seed = rand::random();
                }
            }
        });
    }

    /// Products sharing a collection with the open product, in catalog
    /// order, capped for the detail-view carousel.
    #[must_use]
    pub fn related_products(&self) -> Vec<&Product> {
        let Some(open) = self.open_product_view() else {
            return Vec::new();
        };
        let collection_ids: HashSet<&str> =
            open.collections.iter().map(|c| c.id.as_str()).collect();
        self.store
            .products
            .iter()
            .filter(|p| p.id != open.id)
            .filter(|p| {
                p.collections
                    .iter()
                    .any(|c| collection_ids.contains(c.id.as_str()))
            })
            .take(RELATED_LIMIT)
            .collect()
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
