//! The URL sync state machine.
//!
//! Keeps three pieces of UI state addressable and restorable via the
//! address bar: the active search term, the open product (by handle), and
//! the history shape that lets back-navigation close a detail view and
//! forward-navigation reopen it.
//!
//! Re-entrancy is handled with an explicit mode checked before every
//! write: while URL state is being applied to the app
//! (`ApplyingFromUrl`), write operations are suppressed, so applying a
//! navigation never loops back into another URL write.

use vitrina_core::Product;

use crate::address::AddressBar;
use crate::handle::match_handle;
use crate::query_string::{get_param, remove_param, set_param};

/// Query parameter carrying the open product's handle.
pub const PRODUCT_PARAM: &str = "product";
/// Query parameter carrying the search term.
pub const SEARCH_PARAM: &str = "search";

/// What the controller is currently doing. Writes are only honored in
/// [`SyncMode::Idle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMode {
    Idle,
    /// URL state is being applied to the app (initial load or
    /// back/forward); writes are suppressed.
    ApplyingFromUrl,
    /// App state is being written to the URL.
    ApplyingToUrl,
}

/// The URL-derived state handed back to the app after a read.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SyncUpdate {
    /// Search term from the URL; empty when the parameter is absent.
    pub search_term: String,
    /// Canonical handle of the matched open product, `None` when the URL
    /// encodes no product or the handle matched nothing loaded yet.
    pub open_handle: Option<String>,
}

/// How a close request was carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClosedVia {
    /// The URL encoded the product; the controller popped history. The
    /// caller must follow up with [`SyncController::navigated`], as a
    /// browser would deliver a popstate event.
    HistoryBack,
    /// State had diverged from the URL; cleared directly.
    Cleared,
    /// A non-idle mode suppressed the write.
    Suppressed,
}

/// Bidirectional binding between UI state and the address bar.
pub struct SyncController<B: AddressBar> {
    bar: B,
    mode: SyncMode,
    search_term: String,
    open_handle: Option<String>,
    /// A deep-link handle that matched nothing yet; retried whenever the
    /// product list changes, until matched or cleared.
    pending_handle: Option<String>,
}

impl<B: AddressBar> SyncController<B> {
    #[must_use]
    pub fn new(bar: B) -> Self {
        Self {
            bar,
            mode: SyncMode::Idle,
            search_term: String::new(),
            open_handle: None,
            pending_handle: None,
        }
    }

    #[must_use]
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    #[must_use]
    pub fn open_handle(&self) -> Option<&str> {
        self.open_handle.as_deref()
    }

    #[must_use]
    pub fn pending_handle(&self) -> Option<&str> {
        self.pending_handle.as_deref()
    }

    #[must_use]
    pub fn mode(&self) -> SyncMode {
        self.mode
    }

    /// Access to the underlying address bar, mainly for history-shape
    /// assertions and driving back/forward in tests.
    pub fn bar_mut(&mut self) -> &mut B {
        &mut self.bar
    }

    /// Reads the current URL once at startup and adopts its state.
    ///
    /// A product handle that matches nothing in `products` (possibly still
    /// empty) is retained pending and retried on
    /// [`SyncController::products_changed`]. Absent parameters read as
    /// unset, never as errors.
    pub fn bootstrap(&mut self, products: &[Product]) -> SyncUpdate {
        self.read_url_state(products)
    }

    /// Retries the pending deep-link handle after the product list
    /// changed. Returns the update when the handle finally matched.
    pub fn products_changed(&mut self, products: &[Product]) -> Option<SyncUpdate> {
        let pending = self.pending_handle.clone()?;
        let matched = match_handle(products, &pending)?;
        self.open_handle = Some(matched.handle.clone());
        self.pending_handle = None;
        Some(SyncUpdate {
            search_term: self.search_term.clone(),
            open_handle: self.open_handle.clone(),
        })
    }

    /// Opens a product detail view: pushes a new history entry encoding
    /// the handle so back-navigation closes it. No entry is pushed when
    /// the same handle is already encoded in the current URL.
    pub fn open_product(&mut self, handle: &str) {
        if self.mode != SyncMode::Idle {
            tracing::debug!(%handle, "open_product suppressed while applying URL state");
            return;
        }

        let current = self.bar.query();
        if get_param(&current, PRODUCT_PARAM).as_deref() == Some(handle) {
            // Already encoded; just reconcile local state.
            self.open_handle = Some(handle.to_owned());
            return;
        }

        self.mode = SyncMode::ApplyingToUrl;
        let next = set_param(&current, PRODUCT_PARAM, handle);
        self.bar.push(&next);
        self.open_handle = Some(handle.to_owned());
        self.pending_handle = None;
        self.mode = SyncMode::Idle;
    }

    /// Closes the product detail view.
    ///
    /// When the URL encodes an open product this pops history instead of
    /// rewriting, which keeps forward-navigation able to reopen it; the
    /// caller then resynchronizes via [`SyncController::navigated`]. When
    /// state diverged from the URL, local state is cleared directly.
    pub fn close_product(&mut self) -> ClosedVia {
        if self.mode != SyncMode::Idle {
            tracing::debug!("close_product suppressed while applying URL state");
            return ClosedVia::Suppressed;
        }

        let current = self.bar.query();
        if get_param(&current, PRODUCT_PARAM).is_some() {
            self.mode = SyncMode::ApplyingToUrl;
            self.bar.back();
            self.mode = SyncMode::Idle;
            ClosedVia::HistoryBack
        } else {
            self.open_handle = None;
            self.pending_handle = None;
            ClosedVia::Cleared
        }
    }

    /// Mirrors a search-term change into the URL by replacing the current
    /// entry — search changes never create navigable history steps. An
    /// empty (or whitespace) term removes the parameter.
    pub fn set_search(&mut self, term: &str) {
        if self.mode != SyncMode::Idle {
            tracing::debug!("set_search suppressed while applying URL state");
            return;
        }

        self.mode = SyncMode::ApplyingToUrl;
        let current = self.bar.query();
        let next = if term.trim().is_empty() {
            remove_param(&current, SEARCH_PARAM)
        } else {
            set_param(&current, SEARCH_PARAM, term)
        };
        if next != current {
            self.bar.replace(&next);
        }
        self.search_term = term.to_owned();
        self.mode = SyncMode::Idle;
    }

    /// Handles a back/forward navigation event: re-reads both parameters
    /// from the resulting URL and resynchronizes state through `apply`.
    ///
    /// `apply` runs while the controller is in
    /// [`SyncMode::ApplyingFromUrl`], so any write operation it reaches
    /// (directly or indirectly) is suppressed and the resynchronization
    /// cannot trigger another URL write.
    pub fn navigated<F>(&mut self, products: &[Product], apply: F) -> SyncUpdate
    where
        F: FnOnce(&mut Self, &SyncUpdate),
    {
        let update = self.read_url_state(products);
        self.mode = SyncMode::ApplyingFromUrl;
        apply(self, &update);
        self.mode = SyncMode::Idle;
        update
    }

    /// Reads the current URL and adopts its state: search term (absent →
    /// empty) and product handle (matched → open, unmatched → pending,
    /// absent → closed).
    fn read_url_state(&mut self, products: &[Product]) -> SyncUpdate {
        let query = self.bar.query();

        self.search_term = get_param(&query, SEARCH_PARAM).unwrap_or_default();

        // An empty handle value is "unset", not a match-everything needle.
        match get_param(&query, PRODUCT_PARAM).filter(|raw| !raw.is_empty()) {
            Some(raw) => match match_handle(products, &raw) {
                Some(product) => {
                    self.open_handle = Some(product.handle.clone());
                    self.pending_handle = None;
                }
                None => {
                    tracing::debug!(handle = %raw, "deep-link handle matched no loaded product");
                    self.open_handle = None;
                    self.pending_handle = Some(raw);
                }
            },
            None => {
                self.open_handle = None;
                self.pending_handle = None;
            }
        }

        SyncUpdate {
            search_term: self.search_term.clone(),
            open_handle: self.open_handle.clone(),
        }
    }
}

#[cfg(test)]
#[path = "controller_test.rs"]
mod tests;
