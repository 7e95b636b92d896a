//! The catalog store: the fetched product list, its load status, and the
//! facet lists the filter controls are built from.

use std::collections::BTreeSet;

use vitrina_core::Product;

/// Catalog load state as the UI sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// Initial fetch still in flight.
    Loading,
    Ready,
    /// Initial fetch failed; the message is the user-visible inline error.
    Failed(String),
}

/// Holds the full fetched product list and its loading/error status. No
/// behavior beyond holding state — derivation happens in the pipeline.
#[derive(Debug)]
pub struct CatalogStore {
    pub products: Vec<Product>,
    pub status: LoadStatus,
}

impl CatalogStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            products: Vec::new(),
            status: LoadStatus::Loading,
        }
    }

    /// Replaces the product list (initial load or background refresh).
    /// Filter state lives elsewhere and is deliberately untouched.
    pub fn replace(&mut self, products: Vec<Product>) {
        self.products = products;
        self.status = LoadStatus::Ready;
    }

    pub fn fail(&mut self, message: String) {
        self.status = LoadStatus::Failed(message);
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.status == LoadStatus::Ready
    }
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Sorted, deduplicated collection titles across the catalog, skipping
/// blanks. This is what the collection filter dropdown offers.
#[must_use]
pub fn collection_facets(products: &[Product]) -> Vec<String> {
    let titles: BTreeSet<&str> = products
        .iter()
        .flat_map(|p| p.collections.iter())
        .map(|c| c.title.as_str())
        .filter(|t| !t.trim().is_empty())
        .collect();
    titles.into_iter().map(str::to_owned).collect()
}

/// Sorted, deduplicated vendors across the catalog, skipping blanks.
#[must_use]
pub fn vendor_facets(products: &[Product]) -> Vec<String> {
    let vendors: BTreeSet<&str> = products
        .iter()
        .map(|p| p.vendor.as_str())
        .filter(|v| !v.trim().is_empty())
        .collect();
    vendors.into_iter().map(str::to_owned).collect()
}
