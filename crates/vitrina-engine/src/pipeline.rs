//! The derived view pipeline: pure computation from the full product list
//! and the current query to the exact ordered subset to render.
//!
//! Stages run in strict order — search, collection filter, vendor filter,
//! ordering, pagination — each consuming the previous stage's output. The
//! pipeline never mutates its inputs; it is recomputed whenever any input
//! changes.

use vitrina_core::{Product, SortMode, ViewQuery};

use crate::shuffle::shuffle;

/// Runs the filter and ordering stages, without the pagination cut.
///
/// The un-truncated result is what pagination state is measured against
/// (how many items remain, whether more can be revealed).
#[must_use]
pub fn derive_filtered<'a>(products: &'a [Product], query: &ViewQuery) -> Vec<&'a Product> {
    let mut filtered: Vec<&Product> = products.iter().collect();

    let term = query.search.trim().to_lowercase();
    if !term.is_empty() {
        filtered.retain(|p| matches_search(p, &term));
    }

    if let Some(collection) = &query.collection {
        filtered.retain(|p| p.collections.iter().any(|c| &c.title == collection));
    }

    if let Some(vendor) = &query.vendor {
        filtered.retain(|p| &p.vendor == vendor);
    }

    match query.sort {
        SortMode::None => {}
        SortMode::NewestFirst => filtered.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortMode::OldestFirst => filtered.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        SortMode::Random => filtered = shuffle(&filtered, query.seed),
    }

    filtered
}

/// The full pipeline: [`derive_filtered`] truncated to the first
/// `revealed` items.
#[must_use]
pub fn derive_view<'a>(
    products: &'a [Product],
    query: &ViewQuery,
    revealed: usize,
) -> Vec<&'a Product> {
    let mut filtered = derive_filtered(products, query);
    filtered.truncate(revealed);
    filtered
}

/// Case-insensitive substring match over title, description, vendor, any
/// tag, or any collection title. `term` must already be trimmed and
/// lowercased.
fn matches_search(product: &Product, term: &str) -> bool {
    product.title.to_lowercase().contains(term)
        || product.description.to_lowercase().contains(term)
        || product.vendor.to_lowercase().contains(term)
        || product.tags.iter().any(|t| t.to_lowercase().contains(term))
        || product
            .collections
            .iter()
            .any(|c| c.title.to_lowercase().contains(term))
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
