use crate::Product;

/// Catalog lifecycle events emitted by the staged loader and consumed by
/// the storefront session.
///
/// The loader fetches a small batch first for a fast initial render, then
/// a larger batch in the background. Both replacements leave the session's
/// filter state untouched; filters re-apply to whichever list is current.
#[derive(Debug)]
pub enum CatalogEvent {
    /// Initial (smaller) batch resolved.
    Loaded(Vec<Product>),
    /// Background (larger) batch resolved and replaces the list.
    Refreshed(Vec<Product>),
    /// The initial fetch failed. This is the only catalog failure that
    /// reaches the user-visible error surface.
    Failed(String),
}
