use chrono::Utc;
use vitrina_core::{Money, PriceRange, Product};

use super::*;
use crate::address::MemoryHistory;

fn product(handle: &str) -> Product {
    Product {
        id: format!("gid://shopify/Product/{handle}"),
        title: handle.to_string(),
        description: String::new(),
        handle: handle.to_string(),
        product_type: None,
        vendor: String::new(),
        tags: Vec::new(),
        created_at: Utc::now(),
        collections: Vec::new(),
        images: Vec::new(),
        price_range: PriceRange {
            min_variant_price: Money {
                amount: "1.00".to_string(),
                currency_code: "USD".to_string(),
            },
        },
        variants: Vec::new(),
    }
}

fn catalog() -> Vec<Product> {
    vec![product("desert-bloom"), product("night-garden")]
}

#[test]
fn bootstrap_with_no_parameters_reads_as_unset() {
    let mut sync = SyncController::new(MemoryHistory::new());
    let update = sync.bootstrap(&catalog());
    assert_eq!(update, SyncUpdate::default());
    assert!(sync.pending_handle().is_none());
}

#[test]
fn bootstrap_adopts_deep_link_state() {
    let bar = MemoryHistory::with_query("product=desert-bloom&search=art");
    let mut sync = SyncController::new(bar);
    let update = sync.bootstrap(&catalog());
    assert_eq!(update.search_term, "art");
    assert_eq!(update.open_handle.as_deref(), Some("desert-bloom"));
}

#[test]
fn unmatched_deep_link_handle_stays_pending() {
    let bar = MemoryHistory::with_query("product=desert-bloom");
    let mut sync = SyncController::new(bar);
    let update = sync.bootstrap(&[]);
    assert!(update.open_handle.is_none());
    assert_eq!(sync.pending_handle(), Some("desert-bloom"));
}

#[test]
fn pending_handle_resolves_when_products_arrive() {
    let bar = MemoryHistory::with_query("product=desert-bloom");
    let mut sync = SyncController::new(bar);
    sync.bootstrap(&[]);

    // A list without the product keeps the handle pending.
    assert!(sync.products_changed(&[product("night-garden")]).is_none());
    assert_eq!(sync.pending_handle(), Some("desert-bloom"));

    let update = sync.products_changed(&catalog()).expect("handle resolves");
    assert_eq!(update.open_handle.as_deref(), Some("desert-bloom"));
    assert!(sync.pending_handle().is_none());
}

#[test]
fn open_product_pushes_one_history_entry() {
    let mut sync = SyncController::new(MemoryHistory::new());
    sync.open_product("desert-bloom");
    assert_eq!(sync.bar_mut().len(), 2);
    assert_eq!(sync.bar_mut().query(), "product=desert-bloom");
    assert_eq!(sync.open_handle(), Some("desert-bloom"));
}

#[test]
fn reopening_the_same_product_does_not_push_again() {
    let mut sync = SyncController::new(MemoryHistory::new());
    sync.open_product("desert-bloom");
    sync.open_product("desert-bloom");
    assert_eq!(sync.bar_mut().len(), 2);
}

#[test]
fn open_product_preserves_the_search_parameter() {
    let mut sync = SyncController::new(MemoryHistory::new());
    sync.set_search("art");
    sync.open_product("desert-bloom");
    let query = sync.bar_mut().query();
    assert_eq!(get_param(&query, SEARCH_PARAM).as_deref(), Some("art"));
    assert_eq!(
        get_param(&query, PRODUCT_PARAM).as_deref(),
        Some("desert-bloom")
    );
}

#[test]
fn set_search_replaces_instead_of_pushing() {
    let mut sync = SyncController::new(MemoryHistory::new());
    sync.set_search("art");
    sync.set_search("artwork");
    assert_eq!(sync.bar_mut().len(), 1);
    assert_eq!(sync.bar_mut().query(), "search=artwork");
}

#[test]
fn clearing_the_search_removes_the_parameter() {
    let mut sync = SyncController::new(MemoryHistory::new());
    sync.set_search("art");
    sync.set_search("");
    assert_eq!(sync.bar_mut().query(), "");
    assert_eq!(sync.search_term(), "");
}

#[test]
fn close_product_pops_history_when_the_url_encodes_one() {
    let products = catalog();
    let mut sync = SyncController::new(MemoryHistory::new());
    sync.open_product("desert-bloom");

    assert_eq!(sync.close_product(), ClosedVia::HistoryBack);
    // The pop moved the bar back; a navigation event follows, as in a
    // browser.
    let update = sync.navigated(&products, |_, _| {});
    assert!(update.open_handle.is_none());
    assert_eq!(sync.bar_mut().query(), "");
}

#[test]
fn close_product_clears_directly_when_state_diverged() {
    let mut sync = SyncController::new(MemoryHistory::new());
    // Simulate divergence: the controller believes a product is open but
    // the URL encodes none.
    sync.open_product("desert-bloom");
    sync.bar_mut().replace("");
    assert_eq!(sync.close_product(), ClosedVia::Cleared);
    assert!(sync.open_handle().is_none());
}

#[test]
fn url_roundtrip_reopens_the_same_product() {
    let products = catalog();
    let mut sync = SyncController::new(MemoryHistory::new());
    sync.set_search("art");
    sync.open_product("desert-bloom");

    // Re-reading the URL yields the same open product and search term.
    let update = sync.navigated(&products, |_, _| {});
    assert_eq!(update.open_handle.as_deref(), Some("desert-bloom"));
    assert_eq!(update.search_term, "art");

    // Back closes the view and restores the prior search term.
    assert_eq!(sync.close_product(), ClosedVia::HistoryBack);
    let update = sync.navigated(&products, |_, _| {});
    assert!(update.open_handle.is_none());
    assert_eq!(update.search_term, "art");

    // Forward reopens it.
    assert!(sync.bar_mut().forward());
    let update = sync.navigated(&products, |_, _| {});
    assert_eq!(update.open_handle.as_deref(), Some("desert-bloom"));
}

#[test]
fn navigated_matches_handles_case_insensitively() {
    let products = catalog();
    let bar = MemoryHistory::with_query("product=Desert-Bloom");
    let mut sync = SyncController::new(bar);
    let update = sync.bootstrap(&products);
    assert_eq!(update.open_handle.as_deref(), Some("desert-bloom"));
}

#[test]
fn handle_that_never_matches_leaves_the_view_closed() {
    let bar = MemoryHistory::with_query("product=unknown-thing");
    let mut sync = SyncController::new(bar);
    let update = sync.bootstrap(&catalog());
    assert!(update.open_handle.is_none());
}

#[test]
fn writes_are_suppressed_while_applying_url_state() {
    let products = catalog();
    let mut sync = SyncController::new(MemoryHistory::new());
    sync.open_product("desert-bloom");
    let depth_before = sync.bar_mut().len();

    sync.navigated(&products, |sync, update| {
        assert_eq!(sync.mode(), SyncMode::ApplyingFromUrl);
        // Echoing the applied state back through write operations must not
        // touch the URL.
        let term = update.search_term.clone();
        sync.set_search(&term);
        sync.open_product("night-garden");
        assert_eq!(sync.close_product(), ClosedVia::Suppressed);
    });

    assert_eq!(sync.bar_mut().len(), depth_before);
    assert_eq!(sync.bar_mut().query(), "product=desert-bloom");
    assert_eq!(sync.mode(), SyncMode::Idle);
}

#[test]
fn malformed_parameters_read_as_unset() {
    let bar = MemoryHistory::with_query("product&search");
    let mut sync = SyncController::new(bar);
    let update = sync.bootstrap(&catalog());
    // Bare keys decode to empty values: no product opens, search is empty.
    assert!(update.open_handle.is_none());
    assert_eq!(update.search_term, "");
}
