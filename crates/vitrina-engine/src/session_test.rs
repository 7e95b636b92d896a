use chrono::{TimeZone, Utc};
use vitrina_core::{Collection, Money, PriceRange};
use vitrina_sync::MemoryHistory;

use super::*;

fn product(handle: &str, vendor: &str, collections: &[&str], day: u32) -> Product {
    Product {
        id: format!("gid://shopify/Product/{handle}"),
        title: handle.replace('-', " "),
        description: String::new(),
        handle: handle.to_string(),
        product_type: None,
        vendor: vendor.to_string(),
        tags: Vec::new(),
        created_at: Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap(),
        collections: collections
            .iter()
            .map(|title| Collection {
                id: format!("gid://shopify/Collection/{title}"),
                title: (*title).to_string(),
                handle: title.to_lowercase(),
                metafields: Vec::new(),
            })
            .collect(),
        images: Vec::new(),
        price_range: PriceRange {
            min_variant_price: Money {
                amount: "45.00".to_string(),
                currency_code: "USD".to_string(),
            },
        },
        variants: Vec::new(),
    }
}

fn catalog() -> Vec<Product> {
    vec![
        product("a", "POSTERS", &["Spring"], 1),
        product("b", "POSTERS", &["Fall"], 2),
        product("c", "PRINTS", &["Spring"], 3),
        product("d", "POSTERS", &["Spring"], 4),
        product("e", "PRINTS", &["Fall"], 5),
        product("f", "POSTERS", &["Winter"], 6),
    ]
}

/// Page size 2 and no artificial delay, so async tests stay fast.
fn test_config() -> SessionConfig {
    SessionConfig {
        page_size: 2,
        load_more_delay_ms: 0,
        scroll_threshold_px: 500.0,
        scroll_throttle_ms: 100,
    }
}

fn session() -> StorefrontSession<MemoryHistory> {
    let mut session = StorefrontSession::new(MemoryHistory::new(), &test_config());
    session.ingest(CatalogEvent::Loaded(catalog()));
    session
}

fn handles(view: &[&Product]) -> Vec<String> {
    view.iter().map(|p| p.handle.clone()).collect()
}

#[test]
fn initial_view_shows_one_page() {
    let session = session();
    assert_eq!(handles(&session.visible()), vec!["a", "b"]);
    assert!(session.has_more());
}

#[test]
fn failed_initial_fetch_surfaces_the_message() {
    let mut session = StorefrontSession::new(MemoryHistory::new(), &test_config());
    session.ingest(CatalogEvent::Failed("catalog unreachable".to_string()));
    assert_eq!(
        *session.status(),
        LoadStatus::Failed("catalog unreachable".to_string())
    );
    assert!(session.visible().is_empty());
}

#[tokio::test]
async fn load_more_reveals_the_next_page() {
    let mut session = session();
    session.load_more().await;
    assert_eq!(handles(&session.visible()), vec!["a", "b", "c", "d"]);
}

#[tokio::test]
async fn load_more_is_a_no_op_when_everything_is_revealed() {
    let mut session = session();
    session.load_more().await;
    session.load_more().await;
    assert_eq!(session.visible().len(), 6);
    assert!(!session.has_more());

    session.load_more().await;
    assert_eq!(session.visible().len(), 6);
}

#[tokio::test]
async fn filter_change_resets_the_cursor() {
    let mut session = session();
    session.load_more().await;
    assert_eq!(session.visible().len(), 4);

    session.set_vendor(Some("POSTERS".to_string()));
    // Back to one page of the narrowed list.
    assert_eq!(handles(&session.visible()), vec!["a", "b"]);
    assert_eq!(session.matched_count(), 4);
}

#[test]
fn refresh_preserves_the_active_filters() {
    let mut session = session();
    session.set_vendor(Some("PRINTS".to_string()));

    let mut bigger = catalog();
    bigger.push(product("g", "PRINTS", &["Spring"], 7));
    session.ingest(CatalogEvent::Refreshed(bigger));

    assert_eq!(session.query().vendor.as_deref(), Some("PRINTS"));
    assert!(session.visible().iter().all(|p| p.vendor == "PRINTS"));
    assert_eq!(session.matched_count(), 3);
}

#[test]
fn switching_to_random_draws_a_fresh_seed() {
    let mut session = session();
    session.set_random_seed(0.5);
    session.set_sort(SortMode::Random);
    let seed = session.query().seed;
    assert!((0.0..1.0).contains(&seed));
    assert!((seed - 0.5).abs() > f64::EPSILON, "seed should be redrawn");
}

#[test]
fn non_random_sort_changes_keep_the_seed() {
    let mut session = session();
    session.set_random_seed(0.5);
    session.set_sort(SortMode::NewestFirst);
    assert!((session.query().seed - 0.5).abs() < f64::EPSILON);
}

#[test]
fn filter_changes_reseed_while_random_order_is_active() {
    let mut session = session();
    session.set_sort(SortMode::Random);
    session.set_random_seed(0.5);
    session.set_vendor(Some("POSTERS".to_string()));
    assert!((session.query().seed - 0.5).abs() > f64::EPSILON);
}

#[test]
fn pinned_seed_gives_a_reproducible_random_view() {
    let mut first = session();
    first.set_sort(SortMode::Random);
    first.set_random_seed(0.42);

    let mut second = session();
    second.set_sort(SortMode::Random);
    second.set_random_seed(0.42);

    assert_eq!(handles(&first.visible()), handles(&second.visible()));
}

#[tokio::test]
async fn scroll_near_the_bottom_reveals_a_page() {
    let mut session = session();
    let near_bottom = ScrollMetrics {
        scroll_top: 1600.0,
        viewport_height: 800.0,
        content_height: 2700.0,
    };
    session.on_scroll(Instant::now(), near_bottom).await;
    assert_eq!(session.visible().len(), 4);
}

#[tokio::test]
async fn scroll_far_from_the_bottom_does_nothing() {
    let mut session = session();
    let far = ScrollMetrics {
        scroll_top: 0.0,
        viewport_height: 800.0,
        content_height: 9000.0,
    };
    session.on_scroll(Instant::now(), far).await;
    assert_eq!(session.visible().len(), 2);
}

#[tokio::test]
async fn scroll_does_nothing_before_the_initial_load_completes() {
    let mut session = StorefrontSession::new(MemoryHistory::new(), &test_config());
    let near_bottom = ScrollMetrics {
        scroll_top: 1600.0,
        viewport_height: 800.0,
        content_height: 2700.0,
    };
    session.on_scroll(Instant::now(), near_bottom).await;
    assert!(session.visible().is_empty());
}

#[test]
fn deep_linked_product_resolves_when_the_catalog_arrives() {
    let bar = MemoryHistory::with_query("product=c&search=spring");
    let mut session = StorefrontSession::new(bar, &test_config());
    assert!(session.open_product_view().is_none());
    assert_eq!(session.query().search, "spring");

    session.ingest(CatalogEvent::Loaded(catalog()));
    assert_eq!(session.open_product_view().map(|p| p.handle.as_str()), Some("c"));
}

#[test]
fn unmatched_deep_link_leaves_the_view_closed() {
    let bar = MemoryHistory::with_query("product=zzz-not-here");
    let mut session = StorefrontSession::new(bar, &test_config());
    session.ingest(CatalogEvent::Loaded(catalog()));
    assert!(session.open_product_view().is_none());
}

#[test]
fn open_then_close_restores_the_search_term() {
    let mut session = session();
    session.set_search("spring");
    session.open_product("a");
    assert_eq!(session.open_product_view().map(|p| p.handle.as_str()), Some("a"));

    session.close_product();
    assert!(session.open_product_view().is_none());
    assert_eq!(session.query().search, "spring");
}

#[test]
fn related_products_share_a_collection_and_exclude_the_open_one() {
    let mut session = session();
    session.open_product("a");
    let related = handles(&session.related_products());
    // Spring members other than "a", in catalog order.
    assert_eq!(related, vec!["c", "d"]);
}

#[test]
fn related_products_cap_at_the_carousel_limit() {
    let mut session = StorefrontSession::new(MemoryHistory::new(), &test_config());
    let mut products = vec![product("main", "POSTERS", &["Spring"], 1)];
    for i in 0..6 {
        products.push(product(&format!("rel-{i}"), "POSTERS", &["Spring"], 2));
    }
    session.ingest(CatalogEvent::Loaded(products));
    session.open_product("main");
    assert_eq!(session.related_products().len(), 4);
}

#[test]
fn successive_search_changes_apply_to_the_view() {
    let mut session = session();
    session.set_search("spring");
    session.set_search("fall");
    assert_eq!(session.query().search, "fall");
    assert_eq!(handles(&session.visible()), vec!["b", "e"]);
}
