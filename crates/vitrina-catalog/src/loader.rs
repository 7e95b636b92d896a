//! Staged catalog loading: a small fast batch first, then a larger
//! background batch, with image warming in between.

use std::sync::Arc;

use tokio::sync::mpsc;

use vitrina_core::{AppConfig, CatalogEvent, Product};

use crate::client::{Shop, StorefrontClient};

/// Counts for the staged load.
#[derive(Debug, Clone, Copy)]
pub struct LoadPlan {
    /// Product count for the fast initial fetch.
    pub initial_count: u32,
    /// Product count for the larger background fetch.
    pub full_count: u32,
    /// How many leading product images to warm after the initial fetch.
    pub preload_image_count: usize,
}

impl LoadPlan {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            initial_count: config.initial_fetch_count,
            full_count: config.full_fetch_count,
            preload_image_count: config.preload_image_count,
        }
    }
}

/// Spawns the staged catalog load and returns the event stream.
///
/// Sequence: fetch `initial_count` products and emit
/// [`CatalogEvent::Loaded`]; fire-and-forget preload of the first
/// `preload_image_count` product images; fetch `full_count` products and
/// emit [`CatalogEvent::Refreshed`]. A failed initial fetch emits
/// [`CatalogEvent::Failed`] and stops. A failed background fetch is logged
/// and swallowed — the initial list stands.
///
/// Nothing is cancelled mid-flight: a slow background fetch that resolves
/// after the consumer stopped listening is simply dropped with the channel.
pub fn spawn_catalog_load(
    client: Arc<StorefrontClient>,
    shop: Shop,
    plan: LoadPlan,
) -> mpsc::Receiver<CatalogEvent> {
    let (tx, rx) = mpsc::channel(4);

    tokio::spawn(async move {
        let initial = match client.fetch_products(&shop, plan.initial_count).await {
            Ok(products) => products,
            Err(e) => {
                tracing::error!(error = %e, "initial catalog fetch failed");
                let _ = tx.send(CatalogEvent::Failed(e.to_string())).await;
                return;
            }
        };

        let preload_urls = leading_image_urls(&initial, plan.preload_image_count);
        let _ = tx.send(CatalogEvent::Loaded(initial)).await;

        let preload_client = Arc::clone(&client);
        tokio::spawn(async move {
            preload_client.preload_images(&preload_urls).await;
        });

        match client.fetch_products(&shop, plan.full_count).await {
            Ok(products) => {
                let _ = tx.send(CatalogEvent::Refreshed(products)).await;
            }
            Err(e) => {
                tracing::debug!(error = %e, "background catalog refresh failed; keeping initial batch");
            }
        }
    });

    rx
}

/// First-image URLs of the leading `count` products, skipping products
/// without images.
fn leading_image_urls(products: &[Product], count: usize) -> Vec<String> {
    products
        .iter()
        .take(count)
        .filter_map(|p| p.first_image().map(|i| i.url.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use vitrina_core::{Money, PriceRange, ProductImage};

    fn product_with_image(id: &str, url: Option<&str>) -> Product {
        Product {
            id: id.to_string(),
            title: "P".to_string(),
            description: String::new(),
            handle: id.to_string(),
            product_type: None,
            vendor: String::new(),
            tags: Vec::new(),
            created_at: Utc::now(),
            collections: Vec::new(),
            images: url
                .map(|u| {
                    vec![ProductImage {
                        id: None,
                        url: u.to_string(),
                        alt_text: None,
                    }]
                })
                .unwrap_or_default(),
            price_range: PriceRange {
                min_variant_price: Money {
                    amount: "1.00".to_string(),
                    currency_code: "USD".to_string(),
                },
            },
            variants: Vec::new(),
        }
    }

    #[test]
    fn leading_image_urls_takes_the_first_n_products() {
        let products = vec![
            product_with_image("1", Some("https://cdn.example.com/1.webp")),
            product_with_image("2", Some("https://cdn.example.com/2.webp")),
            product_with_image("3", Some("https://cdn.example.com/3.webp")),
        ];
        let urls = leading_image_urls(&products, 2);
        assert_eq!(
            urls,
            vec![
                "https://cdn.example.com/1.webp",
                "https://cdn.example.com/2.webp"
            ]
        );
    }

    #[test]
    fn leading_image_urls_skips_products_without_images() {
        let products = vec![
            product_with_image("1", None),
            product_with_image("2", Some("https://cdn.example.com/2.webp")),
        ];
        let urls = leading_image_urls(&products, 4);
        assert_eq!(urls, vec!["https://cdn.example.com/2.webp"]);
    }
}
