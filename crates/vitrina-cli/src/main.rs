use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use vitrina_catalog::{spawn_catalog_load, LoadPlan, Shop, StorefrontClient};
use vitrina_core::prefs::{self, FileStore};
use vitrina_core::{CatalogEvent, Product, SortMode};
use vitrina_engine::{
    collection_facets, vendor_facets, LoadStatus, SessionConfig, StorefrontSession,
};
use vitrina_sync::{match_handle, MemoryHistory};

#[derive(Debug, Parser)]
#[command(name = "vitrina")]
#[command(about = "Headless storefront engine: browse a product catalog from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch the catalog and print the derived product grid.
    Browse {
        /// Free-text search over title, description, vendor, tags, and
        /// collection titles.
        #[arg(long)]
        search: Option<String>,
        /// Exact collection title to filter by.
        #[arg(long)]
        collection: Option<String>,
        /// Exact vendor to filter by.
        #[arg(long)]
        vendor: Option<String>,
        /// Ordering: none, newest, oldest, or random.
        #[arg(long, default_value = "none")]
        sort: String,
        /// Shuffle seed in [0, 1) for reproducible random ordering.
        #[arg(long)]
        seed: Option<f64>,
        /// How many pages to reveal.
        #[arg(long, default_value_t = 1)]
        pages: u32,
    },
    /// Print the detail view for one product, resolved by handle.
    Show { handle: String },
    /// Print the collection and vendor filter options.
    Facets,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = vitrina_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let store = FileStore::open(&config.prefs_path);
    tracing::debug!(
        theme = prefs::load_theme(&store).as_str(),
        consent_recorded = prefs::load_consent(&store).is_some(),
        "preferences loaded"
    );

    let client = Arc::new(StorefrontClient::from_config(&config)?);
    let shop = Shop::from_config(&config);

    let cli = Cli::parse();
    match cli.command {
        Commands::Browse {
            search,
            collection,
            vendor,
            sort,
            seed,
            pages,
        } => {
            let sort: SortMode = sort.parse().map_err(anyhow::Error::msg)?;
            browse(
                &client,
                &shop,
                &config,
                BrowseArgs {
                    search,
                    collection,
                    vendor,
                    sort,
                    seed,
                    pages,
                },
            )
            .await;
        }
        Commands::Show { handle } => show(&client, &shop, &config, &handle).await,
        Commands::Facets => facets(&client, &shop, &config).await,
    }

    Ok(())
}

struct BrowseArgs {
    search: Option<String>,
    collection: Option<String>,
    vendor: Option<String>,
    sort: SortMode,
    seed: Option<f64>,
    pages: u32,
}

/// Fetches the catalog or prints the inline error message. Fetch failures
/// are the only errors the storefront surfaces to the user.
async fn fetch_or_report(
    client: &StorefrontClient,
    shop: &Shop,
    count: u32,
) -> Option<Vec<Product>> {
    match client.fetch_products(shop, count).await {
        Ok(products) => Some(products),
        Err(e) => {
            println!("Failed to load products: {e}");
            None
        }
    }
}

async fn browse(
    client: &Arc<StorefrontClient>,
    shop: &Shop,
    config: &vitrina_core::AppConfig,
    args: BrowseArgs,
) {
    let mut session = StorefrontSession::new(
        MemoryHistory::new(),
        &SessionConfig::from_app_config(config),
    );

    // The staged load: a small batch lands first, the larger background
    // batch replaces it, filters apply to whichever list is current.
    let mut events = spawn_catalog_load(
        Arc::clone(client),
        shop.clone(),
        LoadPlan::from_config(config),
    );
    while let Some(event) = events.recv().await {
        session.ingest(event);
    }

    if let LoadStatus::Failed(message) = session.status() {
        println!("Failed to load products: {message}");
        return;
    }

    session.set_collection(args.collection);
    session.set_vendor(args.vendor);
    session.set_sort(args.sort);
    if let Some(term) = &args.search {
        session.set_search(term);
    }
    if let Some(seed) = args.seed {
        session.set_random_seed(seed);
    }
    for _ in 1..args.pages {
        session.load_more().await;
    }

    let visible = session.visible();
    if visible.is_empty() {
        println!("No products match the current filters.");
        return;
    }

    for product in &visible {
        let price = product.min_price();
        let stock = if product.variants.is_empty() || product.has_available_variants() {
            ""
        } else {
            "  [sold out]"
        };
        println!(
            "{:<40} {:<12} {:>8} {}  ({}){stock}",
            product.title, product.vendor, price.amount, price.currency_code, product.handle
        );
    }
    println!(
        "\nshowing {} of {} matching products{}",
        visible.len(),
        session.matched_count(),
        if session.has_more() {
            " — run with --pages to reveal more"
        } else {
            ""
        }
    );
}

async fn show(
    client: &StorefrontClient,
    shop: &Shop,
    config: &vitrina_core::AppConfig,
    handle: &str,
) {
    let Some(products) = fetch_or_report(client, shop, config.full_fetch_count).await else {
        return;
    };

    let Some(product) = match_handle(&products, handle) else {
        println!("No product matches handle \"{handle}\".");
        return;
    };

    println!("{}", product.title);
    println!("vendor: {}", product.vendor);
    let price = product.min_price();
    println!("from:   {} {}", price.amount, price.currency_code);
    if !product.description.is_empty() {
        println!("\n{}", product.description);
    }

    if !product.collections.is_empty() {
        println!("\ncollections:");
        for collection in &product.collections {
            println!("  - {}", collection.title);
            for metafield in &collection.metafields {
                println!("      {}.{} = {}", metafield.namespace, metafield.key, metafield.value);
            }
        }
    }

    if !product.variants.is_empty() {
        println!("\nvariants:");
        for variant in &product.variants {
            let availability = if variant.available_for_sale {
                format!("{} in stock", variant.quantity_available)
            } else {
                "sold out".to_string()
            };
            println!(
                "  {:<24} {:>8} {}  ({availability})",
                variant.title, variant.price.amount, variant.price.currency_code
            );
        }
    }

    // The carousel companion list: catalog-mates sharing a collection.
    let mut session = StorefrontSession::new(
        MemoryHistory::new(),
        &SessionConfig::from_app_config(config),
    );
    let open_handle = product.handle.clone();
    session.ingest(CatalogEvent::Loaded(products));
    session.open_product(&open_handle);
    let related = session.related_products();
    if !related.is_empty() {
        println!("\nrelated:");
        for p in related {
            println!("  {} ({})", p.title, p.handle);
        }
    }
}

async fn facets(client: &StorefrontClient, shop: &Shop, config: &vitrina_core::AppConfig) {
    let Some(products) = fetch_or_report(client, shop, config.full_fetch_count).await else {
        return;
    };

    println!("collections:");
    for title in collection_facets(&products) {
        println!("  {title}");
    }
    println!("vendors:");
    for vendor in vendor_facets(&products) {
        println!("  {vendor}");
    }
}
