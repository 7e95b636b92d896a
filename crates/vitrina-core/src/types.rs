use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A storefront product, normalized from the commerce API's connection
/// shapes into flat lists for filtering and display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Opaque API product ID, stored as a string (e.g.,
    /// `"gid://shopify/Product/7890123456"`). Stable across fetches.
    pub id: String,
    pub title: String,
    /// Plain-text product description. May be empty.
    pub description: String,
    /// URL-safe slug used for deep links (e.g., `"desert-bloom-poster"`).
    pub handle: String,
    /// Product category string. Empty strings are normalized to `None`.
    pub product_type: Option<String>,
    /// Brand label, the second filter axis. May be empty on stores that
    /// leave the vendor field unset.
    pub vendor: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    /// Collection memberships used for categorical filtering.
    #[serde(default)]
    pub collections: Vec<Collection>,
    /// Gallery images in display order. May be empty; rendering degrades
    /// to a placeholder.
    #[serde(default)]
    pub images: Vec<ProductImage>,
    /// Always present, even for products with zero variants.
    pub price_range: PriceRange,
    /// Purchasable variants in storefront order. May be empty.
    #[serde(default)]
    pub variants: Vec<Variant>,
}

impl Product {
    /// Returns the first gallery image, the one product cards render.
    #[must_use]
    pub fn first_image(&self) -> Option<&ProductImage> {
        self.images.first()
    }

    /// Returns `true` if at least one variant can currently be purchased.
    #[must_use]
    pub fn has_available_variants(&self) -> bool {
        self.variants.iter().any(|v| v.available_for_sale)
    }

    /// Returns the total number of variants for this product.
    #[must_use]
    pub fn variant_count(&self) -> usize {
        self.variants.len()
    }

    /// Titles of the collections this product belongs to, in API order.
    #[must_use]
    pub fn collection_titles(&self) -> Vec<&str> {
        self.collections.iter().map(|c| c.title.as_str()).collect()
    }

    /// The minimum variant price, the figure shown on product cards.
    #[must_use]
    pub fn min_price(&self) -> &Money {
        &self.price_range.min_variant_price
    }
}

/// A named grouping of products, used for categorical filtering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collection {
    pub id: String,
    pub title: String,
    pub handle: String,
    /// Free-form key/value metadata attached by the merchant (e.g., a
    /// playlist URL or a location label).
    #[serde(default)]
    pub metafields: Vec<Metafield>,
}

/// A single merchant-defined metadata entry on a collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metafield {
    pub namespace: String,
    pub key: String,
    pub value: String,
}

/// A product gallery image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductImage {
    pub id: Option<String>,
    /// Canonical CDN URL.
    pub url: String,
    pub alt_text: Option<String>,
}

/// The product-level price summary. The API guarantees this even for
/// products with no variants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceRange {
    pub min_variant_price: Money,
}

/// A monetary amount as the API returns it: a decimal string plus an
/// ISO 4217 currency code. Passed through without numeric conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// Decimal string, e.g. `"45.00"`.
    pub amount: String,
    /// ISO 4217 code, e.g. `"USD"`.
    pub currency_code: String,
}

/// A specific purchasable configuration of a product (e.g., a size/color
/// combination) with its own price and stock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Variant {
    pub id: String,
    pub title: String,
    pub price: Money,
    pub available_for_sale: bool,
    /// Remaining stock count as reported by the API.
    pub quantity_available: u32,
    /// Named option values that identify this variant, e.g.
    /// `Size: "A2"`, `Color: "Black"`.
    #[serde(default)]
    pub selected_options: Vec<SelectedOption>,
    pub sku: Option<String>,
}

/// One named option value on a variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectedOption {
    pub name: String,
    pub value: String,
}
