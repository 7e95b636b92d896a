//! Storefront GraphQL wire types for the products query.
//!
//! ## Observed shape
//!
//! The Storefront API wraps every list in a Relay-style connection:
//! `{ "edges": [ { "node": { ... } } ] }`. The top level is
//! `{ "data": { "products": { "edges": [...] } } }`, with an optional
//! sibling `errors` array when the query itself is rejected (bad token,
//! malformed query). Both `data` and `errors` can appear in the same
//! response; `errors` wins.
//!
//! ### `metafields`
//! Requested by identifier, so the API returns one array slot per
//! requested identifier — `null` for identifiers the collection does not
//! define. Modeled as `Option<Vec<Option<WireMetafield>>>` and flattened
//! during normalization.
//!
//! ### `createdAt`
//! ISO-8601 timestamp. Modeled as `Option` defensively; normalization
//! falls back to the Unix epoch so date sorting stays total.
//!
//! ### `availableForSale`
//! Boolean; defaults to `true` when absent (optimistic assumption).
//!
//! ### `quantityAvailable`
//! May be `null` for stores that do not expose inventory; treated as 0.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Relay-style connection wrapper: a list of edges, each holding a node.
#[derive(Debug, Deserialize)]
pub struct Connection<T> {
    #[serde(default = "Vec::new")]
    pub edges: Vec<Edge<T>>,
}

impl<T> Default for Connection<T> {
    fn default() -> Self {
        Self { edges: Vec::new() }
    }
}

/// A single edge in a connection.
#[derive(Debug, Deserialize)]
pub struct Edge<T> {
    pub node: T,
}

/// Top-level GraphQL response envelope.
#[derive(Debug, Deserialize)]
pub struct ProductsEnvelope {
    #[serde(default)]
    pub data: Option<ProductsData>,
    #[serde(default)]
    pub errors: Vec<GraphqlError>,
}

/// One entry of the GraphQL `errors` array.
#[derive(Debug, Deserialize)]
pub struct GraphqlError {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct ProductsData {
    pub products: Connection<WireProduct>,
}

/// A product node as returned by the Storefront API.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireProduct {
    /// Opaque global ID, e.g. `"gid://shopify/Product/7890123456"`.
    pub id: String,
    pub title: String,
    /// Plain-text description. May be absent for bare products.
    #[serde(default)]
    pub description: String,
    /// URL slug for deep links.
    pub handle: String,
    /// Category string; empty string is normalized to `None`.
    #[serde(default)]
    pub product_type: Option<String>,
    #[serde(default)]
    pub vendor: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub collections: Connection<WireCollection>,
    #[serde(default)]
    pub images: Connection<WireImage>,
    pub price_range: WirePriceRange,
    #[serde(default)]
    pub variants: Connection<WireVariant>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireCollection {
    pub id: String,
    pub title: String,
    pub handle: String,
    /// One slot per requested metafield identifier; `null` when the
    /// collection does not define that identifier.
    #[serde(default)]
    pub metafields: Option<Vec<Option<WireMetafield>>>,
}

#[derive(Debug, Deserialize)]
pub struct WireMetafield {
    pub namespace: String,
    pub key: String,
    pub value: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireImage {
    #[serde(default)]
    pub id: Option<String>,
    pub url: String,
    #[serde(default)]
    pub alt_text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WirePriceRange {
    pub min_variant_price: WireMoney,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireMoney {
    /// Decimal string, e.g. `"45.00"`. Passed through as-is.
    pub amount: String,
    pub currency_code: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireVariant {
    pub id: String,
    pub title: String,
    pub price: WireMoney,
    /// Defaults to `true` when absent (optimistic assumption).
    #[serde(default = "default_available")]
    pub available_for_sale: bool,
    #[serde(default)]
    pub quantity_available: Option<u32>,
    #[serde(default)]
    pub selected_options: Vec<WireSelectedOption>,
    #[serde(default)]
    pub sku: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WireSelectedOption {
    pub name: String,
    pub value: String,
}

/// Default for `WireVariant::available_for_sale` when the field is absent.
///
/// serde's `default = "..."` attribute expects a function path, so this
/// cannot be a `const`.
fn default_available() -> bool {
    true
}
