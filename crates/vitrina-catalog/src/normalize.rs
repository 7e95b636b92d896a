//! Normalization from Storefront GraphQL wire types to
//! [`vitrina_core::Product`].
//!
//! Connection wrappers are flattened into plain lists, and the batch-level
//! uniqueness invariants are enforced here: duplicate product ids within a
//! batch and duplicate variant ids within a product are dropped with a
//! warning, first occurrence wins. Products with zero variants are kept —
//! the price range still renders.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use vitrina_core::{
    Collection, Metafield, Money, PriceRange, Product, ProductImage, SelectedOption, Variant,
};

use crate::types::{ProductsData, WireCollection, WireMoney, WireProduct, WireVariant};

/// Normalizes a full products response into domain products, enforcing
/// batch-level id uniqueness.
#[must_use]
pub fn normalize_catalog(data: ProductsData) -> Vec<Product> {
    let mut seen = HashSet::new();
    let mut products = Vec::with_capacity(data.products.edges.len());
    for edge in data.products.edges {
        let product = normalize_product(edge.node);
        if seen.insert(product.id.clone()) {
            products.push(product);
        } else {
            tracing::warn!(id = %product.id, "dropping duplicate product id in batch");
        }
    }
    products
}

/// Normalizes a single wire product into a domain [`Product`].
#[must_use]
pub fn normalize_product(node: WireProduct) -> Product {
    // Treat an empty category string as absent.
    let product_type = node.product_type.filter(|s| !s.is_empty());

    // A missing timestamp falls back to the epoch so date sorting stays
    // total across mixed batches.
    let created_at = node.created_at.unwrap_or(DateTime::<Utc>::UNIX_EPOCH);

    let collections = node
        .collections
        .edges
        .into_iter()
        .map(|e| normalize_collection(e.node))
        .collect();

    let images = node
        .images
        .edges
        .into_iter()
        .map(|e| ProductImage {
            id: e.node.id,
            url: e.node.url,
            alt_text: e.node.alt_text,
        })
        .collect();

    let mut seen_variants = HashSet::new();
    let mut variants = Vec::with_capacity(node.variants.edges.len());
    for edge in node.variants.edges {
        if seen_variants.insert(edge.node.id.clone()) {
            variants.push(normalize_variant(edge.node));
        } else {
            tracing::warn!(
                product = %node.id,
                variant = %edge.node.id,
                "dropping duplicate variant id"
            );
        }
    }

    Product {
        id: node.id,
        title: node.title,
        description: node.description,
        handle: node.handle,
        product_type,
        vendor: node.vendor.unwrap_or_default(),
        tags: node.tags,
        created_at,
        collections,
        images,
        price_range: PriceRange {
            min_variant_price: normalize_money(node.price_range.min_variant_price),
        },
        variants,
    }
}

fn normalize_collection(node: WireCollection) -> Collection {
    // One metafield slot is returned per requested identifier; undefined
    // identifiers come back as null and are dropped here.
    let metafields = node
        .metafields
        .unwrap_or_default()
        .into_iter()
        .flatten()
        .map(|m| Metafield {
            namespace: m.namespace,
            key: m.key,
            value: m.value,
        })
        .collect();

    Collection {
        id: node.id,
        title: node.title,
        handle: node.handle,
        metafields,
    }
}

fn normalize_variant(node: WireVariant) -> Variant {
    Variant {
        id: node.id,
        title: node.title,
        price: normalize_money(node.price),
        available_for_sale: node.available_for_sale,
        quantity_available: node.quantity_available.unwrap_or(0),
        selected_options: node
            .selected_options
            .into_iter()
            .map(|o| SelectedOption {
                name: o.name,
                value: o.value,
            })
            .collect(),
        sku: node.sku.filter(|s| !s.is_empty()),
    }
}

fn normalize_money(money: WireMoney) -> Money {
    Money {
        amount: money.amount,
        currency_code: money.currency_code,
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
