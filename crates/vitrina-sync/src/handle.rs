//! Product-handle slugs and deep-link handle resolution.

use vitrina_core::Product;

/// Generates a URL-safe slug from a product title: lowercase, specials
/// stripped, whitespace hyphenated, runs collapsed, no leading/trailing
/// hyphens.
#[must_use]
pub fn slugify(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' {
                c
            } else if c.is_whitespace() {
                '-'
            } else {
                '\0'
            }
        })
        .filter(|&c| c != '\0')
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Resolves a deep-link handle against the loaded products.
///
/// Strategies in order — the first to succeed wins and later ones are not
/// attempted:
/// 1. exact handle match,
/// 2. ASCII-case-insensitive match,
/// 3. substring containment in either direction.
#[must_use]
pub fn match_handle<'a>(products: &'a [Product], handle: &str) -> Option<&'a Product> {
    if let Some(product) = products.iter().find(|p| p.handle == handle) {
        return Some(product);
    }

    if let Some(product) = products
        .iter()
        .find(|p| p.handle.eq_ignore_ascii_case(handle))
    {
        return Some(product);
    }

    let needle = handle.to_lowercase();
    products.iter().find(|p| {
        let candidate = p.handle.to_lowercase();
        candidate.contains(&needle) || needle.contains(&candidate)
    })
}
