//! HTTP client for the Storefront GraphQL products endpoint.

use std::time::Duration;

use reqwest::Client;

use vitrina_core::{AppConfig, Product};

use crate::error::CatalogError;
use crate::normalize::normalize_catalog;
use crate::retry::retry_with_backoff;
use crate::types::ProductsEnvelope;

/// The products query sent to the Storefront API. Collections are limited
/// to the first 5 (with the merchant metafields the detail view renders),
/// images to the first 5, variants to the first 100.
const PRODUCTS_QUERY: &str = r#"
  query getProducts($first: Int!) {
    products(first: $first) {
      edges {
        node {
          id
          title
          description
          handle
          productType
          vendor
          tags
          createdAt
          collections(first: 5) {
            edges {
              node {
                id
                title
                handle
                metafields(identifiers: [
                  {namespace: "custom", key: "playlist"},
                  {namespace: "custom", key: "location"}
                ]) {
                  key
                  value
                  namespace
                }
              }
            }
          }
          images(first: 5) {
            edges {
              node {
                id
                url
                altText
              }
            }
          }
          priceRange {
            minVariantPrice {
              amount
              currencyCode
            }
          }
          variants(first: 100) {
            edges {
              node {
                id
                title
                price {
                  amount
                  currencyCode
                }
                availableForSale
                quantityAvailable
                selectedOptions {
                  name
                  value
                }
                sku
              }
            }
          }
        }
      }
    }
  }
"#;

/// Coordinates of the storefront the client talks to: origin, access
/// token, and API version.
#[derive(Debug, Clone)]
pub struct Shop {
    origin: String,
    token: String,
    api_version: String,
}

impl Shop {
    /// Builds shop coordinates from a domain (`"store.myshopify.com"`) or a
    /// full origin (`"http://127.0.0.1:9000"`). A bare domain gets `https://`.
    #[must_use]
    pub fn new(domain_or_origin: &str, token: &str, api_version: &str) -> Self {
        let trimmed = domain_or_origin.trim_end_matches('/');
        let origin = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            trimmed.to_owned()
        } else {
            format!("https://{trimmed}")
        };
        Self {
            origin,
            token: token.to_owned(),
            api_version: api_version.to_owned(),
        }
    }

    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            &config.shop_domain,
            &config.storefront_token,
            &config.api_version,
        )
    }

    /// The GraphQL endpoint URL for this shop.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidShopDomain`] if the origin does not
    /// form a valid URL base.
    fn endpoint(&self) -> Result<String, CatalogError> {
        let url = format!("{}/api/{}/graphql.json", self.origin, self.api_version);
        reqwest::Url::parse(&url).map_err(|e| CatalogError::InvalidShopDomain {
            domain: self.origin.clone(),
            reason: e.to_string(),
        })?;
        Ok(url)
    }

    /// Host portion of the origin, used in rate-limit errors.
    fn domain(&self) -> String {
        self.origin
            .trim_start_matches("https://")
            .trim_start_matches("http://")
            .to_owned()
    }
}

/// HTTP client for the Storefront GraphQL products endpoint.
///
/// Handles rate limiting (429), not-found (404), other non-2xx responses,
/// and GraphQL-level `errors` as typed [`CatalogError`]s. Transient errors
/// (429, network failures) are automatically retried with exponential
/// backoff up to `max_retries` additional attempts.
pub struct StorefrontClient {
    pub(crate) client: Client,
    max_retries: u32,
    backoff_base_secs: u64,
}

impl StorefrontClient {
    /// Creates a `StorefrontClient` with configured timeout, `User-Agent`,
    /// and retry policy.
    ///
    /// `max_retries` is the number of additional attempts after the first
    /// failure for retriable errors. Set to `0` to disable retries.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_secs: u64,
    ) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            max_retries,
            backoff_base_secs,
        })
    }

    /// Convenience constructor pulling timeout, UA, and retry policy from
    /// the app config.
    ///
    /// # Errors
    ///
    /// Same as [`StorefrontClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, CatalogError> {
        Self::new(
            config.request_timeout_secs,
            &config.user_agent,
            config.max_retries,
            config.retry_backoff_base_secs,
        )
    }

    /// Fetches the first `count` products from the shop and normalizes them
    /// into domain [`Product`]s, with automatic retry on transient errors.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::RateLimited`] — HTTP 429 after all retries exhausted.
    /// - [`CatalogError::NotFound`] — HTTP 404 (not retried).
    /// - [`CatalogError::UnexpectedStatus`] — any other non-2xx status.
    /// - [`CatalogError::Http`] — network failure after all retries exhausted.
    /// - [`CatalogError::Deserialize`] — response body is not valid JSON (not retried).
    /// - [`CatalogError::Api`] — the GraphQL layer rejected the query (not retried).
    pub async fn fetch_products(
        &self,
        shop: &Shop,
        count: u32,
    ) -> Result<Vec<Product>, CatalogError> {
        let url = shop.endpoint()?;
        let body = serde_json::json!({
            "query": PRODUCTS_QUERY,
            "variables": { "first": count },
        });

        retry_with_backoff(self.max_retries, self.backoff_base_secs, || {
            let url = url.clone();
            let body = body.clone();
            let token = shop.token.clone();
            let domain = shop.domain();
            async move {
                let response = self
                    .client
                    .post(&url)
                    .header(reqwest::header::CONTENT_TYPE, "application/json")
                    .header("X-Shopify-Storefront-Access-Token", &token)
                    .json(&body)
                    .send()
                    .await?;
                let status = response.status();

                if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                    let retry_after_secs = response
                        .headers()
                        .get(reqwest::header::RETRY_AFTER)
                        .and_then(|v| v.to_str().ok())
                        .and_then(|s| s.parse::<u64>().ok())
                        .unwrap_or(60);
                    return Err(CatalogError::RateLimited {
                        domain,
                        retry_after_secs,
                    });
                }

                if status == reqwest::StatusCode::NOT_FOUND {
                    return Err(CatalogError::NotFound { url });
                }

                if !status.is_success() {
                    return Err(CatalogError::UnexpectedStatus {
                        status: status.as_u16(),
                        url,
                    });
                }

                let text = response.text().await?;
                let envelope = serde_json::from_str::<ProductsEnvelope>(&text).map_err(|e| {
                    CatalogError::Deserialize {
                        context: format!("products response from {domain}"),
                        source: e,
                    }
                })?;

                if !envelope.errors.is_empty() {
                    let message = envelope
                        .errors
                        .iter()
                        .map(|e| e.message.as_str())
                        .collect::<Vec<_>>()
                        .join("; ");
                    return Err(CatalogError::Api { message });
                }

                let data = envelope.data.ok_or_else(|| CatalogError::Api {
                    message: "response contained neither data nor errors".to_owned(),
                })?;

                Ok(normalize_catalog(data))
            }
        })
        .await
    }
}
