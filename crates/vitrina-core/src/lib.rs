//! Core domain model and shared state types for the vitrina storefront
//! engine: products and variants, the view-query value object, environment
//! configuration, and persisted user preferences.

use thiserror::Error;

mod app_config;
mod config;
mod events;
pub mod prefs;
mod query;
mod types;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use events::CatalogEvent;
pub use query::{SortMode, ViewQuery};
pub use types::{
    Collection, Metafield, Money, PriceRange, Product, ProductImage, SelectedOption, Variant,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
