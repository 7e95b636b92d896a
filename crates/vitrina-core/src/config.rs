use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for
/// testing or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_f64 = |var: &str, default: &str| -> Result<f64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<f64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let shop_domain = require("VITRINA_SHOP_DOMAIN")?;
    let storefront_token = require("VITRINA_STOREFRONT_TOKEN")?;

    let api_version = or_default("VITRINA_API_VERSION", "2023-10");
    let log_level = or_default("VITRINA_LOG_LEVEL", "info");
    let request_timeout_secs = parse_u64("VITRINA_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("VITRINA_USER_AGENT", "vitrina/0.1 (storefront-engine)");
    let max_retries = parse_u32("VITRINA_MAX_RETRIES", "3")?;
    let retry_backoff_base_secs = parse_u64("VITRINA_RETRY_BACKOFF_BASE_SECS", "5")?;

    let initial_fetch_count = parse_u32("VITRINA_INITIAL_FETCH_COUNT", "20")?;
    let full_fetch_count = parse_u32("VITRINA_FULL_FETCH_COUNT", "50")?;
    let page_size = parse_usize("VITRINA_PAGE_SIZE", "4")?;
    let preload_image_count = parse_usize("VITRINA_PRELOAD_IMAGE_COUNT", "4")?;
    let load_more_delay_ms = parse_u64("VITRINA_LOAD_MORE_DELAY_MS", "300")?;
    let scroll_threshold_px = parse_f64("VITRINA_SCROLL_THRESHOLD_PX", "500")?;
    let scroll_throttle_ms = parse_u64("VITRINA_SCROLL_THROTTLE_MS", "100")?;
    let prefs_path = PathBuf::from(or_default("VITRINA_PREFS_PATH", "./vitrina_prefs.json"));

    Ok(AppConfig {
        shop_domain,
        storefront_token,
        api_version,
        log_level,
        request_timeout_secs,
        user_agent,
        max_retries,
        retry_backoff_base_secs,
        initial_fetch_count,
        full_fetch_count,
        page_size,
        preload_image_count,
        load_more_delay_ms,
        scroll_threshold_px,
        scroll_throttle_ms,
        prefs_path,
    })
}
