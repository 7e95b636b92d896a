use std::path::PathBuf;

#[derive(Clone)]
pub struct AppConfig {
    /// Storefront domain, e.g. `"example-store.myshopify.com"`.
    pub shop_domain: String,
    /// Storefront API access token sent with every catalog request.
    pub storefront_token: String,
    /// Storefront API version segment, e.g. `"2023-10"`.
    pub api_version: String,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub max_retries: u32,
    pub retry_backoff_base_secs: u64,
    /// Product count for the fast initial fetch.
    pub initial_fetch_count: u32,
    /// Product count for the larger background fetch.
    pub full_fetch_count: u32,
    /// Items revealed per page of the derived view.
    pub page_size: usize,
    /// How many leading product images to warm after the initial fetch.
    pub preload_image_count: usize,
    /// Artificial delay before a load-more advance lands, in milliseconds.
    pub load_more_delay_ms: u64,
    /// Distance from the bottom of the content at which scrolling triggers
    /// another page, in pixels.
    pub scroll_threshold_px: f64,
    /// Minimum spacing between scroll evaluations, in milliseconds.
    pub scroll_throttle_ms: u64,
    /// Where the preference store persists consent and theme choices.
    pub prefs_path: PathBuf,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("shop_domain", &self.shop_domain)
            .field("storefront_token", &"[redacted]")
            .field("api_version", &self.api_version)
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_secs", &self.retry_backoff_base_secs)
            .field("initial_fetch_count", &self.initial_fetch_count)
            .field("full_fetch_count", &self.full_fetch_count)
            .field("page_size", &self.page_size)
            .field("preload_image_count", &self.preload_image_count)
            .field("load_more_delay_ms", &self.load_more_delay_ms)
            .field("scroll_threshold_px", &self.scroll_threshold_px)
            .field("scroll_throttle_ms", &self.scroll_throttle_ms)
            .field("prefs_path", &self.prefs_path)
            .finish()
    }
}
