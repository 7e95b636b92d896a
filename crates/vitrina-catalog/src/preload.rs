//! Fire-and-forget image warming after the initial catalog fetch.

use futures::future::join_all;

use crate::client::StorefrontClient;

impl StorefrontClient {
    /// Warms the CDN cache for the given image URLs concurrently.
    ///
    /// Failures are logged at debug level and swallowed; preloading is an
    /// optimization and never surfaces as an application error.
    pub async fn preload_images(&self, urls: &[String]) {
        let requests = urls.iter().map(|url| {
            let client = self.client.clone();
            async move {
                match client.get(url).send().await {
                    Ok(response) if response.status().is_success() => {
                        // Drain the body so the transfer actually completes.
                        let _ = response.bytes().await;
                        tracing::debug!(%url, "preloaded image");
                    }
                    Ok(response) => {
                        tracing::debug!(%url, status = %response.status(), "image preload skipped");
                    }
                    Err(e) => {
                        tracing::debug!(%url, error = %e, "image preload failed");
                    }
                }
            }
        });
        join_all(requests).await;
    }
}
