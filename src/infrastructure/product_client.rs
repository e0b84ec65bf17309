use async_trait::async_trait;
use reqwest::{StatusCode, Url};

use crate::domain::ports::ProductCatalog;
use crate::domain::product::Product;

use super::retry::{retry_absorbing, AttemptError, RetryPolicy};

const PRODUCTS_SEGMENT: &str = "products";

/// Catalog client over HTTP.
///
/// `lookup` never fails: 404, timeouts, exhausted retries and undecodable
/// bodies all come back as `None`.
#[derive(Debug, Clone)]
pub struct HttpProductClient {
    http: reqwest::Client,
    base_url: String,
    policy: RetryPolicy,
}

impl HttpProductClient {
    pub fn new(base_url: impl Into<String>, policy: RetryPolicy) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, policy)
    }

    pub fn with_client(
        http: reqwest::Client,
        base_url: impl Into<String>,
        policy: RetryPolicy,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http,
            base_url,
            policy,
        }
    }

    /// `{base}/products/{id}` with the id percent-encoded as one path segment.
    /// `None` when the base cannot carry a path or the id is a dot segment.
    fn product_url(&self, product_id: &str) -> Option<Url> {
        if matches!(product_id, "" | "." | "..") {
            return None;
        }
        let mut url = Url::parse(&self.base_url).ok()?;
        url.path_segments_mut()
            .ok()?
            .pop_if_empty()
            .push(PRODUCTS_SEGMENT)
            .push(product_id);
        Some(url)
    }

    async fn fetch(&self, url: &str) -> Result<Product, AttemptError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| AttemptError::Transient(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(AttemptError::Terminal(format!("catalog returned {status}")));
        }
        if !status.is_success() {
            return Err(AttemptError::Transient(format!("catalog returned {status}")));
        }

        response
            .json::<Product>()
            .await
            .map_err(|e| AttemptError::Transient(format!("malformed product body: {e}")))
    }
}

#[async_trait]
impl ProductCatalog for HttpProductClient {
    async fn lookup(&self, product_id: &str) -> Option<Product> {
        let Some(url) = self.product_url(product_id) else {
            log::warn!(
                "Product '{}' cannot be addressed under {}",
                product_id,
                self.base_url
            );
            return None;
        };
        let label = format!("catalog lookup '{product_id}'");

        let url = url.as_str();
        let product = retry_absorbing(&self.policy, &label, move || self.fetch(url)).await;
        if product.is_none() {
            log::warn!("Product '{}' treated as unavailable", product_id);
        }
        product
    }
}
