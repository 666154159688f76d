//! One-shot fetch through the API-check proxy.

use hackerlearn_gateway::ClientConfig;

use crate::error::MetricsError;
use crate::prometheus::{self, MetricSet};

/// Fetches `GET {api_check_url}?api=<target>` and parses the Prometheus text.
pub struct ApiCheckClient {
    http: reqwest::Client,
    url: reqwest::Url,
}

impl ApiCheckClient {
    pub fn new(config: &ClientConfig) -> Result<Self, MetricsError> {
        let url = reqwest::Url::parse(&config.api_check_url)
            .map_err(|_| MetricsError::InvalidUrl(config.api_check_url.clone()))?;
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, url })
    }

    pub fn url(&self) -> &reqwest::Url {
        &self.url
    }

    /// Raw exposition text for `target`.
    pub async fn fetch_text(&self, target: &str) -> Result<String, MetricsError> {
        let mut url = self.url.clone();
        url.query_pairs_mut().append_pair("api", target);

        let response = self.http.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), api = target, "api check failed");
            return Err(MetricsError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }

    pub async fn fetch(&self, target: &str) -> Result<MetricSet, MetricsError> {
        let text = self.fetch_text(target).await?;
        let set = prometheus::parse(&text);
        tracing::debug!(api = target, samples = set.len(), "fetched metrics");
        Ok(set)
    }
}
