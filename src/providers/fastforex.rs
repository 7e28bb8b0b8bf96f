use crate::core::currency::{Currency, RateProvider, RateTable};
use crate::core::error::RateError;
use anyhow::Context;
use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use tracing::{debug, instrument};

const FETCH_ONE_PATH: &str = "/fetch-one";

/// Client for the FastForex `fetch-one` endpoint.
pub struct FastForexProvider {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct FetchOneResponse {
    result: RateTable,
}

impl FastForexProvider {
    pub fn new(base_url: &str, api_key: &str) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("fxform/1.0")
            .build()
            .context("Failed to build HTTP client")?;
        Ok(FastForexProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            client,
        })
    }

    fn request_url(&self, from: Currency, to: Currency) -> Result<Url, RateError> {
        Url::parse_with_params(
            &format!("{}{}", self.base_url, FETCH_ONE_PATH),
            &[
                ("from", from.code()),
                ("to", to.code()),
                ("api_key", self.api_key.as_str()),
            ],
        )
        .map_err(|e| RateError::Malformed {
            pair: pair(from, to),
            reason: format!("invalid base url {}: {}", self.base_url, e),
        })
    }
}

fn pair(from: Currency, to: Currency) -> String {
    format!("{from}/{to}")
}

#[async_trait]
impl RateProvider for FastForexProvider {
    #[instrument(name = "FastForexFetch", skip(self), fields(from = %from, to = %to))]
    async fn fetch_rates(&self, from: Currency, to: Currency) -> Result<RateTable, RateError> {
        let url = self.request_url(from, to)?;
        debug!("Requesting rate from {}{}", self.base_url, FETCH_ONE_PATH);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| RateError::Request {
                pair: pair(from, to),
                source,
            })?;

        if !response.status().is_success() {
            return Err(RateError::Status {
                pair: pair(from, to),
                status: response.status(),
            });
        }

        let text = response.text().await.map_err(|source| RateError::Request {
            pair: pair(from, to),
            source,
        })?;

        let data: FetchOneResponse =
            serde_json::from_str(&text).map_err(|e| RateError::Malformed {
                pair: pair(from, to),
                reason: e.to_string(),
            })?;

        if !data.result.contains_key(to.code()) {
            return Err(RateError::MissingRate(to));
        }
        debug!(rates = ?data.result, "Received rates");
        Ok(data.result)
    }
}
