// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use hyper::ext::ReasonPhrase;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{ConvertError, Resource};
use crate::models::{CurrencyOption, LatestResponse, RateQuote, SymbolsResponse};

/// Remote exchange-rate API.
#[async_trait::async_trait]
pub trait RatesApi: Send + Sync {
    /// Lists the supported currencies.
    async fn get_symbols(&self) -> Result<Vec<CurrencyOption>, ConvertError>;

    /// Fetches the current rate of `code` against the API's base currency.
    async fn get_latest_rate(&self, code: &str) -> Result<RateQuote, ConvertError>;
}

/// Client for fixer.io and compatible APIs.
#[derive(Clone)]
pub struct FixerClient {
    client: Client,
    api_url: String,
    api_key: String,
}

impl FixerClient {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            api_url: config.api_url.clone(),
            api_key: config.api_key().to_string(),
        }
    }

    pub fn symbols_url(&self) -> String {
        format!("{}/symbols?access_key={}", self.api_url, self.api_key)
    }

    pub fn latest_url(&self, code: &str) -> String {
        format!(
            "{}/latest?symbols={}&access_key={}",
            self.api_url, code, self.api_key
        )
    }

    async fn make_request<T: DeserializeOwned>(
        &self,
        url: &str,
        resource: Resource,
    ) -> Result<T, ConvertError> {
        debug!(%resource, "sending request");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ConvertError::Request(e.without_url().to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(%resource, status = status.as_u16(), "request failed");
            // hyper only records the phrase when it differs from the canonical one.
            let reason = response
                .extensions()
                .get::<ReasonPhrase>()
                .map(|phrase| String::from_utf8_lossy(phrase.as_bytes()).into_owned());
            return Err(transport_error(resource, status, reason));
        }

        let text = response
            .text()
            .await
            .map_err(|e| ConvertError::Request(e.without_url().to_string()))?;

        serde_json::from_str(&text).map_err(|e| ConvertError::Decode(e.to_string()))
    }
}

fn transport_error(resource: Resource, status: StatusCode, reason: Option<String>) -> ConvertError {
    let status_text = reason
        .unwrap_or_else(|| status.canonical_reason().unwrap_or_default().to_string());
    ConvertError::Transport {
        resource,
        status: status.as_u16(),
        status_text,
    }
}

#[async_trait::async_trait]
impl RatesApi for FixerClient {
    async fn get_symbols(&self) -> Result<Vec<CurrencyOption>, ConvertError> {
        let response: SymbolsResponse = self
            .make_request(&self.symbols_url(), Resource::Currencies)
            .await?;
        response.into_catalog()
    }

    async fn get_latest_rate(&self, code: &str) -> Result<RateQuote, ConvertError> {
        let response: LatestResponse = self
            .make_request(&self.latest_url(code), Resource::ExchangeRate)
            .await?;
        response.into_quote(code)
    }
}
