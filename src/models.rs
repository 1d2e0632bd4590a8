// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use indexmap::IndexMap;
use serde::Deserialize;
use std::collections::HashMap;

use crate::error::ConvertError;

/// Error object embedded in an unsuccessful API body.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub info: Option<String>,
}

impl ApiErrorBody {
    fn into_error(self) -> ConvertError {
        let message = self
            .info
            .or(self.kind)
            .unwrap_or_else(|| "unknown API error".to_string());
        ConvertError::Api(message)
    }
}

fn api_failure(error: Option<ApiErrorBody>) -> ConvertError {
    match error {
        Some(body) => body.into_error(),
        None => ConvertError::Api("unknown API error".to_string()),
    }
}

/// Body of `GET /symbols`.
#[derive(Debug, Deserialize)]
pub struct SymbolsResponse {
    pub success: bool,
    /// Kept in the order the API sent them.
    #[serde(default)]
    pub symbols: IndexMap<String, String>,
    pub error: Option<ApiErrorBody>,
}

impl SymbolsResponse {
    pub fn into_catalog(self) -> Result<Vec<CurrencyOption>, ConvertError> {
        if !self.success {
            return Err(api_failure(self.error));
        }
        Ok(self
            .symbols
            .into_iter()
            .map(|(code, name)| CurrencyOption { code, name })
            .collect())
    }
}

/// Body of `GET /latest`.
#[derive(Debug, Deserialize)]
pub struct LatestResponse {
    pub success: bool,
    pub base: Option<String>,
    pub date: Option<String>,
    #[serde(default)]
    pub rates: HashMap<String, f64>,
    pub error: Option<ApiErrorBody>,
}

impl LatestResponse {
    pub fn into_quote(self, code: &str) -> Result<RateQuote, ConvertError> {
        if !self.success {
            return Err(api_failure(self.error));
        }
        let rate = self
            .rates
            .get(code)
            .copied()
            .ok_or_else(|| ConvertError::MissingRate(code.to_string()))?;
        Ok(RateQuote {
            currency: code.to_string(),
            rate,
            base: self.base,
            date: self.date,
        })
    }
}

/// One entry of the currency selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyOption {
    pub code: String,
    pub name: String,
}

/// The rate of one currency as returned by the latest endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct RateQuote {
    pub currency: String,
    pub rate: f64,
    pub base: Option<String>,
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConversionResult {
    pub converted_amount: f64,
    pub currency: String,
    pub base: Option<String>,
    pub date: Option<String>,
}
