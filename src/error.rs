// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

//! Errors surfaced to the user while loading currencies or converting.

use std::fmt;
use thiserror::Error;

/// What a request was trying to fetch, used to word transport failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Currencies,
    ExchangeRate,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Currencies => write!(f, "currencies"),
            Resource::ExchangeRate => write!(f, "the exchange rate"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConvertError {
    #[error("an API key must be configured (FIXER_API_KEY or api_key in config.toml)")]
    MissingApiKey,

    #[error("amount must be a real number")]
    InvalidAmount,

    /// The request went through but the API reported a failure in its body.
    #[error("{0}")]
    Api(String),

    #[error("no exchange rate returned for {0}")]
    MissingRate(String),

    #[error("unable to fetch {resource}, server replied: {status} {status_text}")]
    Transport {
        resource: Resource,
        status: u16,
        status_text: String,
    },

    #[error("request failed: {0}")]
    Request(String),

    #[error("unexpected response body: {0}")]
    Decode(String),
}
