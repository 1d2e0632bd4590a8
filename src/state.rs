// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

//! In-memory state of the converter and the functions that update it.
//!
//! Nothing here performs I/O: the widget issues requests and feeds the
//! outcomes back through [`AppState::apply_catalog`] and
//! [`AppState::finish_conversion`], and the renderer reads the result.

use tracing::debug;

use crate::converter::{convert_amount, parse_amount};
use crate::error::ConvertError;
use crate::models::{ConversionResult, CurrencyOption, RateQuote};

/// A conversion ready to be sent to the API.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    pub amount: f64,
    pub currency: String,
    pub generation: u64,
}

#[derive(Debug, Default)]
pub struct AppState {
    pub amount_input: String,
    pub selected_currency: String,
    pub catalog: Vec<CurrencyOption>,
    pub errors: Vec<String>,
    pub result: Option<ConversionResult>,
    generation: u64,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        debug!(%message, "error reported");
        self.errors.push(message);
    }

    pub fn clear_errors(&mut self) {
        self.errors.clear();
    }

    pub fn set_amount(&mut self, input: &str) {
        self.amount_input = input.to_string();
    }

    pub fn select_currency(&mut self, code: &str) {
        self.selected_currency = code.to_string();
    }

    /// Outcome of the symbols request. Earlier errors are kept.
    pub fn apply_catalog(&mut self, outcome: Result<Vec<CurrencyOption>, ConvertError>) {
        match outcome {
            Ok(options) => {
                debug!(count = options.len(), "currency catalog loaded");
                self.catalog.extend(options);
            }
            Err(e) => self.report_error(e.to_string()),
        }
    }

    /// Starts a conversion from the current form values.
    ///
    /// Returns `None` when either field is empty or the amount does not
    /// parse; in the latter case a validation error is reported. Any call
    /// that gets past the empty-field check supersedes requests still in
    /// flight.
    pub fn begin_conversion(&mut self) -> Option<ConversionRequest> {
        if self.amount_input.is_empty() || self.selected_currency.is_empty() {
            return None;
        }

        self.clear_errors();
        self.generation += 1;

        match parse_amount(&self.amount_input) {
            Ok(amount) => Some(ConversionRequest {
                amount,
                currency: self.selected_currency.clone(),
                generation: self.generation,
            }),
            Err(e) => {
                self.report_error(e.to_string());
                None
            }
        }
    }

    /// Applies the response to `request`. Returns false when a newer
    /// conversion has started since and the response was dropped.
    pub fn finish_conversion(
        &mut self,
        request: &ConversionRequest,
        outcome: Result<RateQuote, ConvertError>,
    ) -> bool {
        if request.generation != self.generation {
            debug!(
                generation = request.generation,
                latest = self.generation,
                "discarding stale conversion response"
            );
            return false;
        }

        match outcome {
            Ok(quote) => self.result = Some(convert_amount(request.amount, &quote)),
            Err(e) => self.report_error(e.to_string()),
        }
        true
    }
}
