// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use crate::error::ConvertError;
use crate::models::{ConversionResult, RateQuote};

/// Parses the amount field. Negative input is accepted and made positive,
/// and blank input counts as zero.
pub fn parse_amount(input: &str) -> Result<f64, ConvertError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(0.0);
    }
    let amount = input
        .parse::<f64>()
        .map_err(|_| ConvertError::InvalidAmount)?
        .abs();

    if !amount.is_finite() {
        return Err(ConvertError::InvalidAmount);
    }
    Ok(amount)
}

pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Applies a quote to an already validated amount.
pub fn convert_amount(amount: f64, quote: &RateQuote) -> ConversionResult {
    ConversionResult {
        converted_amount: round_to_cents(amount * quote.rate),
        currency: quote.currency.clone(),
        base: quote.base.clone(),
        date: quote.date.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn quote(code: &str, rate: f64) -> RateQuote {
        RateQuote {
            currency: code.to_string(),
            rate,
            base: Some("EUR".to_string()),
            date: None,
        }
    }

    #[test]
    fn test_parse_amount() {
        assert_relative_eq!(parse_amount("42.5").unwrap(), 42.5);
        assert_relative_eq!(parse_amount("-42.5").unwrap(), 42.5);
        assert_relative_eq!(parse_amount(" 10 ").unwrap(), 10.0);
        assert_relative_eq!(parse_amount("1e3").unwrap(), 1000.0);
        assert_relative_eq!(parse_amount("0").unwrap(), 0.0);
    }

    #[test]
    fn test_blank_amount_is_zero() {
        assert_relative_eq!(parse_amount("").unwrap(), 0.0);
        assert_relative_eq!(parse_amount("   ").unwrap(), 0.0);
        assert_relative_eq!(parse_amount("\t").unwrap(), 0.0);
    }

    #[test]
    fn test_parse_amount_rejects_garbage() {
        for input in ["abc", "12abc", "NaN", "inf", "1,5", "- 3"] {
            assert_eq!(
                parse_amount(input),
                Err(ConvertError::InvalidAmount),
                "expected {input:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_negative_amount_conversion() {
        let amount = parse_amount("-42.5").unwrap();
        let result = convert_amount(amount, &quote("USD", 0.9));
        assert_relative_eq!(result.converted_amount, 38.25, epsilon = 1e-9);
        assert_eq!(result.currency, "USD");
        assert_eq!(format!("{:.2}", result.converted_amount), "38.25");
    }

    #[test]
    fn test_rounding() {
        assert_relative_eq!(round_to_cents(1.005 * 1000.0), 1005.0);
        assert_relative_eq!(round_to_cents(10.0 / 3.0), 3.33);
        assert_relative_eq!(round_to_cents(2.0 / 3.0), 0.67);

        let result = convert_amount(100.0, &quote("JPY", 161.23456));
        assert_relative_eq!(result.converted_amount, 16123.46, epsilon = 1e-9);
    }
}
