// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use std::io::{self, Write};

use crate::models::ConversionResult;
use crate::state::AppState;

pub fn format_result(result: &ConversionResult) -> String {
    let mut line = format!(
        "That makes {:.2} {}!",
        result.converted_amount, result.currency
    );
    match (&result.base, &result.date) {
        (Some(base), Some(date)) => line.push_str(&format!(" (base {}, rates of {})", base, date)),
        (Some(base), None) => line.push_str(&format!(" (base {})", base)),
        _ => {}
    }
    line
}

pub fn render_errors<W: Write>(out: &mut W, state: &AppState) -> io::Result<()> {
    for error in &state.errors {
        writeln!(out, "❌ {}", error)?;
    }
    Ok(())
}

pub fn render_catalog<W: Write>(out: &mut W, state: &AppState) -> io::Result<()> {
    if state.catalog.is_empty() {
        writeln!(out, "No currencies loaded")?;
        return Ok(());
    }
    for option in &state.catalog {
        let marker = if option.code == state.selected_currency { "*" } else { " " };
        writeln!(out, "{} {:<4} {}", marker, option.code, option.name)?;
    }
    Ok(())
}

/// Errors first, then the last accepted result.
pub fn render_state<W: Write>(out: &mut W, state: &AppState) -> io::Result<()> {
    render_errors(out, state)?;
    if let Some(result) = &state.result {
        writeln!(out, "💱 {}", format_result(result))?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CurrencyOption;

    fn render<F>(f: F, state: &AppState) -> String
    where
        F: Fn(&mut Vec<u8>, &AppState) -> io::Result<()>,
    {
        let mut out = Vec::new();
        f(&mut out, state).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_format_result() {
        let result = ConversionResult {
            converted_amount: 38.25,
            currency: "USD".to_string(),
            base: None,
            date: None,
        };
        assert_eq!(format_result(&result), "That makes 38.25 USD!");

        let result = ConversionResult {
            converted_amount: 5.0,
            currency: "GBP".to_string(),
            base: Some("EUR".to_string()),
            date: Some("2024-03-01".to_string()),
        };
        assert_eq!(
            format_result(&result),
            "That makes 5.00 GBP! (base EUR, rates of 2024-03-01)"
        );
    }

    #[test]
    fn test_render_state() {
        let mut state = AppState::new();
        assert_eq!(render(render_state, &state), "");

        state.report_error("Invalid key");
        state.result = Some(ConversionResult {
            converted_amount: 1.5,
            currency: "CHF".to_string(),
            base: None,
            date: None,
        });
        let text = render(render_state, &state);
        assert_eq!(text, "❌ Invalid key\n💱 That makes 1.50 CHF!\n");
    }

    #[test]
    fn test_render_catalog_marks_selection() {
        let mut state = AppState::new();
        assert_eq!(render(render_catalog, &state), "No currencies loaded\n");

        state.catalog = vec![
            CurrencyOption {
                code: "EUR".to_string(),
                name: "Euro".to_string(),
            },
            CurrencyOption {
                code: "USD".to_string(),
                name: "US Dollar".to_string(),
            },
        ];
        state.select_currency("USD");
        assert_eq!(
            render(render_catalog, &state),
            "  EUR  Euro\n* USD  US Dollar\n"
        );
    }
}
