// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

//! Line-driven interactive session: the terminal stands in for the amount
//! field and the currency selector.

use anyhow::Result;
use std::io::{self, Write};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::api::RatesApi;
use crate::render::{render_catalog, render_state};
use crate::widget::Widget;

pub const HELP: &str = "\
Commands:
  amount <value>    set the amount to convert (alias: a)
  currency <code>   pick the target currency (alias: c)
  list              show the loaded currencies
  show              show the errors and the last result
  clear             clear displayed errors
  help              show this help
  quit              leave (alias: q, exit)";

#[derive(Debug, PartialEq)]
pub enum Command {
    Amount(String),
    Currency(String),
    List,
    Show,
    Clear,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

pub fn parse_command(line: &str) -> Command {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word.to_lowercase().as_str() {
        "" => Command::Empty,
        "amount" | "a" => Command::Amount(rest.to_string()),
        "currency" | "c" => Command::Currency(rest.to_uppercase()),
        "list" | "l" => Command::List,
        "show" | "s" => Command::Show,
        "clear" => Command::Clear,
        "help" | "h" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        _ => Command::Unknown(word.to_string()),
    }
}

/// Bootstraps the widget and processes commands from stdin until `quit` or
/// end of input. Results of background requests are printed as they land.
pub async fn run<A: RatesApi + 'static>(widget: &Widget<A>) -> Result<()> {
    println!("{}", HELP);
    if widget.initialize().is_none() {
        render_state(&mut io::stdout(), &widget.state())?;
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if !handle_command(widget, parse_command(&line))? {
                    break;
                }
            }
            _ = widget.changed() => {
                render_state(&mut io::stdout(), &widget.state())?;
            }
        }
    }

    Ok(())
}

fn handle_command<A: RatesApi + 'static>(widget: &Widget<A>, command: Command) -> Result<bool> {
    debug!(?command, "command");
    let mut stdout = io::stdout();
    match command {
        Command::Amount(value) => {
            // A spawned request renders once it completes; otherwise show the
            // validation outcome right away.
            if widget.on_amount_input(&value).is_none() {
                render_state(&mut stdout, &widget.state())?;
            }
        }
        Command::Currency(code) => {
            if widget.on_currency_change(&code).is_none() {
                render_state(&mut stdout, &widget.state())?;
            }
        }
        Command::List => render_catalog(&mut stdout, &widget.state())?,
        Command::Show => render_state(&mut stdout, &widget.state())?,
        Command::Clear => widget.state().clear_errors(),
        Command::Help => println!("{}", HELP),
        Command::Quit => return Ok(false),
        Command::Empty => {}
        Command::Unknown(word) => println!("Unknown command '{}', type 'help'", word),
    }
    stdout.flush()?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command("amount -42.5"), Command::Amount("-42.5".to_string()));
        assert_eq!(parse_command("  a   12 "), Command::Amount("12".to_string()));
        assert_eq!(parse_command("amount"), Command::Amount(String::new()));
        assert_eq!(parse_command("currency usd"), Command::Currency("USD".to_string()));
        assert_eq!(parse_command("C eur"), Command::Currency("EUR".to_string()));
        assert_eq!(parse_command("list"), Command::List);
        assert_eq!(parse_command("show"), Command::Show);
        assert_eq!(parse_command("clear"), Command::Clear);
        assert_eq!(parse_command("?"), Command::Help);
        assert_eq!(parse_command("exit"), Command::Quit);
        assert_eq!(parse_command("   "), Command::Empty);
        assert_eq!(parse_command("convert 1"), Command::Unknown("convert".to_string()));
    }
}
