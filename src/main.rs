// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

mod api;
mod config;
mod converter;
mod error;
mod export;
mod logger;
mod models;
mod render;
mod session;
mod state;
mod widget;

use anyhow::Result;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::info;

use crate::api::{FixerClient, RatesApi};
use crate::render::{render_catalog, render_errors, render_state};
use crate::widget::Widget;

#[derive(Parser)]
#[command(author, version, about = "Convert amounts with live exchange rates", long_about = None)]
struct Cli {
    /// Path to the TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive converter session (default)
    Interactive,
    /// List the supported currencies
    Symbols {
        /// Also export the list to output/currencies_<timestamp>.csv
        #[arg(long)]
        csv: bool,
    },
    /// Convert a single amount
    Convert {
        #[arg(allow_hyphen_values = true)]
        amount: String,
        currency: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config_path = cli.config.unwrap_or_else(config::get_config_path);
    let config = config::load_config(&config_path)?;
    logger::init(cli.log_level.as_deref().unwrap_or(&config.log_level))?;
    info!(api_url = %config.api_url, config = %config_path.display(), "config loaded");

    let client = FixerClient::new(&config);
    let widget = Widget::new(client, config);

    match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Interactive => session::run(&widget).await,
        Commands::Symbols { csv } => list_currencies(&widget, csv).await,
        Commands::Convert { amount, currency } => {
            convert_once(&widget, &amount, &currency.trim().to_uppercase()).await
        }
    }
}

fn spinner(message: &'static str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

async fn wait_for(handle: JoinHandle<()>, message: &'static str) -> Result<()> {
    let spinner = spinner(message);
    let outcome = handle.await;
    spinner.finish_and_clear();
    outcome?;
    Ok(())
}

fn fail_on_errors<A: RatesApi + 'static>(widget: &Widget<A>) -> Result<()> {
    let count = widget.state().errors.len();
    if count > 0 {
        anyhow::bail!("{} error(s) reported", count);
    }
    Ok(())
}

async fn list_currencies<A: RatesApi + 'static>(widget: &Widget<A>, csv: bool) -> Result<()> {
    if let Some(handle) = widget.initialize() {
        wait_for(handle, "Fetching currencies...").await?;
    }

    {
        let state = widget.state();
        let mut stdout = io::stdout();
        render_errors(&mut stdout, &state)?;
        if state.errors.is_empty() {
            render_catalog(&mut stdout, &state)?;
        }
        if csv && !state.catalog.is_empty() {
            let path = export::export_currencies_csv(&state.catalog, Path::new("output"))?;
            println!("📁 CSV file created: {}", path.display());
        }
    }

    fail_on_errors(widget)
}

async fn convert_once<A: RatesApi + 'static>(
    widget: &Widget<A>,
    amount: &str,
    currency: &str,
) -> Result<()> {
    if widget.check_api_key() {
        widget.on_amount_input(amount);
        if let Some(handle) = widget.on_currency_change(currency) {
            wait_for(handle, "Fetching exchange rate...").await?;
        }
    }

    render_state(&mut io::stdout(), &widget.state())?;
    fail_on_errors(widget)
}
