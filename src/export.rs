// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use anyhow::{Context, Result};
use chrono::Local;
use csv::Writer;
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::CurrencyOption;

/// Write the currency list to `<output_dir>/currencies_<timestamp>.csv`.
pub fn export_currencies_csv(catalog: &[CurrencyOption], output_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let csv_path = output_dir.join(format!("currencies_{}.csv", timestamp));
    let mut writer = Writer::from_path(&csv_path)?;

    writer.write_record(["Code", "Name"])?;
    for option in catalog {
        writer.write_record([&option.code, &option.name])?;
    }
    writer.flush()?;

    Ok(csv_path)
}
