// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

//! Wires the API client to the application state.
//!
//! Every request runs on its own task so the caller (the interactive loop)
//! keeps reading input while responses are pending. Tasks report back by
//! updating the shared state and poking [`Widget::changed`].

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::api::RatesApi;
use crate::config::Config;
use crate::error::ConvertError;
use crate::state::{AppState, ConversionRequest};

pub struct Widget<A> {
    api: Arc<A>,
    config: Config,
    state: Arc<Mutex<AppState>>,
    changed: Arc<Notify>,
}

fn lock(state: &Mutex<AppState>) -> MutexGuard<'_, AppState> {
    // State updates never panic halfway, so a poisoned lock still holds
    // consistent data.
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<A: RatesApi + 'static> Widget<A> {
    pub fn new(api: A, config: Config) -> Self {
        Self {
            api: Arc::new(api),
            config,
            state: Arc::new(Mutex::new(AppState::new())),
            changed: Arc::new(Notify::new()),
        }
    }

    pub fn state(&self) -> MutexGuard<'_, AppState> {
        lock(&self.state)
    }

    /// Resolves after a background request has updated the state.
    pub async fn changed(&self) {
        self.changed.notified().await
    }

    /// Startup: checks the key and starts loading the currency list.
    ///
    /// Without a key nothing is requested; the configuration error is the
    /// only thing reported.
    pub fn initialize(&self) -> Option<JoinHandle<()>> {
        if !self.check_api_key() {
            warn!("no API key configured, skipping currency load");
            return None;
        }
        Some(self.spawn_load_currencies())
    }

    /// Reports a configuration error when no key is set.
    pub fn check_api_key(&self) -> bool {
        if self.config.is_api_key_present() {
            return true;
        }
        self.state().report_error(ConvertError::MissingApiKey.to_string());
        false
    }

    pub fn spawn_load_currencies(&self) -> JoinHandle<()> {
        let api = Arc::clone(&self.api);
        let state = Arc::clone(&self.state);
        let changed = Arc::clone(&self.changed);
        tokio::spawn(async move {
            load_currencies(api.as_ref(), &state).await;
            changed.notify_one();
        })
    }

    /// Amount field edited.
    pub fn on_amount_input(&self, input: &str) -> Option<JoinHandle<()>> {
        self.state().set_amount(input);
        self.convert_currency()
    }

    /// Currency selection changed.
    pub fn on_currency_change(&self, code: &str) -> Option<JoinHandle<()>> {
        self.state().select_currency(code);
        self.convert_currency()
    }

    /// Converts the current form values. Returns the request task, or `None`
    /// when nothing was sent (empty field or invalid amount).
    pub fn convert_currency(&self) -> Option<JoinHandle<()>> {
        let request = self.state().begin_conversion()?;
        info!(
            amount = request.amount,
            currency = %request.currency,
            generation = request.generation,
            "requesting exchange rate"
        );

        let api = Arc::clone(&self.api);
        let state = Arc::clone(&self.state);
        let changed = Arc::clone(&self.changed);
        Some(tokio::spawn(async move {
            if finish_conversion(api.as_ref(), &state, request).await {
                changed.notify_one();
            }
        }))
    }
}

pub async fn load_currencies<A: RatesApi + ?Sized>(api: &A, state: &Mutex<AppState>) {
    info!("loading currency list");
    let outcome = api.get_symbols().await;
    if let Err(e) = &outcome {
        warn!(error = %e, "failed to load currencies");
    }
    lock(state).apply_catalog(outcome);
}

async fn finish_conversion<A: RatesApi + ?Sized>(
    api: &A,
    state: &Mutex<AppState>,
    request: ConversionRequest,
) -> bool {
    let outcome = api.get_latest_rate(&request.currency).await;
    if let Err(e) = &outcome {
        warn!(error = %e, currency = %request.currency, "conversion failed");
    }
    lock(state).finish_conversion(&request, outcome)
}
