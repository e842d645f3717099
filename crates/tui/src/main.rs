mod app;
mod client;
mod config;
mod credentials;
mod error;
mod logging;
mod ui;

use std::process::ExitCode;

use engine::{Currency, Tracker};

use crate::{client::RateClient, credentials::ApiKey, error::Result};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("spendlog: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let config = config::load()?;
    let reference = config.reference_currency()?;
    let clock = config.clock()?;
    let api_key = ApiKey::load(&config.api_key_file)?;
    logging::init(&config)?;
    tracing::info!(base_url = %config.base_url, %reference, "starting spendlog");

    let client = RateClient::new(&config.base_url, api_key)?;
    probe_currencies(&client).await;

    let tracker = Tracker::builder(client)
        .reference(reference)
        .clock(clock)
        .build();
    let mut app = app::App::new(tracker);
    app.run().await?;

    let ledger = app.ledger();
    tracing::info!(
        entries = ledger.len(),
        total = %ledger.total().format(ledger.reference()),
        "session closed"
    );
    Ok(())
}

/// Warns about selectable currencies the provider does not list. Never fatal: conversion
/// failures are reported per expense.
async fn probe_currencies(client: &RateClient) {
    match client.currencies().await {
        Ok(supported) => {
            for currency in Currency::ALL {
                if !supported.contains(currency.code()) {
                    tracing::warn!(%currency, "currency not supported by the rate provider");
                }
            }
        }
        Err(err) => tracing::warn!("could not list provider currencies: {err}"),
    }
}
