use anyhow::{bail, Result};
use quotescraper::quote::QuoteClient;
use reqwest::Client;
use std::env;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();

    // ─── 2) parse args ───────────────────────────────────────────────
    let mut symbols = Vec::new();
    let mut field_list: Option<String> = None;
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--fields" {
            field_list = args.next();
        } else {
            symbols.push(arg);
        }
    }
    if symbols.is_empty() {
        bail!("usage: quotescraper SYMBOL [SYMBOL..] [--fields Bid,Ask,..]");
    }

    // ─── 3) fetch one batch ──────────────────────────────────────────
    let client = QuoteClient::new(Client::new());
    let records = match &field_list {
        Some(list) => {
            let fields: Vec<&str> = list.split(',').map(str::trim).collect();
            client.quotes(&symbols, fields).await?
        }
        None => client.quotes_all(&symbols).await?,
    };
    info!(rows = records.len(), "fetched quotes");

    // ─── 4) emit one JSON record per symbol ──────────────────────────
    for record in &records {
        println!("{}", serde_json::to_string(record)?);
    }
    Ok(())
}
