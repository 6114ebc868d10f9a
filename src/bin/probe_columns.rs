//! Requests each catalog column by itself for one symbol and reports any
//! whose response splits into more than one cell, i.e. candidates for the
//! problem-column set.

use anyhow::Result;
use csv::ReaderBuilder;
use quotescraper::columns::YAHOO;
use quotescraper::fetch;
use reqwest::Client;
use std::env;
use std::io::Cursor;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env_filter).init();

    let symbol = env::args().nth(1).unwrap_or_else(|| "AAPL".to_string());
    let symbols = vec![symbol.clone()];
    let client = Client::new();
    info!(%symbol, columns = YAHOO.len(), "probing columns one at a time");

    for (name, code) in YAHOO.entries() {
        let text = match fetch::csv::fetch_quotes(&client, &symbols, code).await {
            Ok(text) => text,
            Err(e) => {
                warn!(column = name, error = %e, "request failed");
                continue;
            }
        };

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(Cursor::new(text));
        if let Some(record) = reader.records().next() {
            let record = record?;
            if record.len() != 1 {
                info!(column = name, code, cells = record.len(), row = ?record, "splits into multiple cells");
            }
        }
    }
    Ok(())
}
