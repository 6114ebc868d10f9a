//! YQL query paths: server-side JSON and CSV views of the same quote data.

use crate::columns::Catalog;
use crate::error::QuoteError;
use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;
use url::Url;

static YQL_BASE: Lazy<Url> = Lazy::new(|| {
    Url::parse("https://query.yahooapis.com/v1/public/yql").expect("YQL base URL should be valid")
});

static YQL_ENV: &str = "store://datatables.org/alltableswithkeys";

#[derive(Debug, Deserialize)]
struct YqlResponse {
    query: YqlQuery,
}

#[derive(Debug, Deserialize)]
struct YqlQuery {
    results: Option<YqlResults>,
}

#[derive(Debug, Deserialize)]
struct YqlResults {
    quote: QuoteRows,
}

/// YQL collapses a single-row result set to a bare object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum QuoteRows {
    Many(Vec<Map<String, Value>>),
    One(Box<Map<String, Value>>),
}

impl QuoteRows {
    fn into_rows(self) -> Vec<Map<String, Value>> {
        match self {
            QuoteRows::Many(rows) => rows,
            QuoteRows::One(row) => vec![*row],
        }
    }
}

fn yql_url(query: &str) -> Url {
    let mut url = YQL_BASE.clone();
    url.query_pairs_mut()
        .append_pair("q", query)
        .append_pair("format", "json");
    url
}

async fn run_query(client: &Client, url: Url) -> Result<Vec<Map<String, Value>>, QuoteError> {
    debug!(%url, "running YQL query");
    let resp: YqlResponse = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    Ok(resp
        .query
        .results
        .map(|r| r.quote.into_rows())
        .unwrap_or_default())
}

/// `select * from yahoo.finance.quoteslist` for `symbols`. Returns the
/// provider's quote objects as-is; only a limited column set exists on
/// this table.
pub async fn quotes_list(
    client: &Client,
    symbols: &[String],
) -> Result<Vec<Map<String, Value>>, QuoteError> {
    let placeholders = (0..symbols.len())
        .map(|n| format!("@s{}", n))
        .collect::<Vec<_>>()
        .join(", ");
    let query = format!(
        "select * from yahoo.finance.quoteslist where symbol in ({})",
        placeholders
    );

    let mut url = yql_url(&query);
    {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair("env", YQL_ENV);
        for (n, symbol) in symbols.iter().enumerate() {
            pairs.append_pair(&format!("s{}", n), symbol);
        }
    }
    run_query(client, url).await
}

/// `select * from csv` with the provider parsing quotes.csv server-side
/// for every catalog column. Problem columns come back silently mis-split
/// on this path; use the local parser when those matter.
pub async fn quotes_csv(
    client: &Client,
    symbols: &[String],
    catalog: &Catalog,
) -> Result<Vec<Map<String, Value>>, QuoteError> {
    let (names, codes): (Vec<_>, Vec<_>) = catalog.entries().unzip();
    let csv_url = super::csv::quotes_url(symbols, &codes.concat());
    let query = format!(
        "select * from csv where url=@url and columns='{}'",
        names.join(",")
    );

    let mut url = yql_url(&query);
    url.query_pairs_mut()
        .append_pair("diagnostics", "true")
        .append_pair("url", csv_url.as_str());
    run_query(client, url).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_quote_result_decodes_as_one_row() {
        let body = r#"{"query":{"count":1,"results":{"quote":{"symbol":"AAPL","LastTradePriceOnly":"150.00"}}}}"#;
        let resp: YqlResponse = serde_json::from_str(body).unwrap();
        let rows = resp.query.results.unwrap().quote.into_rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["symbol"], "AAPL");
    }

    #[test]
    fn multi_quote_result_decodes_as_many_rows() {
        let body = r#"{"query":{"count":2,"results":{"quote":[{"symbol":"AAPL"},{"symbol":"MSFT"}]}}}"#;
        let resp: YqlResponse = serde_json::from_str(body).unwrap();
        let rows = resp.query.results.unwrap().quote.into_rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1]["symbol"], "MSFT");
    }

    #[test]
    fn null_results_mean_no_rows() {
        let body = r#"{"query":{"count":0,"results":null}}"#;
        let resp: YqlResponse = serde_json::from_str(body).unwrap();
        assert!(resp.query.results.is_none());
    }
}
