use crate::error::QuoteError;
use once_cell::sync::Lazy;
use reqwest::Client;
use tracing::debug;
use url::Url;

static QUOTES_CSV_BASE: Lazy<Url> = Lazy::new(|| {
    Url::parse("http://download.finance.yahoo.com/d/quotes.csv")
        .expect("quotes.csv base URL should be valid")
});

/// Build the quotes.csv request URL: `s` is the comma-joined symbol list,
/// `f` the concatenated two-character column codes.
pub fn quotes_url(symbols: &[String], format: &str) -> Url {
    let mut url = QUOTES_CSV_BASE.clone();
    url.query_pairs_mut()
        .append_pair("s", &symbols.join(","))
        .append_pair("f", format);
    url
}

/// Fetch the raw delimited text for `symbols`, one line per symbol in
/// request order. No retries; a failed request surfaces as a single
/// [`QuoteError::Fetch`].
pub async fn fetch_quotes(
    client: &Client,
    symbols: &[String],
    format: &str,
) -> Result<String, QuoteError> {
    debug!(symbols = symbols.len(), format, "fetching quote csv");
    super::get_text(client, quotes_url(symbols, format)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_url_carries_symbols_and_format() {
        let symbols = vec!["AAPL".to_string(), "MSFT".to_string()];
        let url = quotes_url(&symbols, "s0b0j2");
        assert_eq!(url.host_str(), Some("download.finance.yahoo.com"));
        assert_eq!(url.path(), "/d/quotes.csv");
        let query = url.query().unwrap();
        assert!(query.contains("s=AAPL%2CMSFT"));
        assert!(query.contains("f=s0b0j2"));
    }
}
