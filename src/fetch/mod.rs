//! Provider endpoints: the raw quotes.csv feed and the YQL query service.

pub mod csv;
pub mod yql;

use crate::error::QuoteError;
use reqwest::Client;
use tracing::debug;
use url::Url;

/// GET `url` and return the body text, failing on transport errors and
/// non-success statuses alike.
pub(crate) async fn get_text(client: &Client, url: Url) -> Result<String, QuoteError> {
    debug!(%url, "requesting");
    Ok(client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?)
}
