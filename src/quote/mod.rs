//! Batch quote client: plan the columns, fetch one CSV response, repair
//! each row's tail, and key the cells by field name.

use crate::columns::{Catalog, YAHOO};
use crate::error::QuoteError;
use crate::fetch;
use crate::parse::{self, plan, ColumnPlan, LeadingSpaceRepair, QuoteRow, TailRepair};
use csv::ReaderBuilder;
use reqwest::Client;
use std::io::Cursor;
use tracing::{instrument, warn};

pub struct QuoteClient {
    http: Client,
    catalog: Catalog,
    repair: Box<dyn TailRepair + Send + Sync>,
}

impl QuoteClient {
    /// Client over the built-in provider catalog with the default repair
    /// policy.
    pub fn new(http: Client) -> Self {
        Self::with_catalog(http, YAHOO.clone())
    }

    /// Client over an alternate catalog.
    pub fn with_catalog(http: Client, catalog: Catalog) -> Self {
        QuoteClient {
            http,
            catalog,
            repair: Box::new(LeadingSpaceRepair),
        }
    }

    /// Replace the tail-repair policy.
    pub fn with_repair(mut self, repair: impl TailRepair + Send + Sync + 'static) -> Self {
        self.repair = Box::new(repair);
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Fetch `fields` for `symbols`: one record per symbol, in request
    /// order. The batch aborts on the first row that cannot be
    /// reassembled; use [`QuoteClient::parse_rows`] directly to skip bad
    /// rows instead.
    #[instrument(level = "info", skip(self, symbols, fields), fields(symbols = symbols.len()))]
    pub async fn quotes<'a, I>(
        &self,
        symbols: &[String],
        fields: I,
    ) -> Result<Vec<QuoteRow>, QuoteError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let plan = plan(fields, &self.catalog)?;
        let text = fetch::csv::fetch_quotes(&self.http, symbols, &plan.format_param()).await?;
        self.parse_rows(&plan, &text).collect()
    }

    /// Fetch every catalog column for `symbols`.
    pub async fn quotes_all(&self, symbols: &[String]) -> Result<Vec<QuoteRow>, QuoteError> {
        let fields: Vec<&str> = self.catalog.names().collect();
        self.quotes(symbols, fields).await
    }

    /// Lazily parse already-fetched quote text, yielding one result per
    /// CSV line in response order. Each call starts a fresh pass over the
    /// text, so callers can bring their own fetch or their own bad-row
    /// policy without touching the planner.
    pub fn parse_rows<'a>(
        &'a self,
        plan: &'a ColumnPlan,
        text: &str,
    ) -> impl Iterator<Item = Result<QuoteRow, QuoteError>> + 'a {
        let reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(Cursor::new(text.to_string()));
        reader.into_records().map(move |record| {
            let cells: Vec<String> = record?.iter().map(str::to_string).collect();
            parse::reassemble(plan, &cells, self.repair.as_ref()).map_err(|e| {
                warn!(error = %e, cells = cells.len(), "row reassembly failed");
                e
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> QuoteClient {
        QuoteClient::new(Client::new())
    }

    #[test]
    fn parses_one_record_per_symbol_in_order() {
        let client = client();
        let plan = plan(["Symbol", "Bid", "SharesOutstanding"], client.catalog()).unwrap();
        let text = "\"AAPL\",150.00,1, 234, 567\r\n\"MSFT\",280.10,7, 456, 789\r\n";

        let records: Vec<QuoteRow> = client
            .parse_rows(&plan, text)
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["Symbol"], "AAPL");
        assert_eq!(records[0]["SharesOutstanding"], "1234567");
        assert_eq!(records[1]["Symbol"], "MSFT");
        assert_eq!(records[1]["SharesOutstanding"], "7456789");
    }

    #[test]
    fn rows_without_problem_columns_pass_through() {
        let client = client();
        let plan = plan(["Symbol", "Bid"], client.catalog()).unwrap();
        let text = "\"AAPL\",150.00\r\n";

        let records: Vec<QuoteRow> = client
            .parse_rows(&plan, text)
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["Bid"], "150.00");
    }

    #[test]
    fn error_page_row_surfaces_malformed_row() {
        let client = client();
        let plan = plan(["Symbol", "Bid", "SharesOutstanding"], client.catalog()).unwrap();
        let text = "Missing Symbols List.\r\n";

        let err = client.parse_rows(&plan, text).next().unwrap().unwrap_err();
        assert!(matches!(err, QuoteError::MalformedRow { got: 1, want: 3 }));
    }

    #[test]
    fn parse_rows_is_restartable_per_call() {
        let client = client();
        let plan = plan(["Symbol", "Bid"], client.catalog()).unwrap();
        let text = "\"AAPL\",150.00\r\n";

        assert_eq!(client.parse_rows(&plan, text).count(), 1);
        assert_eq!(client.parse_rows(&plan, text).count(), 1);
    }
}
