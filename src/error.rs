//! Error taxonomy for quote fetching and row repair.

use thiserror::Error;

/// Errors surfaced by planning, fetching, and row reassembly.
#[derive(Error, Debug)]
pub enum QuoteError {
    /// A requested field name is not in the column catalog.
    #[error("unknown field `{0}`")]
    UnknownField(String),

    /// The provider request failed (transport error or non-success status).
    #[error("quote request failed: {0}")]
    Fetch(#[from] reqwest::Error),

    /// The line splitter could not parse the provider response at all.
    #[error("malformed CSV response: {0}")]
    Csv(#[from] csv::Error),

    /// A row had fewer cells than the number of requested fields.
    #[error("row has {got} cells, expected at least {want}")]
    MalformedRow { got: usize, want: usize },

    /// Tail repair produced the wrong number of values for the problem
    /// columns. The row cannot be mapped without guessing.
    #[error("tail repair produced {got} values for {want} problem columns")]
    Reassembly { got: usize, want: usize },
}
