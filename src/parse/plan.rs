use crate::columns::Catalog;
use crate::error::QuoteError;

/// The column request derived from a list of field names: which columns are
/// safe, which need tail repair, and the code sequence to put on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnPlan {
    /// Well-behaved fields, in request order.
    pub safe: Vec<&'static str>,
    /// Fields needing tail repair, in request order.
    pub problem: Vec<&'static str>,
    codes: Vec<&'static str>,
}

impl ColumnPlan {
    /// Every requested code, safe columns first, problem columns last.
    pub fn codes(&self) -> &[&'static str] {
        &self.codes
    }

    /// Value for the provider's `f=` parameter: the codes concatenated
    /// without separator.
    pub fn format_param(&self) -> String {
        self.codes.concat()
    }

    pub fn field_count(&self) -> usize {
        self.safe.len() + self.problem.len()
    }
}

/// Partition `fields` into safe and problem columns and fix the request
/// order: problem columns always go last, so their misformatted cells land
/// contiguously at the tail of each row where repair can find them.
/// Relative order within each partition follows the input; duplicates are
/// allowed and kept.
///
/// Fails with [`QuoteError::UnknownField`] before any fetch if a name is
/// not in the catalog.
pub fn plan<'a, I>(fields: I, catalog: &Catalog) -> Result<ColumnPlan, QuoteError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut safe = Vec::new();
    let mut problem = Vec::new();
    let mut safe_codes = Vec::new();
    let mut problem_codes = Vec::new();

    for field in fields {
        let (name, code) = catalog
            .lookup(field)
            .ok_or_else(|| QuoteError::UnknownField(field.to_string()))?;
        if catalog.is_problem(name) {
            problem.push(name);
            problem_codes.push(code);
        } else {
            safe.push(name);
            safe_codes.push(code);
        }
    }

    let mut codes = safe_codes;
    codes.extend(problem_codes);
    Ok(ColumnPlan { safe, problem, codes })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::YAHOO;

    #[test]
    fn partitions_and_orders_problem_codes_last() {
        let plan = plan(["Symbol", "Bid", "SharesOutstanding"], &YAHOO).unwrap();
        assert_eq!(plan.safe, vec!["Symbol", "Bid"]);
        assert_eq!(plan.problem, vec!["SharesOutstanding"]);
        assert_eq!(plan.codes(), &["s0", "b0", "j2"]);
        assert_eq!(plan.format_param(), "s0b0j2");
    }

    #[test]
    fn preserves_relative_order_within_partitions() {
        let fields = ["SharesFloat", "Volume", "SharesOutstanding", "Ask"];
        let plan = plan(fields, &YAHOO).unwrap();
        assert_eq!(plan.safe, vec!["Volume", "Ask"]);
        assert_eq!(plan.problem, vec!["SharesFloat", "SharesOutstanding"]);
        // no loss, no duplication
        assert_eq!(plan.field_count(), fields.len());
        assert_eq!(plan.codes().len(), fields.len());
        assert_eq!(plan.codes(), &["v0", "a0", "f6", "j2"]);
    }

    #[test]
    fn keeps_duplicates() {
        let plan = plan(["Bid", "Bid"], &YAHOO).unwrap();
        assert_eq!(plan.safe, vec!["Bid", "Bid"]);
        assert_eq!(plan.format_param(), "b0b0");
    }

    #[test]
    fn unknown_field_aborts_planning() {
        let err = plan(["Bid", "Bogus"], &YAHOO).unwrap_err();
        assert!(matches!(err, QuoteError::UnknownField(name) if name == "Bogus"));
    }
}
