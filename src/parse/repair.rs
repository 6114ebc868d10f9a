use super::{ColumnPlan, QuoteRow};
use crate::error::QuoteError;

/// Policy for rebuilding problem-column values from the comma-fragmented
/// cells at the tail of a raw row.
pub trait TailRepair {
    /// Rebuild exactly `want` values from `tail`, or fail with
    /// [`QuoteError::Reassembly`] when the cells cannot be cleanly
    /// partitioned.
    fn repair(&self, tail: &[String], want: usize) -> Result<Vec<String>, QuoteError>;
}

/// Default repair policy. The provider separates columns with a bare comma
/// but pads the commas it embeds inside a split number with a following
/// space, so after CSV splitting a cell with leading whitespace is a
/// continuation of the value opened by the previous cell. Continuations are
/// stripped of that padding and concatenated onto the open value.
///
/// This is an inference about the provider's formatting, not a guarantee:
/// a value that legitimately starts with whitespace, or a response without
/// the post-comma space, defeats it. The policy refuses rather than
/// guesses in those cases.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeadingSpaceRepair;

impl TailRepair for LeadingSpaceRepair {
    fn repair(&self, tail: &[String], want: usize) -> Result<Vec<String>, QuoteError> {
        let mut values: Vec<String> = Vec::with_capacity(want);
        let mut open: Option<String> = None;

        for cell in tail {
            if cell.starts_with(|c: char| c.is_whitespace()) {
                match open.as_mut() {
                    Some(value) => value.push_str(cell.trim_start()),
                    // a continuation with nothing open: the heuristic cannot
                    // tell which value this fragment belongs to
                    None => return Err(QuoteError::Reassembly { got: values.len(), want }),
                }
            } else {
                if let Some(value) = open.take() {
                    values.push(value);
                }
                open = Some(cell.clone());
            }
        }
        if let Some(value) = open {
            values.push(value);
        }

        if values.len() != want {
            return Err(QuoteError::Reassembly { got: values.len(), want });
        }
        Ok(values)
    }
}

/// Split one raw CSV row into safe cells and the problem-column tail,
/// repair the tail, and zip both back into a record keyed by field name.
///
/// The row must carry at least one cell per requested field; longer rows
/// are expected whenever a problem value was split by the provider's
/// unquoted commas. The caller always gets a complete record or an error,
/// never a partially filled one.
pub fn reassemble(
    plan: &ColumnPlan,
    row: &[String],
    repair: &dyn TailRepair,
) -> Result<QuoteRow, QuoteError> {
    let want = plan.field_count();
    if row.len() < want {
        return Err(QuoteError::MalformedRow { got: row.len(), want });
    }

    let (safe_cells, tail) = row.split_at(plan.safe.len());
    let repaired = repair.repair(tail, plan.problem.len())?;

    let mut record = QuoteRow::new();
    for (&name, cell) in plan.safe.iter().zip(safe_cells) {
        record.insert(name, cell.clone());
    }
    for (&name, value) in plan.problem.iter().zip(repaired) {
        record.insert(name, value);
    }
    Ok(record)
}
