//! Column planning and row repair for the provider's quote CSV.

pub mod plan;
pub mod repair;

pub use plan::{plan, ColumnPlan};
pub use repair::{reassemble, LeadingSpaceRepair, TailRepair};

use std::collections::BTreeMap;

/// One parsed quote row: requested field name → raw provider value.
pub type QuoteRow = BTreeMap<&'static str, String>;
