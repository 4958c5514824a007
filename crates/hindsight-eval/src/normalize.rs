//! Rebasing price columns to a common starting value.

use crate::returns::ensure_positive;
use hindsight_traits::{HindsightError, PriceTable, Result};

/// The value every normalized column starts at.
pub const NORMALIZED_BASE: f64 = 100.0;

/// Rescale every column so its first available price equals
/// [`NORMALIZED_BASE`].
///
/// The date index and missing cells are preserved. The output is meant for
/// charts only; returns are always computed on raw prices.
///
/// # Errors
///
/// Returns [`HindsightError::InsufficientData`] for a column without prices
/// and [`HindsightError::InvalidPrice`] if a column starts at a non-positive
/// price.
pub fn normalize(table: &PriceTable) -> Result<PriceTable> {
    let dates = table.dates()?;

    let mut columns = Vec::new();
    for symbol in table.symbols() {
        let values = table.column_values(&symbol)?;
        let base = values.iter().flatten().next().copied().ok_or_else(|| {
            HindsightError::InsufficientData(format!("{symbol} has no prices to normalize"))
        })?;
        ensure_positive(&symbol, "first", base)?;

        let rebased = values
            .into_iter()
            .map(|v| v.map(|price| price / base * NORMALIZED_BASE))
            .collect();
        columns.push((symbol, rebased));
    }

    PriceTable::from_columns(&dates, columns)
}
