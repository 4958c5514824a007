//! Best single lump-sum entry date in hindsight.
//!
//! For each equity the whole capital is invested on one past trading day and
//! held until the last available date. The search picks the buy date with the
//! highest profit.

use crate::returns::{ensure_positive, round2};
use hindsight_traits::{Date, HindsightError, PriceSeries, PriceTable, Result, Universe};
use serde::{Deserialize, Serialize};

/// The best lump-sum entry for one ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryResult {
    /// Ticker symbol.
    pub ticker: String,
    /// Display label, e.g. `"Apple (AAPL)"`.
    pub label: String,
    /// Buy date with the highest profit.
    pub buy_date: Date,
    /// Price paid on `buy_date`.
    pub buy_price: f64,
    /// Last available date, where the position is valued.
    pub sell_date: Date,
    /// Price on `sell_date`.
    pub sell_price: f64,
    /// Fractional shares bought.
    pub shares: f64,
    /// Position value on `sell_date`, rounded to cents.
    pub final_value: f64,
    /// `final_value - capital`, rounded to cents.
    pub profit: f64,
    /// `profit / capital` in percent, rounded to two decimals.
    pub return_rate: f64,
}

/// Find the buy date that maximizes profit for `series`.
///
/// Every date before the last one is a candidate. Dates are scanned forward
/// and only a strictly larger profit replaces the incumbent, so the earliest
/// date wins a tie.
///
/// # Errors
///
/// - [`HindsightError::InvalidData`] if `capital` is not a positive number
/// - [`HindsightError::InsufficientData`] if the series has fewer than two prices
/// - [`HindsightError::InvalidPrice`] if any price is not positive
pub fn best_entry(series: &PriceSeries, label: &str, capital: f64) -> Result<EntryResult> {
    if !(capital.is_finite() && capital > 0.0) {
        return Err(HindsightError::InvalidData(format!(
            "capital must be positive, got {capital}"
        )));
    }

    let symbol = series.symbol();
    let Some((&(sell_date, sell_price), candidates)) = series.points().split_last() else {
        return Err(HindsightError::InsufficientData(format!(
            "{symbol} has no prices"
        )));
    };
    if candidates.is_empty() {
        return Err(HindsightError::InsufficientData(format!(
            "{symbol} needs at least 2 prices to pick an entry"
        )));
    }
    ensure_positive(symbol, "sell", sell_price)?;

    let mut best: Option<(Date, f64, f64)> = None;
    for &(date, buy_price) in candidates {
        ensure_positive(symbol, "buy", buy_price)?;
        let shares = capital / buy_price;
        let profit = shares * sell_price - capital;
        if best.is_none_or(|(_, _, incumbent)| profit > incumbent) {
            best = Some((date, buy_price, profit));
        }
    }

    let (buy_date, buy_price, profit) = best.ok_or_else(|| {
        HindsightError::InsufficientData(format!("{symbol} has no candidate buy dates"))
    })?;
    let shares = capital / buy_price;

    Ok(EntryResult {
        ticker: symbol.to_string(),
        label: label.to_string(),
        buy_date,
        buy_price,
        sell_date,
        sell_price,
        shares,
        final_value: round2(shares * sell_price),
        profit: round2(profit),
        return_rate: round2(profit / capital * 100.0),
    })
}

/// Best entries for every equity of a universe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestEntrySummary {
    /// Capital invested per ticker.
    pub capital: f64,
    /// One result per equity, in universe order.
    pub results: Vec<EntryResult>,
}

impl BestEntrySummary {
    /// The result with the highest rounded profit; the first one listed wins
    /// a tie.
    #[must_use]
    pub fn best(&self) -> Option<&EntryResult> {
        self.results.iter().fold(None, |best, r| match best {
            Some(b) if r.profit <= b.profit => Some(b),
            _ => Some(r),
        })
    }
}

/// Run [`best_entry`] for every equity in `universe`. The market index is
/// not a candidate.
///
/// # Errors
///
/// Fails on the first ticker that is missing or cannot be evaluated.
pub fn best_entries(
    table: &PriceTable,
    universe: &Universe,
    capital: f64,
) -> Result<BestEntrySummary> {
    let mut results = Vec::with_capacity(universe.equities.len());
    for listing in &universe.equities {
        let series = table.series(&listing.ticker)?;
        let result = best_entry(&series, &listing.label(), capital)?;
        tracing::debug!(
            ticker = %result.ticker,
            buy_date = %result.buy_date,
            profit = result.profit,
            "best entry found"
        );
        results.push(result);
    }

    Ok(BestEntrySummary { capital, results })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use hindsight_traits::Listing;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd_opt(y, m, day).unwrap()
    }

    fn series(symbol: &str, prices: &[f64]) -> PriceSeries {
        let start = d(2024, 1, 1);
        PriceSeries::new(
            symbol,
            prices
                .iter()
                .enumerate()
                .map(|(i, &p)| (start + chrono::Days::new(i as u64), p)),
        )
    }

    #[test]
    fn test_picks_lowest_buy_price() {
        let s = series("NKE", &[100.0, 90.0, 80.0, 70.0, 200.0]);
        let r = best_entry(&s, "Nike (NKE)", 1_000_000.0).unwrap();

        assert_eq!(r.buy_date, d(2024, 1, 4));
        assert_eq!(r.buy_price, 70.0);
        assert_eq!(r.sell_date, d(2024, 1, 5));
        assert_relative_eq!(r.shares, 1_000_000.0 / 70.0);
        assert_eq!(r.final_value, 2_857_142.86);
        assert_eq!(r.profit, 1_857_142.86);
        assert_eq!(r.return_rate, 185.71);
    }

    #[test]
    fn test_tie_goes_to_earliest_date() {
        let s = series("AAPL", &[50.0, 80.0, 50.0, 120.0]);
        let r = best_entry(&s, "Apple (AAPL)", 10_000.0).unwrap();
        assert_eq!(r.buy_date, d(2024, 1, 1));
    }

    #[test]
    fn test_falling_prices_still_pick_a_date() {
        let s = series("TSM", &[100.0, 120.0, 150.0, 90.0]);
        let r = best_entry(&s, "TSMC (TSM)", 1_000.0).unwrap();
        assert_eq!(r.buy_date, d(2024, 1, 1));
        assert_eq!(r.profit, -100.0);
        assert_eq!(r.return_rate, -10.0);
    }

    #[test]
    fn test_rejects_bad_input() {
        let one = series("TSM", &[100.0]);
        assert!(matches!(
            best_entry(&one, "TSMC (TSM)", 1_000.0),
            Err(HindsightError::InsufficientData(_))
        ));

        let ok = series("TSM", &[100.0, 110.0]);
        assert!(matches!(
            best_entry(&ok, "TSMC (TSM)", 0.0),
            Err(HindsightError::InvalidData(_))
        ));

        let negative = series("TSM", &[100.0, -1.0, 110.0]);
        assert!(matches!(
            best_entry(&negative, "TSMC (TSM)", 1_000.0),
            Err(HindsightError::InvalidPrice(_))
        ));
    }

    #[test]
    fn test_best_entries_skips_index_and_picks_global_best() {
        let table = PriceTable::from_series(&[
            series("AAPL", &[10.0, 20.0, 30.0]),
            series("NKE", &[10.0, 5.0, 30.0]),
            series("^GSPC", &[1.0, 0.5, 100.0]),
        ])
        .unwrap();
        let universe = Universe::new(
            vec![Listing::new("AAPL", "Apple"), Listing::new("NKE", "Nike")],
            Some(Listing::new("^GSPC", "S&P 500")),
        )
        .unwrap();

        let summary = best_entries(&table, &universe, 100.0).unwrap();
        let tickers: Vec<&str> = summary.results.iter().map(|r| r.ticker.as_str()).collect();
        assert_eq!(tickers, vec!["AAPL", "NKE"]);
        assert_eq!(summary.best().unwrap().ticker, "NKE");
        assert_eq!(summary.best().unwrap().profit, 500.0);
    }

    #[test]
    fn test_global_best_tie_keeps_first() {
        let make = |ticker: &str, profit: f64| EntryResult {
            ticker: ticker.to_string(),
            label: ticker.to_string(),
            buy_date: d(2024, 1, 1),
            buy_price: 1.0,
            sell_date: d(2024, 1, 2),
            sell_price: 2.0,
            shares: 1.0,
            final_value: 2.0,
            profit,
            return_rate: 100.0,
        };
        let summary = BestEntrySummary {
            capital: 1.0,
            results: vec![make("A", 5.0), make("B", 5.0), make("C", 4.0)],
        };
        assert_eq!(summary.best().unwrap().ticker, "A");
        assert!(BestEntrySummary { capital: 1.0, results: vec![] }.best().is_none());
    }
}
