//! End-to-end analysis over an in-memory price table.

use chrono::{Datelike, Days, Weekday};
use hindsight_eval::{
    AnalysisConfig, NORMALIZED_BASE, Window, analyze_periods, best_entries, normalize,
};
use hindsight_traits::{Date, PriceSeries, PriceTable};

fn d(y: i32, m: u32, day: u32) -> Date {
    Date::from_ymd_opt(y, m, day).unwrap()
}

/// Weekday prices from `start` to `end` inclusive, growing geometrically.
fn synthetic(symbol: &str, start: Date, end: Date, base: f64, daily: f64) -> PriceSeries {
    let mut points = Vec::new();
    let mut date = start;
    let mut price = base;
    while date <= end {
        if !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            points.push((date, price));
            price *= 1.0 + daily;
        }
        date = date + Days::new(1);
    }
    PriceSeries::new(symbol, points)
}

fn table() -> PriceTable {
    let start = d(2014, 6, 2);
    let end = d(2024, 5, 31);
    PriceTable::from_series(&[
        synthetic("TSM", start, end, 20.0, 0.0009),
        synthetic("AAPL", start, end, 23.0, 0.0008),
        synthetic("NKE", start, end, 50.0, 0.0002),
        synthetic("^GSPC", start, end, 1920.0, 0.0004),
    ])
    .unwrap()
}

#[test]
fn test_default_windows_over_ten_years() {
    let config = AnalysisConfig::default();
    let universe = config.universe().unwrap();
    let table = table();

    let periods = analyze_periods(&table, &universe, &config.windows).unwrap();
    assert_eq!(periods.len(), 3);

    assert_eq!(periods[0].start, d(2014, 6, 2));
    assert_eq!(periods[1].start, d(2019, 5, 31));
    assert_eq!(periods[2].start, d(2023, 5, 31));
    assert!(periods.iter().all(|p| p.end == d(2024, 5, 31)));

    for period in &periods {
        assert_eq!(period.total_return.len(), 4);
        assert_eq!(period.total_return.rows()[0].label, "TSMC (TSM)");
        assert!(
            period
                .cagr
                .rows()
                .windows(2)
                .all(|w| w[0].value >= w[1].value)
        );
    }
}

#[test]
fn test_analysis_is_deterministic() {
    let config = AnalysisConfig::default();
    let universe = config.universe().unwrap();
    let table = table();

    let first = analyze_periods(&table, &universe, &config.windows).unwrap();
    let second = analyze_periods(&table, &universe, &config.windows).unwrap();
    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a.total_return, b.total_return);
        assert_eq!(a.cagr, b.cagr);
    }
}

#[test]
fn test_five_year_window_anchored_on_june_first() {
    let dates = [d(2019, 5, 31), d(2019, 6, 1), d(2021, 3, 1), d(2024, 6, 1)];
    let series = PriceSeries::new("AAPL", dates.into_iter().zip([1.0, 2.0, 3.0, 4.0]));
    let table = PriceTable::from_series(&[series]).unwrap();

    let windowed = Window::trailing("5_year", 5).apply(&table).unwrap();
    let kept = windowed.dates().unwrap();
    assert_eq!(kept.first(), Some(&d(2019, 6, 1)));
    assert!(!kept.contains(&d(2019, 5, 31)));
}

#[test]
fn test_normalized_windows_start_at_base() {
    let config = AnalysisConfig::default();
    let universe = config.universe().unwrap();
    let table = table();

    for period in analyze_periods(&table, &universe, &config.windows).unwrap() {
        let normalized = normalize(&period.table).unwrap();
        for symbol in normalized.symbols() {
            let (_, first) = normalized.series(&symbol).unwrap().first().unwrap();
            assert_eq!(first, NORMALIZED_BASE);
        }
    }
}

#[test]
fn test_best_entries_on_rising_prices_buy_first_day() {
    let config = AnalysisConfig::default();
    let universe = config.universe().unwrap();
    let summary = best_entries(&table(), &universe, config.capital).unwrap();

    assert_eq!(summary.results.len(), 3);
    assert!(summary.results.iter().all(|r| r.buy_date == d(2014, 6, 2)));
    assert_eq!(summary.best().unwrap().ticker, "TSM");
}
