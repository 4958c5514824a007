//! Plain-text tables for the terminal.

use hindsight_eval::{BestEntrySummary, Metric, PeriodAnalysis, Report};
use std::fmt::Write;

/// Format a number with two decimals and `,` thousands separators.
///
/// ```
/// use hindsight_report::format_thousands;
///
/// assert_eq!(format_thousands(1_857_142.857), "1,857,142.86");
/// assert_eq!(format_thousands(-950.0), "-950.00");
/// ```
#[must_use]
pub fn format_thousands(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if value < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        "-"
    } else {
        ""
    };
    format!("{sign}{grouped}.{frac_part}")
}

/// A ranked report under a title, one `label  value` line per row.
#[must_use]
pub fn format_report(title: &str, report: &Report) -> String {
    let width = report
        .rows()
        .iter()
        .map(|r| r.label.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = format!("{title}\n");
    for row in report.rows() {
        let _ = writeln!(out, "  {:<width$}  {:>10.2}", row.label, row.value);
    }
    out
}

/// Both reports of a period.
#[must_use]
pub fn format_period(analysis: &PeriodAnalysis) -> String {
    let label = &analysis.window.label;
    let reports: Vec<String> = Metric::ALL
        .into_iter()
        .map(|metric| format_report(&format!("{label} {metric} (%):"), analysis.report(metric)))
        .collect();
    format!(
        "{} ({} to {})\n\n{}",
        label,
        analysis.start,
        analysis.end,
        reports.join("\n")
    )
}

/// Best lump-sum entries, one block per ticker, followed by the overall best.
#[must_use]
pub fn format_entries(summary: &BestEntrySummary) -> String {
    let mut out = format!(
        "Best single entry per stock (capital {})\n",
        format_thousands(summary.capital)
    );

    for r in &summary.results {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", r.label);
        let _ = writeln!(out, "  Best Buy Date: {}", r.buy_date.format("%Y-%m-%d"));
        let _ = writeln!(out, "  Final Asset:   {}", format_thousands(r.final_value));
        let _ = writeln!(out, "  Total Profit:  {}", format_thousands(r.profit));
        let _ = writeln!(out, "  Return Rate:   {:.2} %", r.return_rate);
    }

    if let Some(best) = summary.best() {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "Best overall: {} on {} -> profit {} ({:.2}%)",
            best.label,
            best.buy_date.format("%Y-%m-%d"),
            format_thousands(best.profit),
            best.return_rate
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use hindsight_eval::{EntryResult, Window, analyze_period};
    use hindsight_traits::{Date, Listing, PriceSeries, PriceTable, Universe};

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0.0), "0.00");
        assert_eq!(format_thousands(999.994), "999.99");
        assert_eq!(format_thousands(1000.0), "1,000.00");
        assert_eq!(format_thousands(10_000_000.0), "10,000,000.00");
        assert_eq!(format_thousands(123_456.789), "123,456.79");
        assert_eq!(format_thousands(-1_234_567.891), "-1,234,567.89");
        assert_eq!(format_thousands(-0.001), "0.00");
    }

    #[test]
    fn test_format_report_alignment() {
        let report = Report::new(
            Metric::Cagr,
            [("Apple (AAPL)".to_string(), 25.1), ("TSMC (TSM)".to_string(), 27.456)],
        );
        let text = format_report("1_year CAGR (%):", &report);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "1_year CAGR (%):");
        assert_eq!(lines[1], "  TSMC (TSM)         27.46");
        assert_eq!(lines[2], "  Apple (AAPL)       25.10");
    }

    #[test]
    fn test_format_period_lists_both_metrics() {
        let dates = [
            Date::from_ymd_opt(2023, 6, 1).unwrap(),
            Date::from_ymd_opt(2024, 6, 3).unwrap(),
        ];
        let table = PriceTable::from_series(&[
            PriceSeries::new("AAPL", dates.into_iter().zip([100.0, 110.0])),
            PriceSeries::new("^GSPC", dates.into_iter().zip([4000.0, 5000.0])),
        ])
        .unwrap();
        let universe = Universe::new(
            vec![Listing::new("AAPL", "Apple")],
            Some(Listing::new("^GSPC", "S&P 500")),
        )
        .unwrap();
        let analysis = analyze_period(&table, &universe, &Window::full("1_year", 1)).unwrap();

        let text = format_period(&analysis);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "1_year (2023-06-01 to 2024-06-03)");
        assert_eq!(lines[2], "1_year Return (%):");
        assert_eq!(lines[3].split_whitespace().last(), Some("25.00"));
        assert!(lines.contains(&"1_year CAGR (%):"));
        let cagr_at = lines.iter().position(|l| *l == "1_year CAGR (%):").unwrap();
        assert!(cagr_at > 4);
    }

    #[test]
    fn test_format_entries_names_best() {
        let entry = |ticker: &str, profit: f64| EntryResult {
            ticker: ticker.to_string(),
            label: format!("{ticker} Inc ({ticker})"),
            buy_date: Date::from_ymd_opt(2016, 6, 27).unwrap(),
            buy_price: 1.0,
            sell_date: Date::from_ymd_opt(2024, 5, 31).unwrap(),
            sell_price: 2.0,
            shares: 1.0,
            final_value: 10_000_000.0 + profit,
            profit,
            return_rate: profit / 100_000.0,
        };
        let summary = BestEntrySummary {
            capital: 10_000_000.0,
            results: vec![entry("AAA", 1_500_000.0), entry("BBB", 92_345_678.9)],
        };

        let text = format_entries(&summary);
        assert!(text.starts_with("Best single entry per stock (capital 10,000,000.00)"));
        assert!(text.contains("  Final Asset:   102,345,678.90"));
        assert!(text.contains(
            "Best overall: BBB Inc (BBB) on 2016-06-27 -> profit 92,345,678.90 (923.46%)"
        ));
    }
}
