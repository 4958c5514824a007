//! Layering of defaults, config file and command-line flags.

use crate::{AnalysisArgs, data::parse_date};
use anyhow::{Context, Result, bail};
use hindsight_eval::AnalysisConfig;
use hindsight_traits::Listing;
use std::fs;

/// Build the run configuration: defaults, then the JSON file, then flags.
pub(crate) fn load_config(args: &AnalysisArgs) -> Result<AnalysisConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => AnalysisConfig::default(),
    };

    if !args.symbols.is_empty() {
        config.equities = args
            .symbols
            .iter()
            .map(|s| parse_listing(s))
            .collect::<Result<_>>()?;
    }
    if let Some(index) = &args.index {
        config.index = if index.eq_ignore_ascii_case("none") {
            None
        } else {
            Some(parse_listing(index)?)
        };
    }
    if let Some(start) = &args.start {
        config.start = parse_date(start)?;
    }
    if let Some(end) = &args.end {
        config.end = parse_date(end)?;
    }
    if let Some(capital) = args.capital {
        config.capital = capital;
    }
    if let Some(dir) = &args.output_dir {
        config.output_dir.clone_from(dir);
    }
    if args.no_charts {
        config.charts = false;
    }

    config.validate()?;
    tracing::debug!(?config, "resolved configuration");
    Ok(config)
}

/// Parse `TICKER=Name`; a bare ticker is its own name.
pub(crate) fn parse_listing(raw: &str) -> Result<Listing> {
    let (ticker, name) = raw.split_once('=').unwrap_or((raw, raw));
    let (ticker, name) = (ticker.trim(), name.trim());
    if ticker.is_empty() {
        bail!("empty ticker in '{raw}'");
    }
    Ok(Listing::new(ticker, if name.is_empty() { ticker } else { name }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_listing() {
        let l = parse_listing("TSM=TSMC").unwrap();
        assert_eq!(l.label(), "TSMC (TSM)");

        let l = parse_listing(" ^GSPC = S&P 500 ").unwrap();
        assert_eq!(l.label(), "S&P 500 (^GSPC)");

        assert_eq!(parse_listing("MSFT").unwrap().label(), "MSFT (MSFT)");
        assert!(parse_listing("=Nothing").is_err());
    }

    #[test]
    fn test_defaults_without_flags() {
        let config = load_config(&AnalysisArgs::default()).unwrap();
        assert_eq!(config, AnalysisConfig::default());
    }

    #[test]
    fn test_flags_override_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "capital": 5000.0, "charts": true }}"#).unwrap();

        let args = AnalysisArgs {
            config: Some(file.path().to_path_buf()),
            symbols: vec!["AAPL=Apple".to_string()],
            index: Some("none".to_string()),
            start: Some("2019-06-01".to_string()),
            no_charts: true,
            ..AnalysisArgs::default()
        };
        let config = load_config(&args).unwrap();

        assert_eq!(config.capital, 5000.0);
        assert_eq!(config.equities, vec![Listing::new("AAPL", "Apple")]);
        assert_eq!(config.index, None);
        assert_eq!(config.start.to_string(), "2019-06-01");
        assert!(!config.charts);
    }

    #[test]
    fn test_invalid_flags_rejected() {
        let args = AnalysisArgs {
            capital: Some(-1.0),
            ..AnalysisArgs::default()
        };
        assert!(load_config(&args).is_err());

        let args = AnalysisArgs {
            start: Some("2024-06-01".to_string()),
            end: Some("2014-06-01".to_string()),
            ..AnalysisArgs::default()
        };
        assert!(load_config(&args).is_err());
    }
}
