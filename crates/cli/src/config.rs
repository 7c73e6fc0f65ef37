use goldpulse_core::Timeframe;
use goldpulse_data::FeedConfig;
use goldpulse_signals::AiConfig;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level application configuration, loaded from a TOML file with every
/// field defaulted so a missing or partial file still runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Candles retained per timeframe.
    pub capacity: usize,
    /// Additive price offset applied to presentation values and AI features
    /// only; indicator math always runs on raw feed prices.
    pub calibration_offset: Decimal,
    /// Timeframes to analyze; the first one drives the dashboard snapshot.
    pub timeframes: Vec<Timeframe>,
    /// Seconds between signal-generation cycles.
    pub signal_interval_secs: u64,
    /// Bars requested on history load.
    pub history_limit: usize,
    /// API bind address.
    pub bind: String,
    pub feed: FeedConfig,
    pub ai: AiConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            capacity: 300,
            calibration_offset: Decimal::ZERO,
            timeframes: Timeframe::ALL.to_vec(),
            signal_interval_secs: 60,
            history_limit: 300,
            bind: "0.0.0.0:3000".to_string(),
            feed: FeedConfig::default(),
            ai: AiConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load from `path`, or defaults when no file is given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .map_err(|e| anyhow::anyhow!("reading {}: {e}", path.display()))?;
                let config = toml::from_str(&raw)
                    .map_err(|e| anyhow::anyhow!("parsing {}: {e}", path.display()))?;
                Ok(config)
            }
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            calibration_offset = "12.5"
            timeframes = ["5m", "1h"]

            [feed]
            symbol = "XAUUSD"
            "#,
        )
        .unwrap();

        assert_eq!(config.calibration_offset, dec!(12.5));
        assert_eq!(config.timeframes, vec![Timeframe::M5, Timeframe::H1]);
        assert_eq!(config.feed.symbol, "XAUUSD");
        // Untouched fields fall back
        assert_eq!(config.capacity, 300);
        assert_eq!(config.signal_interval_secs, 60);
    }

    #[test]
    fn test_empty_toml_is_all_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.bind, "0.0.0.0:3000");
        assert_eq!(config.timeframes.len(), 4);
        assert!(config.ai.api_key.is_none());
    }
}
