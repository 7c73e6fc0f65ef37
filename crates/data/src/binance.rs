use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use goldpulse_core::{Candle, FeedError, MarketDataFeed, Timeframe};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{debug, error, info, warn};

/// Configuration for the market-data collaborator. Constructor-injected at
/// build/reconfiguration time, never ambient state.
#[derive(Debug, Clone, serde::Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Trading pair, e.g. "PAXGUSDT" (tokenized gold).
    pub symbol: String,
    pub rest_url: String,
    pub ws_url: String,
    /// Seconds to wait before reconnecting a dropped stream.
    pub reconnect_secs: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            symbol: "PAXGUSDT".to_string(),
            rest_url: "https://api.binance.com/api/v3".to_string(),
            ws_url: "wss://stream.binance.com:9443/ws".to_string(),
            reconnect_secs: 5,
        }
    }
}

/// Binance spot market feed: kline history over REST, live klines over
/// WebSocket. Each in-progress bar arrives repeatedly with the same bucket
/// open time, which is exactly the series' amend signal.
pub struct BinanceFeed {
    config: FeedConfig,
    client: reqwest::Client,
}

impl BinanceFeed {
    pub fn new(config: FeedConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    fn stream_name(&self, timeframe: Timeframe) -> String {
        format!(
            "{}/{}@kline_{}",
            self.config.ws_url,
            self.config.symbol.to_lowercase(),
            timeframe.code()
        )
    }
}

// ---------------------------------------------------------------------------
// Wire parsing
// ---------------------------------------------------------------------------

/// One REST kline row:
/// `[openTime, open, high, low, close, volume, closeTime, ...]`.
fn parse_kline_row(row: &serde_json::Value) -> Result<Candle, FeedError> {
    let arr = row
        .as_array()
        .ok_or_else(|| FeedError::Parse("kline row is not an array".to_string()))?;
    if arr.len() < 6 {
        return Err(FeedError::Parse(format!(
            "kline row too short: {} fields",
            arr.len()
        )));
    }

    let time = arr[0]
        .as_i64()
        .ok_or_else(|| FeedError::Parse("bad kline open time".to_string()))?;
    let price = |idx: usize| -> Result<Decimal, FeedError> {
        let s = arr[idx]
            .as_str()
            .ok_or_else(|| FeedError::Parse(format!("kline field {idx} is not a string")))?;
        Decimal::from_str(s).map_err(|e| FeedError::Parse(format!("kline field {idx}: {e}")))
    };

    Ok(Candle {
        time,
        open: price(1)?,
        high: price(2)?,
        low: price(3)?,
        close: price(4)?,
        volume: price(5)?,
    })
}

/// Kline event pushed over the WebSocket stream.
#[derive(Debug, Deserialize)]
struct KlineEvent {
    #[serde(rename = "k")]
    kline: KlineData,
}

#[derive(Debug, Deserialize)]
struct KlineData {
    #[serde(rename = "t")]
    open_time: i64,
    #[serde(rename = "o")]
    open: String,
    #[serde(rename = "h")]
    high: String,
    #[serde(rename = "l")]
    low: String,
    #[serde(rename = "c")]
    close: String,
    #[serde(rename = "v")]
    volume: String,
}

impl KlineData {
    fn into_candle(self) -> Result<Candle, FeedError> {
        let parse = |s: &str| {
            Decimal::from_str(s).map_err(|e| FeedError::Parse(format!("kline price: {e}")))
        };
        Ok(Candle {
            time: self.open_time,
            open: parse(&self.open)?,
            high: parse(&self.high)?,
            low: parse(&self.low)?,
            close: parse(&self.close)?,
            volume: parse(&self.volume)?,
        })
    }
}

fn parse_stream_message(text: &str) -> Result<Candle, FeedError> {
    let event: KlineEvent =
        serde_json::from_str(text).map_err(|e| FeedError::Parse(e.to_string()))?;
    event.kline.into_candle()
}

// ---------------------------------------------------------------------------
// Feed impl
// ---------------------------------------------------------------------------

#[async_trait]
impl MarketDataFeed for BinanceFeed {
    async fn fetch_history(
        &self,
        timeframe: Timeframe,
        limit: usize,
    ) -> Result<Vec<Candle>, FeedError> {
        let url = format!("{}/klines", self.config.rest_url);
        let limit = limit.to_string();
        let response = self
            .client
            .get(&url)
            .query(&[
                ("symbol", self.config.symbol.as_str()),
                ("interval", timeframe.code()),
                ("limit", limit.as_str()),
            ])
            .send()
            .await
            .map_err(|e| FeedError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Http(format!("status {status}")));
        }

        let rows: Vec<serde_json::Value> = response
            .json()
            .await
            .map_err(|e| FeedError::Parse(e.to_string()))?;
        let candles = rows
            .iter()
            .map(parse_kline_row)
            .collect::<Result<Vec<_>, _>>()?;

        info!(
            symbol = %self.config.symbol,
            %timeframe,
            bars = candles.len(),
            "history fetched"
        );
        Ok(candles)
    }

    async fn subscribe(
        &self,
        timeframe: Timeframe,
    ) -> Result<mpsc::Receiver<Candle>, FeedError> {
        let (tx, rx) = mpsc::channel(256);
        let url = self.stream_name(timeframe);
        let symbol = self.config.symbol.clone();
        let reconnect = std::time::Duration::from_secs(self.config.reconnect_secs);

        tokio::spawn(async move {
            loop {
                match run_stream(&url, &tx).await {
                    Ok(()) => {
                        // Receiver dropped: subscription is over
                        debug!(%symbol, "kline stream consumer gone, stopping");
                        return;
                    }
                    Err(err) => {
                        error!(%symbol, %err, "kline stream dropped, reconnecting");
                    }
                }
                tokio::time::sleep(reconnect).await;
            }
        });

        Ok(rx)
    }
}

/// Pump one WebSocket connection until it drops. `Ok(())` means the consumer
/// went away and the task should stop; `Err` means reconnect.
async fn run_stream(url: &str, tx: &mpsc::Sender<Candle>) -> Result<(), FeedError> {
    info!(%url, "connecting kline stream");
    let (ws_stream, _) = connect_async(url)
        .await
        .map_err(|e| FeedError::ConnectionFailed(e.to_string()))?;
    let (mut write, mut read) = ws_stream.split();

    while let Some(message) = read.next().await {
        match message {
            Ok(Message::Text(text)) => match parse_stream_message(&text) {
                Ok(candle) => {
                    if tx.send(candle).await.is_err() {
                        return Ok(());
                    }
                }
                Err(err) => {
                    warn!(%err, "skipping malformed kline message");
                }
            },
            Ok(Message::Ping(data)) => {
                let _ = write.send(Message::Pong(data)).await;
            }
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(err) => return Err(FeedError::ConnectionFailed(err.to_string())),
        }
    }
    Err(FeedError::StreamClosed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_kline_row() {
        let row = serde_json::json!([
            1700000000000i64,
            "2650.10",
            "2655.00",
            "2648.30",
            "2652.75",
            "123.456",
            1700000059999i64
        ]);
        let candle = parse_kline_row(&row).unwrap();
        assert_eq!(candle.time, 1700000000000);
        assert_eq!(candle.open, dec!(2650.10));
        assert_eq!(candle.high, dec!(2655.00));
        assert_eq!(candle.low, dec!(2648.30));
        assert_eq!(candle.close, dec!(2652.75));
        assert_eq!(candle.volume, dec!(123.456));
    }

    #[test]
    fn test_parse_kline_row_rejects_garbage() {
        assert!(parse_kline_row(&serde_json::json!("nope")).is_err());
        assert!(parse_kline_row(&serde_json::json!([1, 2])).is_err());
        let bad_price = serde_json::json!([
            1700000000000i64,
            "not-a-price",
            "2655.00",
            "2648.30",
            "2652.75",
            "123.456"
        ]);
        assert!(parse_kline_row(&bad_price).is_err());
    }

    #[test]
    fn test_parse_stream_message() {
        let text = r#"{
            "e": "kline",
            "E": 1700000001234,
            "s": "PAXGUSDT",
            "k": {
                "t": 1700000000000,
                "T": 1700000059999,
                "s": "PAXGUSDT",
                "i": "1m",
                "o": "2650.10",
                "c": "2652.75",
                "h": "2655.00",
                "l": "2648.30",
                "v": "123.456",
                "x": false
            }
        }"#;
        let candle = parse_stream_message(text).unwrap();
        assert_eq!(candle.time, 1700000000000);
        assert_eq!(candle.close, dec!(2652.75));
    }

    #[test]
    fn test_stream_name_uses_lowercase_symbol() {
        let feed = BinanceFeed::new(FeedConfig::default());
        assert_eq!(
            feed.stream_name(Timeframe::M1),
            "wss://stream.binance.com:9443/ws/paxgusdt@kline_1m"
        );
    }
}
