use async_trait::async_trait;
use chrono::Utc;
use goldpulse_core::{
    MarketState, Signal, SignalAction, SignalError, SignalProvider, SignalSource, Timeframe,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Enumerated model selector for the completion service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AiModel {
    #[default]
    #[serde(rename = "gpt-4o-mini")]
    Gpt4oMini,
    #[serde(rename = "gpt-4o")]
    Gpt4o,
    #[serde(rename = "gpt-4-turbo")]
    Gpt4Turbo,
}

impl AiModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AiModel::Gpt4oMini => "gpt-4o-mini",
            AiModel::Gpt4o => "gpt-4o",
            AiModel::Gpt4Turbo => "gpt-4-turbo",
        }
    }
}

/// Configuration for the AI signal collaborator. Constructor-injected,
/// never ambient.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    pub endpoint: String,
    /// Missing key means the provider is unconfigured; no request is made.
    pub api_key: Option<String>,
    pub model: AiModel,
    pub timeout_secs: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
            api_key: None,
            model: AiModel::default(),
            timeout_secs: 30,
        }
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

/// The shape the completion content must parse into. Strict schema: an
/// unknown action or a missing field rejects the whole response, which the
/// caller treats as a collaborator failure.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AiSignalResponse {
    pub signal: SignalAction,
    pub confidence: u8,
    pub entry_price: Decimal,
    pub stop_loss: Decimal,
    pub take_profit: Decimal,
    pub reasoning: String,
}

const SYSTEM_PROMPT: &str = "You are a technical-analysis assistant. Given a JSON \
market snapshot, reply with exactly one JSON object, no prose: {\"signal\": \
\"BUY\"|\"SELL\"|\"NEUTRAL\"|\"WAIT\", \"confidence\": 0-100, \"entry_price\": number, \
\"stop_loss\": number, \"take_profit\": number, \"reasoning\": string}";

// ---------------------------------------------------------------------------
// Provider
// ---------------------------------------------------------------------------

/// Signal provider backed by an OpenAI-compatible chat-completions endpoint.
pub struct AiSignalProvider {
    config: AiConfig,
    client: reqwest::Client,
}

impl AiSignalProvider {
    pub fn new(config: AiConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_default();
        Self { config, client }
    }

    pub fn model(&self) -> AiModel {
        self.config.model
    }

    fn feature_payload(
        &self,
        snapshot: &MarketState,
        timeframe: Timeframe,
    ) -> Result<String, SignalError> {
        let features = serde_json::json!({
            "timeframe": timeframe,
            "market": snapshot,
        });
        serde_json::to_string(&features).map_err(|e| SignalError::Schema(e.to_string()))
    }

    /// Validate and convert a parsed response into a domain signal.
    fn into_signal(
        &self,
        response: AiSignalResponse,
        timeframe: Timeframe,
    ) -> Result<Signal, SignalError> {
        if response.confidence > 100 {
            return Err(SignalError::Schema(format!(
                "confidence out of range: {}",
                response.confidence
            )));
        }
        Ok(Signal {
            id: Uuid::new_v4(),
            timeframe,
            action: response.signal,
            confidence: response.confidence,
            entry_price: response.entry_price,
            stop_loss: response.stop_loss,
            take_profit: response.take_profit,
            reasoning: response.reasoning,
            source: SignalSource::Ai {
                model: self.config.model.as_str().to_string(),
            },
            timestamp: Utc::now(),
        })
    }
}

#[async_trait]
impl SignalProvider for AiSignalProvider {
    async fn generate(
        &self,
        snapshot: &MarketState,
        timeframe: Timeframe,
    ) -> Result<Signal, SignalError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| SignalError::Unconfigured("no API key".to_string()))?;

        let request = ChatRequest {
            model: self.config.model.as_str(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: self.feature_payload(snapshot, timeframe)?,
                },
            ],
            temperature: 0.2,
        };

        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| SignalError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SignalError::Http(format!("status {status}")));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| SignalError::Schema(e.to_string()))?;
        let content = chat
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .ok_or_else(|| SignalError::Schema("empty choices".to_string()))?;

        let parsed: AiSignalResponse = serde_json::from_str(content)
            .map_err(|e| SignalError::Schema(format!("bad completion content: {e}")))?;
        self.into_signal(parsed, timeframe)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_response_schema_accepts_valid_payload() {
        let content = r#"{
            "signal": "BUY",
            "confidence": 72,
            "entry_price": "2650.5",
            "stop_loss": "2644.5",
            "take_profit": "2662.5",
            "reasoning": "Bullish structure"
        }"#;
        let parsed: AiSignalResponse = serde_json::from_str(content).unwrap();
        assert_eq!(parsed.signal, SignalAction::Buy);
        assert_eq!(parsed.confidence, 72);
        assert_eq!(parsed.entry_price, dec!(2650.5));
    }

    #[test]
    fn test_response_schema_rejects_unknown_action() {
        let content = r#"{
            "signal": "HOLD",
            "confidence": 72,
            "entry_price": "2650.5",
            "stop_loss": "2644.5",
            "take_profit": "2662.5",
            "reasoning": "x"
        }"#;
        assert!(serde_json::from_str::<AiSignalResponse>(content).is_err());
    }

    #[test]
    fn test_response_schema_rejects_missing_fields() {
        let content = r#"{"signal": "BUY", "confidence": 72}"#;
        assert!(serde_json::from_str::<AiSignalResponse>(content).is_err());
    }

    #[test]
    fn test_model_selector_codes() {
        assert_eq!(AiModel::Gpt4oMini.as_str(), "gpt-4o-mini");
        let model: AiModel = serde_json::from_str("\"gpt-4o\"").unwrap();
        assert_eq!(model, AiModel::Gpt4o);
    }

    #[tokio::test]
    async fn test_missing_api_key_is_unconfigured_without_io() {
        use goldpulse_core::{Bollinger, CloudStatus, Ichimoku, Macd, PivotPoints, Stochastic};

        let provider = AiSignalProvider::new(AiConfig::default());
        let snapshot = MarketState {
            price: dec!(2650),
            change: dec!(0),
            change_percent: dec!(0),
            high: dec!(2650),
            low: dec!(2650),
            volume: dec!(0),
            ema200: dec!(2650),
            rsi: dec!(50),
            adx: dec!(20),
            atr: dec!(1),
            macd: Macd::NEUTRAL,
            bollinger: Bollinger {
                upper: dec!(2650),
                middle: dec!(2650),
                lower: dec!(2650),
            },
            stochastic: Stochastic {
                k: dec!(50),
                d: dec!(50),
            },
            ichimoku: Ichimoku {
                tenkan: dec!(2650),
                kijun: dec!(2650),
                cloud: CloudStatus::Below,
            },
            pivots: PivotPoints {
                pivot: dec!(2650),
                r1: dec!(2650),
                s1: dec!(2650),
                r2: dec!(2650),
                s2: dec!(2650),
            },
        };

        let err = provider.generate(&snapshot, Timeframe::M5).await.unwrap_err();
        assert!(matches!(err, SignalError::Unconfigured(_)));
    }
}
