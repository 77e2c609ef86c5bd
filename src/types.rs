//! Common types and data structures

use crate::classify::Classification;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Lifecycle of the single prediction request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

/// Body of `POST /predict`. Values are sent exactly as the user typed them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PredictRequest {
    #[serde(rename = "LB")]
    pub lb: String,
    #[serde(rename = "LT")]
    pub lt: String,
    #[serde(rename = "KT")]
    pub kt: String,
    #[serde(rename = "KM")]
    pub km: String,
    #[serde(rename = "GRS")]
    pub grs: String,
}

impl PredictRequest {
    /// Compact "LB 100 · LT 150 · ..." line for history rows and logs
    pub fn summary(&self) -> String {
        format!(
            "LB {} · LT {} · KT {} · KM {} · GRS {}",
            self.lb, self.lt, self.kt, self.km, self.grs
        )
    }
}

/// `predicted_price` may arrive as a JSON number or a numeric string
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PriceValue {
    Number(f64),
    Text(String),
}

impl PriceValue {
    /// The usable price, if the value is truthy and a finite non-negative number
    fn usable(&self) -> Option<f64> {
        let price = match self {
            PriceValue::Number(n) if *n == 0.0 => return None,
            PriceValue::Number(n) => *n,
            PriceValue::Text(s) if s.is_empty() => return None,
            PriceValue::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        (price.is_finite() && price >= 0.0).then_some(price)
    }
}

/// Response body from the prediction endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PredictResponse {
    #[serde(default)]
    pub predicted_price: Option<PriceValue>,
    #[serde(default)]
    pub error: Option<String>,
}

/// What the endpoint told us, once the body is known to be well-formed
#[derive(Debug, Clone, PartialEq)]
pub enum PredictReply {
    Price(f64),
    Error(String),
}

impl PredictResponse {
    pub fn interpret(self) -> Result<PredictReply, TransportError> {
        if let Some(price) = self.predicted_price.as_ref().and_then(PriceValue::usable) {
            return Ok(PredictReply::Price(price));
        }
        match self.error {
            Some(message) => Ok(PredictReply::Error(message)),
            None => Err(TransportError::Schema(match self.predicted_price {
                Some(value) => format!("unusable predicted_price {:?}", value),
                None => "neither predicted_price nor error present".to_string(),
            })),
        }
    }
}

/// The request could not be completed or its body could not be understood
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("invalid JSON body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("unexpected response: {0}")]
    Schema(String),
    #[error("request task ended without a reply")]
    Aborted,
}

/// Snapshot of one successful prediction
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionResult {
    pub price: f64,
    pub formatted: String,
    pub classification: Classification,
    pub inputs: PredictRequest,
    pub received_at: DateTime<Local>,
}
