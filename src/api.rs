//! Client for the remote prediction endpoint

use crate::constants::PREDICT_PATH;
use crate::types::{PredictReply, PredictRequest, PredictResponse, TransportError};
use futures::future::BoxFuture;
use std::time::Duration;
use tracing::debug;

/// Anything that can turn a request into a reply. The controller only talks to this.
pub trait PredictionEndpoint: Send + Sync {
    /// Where requests go, as shown to the user when one fails
    fn url(&self) -> &str;

    fn predict(
        &self,
        request: PredictRequest,
    ) -> BoxFuture<'_, Result<PredictReply, TransportError>>;
}

/// JSON over HTTP to `{base}/predict`
#[derive(Clone)]
pub struct HttpEndpoint {
    client: reqwest::Client,
    url: String,
}

impl HttpEndpoint {
    pub fn new(base_url: &str, connect_timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .build()?;
        Ok(Self {
            client,
            url: predict_url(base_url),
        })
    }
}

fn predict_url(base_url: &str) -> String {
    format!("{}{}", base_url.trim().trim_end_matches('/'), PREDICT_PATH)
}

impl PredictionEndpoint for HttpEndpoint {
    fn url(&self) -> &str {
        &self.url
    }

    fn predict(
        &self,
        request: PredictRequest,
    ) -> BoxFuture<'_, Result<PredictReply, TransportError>> {
        Box::pin(async move {
            let response = self.client.post(&self.url).json(&request).send().await?;
            // The body decides the outcome; the backend reports model errors with HTTP 400
            let status = response.status();
            let bytes = response.bytes().await?;
            debug!(status = %status, bytes = bytes.len(), "Prediction response received");
            let body: PredictResponse = serde_json::from_slice(&bytes)?;
            body.interpret()
        })
    }
}
