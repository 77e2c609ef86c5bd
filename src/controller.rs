//! Submission controller: owns the form, request status, result and history.
//!
//! All mutation goes through the methods here. The UI reads state through the
//! accessors and drives a submission in two halves (`begin_submit` before the
//! request is dispatched, `complete` once it has resolved) so the request itself
//! can run on the async runtime while the controller stays on the UI thread.

use crate::api::PredictionEndpoint;
use crate::classify::{classify, format_rupiah};
use crate::constants::{HISTORY_CAPACITY, TRANSPORT_MESSAGE, VALIDATION_MESSAGE};
use crate::form::{Field, FormRecord, ValidationError};
use crate::types::{PredictReply, PredictRequest, PredictionResult, RequestStatus, TransportError};
use std::collections::VecDeque;
use tracing::{debug, info, warn};

/// Tagged result of one submission
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Success(PredictionResult),
    PredictionError(String),
    /// `url` is the endpoint the failed request was sent to
    TransportError { url: String, detail: String },
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("a prediction request is already in flight")]
    InFlight,
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Message shown under the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    Validation,
    Prediction(String),
    /// The user sees the generic message and the URL; `detail` goes in the tooltip
    Transport { url: String, detail: String },
}

impl Feedback {
    pub fn message(&self) -> String {
        match self {
            Feedback::Validation => VALIDATION_MESSAGE.to_string(),
            Feedback::Prediction(msg) => format!("Error: {}", msg),
            Feedback::Transport { url, .. } => format!("{}: {}", TRANSPORT_MESSAGE, url),
        }
    }

    pub fn detail(&self) -> Option<&str> {
        match self {
            Feedback::Transport { detail, .. } => Some(detail),
            _ => None,
        }
    }
}

/// Most recent results, newest first
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: VecDeque<PredictionResult>,
}

impl History {
    pub fn push(&mut self, result: PredictionResult) {
        self.entries.push_front(result);
        self.entries.truncate(HISTORY_CAPACITY);
    }

    pub fn iter(&self) -> impl Iterator<Item = &PredictionResult> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct Controller {
    form: FormRecord,
    status: RequestStatus,
    result: Option<PredictionResult>,
    history: History,
    feedback: Option<Feedback>,
}

impl Controller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> &FormRecord {
        &self.form
    }

    pub fn status(&self) -> RequestStatus {
        self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == RequestStatus::Loading
    }

    pub fn result(&self) -> Option<&PredictionResult> {
        self.result.as_ref()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn update(&mut self, field: Field, raw: impl Into<String>) {
        self.form.update(field, raw);
    }

    /// Restore the initial form and clear the current result. History is kept.
    ///
    /// Does not cancel a request in flight: its reply still lands once it arrives.
    pub fn reset(&mut self) {
        self.form.reset();
        self.result = None;
        self.feedback = None;
        info!(history = self.history.len(), "Form reset");
    }

    /// Validate and move to Loading. The returned request is what must be sent.
    ///
    /// A validation failure only sets the feedback message: status, result and
    /// history are left as they were and nothing is sent.
    pub fn begin_submit(&mut self) -> Result<PredictRequest, SubmitError> {
        if self.is_loading() {
            warn!("Submit ignored, request already in flight");
            return Err(SubmitError::InFlight);
        }

        let request = match self.form.validate() {
            Ok(request) => request,
            Err(e) => {
                debug!(field = e.field.key(), "Validation failed");
                self.feedback = Some(Feedback::Validation);
                return Err(e.into());
            }
        };

        self.status = RequestStatus::Loading;
        self.result = None;
        self.feedback = None;
        info!(inputs = %request.summary(), "Submitting prediction request");
        Ok(request)
    }

    /// Turn an endpoint reply into an outcome, classifying a price on success.
    pub fn resolve(
        reply: Result<PredictReply, TransportError>,
        inputs: PredictRequest,
        url: &str,
    ) -> Outcome {
        match reply {
            Ok(PredictReply::Price(price)) => Outcome::Success(PredictionResult {
                price,
                formatted: format_rupiah(price),
                classification: classify(price),
                inputs,
                received_at: chrono::Local::now(),
            }),
            Ok(PredictReply::Error(message)) => Outcome::PredictionError(message),
            Err(e) => Outcome::TransportError {
                url: url.to_string(),
                detail: e.to_string(),
            },
        }
    }

    /// Apply a resolved outcome. Always leaves the Loading state.
    pub fn complete(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Success(result) => {
                info!(
                    price = result.price,
                    tier = result.classification.tier.label(),
                    "Prediction received"
                );
                self.history.push(result.clone());
                self.result = Some(result);
                self.feedback = None;
                self.status = RequestStatus::Succeeded;
            }
            Outcome::PredictionError(message) => {
                warn!(error = %message, "Prediction endpoint reported an error");
                self.result = None;
                self.feedback = Some(Feedback::Prediction(message));
                self.status = RequestStatus::Failed;
            }
            Outcome::TransportError { url, detail } => {
                warn!(url = %url, error = %detail, "Prediction request failed");
                self.result = None;
                self.feedback = Some(Feedback::Transport { url, detail });
                self.status = RequestStatus::Failed;
            }
        }
    }

    /// Run a whole submission against `endpoint`: validate, send once, apply.
    ///
    /// Headless entry point; the UI splits the same steps across frames.
    #[cfg_attr(not(test), allow(dead_code))]
    pub async fn submit<E>(&mut self, endpoint: &E) -> Result<(), SubmitError>
    where
        E: PredictionEndpoint + ?Sized,
    {
        let request = self.begin_submit()?;
        let reply = endpoint.predict(request.clone()).await;
        self.complete(Self::resolve(reply, request, endpoint.url()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Tier;
    use crate::types::PredictResponse;
    use futures::future::BoxFuture;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    enum Script {
        Price(f64),
        Error(&'static str),
        Garbage,
    }

    /// Replays scripted replies in order and counts calls
    struct FakeEndpoint {
        script: Mutex<VecDeque<Script>>,
        calls: AtomicUsize,
    }

    impl FakeEndpoint {
        fn new(script: Vec<Script>) -> Self {
            Self {
                script: Mutex::new(script.into()),
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl PredictionEndpoint for FakeEndpoint {
        fn url(&self) -> &str {
            "http://fake-backend:5000/predict"
        }

        fn predict(
            &self,
            _request: PredictRequest,
        ) -> BoxFuture<'_, Result<PredictReply, TransportError>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let next = self.script.lock().unwrap().pop_front();
            Box::pin(async move {
                match next.expect("unscripted call") {
                    Script::Price(p) => Ok(PredictReply::Price(p)),
                    Script::Error(msg) => Ok(PredictReply::Error(msg.to_string())),
                    Script::Garbage => Err(TransportError::Decode(
                        serde_json::from_str::<PredictResponse>("not json").unwrap_err(),
                    )),
                }
            })
        }
    }

    fn filled() -> Controller {
        let mut c = Controller::new();
        c.update(Field::Lb, "100");
        c.update(Field::Lt, "150");
        c.update(Field::Kt, "3");
        c.update(Field::Km, "2");
        c.update(Field::Grs, "1");
        c
    }

    #[tokio::test]
    async fn affordable_prediction_lands_in_history() {
        let endpoint = FakeEndpoint::new(vec![Script::Price(450_000_000.0)]);
        let mut c = filled();
        c.submit(&endpoint).await.unwrap();

        let result = c.result().unwrap();
        assert_eq!(result.classification.tier, Tier::Terjangkau);
        assert_eq!(result.formatted, "Rp 450.000.000");
        assert_eq!(result.inputs.lb, "100");
        assert_eq!(c.history().len(), 1);
        assert_eq!(c.status(), RequestStatus::Succeeded);
        assert!(c.feedback().is_none());
    }

    #[tokio::test]
    async fn empty_field_never_reaches_the_endpoint() {
        let endpoint = FakeEndpoint::new(vec![]);
        let mut c = filled();
        c.update(Field::Lb, "");

        let err = c.submit(&endpoint).await.unwrap_err();
        assert!(matches!(err, SubmitError::Validation(_)));
        assert_eq!(endpoint.calls(), 0);
        assert_eq!(c.status(), RequestStatus::Idle);
        assert_eq!(c.feedback(), Some(&Feedback::Validation));
        assert_eq!(c.feedback().unwrap().message(), VALIDATION_MESSAGE);
        assert!(c.result().is_none());
        assert!(c.history().is_empty());
    }

    #[tokio::test]
    async fn validation_failure_keeps_previous_result() {
        let endpoint = FakeEndpoint::new(vec![Script::Price(700_000_000.0)]);
        let mut c = filled();
        c.submit(&endpoint).await.unwrap();
        c.update(Field::Km, "dua");

        assert!(c.submit(&endpoint).await.is_err());
        assert_eq!(endpoint.calls(), 1);
        assert_eq!(c.status(), RequestStatus::Succeeded);
        assert_eq!(c.result().unwrap().price, 700_000_000.0);
        assert_eq!(c.history().len(), 1);
    }

    #[tokio::test]
    async fn boundary_price_is_luxury() {
        let endpoint = FakeEndpoint::new(vec![Script::Price(1_500_000_000.0)]);
        let mut c = filled();
        c.submit(&endpoint).await.unwrap();
        assert_eq!(c.result().unwrap().classification.tier, Tier::Mewah);
    }

    #[tokio::test]
    async fn prediction_error_is_shown_verbatim() {
        let endpoint = FakeEndpoint::new(vec![
            Script::Price(800_000_000.0),
            Script::Error("model unavailable"),
        ]);
        let mut c = filled();
        c.submit(&endpoint).await.unwrap();
        c.submit(&endpoint).await.unwrap();

        assert_eq!(
            c.feedback(),
            Some(&Feedback::Prediction("model unavailable".into()))
        );
        assert_eq!(c.feedback().unwrap().message(), "Error: model unavailable");
        assert_eq!(c.status(), RequestStatus::Failed);
        assert!(c.result().is_none());
        assert_eq!(c.history().len(), 1);
        assert_eq!(c.form().get(Field::Lb), "100");
    }

    #[tokio::test]
    async fn transport_failure_resolves_out_of_loading() {
        let endpoint = FakeEndpoint::new(vec![Script::Garbage]);
        let mut c = filled();
        c.submit(&endpoint).await.unwrap();

        assert_eq!(c.status(), RequestStatus::Failed);
        let feedback = c.feedback().unwrap();
        assert!(matches!(feedback, Feedback::Transport { .. }));
        assert!(feedback.message().starts_with(TRANSPORT_MESSAGE));
        assert!(feedback.detail().is_some());
        assert!(c.history().is_empty());
        assert_eq!(c.form().get(Field::Grs), "1");
    }

    #[tokio::test]
    async fn history_keeps_latest_three() {
        let prices = [100_000_000.0, 600_000_000.0, 1_600_000_000.0, 200_000_000.0];
        let endpoint = FakeEndpoint::new(prices.iter().map(|p| Script::Price(*p)).collect());
        let mut c = filled();

        for (n, _) in prices.iter().enumerate() {
            c.submit(&endpoint).await.unwrap();
            assert_eq!(c.history().len(), (n + 1).min(HISTORY_CAPACITY));
        }

        let kept: Vec<f64> = c.history().iter().map(|r| r.price).collect();
        assert_eq!(kept, vec![200_000_000.0, 1_600_000_000.0, 600_000_000.0]);
        assert_eq!(c.history().iter().next().unwrap().price, 200_000_000.0);
    }

    #[tokio::test]
    async fn reset_clears_result_but_not_history() {
        let endpoint = FakeEndpoint::new(vec![Script::Price(300_000_000.0)]);
        let mut c = filled();
        c.submit(&endpoint).await.unwrap();

        c.reset();
        assert_eq!(*c.form(), FormRecord::default());
        assert!(c.result().is_none());
        assert!(c.feedback().is_none());
        assert_eq!(c.history().len(), 1);

        c.reset();
        assert_eq!(*c.form(), FormRecord::default());
        assert_eq!(c.history().len(), 1);
    }

    #[test]
    fn begin_submit_enters_loading_and_blocks_reentry() {
        let mut c = filled();
        let request = c.begin_submit().unwrap();
        assert_eq!(request.km, "2");
        assert!(c.is_loading());
        assert!(matches!(c.begin_submit(), Err(SubmitError::InFlight)));

        c.complete(Outcome::TransportError {
            url: "http://127.0.0.1:5000/predict".into(),
            detail: "task dropped".into(),
        });
        assert_eq!(c.status(), RequestStatus::Failed);
    }

    #[tokio::test]
    async fn transport_message_names_the_url_tried() {
        let endpoint = FakeEndpoint::new(vec![Script::Garbage]);
        let mut c = filled();
        c.submit(&endpoint).await.unwrap();

        let message = c.feedback().unwrap().message();
        assert!(message.contains("http://fake-backend:5000/predict"), "{message}");
    }

    #[test]
    fn transport_url_is_the_one_sent_to() {
        // The endpoint may be reconfigured while a request is in flight
        let mut c = filled();
        let request = c.begin_submit().unwrap();
        let garbage = serde_json::from_str::<PredictResponse>("nope").unwrap_err();
        let outcome = Controller::resolve(
            Err(TransportError::Decode(garbage)),
            request,
            "http://old-host:5000/predict",
        );
        c.complete(outcome);

        let message = c.feedback().unwrap().message();
        assert!(message.contains("old-host"));
    }

    #[test]
    fn reply_after_reset_still_lands() {
        let mut c = filled();
        let request = c.begin_submit().unwrap();
        c.reset();
        assert!(c.form().is_blank());
        assert!(c.is_loading());

        c.complete(Controller::resolve(
            Ok(PredictReply::Price(900_000_000.0)),
            request,
            "http://127.0.0.1:5000/predict",
        ));
        assert!(c.form().is_blank());
        assert_eq!(c.status(), RequestStatus::Succeeded);
        assert_eq!(c.result().unwrap().inputs.lb, "100");
        assert_eq!(c.history().len(), 1);
    }
}
