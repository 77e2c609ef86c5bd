//! Prediction request lifecycle: dispatch on the runtime, poll from the UI loop

use super::App;
use crate::api::PredictionEndpoint;
use crate::controller::{Controller, Outcome};
use crate::types::{PredictRequest, TransportError};
use eframe::egui;
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;
use tracing::{debug, error};

/// The one request in flight. Dropping it discards the reply.
pub(crate) struct PendingSubmission {
    rx: oneshot::Receiver<Outcome>,
    url: String,
}

impl PendingSubmission {
    /// Send `request` on the runtime and wake the UI once the outcome is ready.
    pub(crate) fn spawn(
        handle: &tokio::runtime::Handle,
        endpoint: Arc<dyn PredictionEndpoint>,
        request: PredictRequest,
        ctx: egui::Context,
    ) -> Self {
        let (tx, rx) = oneshot::channel();
        let url = endpoint.url().to_string();
        handle.spawn(async move {
            let reply = endpoint.predict(request.clone()).await;
            let outcome = Controller::resolve(reply, request, endpoint.url());
            if tx.send(outcome).is_err() {
                debug!("Submission receiver dropped before reply");
            }
            ctx.request_repaint();
        });
        Self { rx, url }
    }

    /// Non-blocking check. A task that died without replying resolves as a transport error.
    pub(crate) fn poll(&mut self) -> Option<Outcome> {
        match self.rx.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Closed) => {
                error!("Prediction task ended without a reply");
                Some(Outcome::TransportError {
                    url: self.url.clone(),
                    detail: TransportError::Aborted.to_string(),
                })
            }
        }
    }
}

impl App {
    pub fn start_submission(&mut self, ctx: &egui::Context) {
        // Validation feedback is set by the controller on failure
        let Ok(request) = self.controller.begin_submit() else {
            return;
        };
        let endpoint: Arc<dyn PredictionEndpoint> = self.endpoint.clone();
        self.pending = Some(PendingSubmission::spawn(
            self.runtime.handle(),
            endpoint,
            request,
            ctx.clone(),
        ));
    }

    /// Apply the outcome of the in-flight request, if it has arrived
    pub fn poll_submission(&mut self) {
        let Some(pending) = self.pending.as_mut() else {
            return;
        };
        if let Some(outcome) = pending.poll() {
            self.pending = None;
            self.controller.complete(outcome);
            debug!(status = ?self.controller.status(), "Submission resolved");
        }
    }
}
