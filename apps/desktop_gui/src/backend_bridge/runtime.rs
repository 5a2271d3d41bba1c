//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::{ClassifierClient, ClassifyHandle, ClientSettings};
use crossbeam_channel::{Receiver, Sender};
use shared::domain::SubmissionId;
use tokio::task::JoinHandle;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

/// Builds the HTTP client and starts the worker. Returns `None` when the
/// client cannot be built; the failure is reported to the UI and the dropped
/// command receiver makes later dispatches fail as disconnected.
pub fn launch(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    settings: &ClientSettings,
) -> Option<thread::JoinHandle<()>> {
    let classifier: Arc<dyn ClassifyHandle> = match ClassifierClient::from_settings(settings) {
        Ok(client) => Arc::new(client),
        Err(err) => {
            let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                UiErrorContext::BackendStartup,
                format!("backend worker startup failure: failed to build HTTP client: {err}"),
            )));
            tracing::error!("failed to build classification client: {err}");
            return None;
        }
    };
    Some(launch_with(cmd_rx, ui_tx, classifier))
}

pub fn launch_with(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    classifier: Arc<dyn ClassifyHandle>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || run_worker(cmd_rx, ui_tx, classifier))
}

fn run_worker(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    classifier: Arc<dyn ClassifyHandle>,
) {
    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                UiErrorContext::BackendStartup,
                format!("backend worker startup failure: failed to build runtime: {err}"),
            )));
            tracing::error!("failed to build backend runtime: {err}");
            return;
        }
    };

    let endpoint = classifier.endpoint().clone();
    let _ = ui_tx.try_send(UiEvent::Info(format!("Ready. Endpoint: {endpoint}")));

    runtime.block_on(async move {
        let mut in_flight: Option<(SubmissionId, JoinHandle<()>)> = None;

        while let Ok(cmd) = cmd_rx.recv() {
            match cmd {
                BackendCommand::Classify { submission, image } => {
                    if let Some((previous, task)) = in_flight.take() {
                        if !task.is_finished() {
                            tracing::info!(submission = %previous, "aborting superseded submission");
                            task.abort();
                        }
                    }

                    tracing::info!(
                        %submission,
                        endpoint = %endpoint,
                        file_name = image.file_name(),
                        size_bytes = image.size_bytes(),
                        "submitting image for classification"
                    );
                    let classifier = Arc::clone(&classifier);
                    let ui_tx = ui_tx.clone();
                    let task = tokio::spawn(async move {
                        let result = match classifier.classify(&image).await {
                            Ok(outcome) => Ok(outcome),
                            Err(err) => {
                                tracing::warn!(%submission, error = %err, "classification failed");
                                Err(UiError::from_classify_error(&err))
                            }
                        };
                        if ui_tx
                            .try_send(UiEvent::ClassificationSettled { submission, result })
                            .is_err()
                        {
                            tracing::warn!(%submission, "ui event queue unavailable; dropping settlement");
                        }
                    });
                    in_flight = Some((submission, task));
                }
                BackendCommand::Cancel { submission } => match in_flight.take() {
                    Some((current, task)) if current == submission => {
                        tracing::info!(%submission, "cancelling in-flight submission");
                        task.abort();
                    }
                    other => in_flight = other,
                },
            }
        }

        if let Some((submission, task)) = in_flight.take() {
            tracing::debug!(%submission, "ui closed; aborting in-flight submission");
            task.abort();
        }
    });
}
