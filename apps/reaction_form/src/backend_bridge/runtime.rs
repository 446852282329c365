//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::PredictionService;
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

/// Starts the backend worker thread.
///
/// Each command runs as its own task, so a slow prediction never holds up a
/// save or a banner timer. Requests are not serialized: settle events are sent
/// in whatever order the responses arrive. The thread exits once every command
/// sender is dropped, cancelling whatever is still outstanding.
pub fn launch(
    service: Arc<dyn PredictionService>,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            tracing::debug!("backend worker ready");
            while let Ok(cmd) = cmd_rx.recv() {
                if cmd.is_network_call() {
                    tracing::debug!(command = cmd.name(), "starting request");
                }
                tokio::spawn(run_command(Arc::clone(&service), cmd, ui_tx.clone()));
            }
            tracing::debug!("backend worker stopped");
        });
    })
}

async fn run_command(
    service: Arc<dyn PredictionService>,
    cmd: BackendCommand,
    ui_tx: Sender<UiEvent>,
) {
    let event = match cmd {
        BackendCommand::Predict(form) => {
            let result = service.predict(&form).await.map_err(|err| err.to_string());
            UiEvent::PredictionSettled(result)
        }
        BackendCommand::Save(form) => {
            let result = service.save(&form).await.map_err(|err| err.to_string());
            UiEvent::SaveSettled(result)
        }
        BackendCommand::HideSaveBanner { after, generation } => {
            tokio::time::sleep(after).await;
            UiEvent::SaveBannerExpired { generation }
        }
    };
    if ui_tx.send(event).is_err() {
        tracing::debug!("ui event receiver dropped; discarding backend result");
    }
}
