//! Command orchestration helpers from UI actions to backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

/// Queues `cmd` without blocking. On failure the reason lands in `status`
/// and `false` is returned so the caller can settle the request itself.
pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) -> bool {
    let cmd_name = cmd.name();
    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            true
        }
        Err(TrySendError::Full(_)) => {
            tracing::warn!(command = cmd_name, "backend command queue full");
            *status = "UI command queue is full; please retry".to_string();
            false
        }
        Err(TrySendError::Disconnected(_)) => {
            tracing::error!(command = cmd_name, "backend command processor disconnected");
            *status = "Backend command processor disconnected (possible startup/runtime failure)"
                .to_string();
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crossbeam_channel::bounded;

    use super::*;

    #[test]
    fn queued_command_leaves_status_untouched() {
        let (tx, rx) = bounded(1);
        let mut status = String::new();
        let cmd = BackendCommand::HideSaveBanner {
            after: Duration::from_secs(3),
            generation: 1,
        };
        assert!(dispatch_backend_command(&tx, cmd.clone(), &mut status));
        assert!(status.is_empty());
        assert_eq!(rx.try_recv().expect("queued"), cmd);
    }

    #[test]
    fn full_queue_reports_retry() {
        let (tx, _rx) = bounded(1);
        let mut status = String::new();
        let cmd = BackendCommand::HideSaveBanner {
            after: Duration::ZERO,
            generation: 1,
        };
        assert!(dispatch_backend_command(&tx, cmd.clone(), &mut status));
        assert!(!dispatch_backend_command(&tx, cmd, &mut status));
        assert!(status.contains("full"));
    }

    #[test]
    fn disconnected_worker_is_reported() {
        let (tx, rx) = bounded::<BackendCommand>(1);
        drop(rx);
        let mut status = String::new();
        let cmd = BackendCommand::HideSaveBanner {
            after: Duration::ZERO,
            generation: 1,
        };
        assert!(!dispatch_backend_command(&tx, cmd, &mut status));
        assert!(status.contains("disconnected"));
    }
}
