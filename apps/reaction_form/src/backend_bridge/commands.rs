//! Backend commands queued from the controller to the backend worker.

use std::time::Duration;

use shared::protocol::PredictionForm;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    Predict(PredictionForm),
    Save(PredictionForm),
    HideSaveBanner { after: Duration, generation: u64 },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Predict(_) => "predict",
            BackendCommand::Save(_) => "save",
            BackendCommand::HideSaveBanner { .. } => "hide_save_banner",
        }
    }

    pub fn is_network_call(&self) -> bool {
        matches!(self, BackendCommand::Predict(_) | BackendCommand::Save(_))
    }
}
