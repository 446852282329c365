//! UI/backend events and error modeling for the reaction form controller.

use shared::protocol::{PredictionOutcome, SaveOutcome, SAVE_FAILED, UNKNOWN_ERROR};

pub const NETWORK_ERROR_PREFIX: &str = "Network error: ";
pub const NO_REACTION_TO_SAVE: &str = "No reaction data to save.";

/// Everything the controller reacts to, from the page or from the backend worker.
#[derive(Debug, Clone)]
pub enum UiEvent {
    PageReady,
    ExampleActivated {
        index: usize,
    },
    ReactionTypeChanged(String),
    FormSubmitted,
    SaveRequested,
    /// `Err` carries the transport or decode failure description.
    PredictionSettled(Result<PredictionOutcome, String>),
    SaveSettled(Result<SaveOutcome, String>),
    SaveBannerExpired {
        generation: u64,
    },
}

impl UiEvent {
    pub fn name(&self) -> &'static str {
        match self {
            UiEvent::PageReady => "page_ready",
            UiEvent::ExampleActivated { .. } => "example_activated",
            UiEvent::ReactionTypeChanged(_) => "reaction_type_changed",
            UiEvent::FormSubmitted => "form_submitted",
            UiEvent::SaveRequested => "save_requested",
            UiEvent::PredictionSettled(_) => "prediction_settled",
            UiEvent::SaveSettled(_) => "save_settled",
            UiEvent::SaveBannerExpired { .. } => "save_banner_expired",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    /// The service answered with `success: false`.
    ApplicationReported,
    /// Unreachable server, non-2xx status or an undecodable body.
    Transport,
    /// A save with no prior successful prediction.
    Precondition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    Prediction,
    Save,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn application(context: UiErrorContext, error: Option<String>) -> Self {
        let fallback = match context {
            UiErrorContext::Prediction => UNKNOWN_ERROR,
            UiErrorContext::Save => SAVE_FAILED,
        };
        Self {
            category: UiErrorCategory::ApplicationReported,
            context,
            message: error.unwrap_or_else(|| fallback.to_string()),
        }
    }

    pub fn transport(context: UiErrorContext, description: impl Into<String>) -> Self {
        Self {
            category: UiErrorCategory::Transport,
            context,
            message: format!("{NETWORK_ERROR_PREFIX}{}", description.into()),
        }
    }

    pub fn nothing_to_save() -> Self {
        Self {
            category: UiErrorCategory::Precondition,
            context: UiErrorContext::Save,
            message: NO_REACTION_TO_SAVE.to_string(),
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    /// The text shown in the error slot.
    pub fn message(&self) -> &str {
        &self.message
    }
}
