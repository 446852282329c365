//! Event handlers for the reaction form.
//!
//! `FormController::handle` is the whole dispatch table: every page or backend
//! event lands here, updates the page synchronously and returns the backend
//! commands (network calls, timers) that follow from it. Nothing in here
//! blocks or awaits.

use std::time::Duration;

use shared::protocol::{PredictionOutcome, PredictionResult, SaveOutcome};
use tracing::{debug, info, warn};

use crate::{
    backend_bridge::commands::BackendCommand,
    controller::events::{UiError, UiErrorContext, UiEvent},
    ui::{
        page::{ElementId, Page, PageError},
        render,
    },
};

/// How long the save confirmation stays up.
pub const SAVE_BANNER_DISPLAY: Duration = Duration::from_secs(3);

/// What handling one event asks of the host.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Dispatch {
    /// The browser's default action (navigation, form post) is suppressed.
    pub default_prevented: bool,
    pub commands: Vec<BackendCommand>,
}

impl Dispatch {
    fn prevent_default() -> Self {
        Self {
            default_prevented: true,
            commands: Vec::new(),
        }
    }

    fn with_command(mut self, command: BackendCommand) -> Self {
        self.commands.push(command);
        self
    }
}

pub struct FormController {
    page: Page,
    save_wired: bool,
    // Written only by a successful prediction, read only by a save request.
    current_reaction: Option<PredictionResult>,
    save_banner_generation: u64,
    predictions_in_flight: usize,
    saves_in_flight: usize,
    last_error: Option<UiError>,
}

impl FormController {
    /// Binds the controller to a page. A page missing any required element is rejected.
    pub fn attach(page: Page) -> Result<Self, PageError> {
        page.check_required()?;
        let save_wired = page.contains(ElementId::SaveTrigger);
        if !save_wired {
            debug!("page has no save trigger; save action not installed");
        }
        Ok(Self {
            page,
            save_wired,
            current_reaction: None,
            save_banner_generation: 0,
            predictions_in_flight: 0,
            saves_in_flight: 0,
            last_error: None,
        })
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Host-side access for typing and picking options.
    pub fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }

    pub fn save_wired(&self) -> bool {
        self.save_wired
    }

    pub fn current_reaction(&self) -> Option<&PredictionResult> {
        self.current_reaction.as_ref()
    }

    pub fn requests_in_flight(&self) -> usize {
        self.predictions_in_flight + self.saves_in_flight
    }

    /// The most recent error shown in either error slot.
    pub fn last_error(&self) -> Option<&UiError> {
        self.last_error.as_ref()
    }

    pub fn handle(&mut self, event: UiEvent) -> Dispatch {
        debug!(event = event.name(), "handling ui event");
        match event {
            UiEvent::PageReady => self.on_page_ready(),
            UiEvent::ExampleActivated { index } => self.on_example_activated(index),
            UiEvent::ReactionTypeChanged(reaction_type) => {
                self.on_reaction_type_changed(&reaction_type)
            }
            UiEvent::FormSubmitted => self.on_form_submitted(),
            UiEvent::SaveRequested => self.on_save_requested(),
            UiEvent::PredictionSettled(result) => self.on_prediction_settled(result),
            UiEvent::SaveSettled(result) => self.on_save_settled(result),
            UiEvent::SaveBannerExpired { generation } => self.on_save_banner_expired(generation),
        }
    }

    // Appends options, so it must run once per page load.
    fn on_page_ready(&mut self) -> Dispatch {
        render::populate_examples(&mut self.page);
        render::populate_reaction_types(&mut self.page);
        render::populate_catalysts(&mut self.page);
        Dispatch::default()
    }

    fn on_example_activated(&mut self, index: usize) -> Dispatch {
        let compound = self
            .page
            .element(ElementId::ExampleList)
            .and_then(|list| list.entries().get(index))
            .map(|entry| entry.text.clone());
        match compound {
            Some(compound) => render::set_compound(&mut self.page, &compound),
            None => warn!(index, "no example compound at index"),
        }
        Dispatch::prevent_default()
    }

    fn on_reaction_type_changed(&mut self, reaction_type: &str) -> Dispatch {
        render::filter_catalysts(&mut self.page, reaction_type);
        Dispatch::default()
    }

    fn on_form_submitted(&mut self) -> Dispatch {
        render::begin_prediction(&mut self.page);
        let form = self.page.form_data();
        info!(
            compound = %form.compound,
            reaction_type = %form.reaction_type,
            catalyst = %form.catalyst,
            "submitting prediction"
        );
        self.predictions_in_flight += 1;
        Dispatch::prevent_default().with_command(BackendCommand::Predict(form))
    }

    fn on_prediction_settled(&mut self, result: Result<PredictionOutcome, String>) -> Dispatch {
        self.predictions_in_flight = self.predictions_in_flight.saturating_sub(1);
        match result {
            Ok(PredictionOutcome::Predicted(reaction)) => {
                info!(reactant = %reaction.reactant, product = ?reaction.product, "prediction rendered");
                render::render_prediction(&mut self.page, &reaction);
                self.current_reaction = Some(reaction);
            }
            Ok(PredictionOutcome::Failed { error }) => {
                let err = UiError::application(UiErrorContext::Prediction, error);
                warn!("prediction rejected: {}", err.message());
                self.show_prediction_error(err);
            }
            Err(description) => {
                let err = UiError::transport(UiErrorContext::Prediction, description);
                warn!("prediction request failed: {}", err.message());
                self.show_prediction_error(err);
            }
        }
        if self.predictions_in_flight > 0 {
            render::show_loading(&mut self.page);
        }
        Dispatch::default()
    }

    fn on_save_requested(&mut self) -> Dispatch {
        if !self.save_wired {
            debug!("save requested on a page without save controls; ignoring");
            return Dispatch::default();
        }
        let Some(reaction) = &self.current_reaction else {
            self.show_save_error(UiError::nothing_to_save());
            return Dispatch::default();
        };
        let form = reaction.save_form();
        render::clear_save_banners(&mut self.page);
        info!(compound = %form.compound, "saving reaction");
        self.saves_in_flight += 1;
        Dispatch::default().with_command(BackendCommand::Save(form))
    }

    fn on_save_settled(&mut self, result: Result<SaveOutcome, String>) -> Dispatch {
        self.saves_in_flight = self.saves_in_flight.saturating_sub(1);
        match result {
            Ok(SaveOutcome::Saved) => {
                render::render_save_success(&mut self.page);
                self.save_banner_generation += 1;
                Dispatch::default().with_command(BackendCommand::HideSaveBanner {
                    after: SAVE_BANNER_DISPLAY,
                    generation: self.save_banner_generation,
                })
            }
            Ok(SaveOutcome::Failed { error }) => {
                self.show_save_error(UiError::application(UiErrorContext::Save, error));
                Dispatch::default()
            }
            Err(description) => {
                self.show_save_error(UiError::transport(UiErrorContext::Save, description));
                Dispatch::default()
            }
        }
    }

    fn on_save_banner_expired(&mut self, generation: u64) -> Dispatch {
        if generation == self.save_banner_generation {
            render::hide_save_success(&mut self.page);
        } else {
            debug!(
                generation,
                current = self.save_banner_generation,
                "stale save banner timer"
            );
        }
        Dispatch::default()
    }

    fn show_prediction_error(&mut self, err: UiError) {
        render::render_prediction_error(&mut self.page, err.message());
        self.last_error = Some(err);
    }

    fn show_save_error(&mut self, err: UiError) {
        warn!(context = ?err.context(), "save failed: {}", err.message());
        render::render_save_error(&mut self.page, err.message());
        self.last_error = Some(err);
    }
}

#[cfg(test)]
#[path = "tests/reducer_tests.rs"]
mod tests;
