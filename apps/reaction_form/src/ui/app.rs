use std::{
    collections::VecDeque,
    sync::Arc,
    thread,
    time::{Duration, Instant},
};

use client_core::PredictionService;
use crossbeam_channel::{bounded, unbounded, Receiver, RecvTimeoutError, Sender};

use crate::backend_bridge::{commands::BackendCommand, runtime};
use crate::controller::{
    events::UiEvent,
    orchestration::dispatch_backend_command,
    reducer::FormController,
};
use crate::ui::page::{ElementId, Page, PageError};

const COMMAND_QUEUE_DEPTH: usize = 64;

/// A loaded page wired to a backend worker.
///
/// Host actions (typing, picking options, clicking) go through the same checks
/// a browser would apply before any handler runs. Backend results arrive on a
/// channel and are applied by [`FormSession::pump`].
pub struct FormSession {
    controller: FormController,
    cmd_tx: Option<Sender<BackendCommand>>,
    ui_rx: Receiver<UiEvent>,
    worker: Option<thread::JoinHandle<()>>,
    pending_timers: usize,
    status: String,
}

impl FormSession {
    pub fn start(page: Page, service: Arc<dyn PredictionService>) -> Result<Self, PageError> {
        let controller = FormController::attach(page)?;
        let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(COMMAND_QUEUE_DEPTH);
        let (ui_tx, ui_rx) = unbounded::<UiEvent>();
        let worker = runtime::launch(service, cmd_rx, ui_tx);

        let mut session = Self {
            controller,
            cmd_tx: Some(cmd_tx),
            ui_rx,
            worker: Some(worker),
            pending_timers: 0,
            status: String::new(),
        };
        session.dispatch(UiEvent::PageReady);
        Ok(session)
    }

    pub fn page(&self) -> &Page {
        self.controller.page()
    }

    pub fn controller(&self) -> &FormController {
        &self.controller
    }

    /// Last command-queue problem, empty when none occurred.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Clicks the example link at `index`. Returns whether navigation was suppressed.
    pub fn click_example(&mut self, index: usize) -> bool {
        self.dispatch(UiEvent::ExampleActivated { index })
    }

    pub fn type_compound(&mut self, text: &str) -> Result<(), PageError> {
        self.controller.page_mut().type_compound(text)
    }

    pub fn select_reaction_type(&mut self, value: &str) -> Result<(), PageError> {
        self.controller
            .page_mut()
            .choose_option(ElementId::ReactionTypeSelect, value)?;
        self.dispatch(UiEvent::ReactionTypeChanged(value.to_string()));
        Ok(())
    }

    pub fn select_catalyst(&mut self, value: &str) -> Result<(), PageError> {
        self.controller
            .page_mut()
            .choose_option(ElementId::CatalystSelect, value)
    }

    /// Submits the form. Constraint validation runs first; an invalid form
    /// never reaches the submit handler.
    pub fn submit(&mut self) -> Result<(), PageError> {
        self.controller.page().validate_form()?;
        self.dispatch(UiEvent::FormSubmitted);
        Ok(())
    }

    /// Clicks the save button. Returns `false` when the page has none.
    pub fn click_save(&mut self) -> bool {
        if !self.controller.page().contains(ElementId::SaveTrigger) {
            return false;
        }
        self.dispatch(UiEvent::SaveRequested);
        true
    }

    /// Applies at most one backend event, waiting up to `timeout` for it.
    pub fn pump(&mut self, timeout: Duration) -> bool {
        match self.ui_rx.recv_timeout(timeout) {
            Ok(event) => {
                self.dispatch(event);
                true
            }
            Err(RecvTimeoutError::Timeout) => false,
            Err(RecvTimeoutError::Disconnected) => {
                tracing::error!("backend worker is gone");
                false
            }
        }
    }

    /// Pumps until no prediction or save is outstanding. Returns `false` on timeout.
    pub fn wait_for_network(&mut self, timeout: Duration) -> bool {
        self.wait_until(timeout, |session| {
            session.controller.requests_in_flight() == 0
        })
    }

    /// Pumps until every requested banner timer has fired. Returns `false` on timeout.
    pub fn wait_for_timers(&mut self, timeout: Duration) -> bool {
        self.wait_until(timeout, |session| session.pending_timers == 0)
    }

    /// Stops the backend worker; outstanding requests and timers are dropped.
    pub fn shutdown(mut self) {
        self.cmd_tx.take();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                tracing::error!("backend worker panicked");
            }
        }
    }

    fn wait_until(&mut self, timeout: Duration, done: impl Fn(&Self) -> bool) -> bool {
        let deadline = Instant::now() + timeout;
        while !done(self) {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() || !self.pump(remaining) {
                return done(self);
            }
        }
        true
    }

    fn dispatch(&mut self, event: UiEvent) -> bool {
        let mut default_prevented = false;
        let mut queue = VecDeque::from([event]);
        while let Some(event) = queue.pop_front() {
            if matches!(event, UiEvent::SaveBannerExpired { .. }) {
                self.pending_timers = self.pending_timers.saturating_sub(1);
            }
            let dispatch = self.controller.handle(event);
            default_prevented |= dispatch.default_prevented;
            for cmd in dispatch.commands {
                if let Some(settled) = self.queue_command(cmd) {
                    queue.push_back(settled);
                }
            }
        }
        default_prevented
    }

    // A request that never reaches the worker settles here as a transport
    // failure so the page leaves its loading state.
    fn queue_command(&mut self, cmd: BackendCommand) -> Option<UiEvent> {
        let unqueued = cmd.clone();
        let queued = match &self.cmd_tx {
            Some(cmd_tx) => dispatch_backend_command(cmd_tx, cmd, &mut self.status),
            None => false,
        };
        if queued {
            if matches!(unqueued, BackendCommand::HideSaveBanner { .. }) {
                self.pending_timers += 1;
            }
            return None;
        }
        match unqueued {
            BackendCommand::Predict(_) => {
                Some(UiEvent::PredictionSettled(Err(self.status.clone())))
            }
            BackendCommand::Save(_) => Some(UiEvent::SaveSettled(Err(self.status.clone()))),
            BackendCommand::HideSaveBanner { .. } => None,
        }
    }
}

#[cfg(test)]
#[path = "tests/app_tests.rs"]
mod tests;
