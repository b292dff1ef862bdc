//! TUI runner - main loop that owns the terminal and all side effects
//!
//! The runner is responsible for:
//! - Loading the displayed week from the store (and on week navigation)
//! - Driving the debounced saver from tick events
//! - Spawning generation tasks and applying their results
//! - Dispatching events to App for handling and rendering at ~30 FPS

use std::sync::Arc;
use std::time::Duration;

use eyre::Result;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use weekstore::DebouncedSaver;

use super::Tui;
use super::app::App;
use super::events::{Event, EventHandler};
use super::state::{InteractionMode, PendingAction};
use super::views;
use crate::domain::{GeneratedPlan, WeeklyData, dates};
use crate::plan::{PlanError, PlanGenerator};

/// A finished generation, tagged with the week it was requested for
struct GenerationOutcome {
    week_id: String,
    result: Result<GeneratedPlan, PlanError>,
}

/// TUI runner that manages the terminal and event loop
pub struct TuiRunner {
    /// Application state and key handling
    app: App,
    /// Terminal handle
    terminal: Tui,
    /// Debounced persistence for the displayed week
    saver: DebouncedSaver<WeeklyData>,
    /// Plan generator; None when no credential is configured
    generator: Option<Arc<PlanGenerator>>,
    /// Event handler
    event_handler: EventHandler,
    /// Generation results arriving from spawned tasks
    outcome_tx: mpsc::Sender<GenerationOutcome>,
    outcome_rx: mpsc::Receiver<GenerationOutcome>,
}

impl TuiRunner {
    /// Create a runner showing the current week
    pub fn new(terminal: Tui, saver: DebouncedSaver<WeeklyData>, generator: Option<Arc<PlanGenerator>>) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::channel(1);
        Self {
            app: App::new(dates::current_week_id()),
            terminal,
            saver,
            generator,
            event_handler: EventHandler::new(Duration::from_millis(33)), // ~30 FPS
            outcome_tx,
            outcome_rx,
        }
    }

    /// Run the TUI main loop
    pub async fn run(&mut self) -> Result<()> {
        // Bring up the stored record for the initial week
        let week_id = self.app.state().week_id.clone();
        self.load_week(&week_id)?;

        loop {
            // Draw the UI
            self.terminal.draw(|frame| views::render(self.app.state(), frame))?;

            // Handle events
            match self.event_handler.next().await? {
                Event::Tick => {
                    self.handle_tick()?;
                }
                Event::Key(key_event) => {
                    if self.app.handle_key(key_event) {
                        break;
                    }
                }
                Event::Resize(_, _) => {
                    // Next draw picks up the new size
                }
            }

            if self.app.state().should_quit {
                break;
            }
        }

        // Nothing typed may be lost on exit
        self.snapshot_if_dirty();
        self.saver.flush()?;

        Ok(())
    }

    /// Handle tick event - all deferred side effects happen here
    fn handle_tick(&mut self) -> Result<()> {
        // Apply any finished generation
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            self.finish_generation(outcome);
        }

        // Consume a pending action queued by the key handler
        if let Some(action) = self.app.state_mut().pending_action.take() {
            match action {
                PendingAction::LoadWeek(week_id) => self.switch_week(&week_id)?,
                PendingAction::Generate(goal) => self.start_generation(goal),
            }
        }

        // Edits since the last tick supersede the pending snapshot
        self.snapshot_if_dirty();

        // Write the snapshot once its quiet period has elapsed
        if let Some(week_id) = self.saver.poll()? {
            debug!(%week_id, "Debounced save written");
        }

        Ok(())
    }

    /// Schedule a save snapshot of the current week if it has unsaved edits
    ///
    /// The snapshot pairs the data with the week id it belongs to, so a
    /// write firing after navigation still lands under the right key.
    fn snapshot_if_dirty(&mut self) {
        let state = self.app.state_mut();
        if state.dirty {
            self.saver.schedule(state.week_id.clone(), state.data.clone());
            state.dirty = false;
        }
    }

    /// Navigate to another week: flush the outgoing page, load the new one
    fn switch_week(&mut self, week_id: &str) -> Result<()> {
        self.snapshot_if_dirty();
        if let Some(flushed) = self.saver.flush()? {
            debug!(week_id = %flushed, "Flushed before week switch");
        }
        self.load_week(week_id)
    }

    /// Load a week from the store, falling back to the empty page
    fn load_week(&mut self, week_id: &str) -> Result<()> {
        let data = match self.saver.store().load(week_id)? {
            Some(data) => data,
            None => WeeklyData::empty(week_id),
        };
        self.app.state_mut().replace_week(week_id, data);
        debug!(week_id, "Week loaded");
        Ok(())
    }

    /// Spawn a generation task for the current week
    fn start_generation(&mut self, goal: String) {
        let Some(generator) = &self.generator else {
            let state = self.app.state_mut();
            state.generating = false;
            state.mode = InteractionMode::Normal;
            state.set_error("Smart plan unavailable: no API key configured");
            return;
        };

        let generator = Arc::clone(generator);
        let week_id = self.app.state().week_id.clone();
        let tx = self.outcome_tx.clone();

        debug!(%week_id, "Starting plan generation");
        tokio::spawn(async move {
            let result = generator.generate(&goal, &week_id).await;
            let _ = tx.send(GenerationOutcome { week_id, result }).await;
        });
    }

    /// Apply a finished generation to the state
    fn finish_generation(&mut self, outcome: GenerationOutcome) {
        let state = self.app.state_mut();
        state.generating = false;

        match outcome.result {
            Ok(plan) => {
                // A result for a week the user has since navigated away
                // from must not overwrite the page now on screen.
                if outcome.week_id != state.week_id {
                    warn!(
                        target_week = %outcome.week_id,
                        current_week = %state.week_id,
                        "Discarding generated plan for a week no longer displayed"
                    );
                    state.set_status(format!("Discarded plan generated for {}", outcome.week_id));
                    return;
                }

                state.data.apply_generated(plan);
                state.dirty = true;
                state.mode = InteractionMode::Normal;
                state.set_status("Week plan generated");
            }
            Err(e) => {
                // Kind stays visible in the log; the UI shows one notice
                warn!(week_id = %outcome.week_id, error = %e, "Plan generation failed");
                state.set_error(format!("Plan generation failed: {}", e));
            }
        }
    }
}
