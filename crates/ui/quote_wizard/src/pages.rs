use color_eyre::Result;
use crossterm::event::KeyEvent;
use quote_core::WizardState;
use ratatui::layout::Rect;

use crate::{
    action::Action,
    tui::{Event, EventResponse, Frame},
};

mod quotes;
mod step_form;

pub use quotes::QuotesPage;
pub use step_form::StepFormPage;

/// A `Page` fills the content area for one wizard step.
pub trait Page {
    fn name(&self) -> &str;

    /// Called when the page becomes active.
    fn on_enter(&mut self, state: &WizardState) -> Result<()> {
        let _ = state;
        Ok(())
    }

    fn handle_events(
        &mut self,
        event: Event,
        state: &WizardState,
    ) -> Result<Option<EventResponse<Action>>> {
        match event {
            Event::Key(key) => self.handle_key_events(key, state),
            _ => Ok(None),
        }
    }

    fn handle_key_events(
        &mut self,
        key: KeyEvent,
        state: &WizardState,
    ) -> Result<Option<EventResponse<Action>>> {
        let _ = (key, state);
        Ok(None)
    }

    /// Draw the page using the provided `Frame` and `area`.
    fn draw(&mut self, frame: &mut Frame<'_>, area: Rect, state: &WizardState) -> Result<()>;
}
