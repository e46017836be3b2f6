use color_eyre::Result;
use crossterm::event::KeyEvent;
use quote_core::WizardState;
use ratatui::layout::{Constraint, Rect};

use crate::{
    action::Action,
    tui::{Event, EventResponse, Frame},
};

pub mod popup;
pub mod progress;
pub mod status_bar;

/// `Component` is a trait that represents a visual and interactive element of the user interface.
///
/// Components read the wizard state but never mutate it; anything that should
/// change the wizard is returned as an [`Action`].
pub trait Component {
    fn height_constraint(&self) -> Constraint;

    fn handle_events(
        &mut self,
        event: Event,
        state: &WizardState,
    ) -> Result<Option<EventResponse<Action>>> {
        let r = match event {
            Event::Key(key_event) => self.handle_key_events(key_event, state)?,
            _ => None,
        };
        Ok(r)
    }

    fn handle_key_events(
        &mut self,
        _key: KeyEvent,
        _state: &WizardState,
    ) -> Result<Option<EventResponse<Action>>> {
        Ok(None)
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect, state: &WizardState) -> Result<()>;
}
