use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use quote_core::WizardState;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Paragraph, Wrap},
};

use crate::{
    action::Action,
    components::Component,
    components::popup::PopupComponent,
    tui::{EventResponse, Frame},
};

use super::{centered_rect_fixed, draw_popup_frame};

/// Modal alert with a title, a message and an OK hint.
///
/// Enter and Esc both close it. Every other key is swallowed so the page
/// below does not react while the alert is up.
pub struct AlertPopup {
    title: String,
    message: String,
    min_width: u16,
    min_height: u16,
}

impl AlertPopup {
    pub fn new<T: Into<String>, M: Into<String>>(title: T, message: M) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            min_width: 50,
            min_height: 7,
        }
    }
}

impl Component for AlertPopup {
    fn height_constraint(&self) -> Constraint {
        Constraint::Min(self.min_height)
    }

    fn handle_key_events(
        &mut self,
        key: KeyEvent,
        _state: &WizardState,
    ) -> Result<Option<EventResponse<Action>>> {
        let action = match key.code {
            KeyCode::Enter => self.submit_action(),
            KeyCode::Esc => self.cancel_action(),
            _ => None,
        };
        Ok(match action {
            Some(action) => Some(EventResponse::Stop(action)),
            None if self.is_modal() => Some(EventResponse::Stop(Action::Render)),
            None => None,
        })
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect, _state: &WizardState) -> Result<()> {
        if area.width < 5 || area.height < 5 {
            return Ok(());
        }

        let dialog = centered_rect_fixed(area, self.min_width, self.min_height);
        let inner = draw_popup_frame(f, dialog, &self.title);

        let mut lines: Vec<Line> = self
            .message
            .lines()
            .map(|paragraph| Line::from(Span::raw(paragraph.to_string())))
            .collect();

        if inner.height >= 3 {
            lines.push(Line::raw(""));
        }

        let hint = Line::from(vec![
            Span::styled("Enter", Style::default().fg(Color::White)),
            Span::raw(": OK   "),
            Span::styled("Esc", Style::default().fg(Color::White)),
            Span::raw(": Close"),
        ])
        .fg(Color::DarkGray);
        lines.push(hint);

        let para = Paragraph::new(Text::from(lines)).wrap(Wrap { trim: true });
        f.render_widget(para, inner);
        Ok(())
    }
}

impl PopupComponent for AlertPopup {}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn enter_and_esc_close() {
        let state = WizardState::new();
        let mut alert = AlertPopup::new("Plan Selected", "Selected: Basic Coverage - $89/month");
        for code in [KeyCode::Enter, KeyCode::Esc] {
            assert_eq!(
                alert.handle_key_events(press(code), &state).unwrap(),
                Some(EventResponse::Stop(Action::ClosePopup))
            );
        }
    }

    #[test]
    fn other_keys_are_swallowed() {
        let state = WizardState::new();
        let mut alert = AlertPopup::new("t", "m");
        assert_eq!(
            alert.handle_key_events(press(KeyCode::Char('x')), &state).unwrap(),
            Some(EventResponse::Stop(Action::Render))
        );
    }
}
