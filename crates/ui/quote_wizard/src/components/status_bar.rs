use color_eyre::Result;
use quote_core::{Notification, Step, WizardState};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{components::Component, tui::Frame};

pub const TAGLINE: &str = "Secure • Fast • Trusted by millions";

/// Bottom line: key hints for the current step, the last wizard event and
/// the tagline.
#[derive(Default)]
pub struct StatusBar {
    message: Option<String>,
}

impl StatusBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn record(&mut self, notification: &Notification) {
        self.message = Some(notification.to_string());
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    pub fn hints(step: Step) -> &'static str {
        match step {
            Step::Vehicle => "Tab: Next field  ←/→: Choose  Ctrl-N: Next  Ctrl-C: Quit",
            Step::Quotes => "←/→: Choose plan  Enter: Select  Esc: Previous  Ctrl-C: Quit",
            _ => "Tab: Next field  ←/→: Choose  Ctrl-N: Next  Esc: Previous  Ctrl-C: Quit",
        }
    }
}

impl Component for StatusBar {
    fn height_constraint(&self) -> Constraint {
        Constraint::Length(1)
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect, state: &WizardState) -> Result<()> {
        let tagline_width = TAGLINE.chars().count() as u16;
        let [left, right] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Length(tagline_width)])
                .areas(area);

        let mut spans = vec![Span::raw(Self::hints(state.current_step())).fg(Color::DarkGray)];
        if let Some(msg) = &self.message {
            spans.push(Span::raw(" | "));
            spans.push(Span::raw(msg.clone()).fg(Color::Yellow));
        }
        f.render_widget(Paragraph::new(Line::from(spans)), left);
        f.render_widget(
            Paragraph::new(Line::from(TAGLINE).fg(Color::DarkGray)),
            right,
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_step_has_no_previous_hint() {
        assert!(!StatusBar::hints(Step::Vehicle).contains("Previous"));
        assert!(StatusBar::hints(Step::Address).contains("Previous"));
    }

    #[test]
    fn records_latest_notification() {
        let mut bar = StatusBar::new();
        bar.record(&Notification::StepChanged {
            step: Step::Personal,
        });
        assert_eq!(bar.message(), Some("Now at Personal Information (2/5)"));
    }
}
