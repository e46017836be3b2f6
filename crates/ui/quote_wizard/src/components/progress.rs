use color_eyre::Result;
use quote_core::{Step, WizardState};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Gauge, Paragraph},
};

use crate::{components::Component, tui::Frame};

/// Brand line plus the step gauge.
#[derive(Default)]
pub struct ProgressHeader;

impl ProgressHeader {
    pub fn label(step: Step) -> String {
        format!(
            "Step {} of {} ({}%)",
            step.number(),
            Step::COUNT,
            (step.progress() * 100.0).round()
        )
    }
}

impl Component for ProgressHeader {
    fn height_constraint(&self) -> Constraint {
        Constraint::Length(3)
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect, state: &WizardState) -> Result<()> {
        let [brand, gauge, _gap] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);

        let title = Line::from(vec![
            Span::styled(
                "InsureQuick",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::raw("Get your car insurance quote in minutes").fg(Color::DarkGray),
        ]);
        f.render_widget(Paragraph::new(title), brand);

        let step = state.current_step();
        let bar = Gauge::default()
            .gauge_style(Style::default().fg(Color::Cyan).bg(Color::Black))
            .ratio(step.progress())
            .label(Self::label(step));
        f.render_widget(bar, gauge);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_shows_step_and_percent() {
        assert_eq!(ProgressHeader::label(Step::Vehicle), "Step 1 of 5 (20%)");
        assert_eq!(ProgressHeader::label(Step::Quotes), "Step 5 of 5 (100%)");
    }
}
