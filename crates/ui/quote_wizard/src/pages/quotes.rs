use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use quote_core::{Intent, PlanCatalog, RECOMMENDED_INDEX, Step, WizardState};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    symbols,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use tracing::warn;

use crate::{
    action::Action,
    pages::Page,
    tui::{EventResponse, Frame},
};

/// Plan cards of the last step. The cursor starts on the recommended plan.
pub struct QuotesPage {
    catalog: PlanCatalog,
    selected: usize,
}

impl QuotesPage {
    pub fn new(catalog: PlanCatalog) -> Self {
        let selected = RECOMMENDED_INDEX.min(catalog.len().saturating_sub(1));
        Self { catalog, selected }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    fn move_cursor(&mut self, forward: bool) {
        let len = self.catalog.len();
        if len == 0 {
            return;
        }
        self.selected = if forward {
            (self.selected + 1) % len
        } else {
            (self.selected + len - 1) % len
        };
    }

    fn choose(&self) -> Action {
        match self.catalog.get(self.selected) {
            Ok(plan) => Action::Wizard(Intent::ChoosePlan(plan.clone())),
            Err(err) => {
                warn!(%err, "no plan under the cursor");
                Action::Error(err.to_string())
            }
        }
    }

    fn draw_card(&self, f: &mut Frame<'_>, area: Rect, index: usize) {
        let Ok(plan) = self.catalog.get(index) else {
            return;
        };
        let recommended = self.catalog.is_recommended(index);
        let highlighted = index == self.selected;

        let border = if highlighted {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else if recommended {
            Style::default().fg(Color::Blue)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_set(if highlighted {
                symbols::border::THICK
            } else {
                symbols::border::ROUNDED
            })
            .border_style(border)
            .title(format!(" {} ", plan.name));
        if recommended {
            block = block.title_bottom(Line::from(" Recommended ").fg(Color::Blue).centered());
        }

        let mut lines = vec![
            Line::from(Span::styled(
                plan.price_label(),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            )),
            Line::raw(""),
        ];
        lines.extend(
            plan.features
                .iter()
                .map(|feature| Line::from(vec![Span::raw("✓ ").fg(Color::Green), Span::raw(feature.clone())])),
        );
        lines.push(Line::raw(""));
        lines.push(if highlighted {
            Line::from("[ Select Plan ]").bold().centered()
        } else {
            Line::from("Select Plan").fg(Color::DarkGray).centered()
        });

        f.render_widget(
            Paragraph::new(lines)
                .block(block)
                .wrap(Wrap { trim: true }),
            area,
        );
    }
}

impl Page for QuotesPage {
    fn name(&self) -> &str {
        Step::Quotes.title()
    }

    fn on_enter(&mut self, _state: &WizardState) -> Result<()> {
        self.selected = RECOMMENDED_INDEX.min(self.catalog.len().saturating_sub(1));
        Ok(())
    }

    fn handle_key_events(
        &mut self,
        key: KeyEvent,
        _state: &WizardState,
    ) -> Result<Option<EventResponse<Action>>> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(match key.code {
                KeyCode::Char('p') => Some(EventResponse::Stop(Action::Wizard(Intent::Retreat))),
                _ => None,
            });
        }
        let action = match key.code {
            KeyCode::Left | KeyCode::BackTab | KeyCode::Up => {
                self.move_cursor(false);
                Action::Render
            }
            KeyCode::Right | KeyCode::Tab | KeyCode::Down => {
                self.move_cursor(true);
                Action::Render
            }
            KeyCode::Enter => self.choose(),
            KeyCode::Esc => Action::Wizard(Intent::Retreat),
            _ => return Ok(None),
        };
        Ok(Some(EventResponse::Stop(action)))
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect, _state: &WizardState) -> Result<()> {
        let [heading, cards, _rest] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(12),
            Constraint::Fill(1),
        ])
        .areas(area);

        let title = vec![
            Line::from(Step::Quotes.title()).bold(),
            Line::from(Step::Quotes.subtitle()).fg(Color::DarkGray),
        ];
        f.render_widget(Paragraph::new(title).alignment(Alignment::Left), heading);

        let count = self.catalog.len().max(1) as u32;
        let columns = Layout::horizontal(
            (0..count).map(|_| Constraint::Ratio(1, count)).collect::<Vec<_>>(),
        )
        .spacing(1)
        .split(cards);
        for (index, column) in columns.iter().enumerate() {
            self.draw_card(f, *column, index);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn action(page: &mut QuotesPage, code: KeyCode) -> Option<Action> {
        match page.handle_key_events(key(code), &WizardState::new()).unwrap() {
            Some(EventResponse::Stop(a)) | Some(EventResponse::Continue(a)) => Some(a),
            None => None,
        }
    }

    #[test]
    fn starts_on_the_recommended_plan() {
        let page = QuotesPage::new(PlanCatalog::standard());
        assert_eq!(page.selected(), RECOMMENDED_INDEX);
    }

    #[test]
    fn enter_chooses_the_plan_under_the_cursor() {
        let mut page = QuotesPage::new(PlanCatalog::standard());
        action(&mut page, KeyCode::Right);
        match action(&mut page, KeyCode::Enter) {
            Some(Action::Wizard(Intent::ChoosePlan(plan))) => {
                assert_eq!(plan.name, "Premium Coverage");
                assert_eq!(plan.monthly_price, 198);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn cursor_wraps() {
        let mut page = QuotesPage::new(PlanCatalog::standard());
        action(&mut page, KeyCode::Left);
        action(&mut page, KeyCode::Left);
        assert_eq!(page.selected(), 2);
    }

    #[test]
    fn esc_goes_back() {
        let mut page = QuotesPage::new(PlanCatalog::standard());
        assert_eq!(action(&mut page, KeyCode::Esc), Some(Action::Wizard(Intent::Retreat)));
    }
}
