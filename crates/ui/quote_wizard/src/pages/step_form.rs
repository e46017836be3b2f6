use color_eyre::Result;
use crossterm::event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyModifiers};
use quote_core::{FieldKey, FieldKind, Intent, SelectOption, Step, WizardState};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tui_input::{Input, backend::crossterm::EventHandler as _};

use crate::{
    action::Action,
    pages::Page,
    tui::{EventResponse, Frame},
};

/// Form for one of the four input steps.
///
/// Text fields are edited through a local `Input` mirror; every change is
/// forwarded as `Intent::UpdateField`, so the session stays the source of
/// truth. Select fields are cycled with Left/Right and read straight from
/// the answers.
pub struct StepFormPage {
    step: Step,
    focus: usize,
    inputs: Vec<Input>,
}

impl StepFormPage {
    pub fn new(step: Step) -> Self {
        Self {
            step,
            focus: 0,
            inputs: step.fields().iter().map(|_| Input::default()).collect(),
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn focused(&self) -> FieldKey {
        self.step.fields()[self.focus]
    }

    fn field_count(&self) -> usize {
        self.step.fields().len()
    }

    fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % self.field_count();
    }

    fn focus_prev(&mut self) {
        self.focus = (self.focus + self.field_count() - 1) % self.field_count();
    }

    fn is_last_field(&self) -> bool {
        self.focus + 1 == self.field_count()
    }

    // Next stays inert while it is drawn disabled.
    fn advance(state: &WizardState) -> Action {
        if state.can_advance() {
            Action::Wizard(Intent::Advance)
        } else {
            Action::Render
        }
    }

    /// Next option after (or before) `current`; an empty value starts at
    /// either end.
    fn cycle(options: &'static [SelectOption], current: &str, forward: bool) -> Option<&'static str> {
        if options.is_empty() {
            return None;
        }
        let len = options.len();
        let next = match options.iter().position(|o| o.value == current) {
            Some(i) if forward => (i + 1) % len,
            Some(i) => (i + len - 1) % len,
            None if forward => 0,
            None => len - 1,
        };
        Some(options[next].value)
    }

    fn draw_field(
        &self,
        f: &mut Frame<'_>,
        area: Rect,
        index: usize,
        state: &WizardState,
    ) {
        let key = self.step.fields()[index];
        let [input_area, error_area] =
            Layout::vertical([Constraint::Length(3), Constraint::Length(1)]).areas(area);

        let focused = index == self.focus && !state.transitioning();
        let error = state.errors().get(key);
        let border = match (focused, error.is_some()) {
            (_, true) => Style::default().fg(Color::Red),
            (true, false) => Style::default().fg(Color::Cyan),
            (false, false) => Style::default().fg(Color::DarkGray),
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(Line::from(vec![
                Span::raw(format!(" {} ", key.label())),
                Span::raw("* ").fg(Color::Red),
            ]));
        let inner = block.inner(input_area);
        f.render_widget(block, input_area);

        match key.kind() {
            FieldKind::Select(options) => {
                let value = state.answers().get(key);
                let content = match options.iter().find(|o| o.value == value) {
                    Some(option) => Span::raw(option.label),
                    None => Span::raw(format!("Select {}", key.label().to_lowercase()))
                        .fg(Color::DarkGray),
                };
                let mut spans = vec![content];
                if focused {
                    spans.insert(0, Span::raw("◀ ").fg(Color::Cyan));
                    spans.push(Span::raw(" ▶").fg(Color::Cyan));
                }
                f.render_widget(Paragraph::new(Line::from(spans)), inner);
            }
            _ => {
                let input = &self.inputs[index];
                // keep 1 for the cursor
                let width = inner.width.max(1) - 1;
                let scroll = input.visual_scroll(width as usize);
                let paragraph = if input.value().is_empty() {
                    Paragraph::new(key.placeholder()).fg(Color::DarkGray)
                } else {
                    Paragraph::new(input.value()).scroll((0, scroll as u16))
                };
                f.render_widget(paragraph, inner);
                if focused {
                    // Ratatui hides the cursor unless it's explicitly set.
                    let x = input.visual_cursor().max(scroll) - scroll;
                    f.set_cursor_position((inner.x + x as u16, inner.y));
                }
            }
        }

        if let Some(message) = error {
            f.render_widget(
                Paragraph::new(message.to_string()).fg(Color::Red),
                error_area,
            );
        }
    }

    /// Grey skeleton row shown in place of a field while the step is processed.
    fn draw_placeholder(f: &mut Frame<'_>, area: Rect) {
        let [bar, _] = Layout::vertical([Constraint::Length(3), Constraint::Length(1)]).areas(area);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(bar);
        f.render_widget(block, bar);
        let fill = "░".repeat(usize::from(inner.width / 2));
        f.render_widget(Paragraph::new(fill).fg(Color::DarkGray), inner);
    }

    fn draw_nav(&self, f: &mut Frame<'_>, area: Rect, state: &WizardState) {
        let previous = if state.can_retreat() {
            Span::raw("◀ Previous").fg(Color::White)
        } else {
            Span::raw("◀ Previous").fg(Color::DarkGray)
        };
        let next = if state.transitioning() {
            Span::raw("Processing...").fg(Color::Yellow)
        } else if state.can_advance() {
            Span::styled(
                "Next ▶",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::raw("Next ▶").fg(Color::DarkGray)
        };
        let [left, right] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Length(14)]).areas(area);
        f.render_widget(Paragraph::new(Line::from(previous)), left);
        f.render_widget(
            Paragraph::new(Line::from(next)).alignment(Alignment::Right),
            right,
        );
    }
}

impl Page for StepFormPage {
    fn name(&self) -> &str {
        self.step.title()
    }

    fn on_enter(&mut self, state: &WizardState) -> Result<()> {
        self.focus = 0;
        for (input, key) in self.inputs.iter_mut().zip(self.step.fields()) {
            *input = Input::new(state.answers().get(*key).to_string());
        }
        Ok(())
    }

    fn handle_key_events(
        &mut self,
        key: KeyEvent,
        state: &WizardState,
    ) -> Result<Option<EventResponse<Action>>> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            let action = match key.code {
                KeyCode::Char('n') => Self::advance(state),
                KeyCode::Char('p') => Action::Wizard(Intent::Retreat),
                _ => return Ok(None),
            };
            return Ok(Some(EventResponse::Stop(action)));
        }

        let field = self.focused();
        let action = match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.focus_next();
                Action::Render
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus_prev();
                Action::Render
            }
            KeyCode::Enter if self.is_last_field() => Self::advance(state),
            KeyCode::Enter => {
                self.focus_next();
                Action::Render
            }
            KeyCode::Esc => Action::Wizard(Intent::Retreat),
            KeyCode::Left | KeyCode::Right
                if !field.kind().is_textual() && !state.transitioning() =>
            {
                let forward = key.code == KeyCode::Right;
                match Self::cycle(field.kind().options(), state.answers().get(field), forward) {
                    Some(value) => Action::Wizard(Intent::update(field, value)),
                    None => Action::Render,
                }
            }
            _ if field.kind().is_textual() && !state.transitioning() => {
                let input = &mut self.inputs[self.focus];
                match input.handle_event(&CrosstermEvent::Key(key)) {
                    Some(changed) if changed.value => {
                        Action::Wizard(Intent::update(field, input.value()))
                    }
                    Some(_) => Action::Render,
                    None => return Ok(None),
                }
            }
            _ => return Ok(None),
        };
        Ok(Some(EventResponse::Stop(action)))
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect, state: &WizardState) -> Result<()> {
        let [heading, body, nav] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(area);

        let title = vec![
            Line::from(self.step.title()).bold(),
            Line::from(self.step.subtitle()).fg(Color::DarkGray),
        ];
        f.render_widget(Paragraph::new(title), heading);

        let rows = Layout::vertical(
            self.step
                .fields()
                .iter()
                .map(|_| Constraint::Length(4))
                .collect::<Vec<_>>(),
        )
        .split(body);
        if state.transitioning() {
            for row in rows.iter() {
                Self::draw_placeholder(f, *row);
            }
        } else {
            for (index, row) in rows.iter().enumerate() {
                self.draw_field(f, *row, index, state);
            }
        }

        self.draw_nav(f, nav, state);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use quote_core::{AnswerRecord, ValidationContext};
    use ratatui::{Terminal, backend::TestBackend};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn state() -> WizardState {
        WizardState::with_context(ValidationContext::for_year(2026))
    }

    fn action(page: &mut StepFormPage, ev: KeyEvent, state: &WizardState) -> Option<Action> {
        match page.handle_key_events(ev, state).unwrap() {
            Some(EventResponse::Stop(a)) | Some(EventResponse::Continue(a)) => Some(a),
            None => None,
        }
    }

    #[test]
    fn typing_forwards_the_whole_value() {
        let state = state();
        let mut page = StepFormPage::new(Step::Personal);
        page.on_enter(&state).unwrap();
        assert_eq!(page.focused(), FieldKey::FirstName);

        action(&mut page, key(KeyCode::Char('A')), &state);
        let last = action(&mut page, key(KeyCode::Char('l')), &state);
        assert_eq!(last, Some(Action::Wizard(Intent::update(FieldKey::FirstName, "Al"))));
    }

    #[test]
    fn on_enter_loads_answers_and_resets_focus() {
        let state = state().with_answers(AnswerRecord::new().with(FieldKey::City, "Austin"));
        let mut page = StepFormPage::new(Step::Address);
        page.focus = 2;
        page.on_enter(&state).unwrap();
        assert_eq!(page.focused(), FieldKey::Address);
        assert_eq!(page.inputs[1].value(), "Austin");
    }

    #[test]
    fn focus_wraps_both_ways() {
        let state = state();
        let mut page = StepFormPage::new(Step::Vehicle);
        action(&mut page, key(KeyCode::BackTab), &state);
        assert_eq!(page.focused(), FieldKey::Vin);
        action(&mut page, key(KeyCode::Tab), &state);
        assert_eq!(page.focused(), FieldKey::Make);
    }

    #[test]
    fn select_cycles_through_options() {
        let state = state();
        let mut page = StepFormPage::new(Step::Vehicle);
        assert_eq!(
            action(&mut page, key(KeyCode::Right), &state),
            Some(Action::Wizard(Intent::update(FieldKey::Make, "toyota")))
        );

        let state = state.with_answers(AnswerRecord::new().with(FieldKey::Make, "toyota"));
        assert_eq!(
            action(&mut page, key(KeyCode::Left), &state),
            Some(Action::Wizard(Intent::update(FieldKey::Make, "audi")))
        );
    }

    fn complete_vehicle() -> AnswerRecord {
        AnswerRecord::new()
            .with(FieldKey::Make, "ford")
            .with(FieldKey::Model, "Focus")
            .with(FieldKey::Year, "2019")
            .with(FieldKey::Vin, "1FADP3F20JL000001")
    }

    #[test]
    fn enter_on_last_field_and_ctrl_n_advance() {
        let state = state().with_answers(complete_vehicle());
        let mut page = StepFormPage::new(Step::Vehicle);
        assert_eq!(action(&mut page, key(KeyCode::Enter), &state), Some(Action::Render));
        page.focus = 3;
        assert_eq!(
            action(&mut page, key(KeyCode::Enter), &state),
            Some(Action::Wizard(Intent::Advance))
        );
        assert_eq!(action(&mut page, ctrl('n'), &state), Some(Action::Wizard(Intent::Advance)));
        assert_eq!(action(&mut page, ctrl('p'), &state), Some(Action::Wizard(Intent::Retreat)));
        assert_eq!(action(&mut page, ctrl('c'), &state), None);
    }

    #[test]
    fn disabled_next_does_not_advance() {
        let state = state();
        assert!(!state.can_advance());
        let mut page = StepFormPage::new(Step::Vehicle);
        page.focus = 3;
        assert_eq!(action(&mut page, key(KeyCode::Enter), &state), Some(Action::Render));
        assert_eq!(action(&mut page, ctrl('n'), &state), Some(Action::Render));
        assert!(state.errors().is_empty());
    }

    #[test]
    fn processing_step_draws_placeholders() {
        let mut state = state().with_answers(complete_vehicle());
        quote_core::reduce(&mut state, Intent::Advance);
        let mut page = StepFormPage::new(Step::Vehicle);
        page.on_enter(&state).unwrap();

        let mut terminal = Terminal::new(TestBackend::new(60, 22)).unwrap();
        terminal
            .draw(|f| page.draw(f, f.area(), &state).unwrap())
            .unwrap();
        let screen: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(screen.contains("Processing..."));
        assert!(screen.contains('░'));
        assert!(!screen.contains("Focus"));
    }

    #[test]
    fn edits_are_ignored_while_processing() {
        let mut state = state().with_answers(complete_vehicle());
        quote_core::reduce(&mut state, Intent::Advance);
        assert!(state.transitioning());

        let mut page = StepFormPage::new(Step::Vehicle);
        page.on_enter(&state).unwrap();
        assert_eq!(action(&mut page, key(KeyCode::Right), &state), None);
        page.focus = 1;
        assert_eq!(action(&mut page, key(KeyCode::Char('x')), &state), None);
        assert_eq!(page.inputs[1].value(), "Focus");
    }
}
