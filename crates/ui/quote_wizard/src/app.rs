use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use quote_core::{Notification, PlanCatalog, Step, ValidationContext, WizardSession, WizardState};
use ratatui::layout::{Constraint, Layout, Rect};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, error, info};

use crate::{
    action::Action,
    components::{
        Component,
        popup::{AlertPopup, PopupComponent},
        progress::ProgressHeader,
        status_bar::StatusBar,
    },
    config::Config,
    pages::{Page, QuotesPage, StepFormPage},
    tui::{Event, EventResponse, Frame, Tui},
};

/// Interactive wizard: one page per step, a header, a status bar and at
/// most one popup.
///
/// Terminal events and scheduler completions are both turned into
/// [`Action`]s; `Action::Wizard` goes through the session and the resulting
/// notifications drive popup and status bar.
pub struct App {
    config: Config,
    session: WizardSession,
    pages: Vec<Box<dyn Page>>,
    header: ProgressHeader,
    status_bar: StatusBar,
    popup: Option<Box<dyn PopupComponent>>,
    should_quit: bool,
    should_suspend: bool,
    action_tx: UnboundedSender<Action>,
    action_rx: UnboundedReceiver<Action>,
}

impl App {
    pub fn new(config: Config, catalog: PlanCatalog) -> Result<Self> {
        let state = WizardState::with_context(ValidationContext::today());
        let session = WizardSession::new(state, config.session_options());
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        let mut pages: Vec<Box<dyn Page>> = [
            Step::Vehicle,
            Step::Personal,
            Step::Address,
            Step::DrivingHistory,
        ]
        .into_iter()
        .map(|step| Box::new(StepFormPage::new(step)) as Box<dyn Page>)
        .collect();
        pages.push(Box::new(QuotesPage::new(catalog)));

        let mut app = Self {
            config,
            session,
            pages,
            header: ProgressHeader,
            status_bar: StatusBar::new(),
            popup: None,
            should_quit: false,
            should_suspend: false,
            action_tx,
            action_rx,
        };
        app.enter_current_page()?;
        Ok(app)
    }

    pub fn state(&self) -> &WizardState {
        self.session.state()
    }

    pub fn status(&self) -> Option<&str> {
        self.status_bar.message()
    }

    pub fn has_popup(&self) -> bool {
        self.popup.is_some()
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?
            .tick_rate(self.config.wizard.tick_rate)
            .frame_rate(self.config.wizard.frame_rate);
        tui.enter()?;
        info!(
            delay_ms = self.config.wizard.transition_delay_ms,
            "wizard started"
        );

        loop {
            tokio::select! {
                Some(event) = tui.next_event() => self.handle_event(event)?,
                Some(intent) = self.session.next_intent() => {
                    self.action_tx.send(Action::Wizard(intent))?;
                }
                else => break,
            }
            self.handle_actions(&mut tui)?;
            if self.should_suspend {
                tui.suspend()?;
                self.action_tx.send(Action::Resume)?;
                self.action_tx.send(Action::ClearScreen)?;
                tui.enter()?;
            } else if self.should_quit {
                tui.stop()?;
                break;
            }
        }
        tui.exit()?;
        info!("wizard closed");
        Ok(())
    }

    fn page_index(step: Step) -> usize {
        usize::from(step.number() - 1)
    }

    fn enter_current_page(&mut self) -> Result<()> {
        let step = self.session.state().current_step();
        let page = &mut self.pages[Self::page_index(step)];
        debug!(page = page.name(), "page entered");
        page.on_enter(self.session.state())
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        let action_tx = self.action_tx.clone();
        match event {
            Event::Tick => action_tx.send(Action::Tick)?,
            Event::Render => action_tx.send(Action::Render)?,
            Event::Resize(x, y) => action_tx.send(Action::Resize(x, y))?,
            Event::Error => action_tx.send(Action::Error("terminal event error".into()))?,
            Event::Key(key) if Self::is_global_key(key) => {
                if let Some(action) = Self::global_action(key) {
                    action_tx.send(action)?;
                }
                return Ok(());
            }
            _ => {}
        }

        let state = self.session.state();
        let response = match self.popup.as_mut() {
            Some(popup) => popup.handle_events(event.clone(), state)?,
            None => None,
        };
        let stop = match response {
            Some(EventResponse::Stop(a)) => {
                action_tx.send(a)?;
                true
            }
            Some(EventResponse::Continue(a)) => {
                action_tx.send(a)?;
                false
            }
            None => false,
        };
        if stop {
            return Ok(());
        }

        let page = &mut self.pages[Self::page_index(state.current_step())];
        match page.handle_events(event, state)? {
            Some(EventResponse::Stop(a)) | Some(EventResponse::Continue(a)) => {
                action_tx.send(a)?;
            }
            None => {}
        }
        Ok(())
    }

    fn is_global_key(key: KeyEvent) -> bool {
        key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c' | 'd' | 'q' | 'z'))
    }

    fn global_action(key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Char('c' | 'd' | 'q') => Some(Action::Quit),
            KeyCode::Char('z') => Some(Action::Suspend),
            _ => None,
        }
    }

    fn handle_actions(&mut self, tui: &mut Tui) -> Result<()> {
        while let Ok(action) = self.action_rx.try_recv() {
            if !matches!(action, Action::Tick | Action::Render) {
                debug!("{action:?}");
            }
            match action {
                Action::Tick => {}
                Action::Render => self.draw(tui)?,
                Action::Quit => self.should_quit = true,
                Action::Suspend => self.should_suspend = true,
                Action::Resume => self.should_suspend = false,
                Action::ClearScreen => tui.terminal.clear()?,
                Action::Resize(w, h) => {
                    tui.resize(Rect::new(0, 0, w, h))?;
                    self.draw(tui)?;
                }
                Action::Error(msg) => {
                    error!("{msg}");
                    self.status_bar.set_message(msg);
                }
                other => self.apply(other)?,
            }
        }
        Ok(())
    }

    fn draw(&mut self, tui: &mut Tui) -> Result<()> {
        tui.draw(|f| {
            if let Err(err) = self.render(f, f.area()) {
                error!("render failed: {err:?}");
            }
        })?;
        Ok(())
    }

    /// State changes that do not need the terminal.
    pub fn apply(&mut self, action: Action) -> Result<()> {
        match action {
            Action::Wizard(intent) => {
                let before = self.session.state().current_step();
                let notifications = self.session.dispatch(intent);
                if self.session.state().current_step() != before {
                    self.enter_current_page()?;
                }
                for notification in notifications {
                    self.notify(notification);
                }
            }
            Action::ShowAlert { title, message } => {
                self.popup = Some(Box::new(AlertPopup::new(title, message)));
            }
            Action::ClosePopup => self.popup = None,
            _ => {}
        }
        Ok(())
    }

    fn notify(&mut self, notification: Notification) {
        self.status_bar.record(&notification);
        if let Notification::PlanChosen { .. } = &notification {
            let message = notification.to_string();
            if let Err(err) = self.action_tx.send(Action::ShowAlert {
                title: "Plan Selected".into(),
                message,
            }) {
                error!("alert dropped: {err}");
            }
        }
    }

    /// Hand queued actions to [`App::apply`]; the headless counterpart of
    /// the render loop.
    pub fn drain(&mut self) -> Result<()> {
        while let Ok(action) = self.action_rx.try_recv() {
            self.apply(action)?;
        }
        Ok(())
    }

    pub fn sender(&self) -> UnboundedSender<Action> {
        self.action_tx.clone()
    }

    fn render(&mut self, f: &mut Frame<'_>, area: Rect) -> Result<()> {
        let [header, content, footer] = Layout::vertical([
            self.header.height_constraint(),
            Constraint::Fill(1),
            self.status_bar.height_constraint(),
        ])
        .areas(area);

        let state = self.session.state();
        self.header.draw(f, header, state)?;
        self.pages[Self::page_index(state.current_step())].draw(f, content, state)?;
        self.status_bar.draw(f, footer, state)?;
        if let Some(popup) = self.popup.as_mut() {
            popup.draw(f, area, state)?;
        }
        Ok(())
    }
}
