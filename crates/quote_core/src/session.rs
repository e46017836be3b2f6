//! Session driver: reducer + effect interpretation + scheduler.
//!
//! The presentation layer feeds user intents into [`WizardSession::dispatch`]
//! and polls [`WizardSession::next_intent`] for scheduler completions, which
//! it dispatches the same way. Notifications produced along the way are
//! returned from `dispatch` and, if a channel is attached, forwarded to it.

use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

use crate::effects::{Effect, Notification};
use crate::reducer::{self, Intent};
use crate::scheduler::{DEFAULT_TRANSITION_DELAY, TransitionScheduler};
use crate::state::WizardState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    pub transition_delay: Duration,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            transition_delay: DEFAULT_TRANSITION_DELAY,
        }
    }
}

pub struct WizardSession {
    state: WizardState,
    options: SessionOptions,
    scheduler: TransitionScheduler,
    intent_rx: UnboundedReceiver<Intent>,
    notify_tx: Option<UnboundedSender<Notification>>,
}

impl WizardSession {
    pub fn new(state: WizardState, options: SessionOptions) -> Self {
        let (intent_tx, intent_rx) = mpsc::unbounded_channel();
        Self {
            state,
            options,
            scheduler: TransitionScheduler::new(intent_tx),
            intent_rx,
            notify_tx: None,
        }
    }

    /// Also forward every notification to `tx`.
    pub fn with_notifications(mut self, tx: UnboundedSender<Notification>) -> Self {
        self.notify_tx = Some(tx);
        self
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    /// Apply one intent and run its effects. Must be called inside a Tokio
    /// runtime since a successful advance spawns its delay task.
    pub fn dispatch(&mut self, intent: Intent) -> Vec<Notification> {
        if let Intent::TransitionElapsed(ticket) = &intent {
            self.scheduler.finish(*ticket);
        }
        let effects = reducer::reduce(&mut self.state, intent);
        self.run_effects(effects)
    }

    /// Wait for the next scheduler completion.
    ///
    /// Cancel-safe, so it can sit in a `tokio::select!` next to terminal
    /// events.
    pub async fn next_intent(&mut self) -> Option<Intent> {
        self.intent_rx.recv().await
    }

    /// Dispatch scheduler completions until no transition is pending.
    pub async fn settle(&mut self) -> Vec<Notification> {
        let mut out = Vec::new();
        while self.state.transitioning() {
            match self.next_intent().await {
                Some(intent) => out.extend(self.dispatch(intent)),
                None => break,
            }
        }
        out
    }

    fn run_effects(&mut self, effects: Vec<Effect>) -> Vec<Notification> {
        let mut notifications = Vec::new();
        for effect in effects {
            match effect {
                Effect::Schedule(task) => {
                    info!("[effect] schedule {task}");
                    self.scheduler.schedule(task, self.options.transition_delay);
                }
                Effect::Cancel(ticket) => {
                    debug!("[effect] cancel {ticket}");
                    self.scheduler.cancel(ticket);
                }
                Effect::Notify(notification) => {
                    if let Some(tx) = &self.notify_tx {
                        if tx.send(notification.clone()).is_err() {
                            warn!("notification receiver dropped");
                        }
                    }
                    notifications.push(notification);
                }
                Effect::Log(msg) => {
                    debug!("[effect] {msg}");
                }
            }
        }
        notifications
    }
}
