/*!
Transition scheduler.

Runs the artificial "processing" delay between a validated `Advance` and the
actual step change. Every scheduled transition is its own Tokio task guarded
by a `CancellationToken`; when the delay elapses the task feeds
`Intent::TransitionElapsed(ticket)` back through the intent channel, where
the reducer applies (or discards, if stale) the step change.

Guarantees:
- Cancelling a ticket before its delay elapses means no completion is sent.
- Dropping the scheduler cancels everything still in flight.
- A closed intent channel is logged, never a panic.
*/

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::effects::{TaskKind, TransitionTicket};
use crate::reducer::Intent;

/// Default delay, matching the quote processing latency users are used to.
pub const DEFAULT_TRANSITION_DELAY: Duration = Duration::from_millis(1500);

pub struct TransitionScheduler {
    intent_tx: UnboundedSender<Intent>,
    in_flight: HashMap<TransitionTicket, CancellationToken>,
}

impl TransitionScheduler {
    pub fn new(intent_tx: UnboundedSender<Intent>) -> Self {
        Self {
            intent_tx,
            in_flight: HashMap::new(),
        }
    }

    /// Spawn the delayed completion for `task`. Requires a Tokio runtime.
    pub fn schedule(&mut self, task: TaskKind, delay: Duration) {
        let ticket = task.ticket();
        let cancel = CancellationToken::new();
        let child = cancel.clone();
        let tx = self.intent_tx.clone();
        self.in_flight.insert(ticket, cancel);

        debug!(%task, ?delay, "scheduling");
        tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = child.cancelled() => {
                    debug!(%ticket, "transition cancelled before it elapsed");
                }
                _ = tokio::time::sleep(delay) => {
                    if tx.send(Intent::TransitionElapsed(ticket)).is_err() {
                        warn!(%ticket, "intent channel closed; transition dropped");
                    }
                }
            }
        });
    }

    /// Abort a scheduled transition. Unknown or finished tickets are ignored.
    pub fn cancel(&mut self, ticket: TransitionTicket) {
        if let Some(token) = self.in_flight.remove(&ticket) {
            token.cancel();
        }
    }

    /// Forget a ticket whose completion has been delivered.
    pub fn finish(&mut self, ticket: TransitionTicket) {
        self.in_flight.remove(&ticket);
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }
}

impl Drop for TransitionScheduler {
    fn drop(&mut self) {
        for (_, token) in self.in_flight.drain() {
            token.cancel();
        }
    }
}
