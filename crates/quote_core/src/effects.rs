/*!
Effect & task model of the wizard.

The reducer stays pure: instead of sleeping, spawning or alerting it returns
a `Vec<Effect>` describing what should happen. The session (or any other
driver) interprets these:

- `Effect::Schedule(TaskKind)` → hand the task to the transition scheduler
- `Effect::Cancel(ticket)`     → abort a scheduled task
- `Effect::Notify(..)`         → forward to the presentation layer
- `Effect::Log(..)`            → structured log line

Completion of a scheduled task re-enters the reducer as
`Intent::TransitionElapsed(ticket)`.
*/

use std::fmt;

use serde::Serialize;

use crate::answers::ErrorSet;
use crate::field::Step;

/// Identifies one scheduled step transition.
///
/// Tickets are allocated by the reducer (monotonic per session) so that a
/// completion arriving after a cancellation can be recognised as stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TransitionTicket(pub u64);

impl fmt::Display for TransitionTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Declarative instruction emitted by the reducer.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Schedule an asynchronous task.
    Schedule(TaskKind),
    /// Abort a previously scheduled task; a no-op if it already fired.
    Cancel(TransitionTicket),
    /// Tell the presentation layer something happened.
    Notify(Notification),
    /// Lightweight side-effect: log a message (info-level semantic).
    Log(String),
}

impl Effect {
    pub fn log<T: Into<String>>(msg: T) -> Self {
        Effect::Log(msg.into())
    }

    pub fn notify(notification: Notification) -> Self {
        Effect::Notify(notification)
    }
}

/// Asynchronous work units. Each variant carries everything needed to run
/// it without access to the wizard state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    /// Simulated quote processing between a validated step and the next one.
    Transition {
        ticket: TransitionTicket,
        from: Step,
    },
}

impl TaskKind {
    pub fn ticket(&self) -> TransitionTicket {
        match self {
            TaskKind::Transition { ticket, .. } => *ticket,
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskKind::Transition { ticket, from } => {
                write!(f, "Transition({ticket}, from step {})", from.number())
            }
        }
    }
}

/// Events surfaced to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum Notification {
    /// `advance` failed validation; the step did not change.
    StepRejected { step: Step, errors: ErrorSet },
    /// The active step changed (after a transition or a retreat).
    StepChanged { step: Step },
    /// The user picked a plan on the quotes step.
    #[serde(rename_all = "camelCase")]
    PlanChosen { name: String, monthly_price: u32 },
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notification::StepRejected { step, errors } => write!(
                f,
                "{} has {} field(s) to fix",
                step.title(),
                errors.len()
            ),
            Notification::StepChanged { step } => write!(f, "Now at {step}"),
            Notification::PlanChosen {
                name,
                monthly_price,
            } => write!(f, "Selected: {name} - ${monthly_price}/month"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construct_log_effect() {
        let e = Effect::log("hello");
        match e {
            Effect::Log(s) => assert_eq!(s, "hello"),
            _ => panic!("expected Log variant"),
        }
    }

    #[test]
    fn plan_chosen_reads_like_the_alert() {
        let n = Notification::PlanChosen {
            name: "Standard Coverage".into(),
            monthly_price: 142,
        };
        assert_eq!(n.to_string(), "Selected: Standard Coverage - $142/month");
    }

    #[test]
    fn task_display_names_ticket_and_step() {
        let task = TaskKind::Transition {
            ticket: TransitionTicket(7),
            from: Step::Address,
        };
        assert_eq!(task.to_string(), "Transition(#7, from step 3)");
        assert_eq!(task.ticket(), TransitionTicket(7));
    }
}
