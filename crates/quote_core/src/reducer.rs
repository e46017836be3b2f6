//! Reducer: intents → state transitions + effects.
//!
//! Policy:
//!   - Must be side-effect free (no clock, no I/O, no spawning).
//!   - Never panics on an intent that does not apply in the current state;
//!     such intents are ignored and reported through `Effect::Log`.
//!   - Mutates only `WizardState`.
//!
//! Navigation rules:
//!   * `Advance` is the only forward edge. It validates the current step and
//!     either records the errors or marks the state as transitioning and
//!     schedules the delayed `TransitionElapsed`.
//!   * `Retreat` is the only backward edge. It is immediate, does not
//!     validate and leaves the error set untouched. A retreat while an
//!     advance is pending cancels that advance.
//!   * Step 5 is terminal: nothing moves forward from it.

use tracing::{debug, info, warn};

use crate::catalog::SelectablePlan;
use crate::effects::{Effect, Notification, TaskKind, TransitionTicket};
use crate::field::{FieldKey, Step};
use crate::state::WizardState;
use crate::validate;

/// Everything the presentation layer (or the scheduler) can ask of the wizard.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    UpdateField { key: FieldKey, value: String },
    Advance,
    Retreat,
    ChoosePlan(SelectablePlan),
    /// The delay of the given transition has elapsed.
    TransitionElapsed(TransitionTicket),
}

impl Intent {
    pub fn update(key: FieldKey, value: impl Into<String>) -> Self {
        Intent::UpdateField {
            key,
            value: value.into(),
        }
    }
}

/// Reduce a single intent into state transitions + effects.
pub fn reduce(state: &mut WizardState, intent: Intent) -> Vec<Effect> {
    debug!(step = state.current_step.number(), ?intent, "reduce");
    match intent {
        Intent::UpdateField { key, value } => update_field(state, key, value),
        Intent::Advance => advance(state),
        Intent::Retreat => retreat(state),
        Intent::ChoosePlan(plan) => choose_plan(state, plan),
        Intent::TransitionElapsed(ticket) => complete_transition(state, ticket),
    }
}

fn update_field(state: &mut WizardState, key: FieldKey, value: String) -> Vec<Effect> {
    state.answers.set(key, value);
    // Optimistic clearing: the message goes away as soon as the user edits.
    state.errors.remove(key);
    Vec::new()
}

fn advance(state: &mut WizardState) -> Vec<Effect> {
    let from = state.current_step;
    if from.is_terminal() {
        warn!("advance ignored: already at the last step");
        return vec![Effect::log("advance ignored at terminal step")];
    }
    if let Some(ticket) = state.pending {
        debug!(%ticket, "advance ignored: transition in flight");
        return vec![Effect::log(format!(
            "advance ignored: transition {ticket} in flight"
        ))];
    }

    let errors = validate::validate_step(from, &state.answers, &state.context);
    if !errors.is_empty() {
        info!(step = from.number(), failing = errors.len(), "step rejected");
        state.errors = errors.clone();
        return vec![Effect::notify(Notification::StepRejected {
            step: from,
            errors,
        })];
    }

    let ticket = state.allocate_ticket();
    state.pending = Some(ticket);
    vec![Effect::Schedule(TaskKind::Transition { ticket, from })]
}

fn complete_transition(state: &mut WizardState, ticket: TransitionTicket) -> Vec<Effect> {
    if state.pending != Some(ticket) {
        debug!(%ticket, "stale transition ignored");
        return vec![Effect::log(format!("stale transition {ticket} ignored"))];
    }
    state.pending = None;
    let Some(next) = state.current_step.next() else {
        return Vec::new();
    };
    state.current_step = next;
    state.errors.clear();
    info!(step = next.number(), "advanced");
    vec![Effect::notify(Notification::StepChanged { step: next })]
}

fn retreat(state: &mut WizardState) -> Vec<Effect> {
    let Some(prev) = state.current_step.prev() else {
        return Vec::new();
    };
    let mut effects = Vec::new();
    if let Some(ticket) = state.pending.take() {
        info!(%ticket, "pending transition cancelled by retreat");
        effects.push(Effect::Cancel(ticket));
    }
    state.current_step = prev;
    effects.push(Effect::notify(Notification::StepChanged { step: prev }));
    effects
}

fn choose_plan(state: &mut WizardState, plan: SelectablePlan) -> Vec<Effect> {
    if state.current_step != Step::Quotes {
        warn!(plan = %plan.name, "plan choice ignored outside the quotes step");
        return vec![Effect::log("plan choice ignored outside the quotes step")];
    }
    info!(plan = %plan.name, price = plan.monthly_price, "plan chosen");
    vec![Effect::notify(Notification::PlanChosen {
        name: plan.name,
        monthly_price: plan.monthly_price,
    })]
}
