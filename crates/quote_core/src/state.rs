//! Wizard session state.
//!
//! A single explicit value holds everything the wizard knows about the
//! session. It is only mutated by [`reduce`](crate::reducer::reduce); the
//! accessors below are read-only views for renderers and tests.

use crate::answers::{AnswerRecord, ErrorSet};
use crate::effects::TransitionTicket;
use crate::field::Step;
use crate::validate::{self, ValidationContext};

#[derive(Debug, Clone, PartialEq)]
pub struct WizardState {
    pub(crate) current_step: Step,
    pub(crate) answers: AnswerRecord,
    pub(crate) errors: ErrorSet,
    pub(crate) pending: Option<TransitionTicket>,
    pub(crate) next_ticket: u64,
    pub(crate) context: ValidationContext,
}

impl WizardState {
    /// Fresh session at step 1 for the current calendar year.
    pub fn new() -> Self {
        Self::with_context(ValidationContext::today())
    }

    pub fn with_context(context: ValidationContext) -> Self {
        Self {
            current_step: Step::FIRST,
            answers: AnswerRecord::new(),
            errors: ErrorSet::new(),
            pending: None,
            next_ticket: 1,
            context,
        }
    }

    /// Seed the record, e.g. from a saved answers file.
    pub fn with_answers(mut self, answers: AnswerRecord) -> Self {
        self.answers = answers;
        self
    }

    pub fn current_step(&self) -> Step {
        self.current_step
    }

    pub fn answers(&self) -> &AnswerRecord {
        &self.answers
    }

    pub fn errors(&self) -> &ErrorSet {
        &self.errors
    }

    /// True while a validated advance waits for its delay to elapse.
    pub fn transitioning(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending_transition(&self) -> Option<TransitionTicket> {
        self.pending
    }

    pub fn context(&self) -> &ValidationContext {
        &self.context
    }

    /// Whether the Next control should be enabled right now.
    pub fn can_advance(&self) -> bool {
        !self.current_step.is_terminal()
            && !self.transitioning()
            && validate::is_step_enabled(self.current_step, &self.answers, &self.context)
    }

    /// Whether the Previous control should be enabled right now.
    pub fn can_retreat(&self) -> bool {
        self.current_step > Step::FIRST
    }

    pub(crate) fn allocate_ticket(&mut self) -> TransitionTicket {
        let ticket = TransitionTicket(self.next_ticket);
        self.next_ticket += 1;
        ticket
    }
}

impl Default for WizardState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldKey;

    #[test]
    fn session_starts_at_step_one_with_empty_record() {
        let state = WizardState::with_context(ValidationContext::for_year(2026));
        assert_eq!(state.current_step(), Step::Vehicle);
        assert!(state.errors().is_empty());
        assert!(!state.transitioning());
        assert!(state.answers().iter().all(|(_, v)| v.is_empty()));
        assert!(!state.can_advance());
        assert!(!state.can_retreat());
    }

    #[test]
    fn can_advance_follows_step_validity() {
        let answers = AnswerRecord::new()
            .with(FieldKey::Make, "audi")
            .with(FieldKey::Model, "A4")
            .with(FieldKey::Year, "2019")
            .with(FieldKey::Vin, "WAUZZZ8K9AA000001");
        let state =
            WizardState::with_context(ValidationContext::for_year(2026)).with_answers(answers);
        assert!(state.can_advance());
    }

    #[test]
    fn tickets_are_monotonic() {
        let mut state = WizardState::default();
        let a = state.allocate_ticket();
        let b = state.allocate_ticket();
        assert!(b > a);
    }
}
