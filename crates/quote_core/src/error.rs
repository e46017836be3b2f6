use thiserror::Error;

/// Failures of the core API itself.
///
/// Validation failures are not errors in this sense; they are collected into
/// an [`ErrorSet`](crate::answers::ErrorSet) and returned as data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WizardError {
    #[error("unknown field: {0}")]
    UnknownField(String),

    #[error("invalid step number: {0} (expected 1-5)")]
    InvalidStep(u8),

    #[error("unknown plan index: {0}")]
    UnknownPlan(usize),
}
