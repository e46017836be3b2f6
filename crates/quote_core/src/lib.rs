//! Core of the InsureQuick quote wizard.
//!
//! The wizard walks a single user through five steps (vehicle, personal,
//! address, driving history, quotes). This crate owns the rules that decide
//! which step is active, whether the user may advance and which field
//! messages are shown:
//!
//! - `field`     : closed set of field keys, steps and select options
//! - `answers`   : `AnswerRecord` (all 17 values) and `ErrorSet`
//! - `validate`  : field validators and the step validation engine
//! - `state`     : `WizardState`
//! - `reducer`   : `reduce(&mut state, intent) -> Vec<Effect>`
//! - `effects`   : declarative effects, tasks and notifications
//! - `scheduler` : delayed step transitions with cancellation
//! - `session`   : glue driving the reducer and the scheduler
//! - `catalog`   : the fixed plan list shown on the last step
//!
//! Presentation is not part of this crate.

pub mod answers;
pub mod catalog;
pub mod effects;
pub mod error;
pub mod field;
pub mod reducer;
pub mod scheduler;
pub mod session;
pub mod state;
pub mod validate;

pub use answers::{AnswerRecord, ErrorSet};
pub use catalog::{PlanCatalog, RECOMMENDED_INDEX, SelectablePlan};
pub use effects::{Effect, Notification, TaskKind, TransitionTicket};
pub use error::WizardError;
pub use field::{FieldKey, FieldKind, SelectOption, Step};
pub use reducer::{Intent, reduce};
pub use session::{SessionOptions, WizardSession};
pub use state::WizardState;
pub use validate::{FieldFailure, ValidationContext, is_step_enabled, validate_field, validate_step};
