//! End-to-end walk through the wizard using only the public API:
//! fill each step, advance through the simulated delay, pick a plan.

use std::time::Duration;

use quote_core::{
    FieldKey, Intent, Notification, PlanCatalog, SessionOptions, Step, ValidationContext,
    WizardSession, WizardState,
};

const ANSWERS: &[(FieldKey, &str)] = &[
    (FieldKey::Make, "honda"),
    (FieldKey::Model, "Accord"),
    (FieldKey::Year, "2022"),
    (FieldKey::Vin, "1HGCV1F30JA000001"),
    (FieldKey::FirstName, "John"),
    (FieldKey::LastName, "Doe"),
    (FieldKey::Email, "john@example.com"),
    (FieldKey::Phone, "(555) 123-4567"),
    (FieldKey::DateOfBirth, "1985-06-15"),
    (FieldKey::Address, "123 Main Street"),
    (FieldKey::City, "San Francisco"),
    (FieldKey::State, "ca"),
    (FieldKey::ZipCode, "94102"),
    (FieldKey::LicenseNumber, "D1234567"),
    (FieldKey::YearsLicensed, "10+"),
    (FieldKey::Accidents, "0"),
    (FieldKey::Violations, "0"),
];

fn session() -> WizardSession {
    WizardSession::new(
        WizardState::with_context(ValidationContext::for_year(2026)),
        SessionOptions {
            transition_delay: Duration::from_millis(1500),
        },
    )
}

#[tokio::test(start_paused = true)]
async fn full_walkthrough_ends_with_plan_notification() {
    let mut session = session();

    for step in [Step::Vehicle, Step::Personal, Step::Address, Step::DrivingHistory] {
        assert_eq!(session.state().current_step(), step);
        assert!(!session.state().can_advance());

        for (key, value) in ANSWERS.iter().filter(|(k, _)| k.step() == step) {
            session.dispatch(Intent::update(*key, *value));
        }
        assert!(session.state().can_advance(), "{step:?} should be complete");

        session.dispatch(Intent::Advance);
        assert!(session.state().transitioning());
        let notes = session.settle().await;
        assert_eq!(
            notes,
            vec![Notification::StepChanged {
                step: step.next().unwrap()
            }]
        );
    }

    assert_eq!(session.state().current_step(), Step::Quotes);
    assert!(!session.state().transitioning());

    let plan = PlanCatalog::standard().get(2).unwrap().clone();
    let notes = session.dispatch(Intent::ChoosePlan(plan));
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].to_string(), "Selected: Premium Coverage - $198/month");
    assert_eq!(session.state().current_step(), Step::Quotes);
}

#[tokio::test(start_paused = true)]
async fn rapid_double_advance_moves_one_step() {
    let mut session = session();
    for (key, value) in ANSWERS.iter().filter(|(k, _)| k.step() == Step::Vehicle) {
        session.dispatch(Intent::update(*key, *value));
    }
    session.dispatch(Intent::Advance);
    session.dispatch(Intent::Advance);
    session.dispatch(Intent::Advance);
    session.settle().await;

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(session.state().current_step(), Step::Personal);
}

#[tokio::test(start_paused = true)]
async fn stale_errors_reappear_after_back_and_forth() {
    let mut session = session();
    for (key, value) in ANSWERS.iter().filter(|(k, _)| k.step() == Step::Vehicle) {
        session.dispatch(Intent::update(*key, *value));
    }
    session.dispatch(Intent::Advance);
    session.settle().await;

    // Failed attempt on step 2 leaves messages behind.
    session.dispatch(Intent::Advance);
    assert_eq!(session.state().errors().len(), 5);

    session.dispatch(Intent::Retreat);
    assert_eq!(session.state().current_step(), Step::Vehicle);
    assert_eq!(session.state().errors().len(), 5);

    session.dispatch(Intent::Advance);
    session.settle().await;
    assert_eq!(session.state().current_step(), Step::Personal);
    assert!(session.state().errors().is_empty());
}
