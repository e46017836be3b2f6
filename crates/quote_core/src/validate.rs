//! Field validators and the per-step validation engine.
//!
//! Every rule is expressed once, in [`validate_field`]. Both the
//! side-effect-free [`is_step_enabled`] (drives the Next control on every
//! keystroke) and [`validate_step`] (runs on navigation and produces the
//! messages) are built on it, so they always agree on pass/fail.
//!
//! Required checks take precedence over shape checks: an empty value always
//! reports the "... is required" message.

use chrono::{Datelike, Local, NaiveDate};
use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

use crate::answers::{AnswerRecord, ErrorSet};
use crate::field::{FieldKey, Step};

pub const MIN_VEHICLE_YEAR: i32 = 1980;
pub const MIN_DRIVER_AGE: i32 = 16;
pub const VIN_LENGTH: usize = 17;

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
    static ref PHONE_RE: Regex = Regex::new(r"^\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}$").unwrap();
    static ref ZIP_RE: Regex = Regex::new(r"^\d{5}(-\d{4})?$").unwrap();
    static ref LEADING_YEAR_RE: Regex = Regex::new(r"^(\d{4})").unwrap();
}

/// Time-dependent inputs of the year and age rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationContext {
    pub current_year: i32,
}

impl ValidationContext {
    /// Context for the local calendar year.
    pub fn today() -> Self {
        Self::for_year(Local::now().year())
    }

    pub fn for_year(current_year: i32) -> Self {
        Self { current_year }
    }

    /// Newest accepted model year (next year's models are already sold).
    pub fn max_vehicle_year(&self) -> i32 {
        self.current_year.saturating_add(1)
    }
}

impl Default for ValidationContext {
    fn default() -> Self {
        Self::today()
    }
}

/// Why a single field failed. `Display` yields the user-facing message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldFailure {
    #[error("{}", required_message(.0))]
    Required(FieldKey),

    #[error("Year must be between {min} and {max}", min = MIN_VEHICLE_YEAR)]
    YearOutOfRange { max: i32 },

    #[error("VIN must be 17 characters")]
    VinLength,

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Invalid phone number")]
    InvalidPhone,

    #[error("Must be at least 16 years old")]
    TooYoung,

    #[error("Invalid ZIP code")]
    InvalidZip,
}

fn required_message(key: &FieldKey) -> &'static str {
    use FieldKey::*;
    match key {
        Make => "Make is required",
        Model => "Model is required",
        Year => "Year is required",
        Vin => "VIN is required",
        FirstName => "First name is required",
        LastName => "Last name is required",
        Email => "Email is required",
        Phone => "Phone is required",
        DateOfBirth => "Date of birth is required",
        Address => "Address is required",
        City => "City is required",
        State => "State is required",
        ZipCode => "ZIP code is required",
        LicenseNumber => "License number is required",
        YearsLicensed => "Years licensed is required",
        Accidents => "Please select accidents history",
        Violations => "Please select violations history",
    }
}

/// Check one field value against its rule.
pub fn validate_field(
    key: FieldKey,
    value: &str,
    ctx: &ValidationContext,
) -> Result<(), FieldFailure> {
    if value.is_empty() {
        return Err(FieldFailure::Required(key));
    }

    match key {
        FieldKey::Year => check_year(value, ctx),
        FieldKey::Vin => check_vin(value),
        FieldKey::Email if !EMAIL_RE.is_match(value) => Err(FieldFailure::InvalidEmail),
        FieldKey::Phone if !PHONE_RE.is_match(value) => Err(FieldFailure::InvalidPhone),
        FieldKey::DateOfBirth => check_age(value, ctx),
        FieldKey::ZipCode if !ZIP_RE.is_match(value) => Err(FieldFailure::InvalidZip),
        _ => Ok(()),
    }
}

fn check_year(value: &str, ctx: &ValidationContext) -> Result<(), FieldFailure> {
    let out_of_range = FieldFailure::YearOutOfRange {
        max: ctx.max_vehicle_year(),
    };
    let year: i32 = value.trim().parse().map_err(|_| out_of_range.clone())?;
    if (MIN_VEHICLE_YEAR..=ctx.max_vehicle_year()).contains(&year) {
        Ok(())
    } else {
        Err(out_of_range)
    }
}

// Length in characters; no check digit validation.
fn check_vin(value: &str) -> Result<(), FieldFailure> {
    if value.chars().count() == VIN_LENGTH {
        Ok(())
    } else {
        Err(FieldFailure::VinLength)
    }
}

// Calendar-year subtraction only: month and day are ignored.
fn check_age(value: &str, ctx: &ValidationContext) -> Result<(), FieldFailure> {
    match birth_year(value) {
        Some(year) if ctx.current_year.saturating_sub(year) >= MIN_DRIVER_AGE => Ok(()),
        _ => Err(FieldFailure::TooYoung),
    }
}

fn birth_year(value: &str) -> Option<i32> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date.year());
    }
    LEADING_YEAR_RE
        .captures(value)
        .and_then(|caps| caps[1].parse().ok())
}

/// Whether the Next control should be enabled for `step`.
///
/// Pure read: produces no messages. Always true for the quotes step.
pub fn is_step_enabled(step: Step, answers: &AnswerRecord, ctx: &ValidationContext) -> bool {
    step.fields()
        .iter()
        .all(|&key| validate_field(key, answers.get(key), ctx).is_ok())
}

/// Run every validator of `step`; an empty result means the step passes.
pub fn validate_step(step: Step, answers: &AnswerRecord, ctx: &ValidationContext) -> ErrorSet {
    step.fields()
        .iter()
        .filter_map(|&key| {
            validate_field(key, answers.get(key), ctx)
                .err()
                .map(|failure| (key, failure.to_string()))
        })
        .collect()
}
