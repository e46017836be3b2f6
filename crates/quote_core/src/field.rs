//! Field keys, step metadata and the fixed select option lists.
//!
//! The set of fields is closed: every answer the wizard collects is one of
//! the seventeen [`FieldKey`] variants, grouped into the four input
//! [`Step`]s. The quotes step has no fields of its own.
//!
//! Presentation metadata (labels, placeholders, widget kinds) lives here as
//! well so that every front end renders the same form without re-declaring
//! it.
//!
//! ```ignore
//! use quote_core::field::{FieldKey, Step};
//!
//! assert_eq!(Step::Vehicle.fields(), &[FieldKey::Make, FieldKey::Model, FieldKey::Year, FieldKey::Vin]);
//! assert_eq!("zipCode".parse::<FieldKey>().unwrap(), FieldKey::ZipCode);
//! ```

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumCount, EnumIter, IntoEnumIterator};

use crate::error::WizardError;

/// One entry of a fixed dropdown enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
}

const fn opt(value: &'static str, label: &'static str) -> SelectOption {
    SelectOption { value, label }
}

pub const CAR_MAKES: &[SelectOption] = &[
    opt("toyota", "Toyota"),
    opt("honda", "Honda"),
    opt("ford", "Ford"),
    opt("chevrolet", "Chevrolet"),
    opt("bmw", "BMW"),
    opt("mercedes", "Mercedes-Benz"),
    opt("audi", "Audi"),
];

pub const STATES: &[SelectOption] = &[
    opt("ca", "California"),
    opt("ny", "New York"),
    opt("tx", "Texas"),
    opt("fl", "Florida"),
    opt("il", "Illinois"),
];

pub const YEARS_LICENSED: &[SelectOption] = &[
    opt("0-2", "0-2 years"),
    opt("3-5", "3-5 years"),
    opt("6-10", "6-10 years"),
    opt("10+", "10+ years"),
];

pub const ACCIDENTS: &[SelectOption] = &[
    opt("0", "None"),
    opt("1", "1 accident"),
    opt("2", "2 accidents"),
    opt("3+", "3+ accidents"),
];

pub const VIOLATIONS: &[SelectOption] = &[
    opt("0", "None"),
    opt("1", "1 violation"),
    opt("2", "2 violations"),
    opt("3+", "3+ violations"),
];

/// Input widget a field is rendered with.
///
/// Number / Email / Phone / Date are plain single-line editors; the kind only
/// serves as an input hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    Email,
    Phone,
    Date,
    Select(&'static [SelectOption]),
}

impl FieldKind {
    pub fn is_textual(&self) -> bool {
        !matches!(self, FieldKind::Select(_))
    }

    pub fn options(&self) -> &'static [SelectOption] {
        match self {
            FieldKind::Select(options) => options,
            _ => &[],
        }
    }
}

/// Closed set of answer keys.
///
/// The string form (Display / FromStr / serde) is the camelCase key used by
/// answer files, e.g. `dateOfBirth`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
    EnumIter,
    EnumCount,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum FieldKey {
    Make,
    Model,
    Year,
    Vin,
    FirstName,
    LastName,
    Email,
    Phone,
    DateOfBirth,
    Address,
    City,
    State,
    ZipCode,
    LicenseNumber,
    YearsLicensed,
    Accidents,
    Violations,
}

impl FieldKey {
    /// Position of the key in declaration order; used as a storage index.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn step(self) -> Step {
        use FieldKey::*;
        match self {
            Make | Model | Year | Vin => Step::Vehicle,
            FirstName | LastName | Email | Phone | DateOfBirth => Step::Personal,
            Address | City | State | ZipCode => Step::Address,
            LicenseNumber | YearsLicensed | Accidents | Violations => Step::DrivingHistory,
        }
    }

    pub fn label(self) -> &'static str {
        use FieldKey::*;
        match self {
            Make => "Make",
            Model => "Model",
            Year => "Year",
            Vin => "VIN",
            FirstName => "First Name",
            LastName => "Last Name",
            Email => "Email",
            Phone => "Phone",
            DateOfBirth => "Date of Birth",
            Address => "Address",
            City => "City",
            State => "State",
            ZipCode => "ZIP Code",
            LicenseNumber => "License Number",
            YearsLicensed => "Years Licensed",
            Accidents => "Accidents (last 5 years)",
            Violations => "Violations (last 5 years)",
        }
    }

    pub fn placeholder(self) -> &'static str {
        use FieldKey::*;
        match self {
            Model => "e.g., Camry, Accord",
            Year => "2020",
            Vin => "17-character VIN",
            FirstName => "John",
            LastName => "Doe",
            Email => "john@example.com",
            Phone => "(555) 123-4567",
            DateOfBirth => "YYYY-MM-DD",
            Address => "123 Main Street",
            City => "San Francisco",
            ZipCode => "94102",
            LicenseNumber => "D1234567",
            Make | State | YearsLicensed | Accidents | Violations => "",
        }
    }

    pub fn kind(self) -> FieldKind {
        use FieldKey::*;
        match self {
            Make => FieldKind::Select(CAR_MAKES),
            State => FieldKind::Select(STATES),
            YearsLicensed => FieldKind::Select(YEARS_LICENSED),
            Accidents => FieldKind::Select(ACCIDENTS),
            Violations => FieldKind::Select(VIOLATIONS),
            Year => FieldKind::Number,
            Email => FieldKind::Email,
            Phone => FieldKind::Phone,
            DateOfBirth => FieldKind::Date,
            Model | Vin | FirstName | LastName | Address | City | ZipCode | LicenseNumber => {
                FieldKind::Text
            }
        }
    }
}

impl FromStr for FieldKey {
    type Err = WizardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldKey::iter()
            .find(|key| key.as_ref() == s)
            .ok_or_else(|| WizardError::UnknownField(s.to_string()))
    }
}

/// One of the five ordered stages of the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Step {
    Vehicle = 1,
    Personal = 2,
    Address = 3,
    DrivingHistory = 4,
    Quotes = 5,
}

impl Step {
    pub const FIRST: Step = Step::Vehicle;
    pub const LAST: Step = Step::Quotes;
    pub const COUNT: u8 = 5;

    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn next(self) -> Option<Step> {
        Step::try_from(self.number() + 1).ok()
    }

    pub fn prev(self) -> Option<Step> {
        self.number()
            .checked_sub(1)
            .and_then(|n| Step::try_from(n).ok())
    }

    pub fn is_terminal(self) -> bool {
        self == Step::LAST
    }

    /// Fields collected on this step, in display order.
    pub fn fields(self) -> &'static [FieldKey] {
        use FieldKey::*;
        match self {
            Step::Vehicle => &[Make, Model, Year, Vin],
            Step::Personal => &[FirstName, LastName, Email, Phone, DateOfBirth],
            Step::Address => &[Address, City, State, ZipCode],
            Step::DrivingHistory => &[LicenseNumber, YearsLicensed, Accidents, Violations],
            Step::Quotes => &[],
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Step::Vehicle => "Vehicle Information",
            Step::Personal => "Personal Information",
            Step::Address => "Address Information",
            Step::DrivingHistory => "Driving History",
            Step::Quotes => "Your Quotes",
        }
    }

    pub fn subtitle(self) -> &'static str {
        match self {
            Step::Vehicle => "Tell us about your vehicle",
            Step::Personal => "Tell us about yourself",
            Step::Address => "Where do you live?",
            Step::DrivingHistory => "Tell us about your driving record",
            Step::Quotes => "Choose the perfect coverage for you",
        }
    }

    /// Ratio for the progress bar (step / total).
    pub fn progress(self) -> f64 {
        f64::from(self.number()) / f64::from(Step::COUNT)
    }
}

impl TryFrom<u8> for Step {
    type Error = WizardError;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        match n {
            1 => Ok(Step::Vehicle),
            2 => Ok(Step::Personal),
            3 => Ok(Step::Address),
            4 => Ok(Step::DrivingHistory),
            5 => Ok(Step::Quotes),
            other => Err(WizardError::InvalidStep(other)),
        }
    }
}

impl From<Step> for u8 {
    fn from(step: Step) -> Self {
        step.number()
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}/{})", self.title(), self.number(), Step::COUNT)
    }
}
