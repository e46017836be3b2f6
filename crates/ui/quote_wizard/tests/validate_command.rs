//! The headless `validate` command against answer files on disk.

use std::fs;
use std::path::PathBuf;

use pretty_assertions::assert_eq;
use quote_wizard::headless;

fn answers_file(name: &str, body: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("quote_wizard-it-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    fs::write(&path, body).unwrap();
    path
}

const COMPLETE: &str = r#"{
    "make": "honda",
    "model": "Civic",
    "year": "2019",
    "vin": "2HGFC2F59KH000001",
    "firstName": "Jane",
    "lastName": "Roe",
    "email": "jane.roe@example.org",
    "phone": "(555) 010-9999",
    "dateOfBirth": "1992-03-04",
    "address": "500 Market St",
    "city": "Austin",
    "state": "tx",
    "zipCode": "73301-0001",
    "licenseNumber": "TX99887766",
    "yearsLicensed": "6-10",
    "accidents": "1",
    "violations": "0"
}"#;

#[test]
fn complete_file_passes_every_step() {
    let path = answers_file("complete.json", COMPLETE);
    let mut out = Vec::new();
    let passed = headless::validate(&path, None, Some(2026), false, &mut out).unwrap();
    assert!(passed);
    let text = String::from_utf8(out).unwrap();
    assert_eq!(text.lines().count(), 4);
    assert!(text.lines().all(|l| l.ends_with(": ok")));
}

#[test]
fn partial_file_fails_with_json_report() {
    let path = answers_file(
        "partial.json",
        r#"{ "firstName": "Sam", "email": "not-an-email", "dateOfBirth": "2015-01-01" }"#,
    );
    let mut out = Vec::new();
    let passed = headless::validate(&path, Some(2), Some(2026), true, &mut out).unwrap();
    assert!(!passed);

    let report: serde_json::Value = serde_json::from_slice(&out).unwrap();
    let step = &report[0];
    assert_eq!(step["step"], 2);
    assert_eq!(step["passed"], false);
    assert_eq!(step["errors"]["email"], "Invalid email format");
    assert_eq!(step["errors"]["dateOfBirth"], "Must be at least 16 years old");
    assert_eq!(step["errors"]["lastName"], "Last name is required");
    assert!(step["errors"].get("firstName").is_none());
}

#[test]
fn unknown_field_is_an_error() {
    let path = answers_file("unknown.json", r#"{ "favouriteColour": "blue" }"#);
    let err = headless::validate(&path, None, Some(2026), false, &mut Vec::new()).unwrap_err();
    assert!(format!("{err:?}").contains("failed to parse answers file"));
}
