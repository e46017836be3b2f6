//! Commands that run without the terminal UI.

use std::io::Write;
use std::path::Path;

use color_eyre::{Result, eyre::WrapErr};
use quote_core::{AnswerRecord, ErrorSet, PlanCatalog, Step, ValidationContext, validate_step};
use serde::Serialize;
use tracing::info;

/// Validation outcome of one step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepReport {
    pub step: Step,
    pub title: &'static str,
    pub passed: bool,
    pub errors: ErrorSet,
}

impl StepReport {
    pub fn new(step: Step, errors: ErrorSet) -> Self {
        Self {
            step,
            title: step.title(),
            passed: errors.is_empty(),
            errors,
        }
    }
}

pub fn load_answers(path: &Path) -> Result<AnswerRecord> {
    let raw = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read answers file {}", path.display()))?;
    serde_json::from_str(&raw)
        .wrap_err_with(|| format!("failed to parse answers file {}", path.display()))
}

/// Check `steps` (every input step when empty).
pub fn check(answers: &AnswerRecord, steps: &[Step], ctx: &ValidationContext) -> Vec<StepReport> {
    let all = [
        Step::Vehicle,
        Step::Personal,
        Step::Address,
        Step::DrivingHistory,
    ];
    let steps = if steps.is_empty() { &all[..] } else { steps };
    steps
        .iter()
        .map(|&step| StepReport::new(step, validate_step(step, answers, ctx)))
        .collect()
}

pub fn write_reports(reports: &[StepReport], json: bool, out: &mut impl Write) -> Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, reports)?;
        writeln!(out)?;
        return Ok(());
    }
    for report in reports {
        if report.passed {
            writeln!(out, "{}: ok", report.step)?;
            continue;
        }
        writeln!(out, "{}: {} field(s) to fix", report.step, report.errors.len())?;
        for (key, message) in report.errors.iter() {
            writeln!(out, "  {key}: {message}")?;
        }
    }
    Ok(())
}

/// `validate` subcommand. Returns whether every checked step passed.
pub fn validate(
    path: &Path,
    step: Option<u8>,
    year: Option<i32>,
    json: bool,
    out: &mut impl Write,
) -> Result<bool> {
    let answers = load_answers(path)?;
    let steps = step
        .map(Step::try_from)
        .transpose()?
        .into_iter()
        .collect::<Vec<_>>();
    let ctx = year.map_or_else(ValidationContext::today, ValidationContext::for_year);

    let reports = check(&answers, &steps, &ctx);
    write_reports(&reports, json, out)?;
    let passed = reports.iter().all(|r| r.passed);
    info!(path = %path.display(), passed, "answers validated");
    Ok(passed)
}

/// `plans` subcommand.
pub fn plans(catalog: &PlanCatalog, json: bool, out: &mut impl Write) -> Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, catalog)?;
        writeln!(out)?;
        return Ok(());
    }
    for (index, plan) in catalog.plans().iter().enumerate() {
        let marker = if catalog.is_recommended(index) {
            "  (Recommended)"
        } else {
            ""
        };
        writeln!(out, "{} - {}{}", plan.name, plan.price_label(), marker)?;
        for feature in &plan.features {
            writeln!(out, "  ✓ {feature}")?;
        }
    }
    Ok(())
}
