use std::fmt::Display;
use std::panic::PanicHookInfo;
use std::sync::OnceLock;

use color_eyre::{Result, config::PanicHook};
use tracing::error;

static INSTALLED: OnceLock<()> = OnceLock::new();

/// Install the eyre report hook and a panic hook that gives the terminal
/// back before anything is printed. Later calls are no-ops.
pub fn init() -> Result<()> {
    if INSTALLED.get().is_some() {
        return Ok(());
    }

    let (panic_hook, eyre_hook) = color_eyre::config::HookBuilder::default()
        .panic_section("The quote wizard crashed. Your answers were not saved.")
        .capture_span_trace_by_default(false)
        .display_location_section(false)
        .display_env_section(false)
        .try_into_hooks()?;
    eyre_hook.install()?;
    std::panic::set_hook(Box::new(move |info| on_panic(&panic_hook, info)));

    let _ = INSTALLED.set(());
    Ok(())
}

fn on_panic(hook: &PanicHook, info: &PanicHookInfo<'_>) {
    if let Err(err) = crate::tui::restore() {
        error!("terminal restore failed: {err:?}");
    }

    let report = hook.panic_report(info);
    #[cfg(not(debug_assertions))]
    {
        use human_panic::{handle_dump, metadata, print_msg};
        let metadata = metadata!();
        let dump = handle_dump(&metadata, info);
        if print_msg(dump, &metadata).is_err() {
            eprintln!("{report}");
        }
    }
    error!("{}", log_line(&report));

    #[cfg(debug_assertions)]
    better_panic::Settings::auto()
        .most_recent_first(false)
        .lineno_suffix(true)
        .verbosity(better_panic::Verbosity::Full)
        .create_panic_handler()(info);

    std::process::exit(libc::EXIT_FAILURE);
}

/// The log file gets the report without terminal colors.
fn log_line(report: impl Display) -> String {
    format!("panic: {}", strip_ansi_escapes::strip_str(report.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn log_line_drops_color_codes() {
        assert_eq!(
            log_line("\u{1b}[31mindex out of bounds\u{1b}[0m"),
            "panic: index out of bounds"
        );
    }
}
