//! Panic hook that puts the terminal back before reporting

use std::{panic::PanicHookInfo, process};

use color_eyre::{config::HookBuilder, eyre::Result};

use crate::infrastructure::tui;

pub fn initialize_panic_handler() -> Result<()> {
    let (panic_hook, eyre_hook) = HookBuilder::default()
        .panic_section(format!(
            "This is a bug. Consider reporting it at {}",
            env!("CARGO_PKG_REPOSITORY")
        ))
        .capture_span_trace_by_default(false)
        .display_location_section(false)
        .display_env_section(false)
        .into_hooks();
    eyre_hook.install()?;

    std::panic::set_hook(Box::new(move |info| {
        // raw mode and the alternate screen would swallow the report
        if let Err(e) = tui::restore() {
            tracing::error!("unable to restore the terminal: {e:?}");
        }

        let report = panic_hook.panic_report(info).to_string();
        log::error!("panic: {}", strip_ansi_escapes::strip_str(&report));

        #[cfg(not(debug_assertions))]
        report_for_users(info, &report);

        #[cfg(debug_assertions)]
        report_for_developers(info);

        process::exit(libc::EXIT_FAILURE);
    }));
    Ok(())
}

/// Human-panic dump plus the color-eyre trace on stderr
#[cfg(not(debug_assertions))]
fn report_for_users(info: &PanicHookInfo<'_>, report: &str) {
    use human_panic::{handle_dump, print_msg, Metadata};

    let meta = Metadata::new(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
        .authors(env!("CARGO_PKG_AUTHORS").replace(':', ", "))
        .homepage(env!("CARGO_PKG_HOMEPAGE"));
    let dump = handle_dump(&meta, info);
    if let Err(e) = print_msg(dump, &meta) {
        eprintln!("human-panic: printing error message to console failed: {e}");
    }
    eprintln!("{report}");
}

/// Full better-panic backtrace, debug builds only
#[cfg(debug_assertions)]
fn report_for_developers(info: &PanicHookInfo<'_>) {
    better_panic::Settings::auto()
        .most_recent_first(false)
        .lineno_suffix(true)
        .verbosity(better_panic::Verbosity::Full)
        .create_panic_handler()(info);
}
