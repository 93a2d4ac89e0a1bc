//! Tracing setup. `-v` raises the level for this crate only; `RUST_LOG`
//! directives still apply on top.

use tracing::Level;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

fn level_for(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn crate_directive(verbosity: u8) -> Option<Directive> {
    format!("photostamp={}", level_for(verbosity)).parse().ok()
}

pub fn init(verbosity: u8, ansi: bool) {
    let mut filter = EnvFilter::from_default_env().add_directive(Level::WARN.into());
    if let Some(directive) = crate_directive(verbosity) {
        filter = filter.add_directive(directive);
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(ansi)
        .with_target(verbosity >= 2)
        .with_writer(std::io::stderr)
        .init();
}
