use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static JSON_MODE: AtomicBool = AtomicBool::new(false);

pub fn init(json: bool) {
    JSON_MODE.store(json, Ordering::Relaxed);
}

pub fn is_json() -> bool {
    JSON_MODE.load(Ordering::Relaxed)
}

/// Logs go to stderr so stdout stays machine-readable.
pub fn init_tracing(json_logs: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    if json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init();
    }
}

/// Print either pretty JSON or the plain `lines` rendering.
pub fn print<T: Serialize>(value: &T, lines: &[String]) -> anyhow::Result<()> {
    let mut out = io::stdout().lock();
    if is_json() {
        let s = serde_json::to_string_pretty(value)?;
        writeln!(out, "{s}")?;
        return Ok(());
    }
    for l in lines {
        writeln!(out, "{l}")?;
    }
    Ok(())
}
