//! Logging Infrastructure
//!
//! Console output always; with a log directory, JSON lines also go to a
//! daily rolling `portal-server` file and security events to their own
//! `security` file.

use std::fs;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{EnvFilter, Layer, fmt, prelude::*};

/// Initialize the global subscriber
///
/// `RUST_LOG` wins over `level`. The returned guards flush file output and
/// must live as long as the process.
///
/// # Examples
/// ```no_run
/// // Development: console only
/// let _guards = portal_server::init_logger("debug", false, None)?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn init_logger(level: &str, json_format: bool, log_dir: Option<&str>) -> anyhow::Result<Vec<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let console_layer = if json_format {
        fmt::layer().json().with_target(true).boxed()
    } else {
        fmt::layer().with_target(false).boxed()
    };

    let mut guards = Vec::new();
    let mut file_layers = Vec::new();

    if let Some(dir) = log_dir {
        let dir = Path::new(dir);
        fs::create_dir_all(dir)?;

        let (app_writer, app_guard) = tracing_appender::non_blocking(rolling::daily(dir, "portal-server"));
        file_layers.push(
            fmt::layer()
                .json()
                .with_ansi(false)
                .with_writer(app_writer)
                .with_filter(tracing_subscriber::filter::filter_fn(|meta| meta.target() != "security"))
                .boxed(),
        );

        let (security_writer, security_guard) = tracing_appender::non_blocking(rolling::daily(dir, "security"));
        file_layers.push(
            fmt::layer()
                .json()
                .with_ansi(false)
                .with_writer(security_writer)
                .with_filter(tracing_subscriber::filter::filter_fn(|meta| meta.target() == "security"))
                .boxed(),
        );

        guards.push(app_guard);
        guards.push(security_guard);
    }

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layers)
        .try_init()?;

    Ok(guards)
}
