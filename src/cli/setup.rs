//! Runtime setup for the binary: logging and terminal colors.

use tracing_subscriber::EnvFilter;

/// Filter directive for a `-v` count when `RUST_LOG` is unset.
pub fn default_log_level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. Logs go to stderr so reports on stdout
/// stay machine-readable.
pub fn init_logging(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_log_level(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// Colors are used only when configured, not disabled by `--plain`, and
/// the report goes to the terminal rather than a file.
pub fn use_color(configured: bool, plain: bool, to_file: bool) -> bool {
    configured && !plain && !to_file
}

pub fn apply_color_choice(enabled: bool) {
    if !enabled {
        colored::control::set_override(false);
    }
}
