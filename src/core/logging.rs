use log::LevelFilter;

use crate::types::config::config;

/// Initialize the global logger from the effective configuration.
/// Diagnostics go to stderr; per-pair status lines are printed to stdout by
/// the run command and bypass the logger.
pub fn init_logging() {
    let level = match config().log().level() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Info,
    };

    if let Some(force) = config().log().color() {
        console::set_colors_enabled(force);
    }

    let dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                chrono::Local::now().format("%H:%M:%S"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stderr());

    // apply() fails only if a logger is already installed
    let _ = dispatch.apply();
}
