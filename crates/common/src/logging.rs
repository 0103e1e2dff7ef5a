use log::LevelFilter;

/// Initialize logging for the application.
/// Should be called once at the start of main(); later calls are no-ops.
pub fn init_logging() {
    let result = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}] [{}] {}",
                record.level(),
                record.target(),
                message
            ))
        })
        .level(LevelFilter::Info)
        .chain(std::io::stderr())
        .apply();

    if result.is_err() {
        log::debug!("logger already initialized, keeping the existing one");
    }
}

/// Log level helper to determine if debug logging is enabled
pub fn is_debug_enabled() -> bool {
    log::log_enabled!(log::Level::Debug)
}
