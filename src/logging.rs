use {
    chrono::Local,
    log::LevelFilter,
    simplelog::{ColorChoice, Config, ConfigBuilder, TermLogger, TerminalMode},
    time::UtcOffset,
};

pub fn level_filter(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }
}

/// Try to make a [`Config`] with the local timezone offset, falling back to UTC.
fn new_config() -> Config {
    let mut builder: ConfigBuilder = ConfigBuilder::new();
    let offset_in_sec: i32 = Local::now().offset().local_minus_utc();

    if let Ok(utc_offset) = UtcOffset::from_whole_seconds(offset_in_sec) {
        builder.set_time_offset(utc_offset);
    }

    builder.build()
}

/// Logs to stderr. A logger that fails to initialize (e.g. one was already set) is ignored.
pub fn init(verbose: bool) {
    TermLogger::init(
        level_filter(verbose),
        new_config(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity() {
        assert_eq!(level_filter(false), LevelFilter::Warn);
        assert_eq!(level_filter(true), LevelFilter::Debug);
    }

    #[test]
    fn init_twice() {
        init(false);
        init(true);
    }
}
