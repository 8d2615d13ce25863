use log::{info, Level, LevelFilter, Log, Metadata, Record};
use spin::Once;

use super::{write_fmt, Console};

static CONSOLE: Once<&'static dyn Console> = Once::new();

struct Logger;

impl Log for Logger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let Some(console) = CONSOLE.get() else {
            return;
        };
        let color_code = match record.level() {
            Level::Error => 31, // Red
            Level::Warn => 93,  // BrightYellow
            Level::Info => 34,  // Blue
            Level::Debug => 32, // Green
            Level::Trace => 33, // BrightBlack
        };
        write_fmt(
            *console,
            format_args!(
                "\u{1B}[{}m[{:>5}] ({}:{}) {} \u{1B}[0m\n",
                color_code,
                record.level(),
                record.file().unwrap_or("?"),
                record.line().unwrap_or(0),
                record.args(),
            ),
        );
    }

    fn flush(&self) {}
}

/// Routes the `log` facade to `console`.
pub fn init(console: &'static dyn Console) {
    CONSOLE.call_once(|| console);
    static LOGGER: Logger = Logger;
    log::set_logger(&LOGGER).expect("Failed to initialize logger");
    log::set_max_level(match option_env!("LOG") {
        Some("error") => LevelFilter::Error,
        Some("warn") => LevelFilter::Warn,
        Some("info") => LevelFilter::Info,
        Some("debug") => LevelFilter::Debug,
        Some("trace") => LevelFilter::Trace,
        _ => LevelFilter::Off,
    });
    info!("Console logger successfully initialized.")
}
