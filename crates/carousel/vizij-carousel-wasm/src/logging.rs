//! `log` records forwarded to the browser console.
use log::{Level, LevelFilter, Log, Metadata, Record};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console, js_name = log)]
    fn console_log(s: &str);
    #[wasm_bindgen(js_namespace = console, js_name = warn)]
    fn console_warn(s: &str);
    #[wasm_bindgen(js_namespace = console, js_name = error)]
    fn console_error(s: &str);
}

struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!("[{}] {}: {}", record.level(), record.target(), record.args());
        match record.level() {
            Level::Error => console_error(&line),
            Level::Warn => console_warn(&line),
            _ => console_log(&line),
        }
    }

    fn flush(&self) {}
}

/// Parse a level name (`off`, `error`, `warn`, `info`, `debug`, `trace`); `None` means `info`.
pub(crate) fn parse_level(level: Option<&str>) -> Result<LevelFilter, String> {
    match level {
        None => Ok(LevelFilter::Info),
        Some(name) => name
            .parse::<LevelFilter>()
            .map_err(|_| format!("unknown log level '{name}'")),
    }
}

/// Install the console logger (first call only) and set the max level.
pub(crate) fn install(filter: LevelFilter) {
    // Only the first call installs; later calls just change the level.
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(filter);
}
