pub mod dom_labels;
pub mod events;
pub mod headless;
pub mod host_sink;
pub mod lightweight_charts;

pub use dom_labels::{DomLabel, DomLabelFactory};
pub use headless::{HeadlessElement, HeadlessLabelFactory, HeadlessSurface};
pub use host_sink::HostCallbackSink;
pub use lightweight_charts::LightweightChartsSurface;

use crate::domain::errors::OverlayError;
use wasm_bindgen::JsValue;

/// Browser failure with the context of what was being attempted
pub(crate) fn js_error(context: &str, error: JsValue) -> OverlayError {
    let detail = error.as_string().unwrap_or_else(|| format!("{:?}", error));
    OverlayError::Dom(format!("{}: {}", context, detail))
}

/// Browser implementations of the domain's logging abstractions
pub mod services {
    use crate::domain::logging::{LogEntry, LogLevel, Logger, TimeProvider};

    pub struct ConsoleLogger {
        min_level: LogLevel,
    }

    impl ConsoleLogger {
        pub fn new(min_level: LogLevel) -> Self {
            Self { min_level }
        }

        pub fn new_production() -> Self {
            Self::new(LogLevel::Info)
        }

        pub fn new_development() -> Self {
            Self::new(LogLevel::Debug)
        }

        fn format_log_entry(&self, entry: &LogEntry) -> String {
            let timestamp = BrowserTimeProvider.format_timestamp(entry.timestamp);
            match &entry.metadata {
                Some(metadata) => format!(
                    "[{}] {} {} | {} | {}",
                    timestamp, entry.level, entry.component, entry.message, metadata
                ),
                None => format!("[{}] {} {} | {}", timestamp, entry.level, entry.component, entry.message),
            }
        }
    }

    impl Logger for ConsoleLogger {
        fn log(&self, entry: LogEntry) {
            if entry.level < self.min_level {
                return;
            }
            let formatted = self.format_log_entry(&entry);
            match entry.level {
                LogLevel::Trace | LogLevel::Debug => gloo::console::debug!(formatted),
                LogLevel::Info => gloo::console::info!(formatted),
                LogLevel::Warn => gloo::console::warn!(formatted),
                LogLevel::Error => gloo::console::error!(formatted),
            }
        }
    }

    /// Wall clock from `Date.now()`
    #[derive(Default)]
    pub struct BrowserTimeProvider;

    impl BrowserTimeProvider {
        pub fn new() -> Self {
            Self
        }
    }

    impl TimeProvider for BrowserTimeProvider {
        fn current_timestamp(&self) -> u64 {
            js_sys::Date::now() as u64
        }

        fn format_timestamp(&self, timestamp: u64) -> String {
            let date = js_sys::Date::new(&(timestamp as f64).into());
            format!(
                "{:02}:{:02}:{:02}.{:03}",
                date.get_hours(),
                date.get_minutes(),
                date.get_seconds(),
                date.get_milliseconds()
            )
        }
    }
}
