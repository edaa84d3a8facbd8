//! Rolling Logger
//!
//! Every record goes to the platform console (browser devtools on wasm,
//! stderr elsewhere) and into a circular buffer holding the most recent
//! lines, so the app can show or export them without a log file.
//!
//! Both the `log` facade and `tracing` events are captured.

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Mutex, OnceLock};

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use tracing::field::{Field, Visit};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::{Layer, Registry};

/// Lines kept in memory
pub const DEFAULT_CAPACITY: usize = 500;

static LOGGER: OnceLock<RollingLogger> = OnceLock::new();

/// Fixed-size line buffer; the oldest line is dropped when full
pub struct LineBuffer {
    capacity: usize,
    lines: Mutex<VecDeque<String>>,
}

impl LineBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            lines: Mutex::new(VecDeque::with_capacity(capacity.max(1))),
        }
    }

    pub fn push(&self, line: String) {
        let Ok(mut lines) = self.lines.lock() else { return };
        if lines.len() == self.capacity {
            lines.pop_front();
        }
        lines.push_back(line);
    }

    /// Up to `n` most recent lines, oldest first
    pub fn recent(&self, n: usize) -> Vec<String> {
        let Ok(lines) = self.lines.lock() else { return Vec::new() };
        let skip = lines.len().saturating_sub(n);
        lines.iter().skip(skip).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().map(|l| l.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.clear();
        }
    }
}

pub struct RollingLogger {
    app_name: String,
    level: LevelFilter,
    buffer: LineBuffer,
}

impl RollingLogger {
    pub fn new(app_name: impl Into<String>, level: LevelFilter, capacity: usize) -> Self {
        Self {
            app_name: app_name.into(),
            level,
            buffer: LineBuffer::new(capacity),
        }
    }

    pub fn buffer(&self) -> &LineBuffer {
        &self.buffer
    }

    fn write(&self, level: Level, target: &str, message: &str) {
        let line = format_line(&self.app_name, level, target, message);
        emit(level, &line);
        self.buffer.push(line);
    }
}

impl Log for RollingLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            self.write(record.level(), record.target(), &record.args().to_string());
        }
    }

    fn flush(&self) {}
}

/// Forwards `tracing` events into the global logger
struct RollingLayer;

impl<S: tracing::Subscriber> Layer<S> for RollingLayer {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let Some(logger) = LOGGER.get() else { return };
        let meta = event.metadata();
        let level = match *meta.level() {
            tracing::Level::ERROR => Level::Error,
            tracing::Level::WARN => Level::Warn,
            tracing::Level::INFO => Level::Info,
            tracing::Level::DEBUG => Level::Debug,
            tracing::Level::TRACE => Level::Trace,
        };
        if level > logger.level {
            return;
        }
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        logger.write(level, meta.target(), &visitor.finish());
    }
}

#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: Vec<String>,
}

impl MessageVisitor {
    fn finish(self) -> String {
        if self.fields.is_empty() {
            self.message
        } else {
            format!("{} {}", self.message, self.fields.join(" "))
        }
    }
}

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        } else {
            self.fields.push(format!("{}={:?}", field.name(), value));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.fields.push(format!("{}={}", field.name(), value));
        }
    }
}

fn format_line(app_name: &str, level: Level, target: &str, message: &str) -> String {
    format!(
        "{} {:<5} [{}] {}: {}",
        chrono::Local::now().format("%H:%M:%S%.3f"),
        level,
        app_name,
        target,
        message
    )
}

#[cfg(target_arch = "wasm32")]
fn emit(level: Level, line: &str) {
    use web_sys::console;
    let value = wasm_bindgen::JsValue::from_str(line);
    match level {
        Level::Error => console::error_1(&value),
        Level::Warn => console::warn_1(&value),
        Level::Info => console::info_1(&value),
        Level::Debug | Level::Trace => console::debug_1(&value),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(_level: Level, line: &str) {
    eprintln!("{}", line);
}

/// Install the global logger at `Info`
pub fn init_logger(app_name: &str) -> Result<(), SetLoggerError> {
    init_with_level(app_name, LevelFilter::Info)
}

pub fn init_with_level(app_name: &str, level: LevelFilter) -> Result<(), SetLoggerError> {
    let logger = LOGGER.get_or_init(|| RollingLogger::new(app_name, level, DEFAULT_CAPACITY));
    log::set_logger(logger)?;
    log::set_max_level(level);
    // A subscriber may already be installed by the host; log records still flow
    let _ = tracing::subscriber::set_global_default(Registry::default().with(RollingLayer));
    Ok(())
}

/// Most recent lines of the global logger, oldest first
pub fn recent(n: usize) -> Vec<String> {
    LOGGER.get().map(|l| l.buffer.recent(n)).unwrap_or_default()
}

pub fn clear() {
    if let Some(logger) = LOGGER.get() {
        logger.buffer.clear();
    }
}
