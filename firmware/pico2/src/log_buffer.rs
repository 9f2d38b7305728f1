//! Log buffer with levels and timestamps for on-device diagnostics.
//!
//! Keeps the most recent firmware log lines in RAM. Normally they only go out
//! over defmt; when start-up fails they are drawn under the fatal error so
//! the cause is visible without a debug probe.
//!
//! # Usage
//!
//! ```ignore
//! use crate::log_buffer::{log_info, log_warn, log_error};
//!
//! log_info!("Display initialized");
//! log_warn!("RTC lost power, time reset");
//! log_error!("Fatal: {}", error.message());
//! ```

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use embedded_graphics::pixelcolor::Rgb565;
use heapless::{Deque, String};
use menu_common::colors::{GREEN, RED, YELLOW};

/// Maximum number of log entries to keep.
pub const LOG_ENTRIES: usize = 8;

/// Maximum characters per log message.
pub const LOG_MSG_LEN: usize = 36;

/// Log severity level.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum LogLevel {
    /// Normal operation (green)
    #[default]
    Info,
    /// Warnings (yellow)
    Warn,
    /// Errors (red)
    Error,
}

impl LogLevel {
    /// Get the display color for this log level.
    pub const fn color(self) -> Rgb565 {
        match self {
            Self::Info => GREEN,
            Self::Warn => YELLOW,
            Self::Error => RED,
        }
    }
}

/// A single log entry with level, message, and timestamp.
#[derive(Clone)]
pub struct LogEntry {
    pub level: LogLevel,
    /// Log message (truncated to LOG_MSG_LEN).
    pub message: String<LOG_MSG_LEN>,
    /// Milliseconds since boot.
    pub timestamp_ms: u32,
}

impl LogEntry {
    pub fn new(
        level: LogLevel,
        message: &str,
        timestamp_ms: u32,
    ) -> Self {
        let mut msg: String<LOG_MSG_LEN> = String::new();
        for c in message.chars() {
            if msg.push(c).is_err() {
                break;
            }
        }
        Self {
            level,
            message: msg,
            timestamp_ms,
        }
    }
}

/// Ring of the last [`LOG_ENTRIES`] entries, oldest first.
pub struct LogBuffer {
    entries: Deque<LogEntry, LOG_ENTRIES>,
}

impl LogBuffer {
    pub const fn new() -> Self { Self { entries: Deque::new() } }

    /// Push a new log entry. Oldest entry is dropped if buffer is full.
    pub fn push(
        &mut self,
        entry: LogEntry,
    ) {
        if self.entries.is_full() {
            self.entries.pop_front();
        }
        self.entries.push_back(entry).ok();
    }

    /// Iterate over entries from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> { self.entries.iter() }
}

impl Default for LogBuffer {
    fn default() -> Self { Self::new() }
}

/// Global log buffer protected by a mutex.
pub static LOG_BUFFER: Mutex<CriticalSectionRawMutex, LogBuffer> = Mutex::new(LogBuffer::new());

/// Milliseconds since boot, wrapped to u32.
#[inline]
pub fn current_timestamp_ms() -> u32 { embassy_time::Instant::now().as_millis() as u32 }

/// Push a log entry to the global buffer.
///
/// This is non-blocking - if the mutex is held, the log is dropped.
pub fn push_log(
    level: LogLevel,
    message: &str,
) {
    let entry = LogEntry::new(level, message, current_timestamp_ms());
    if let Ok(mut buffer) = LOG_BUFFER.try_lock() {
        buffer.push(entry);
    }
}

/// Log a message at Info level.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {{
        use core::fmt::Write;
        let mut buf: heapless::String<{ $crate::log_buffer::LOG_MSG_LEN }> = heapless::String::new();
        let _ = write!(buf, $($arg)*);
        $crate::log_buffer::push_log($crate::log_buffer::LogLevel::Info, buf.as_str());
        defmt::info!($($arg)*);
    }};
}

/// Log a message at Warn level.
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {{
        use core::fmt::Write;
        let mut buf: heapless::String<{ $crate::log_buffer::LOG_MSG_LEN }> = heapless::String::new();
        let _ = write!(buf, $($arg)*);
        $crate::log_buffer::push_log($crate::log_buffer::LogLevel::Warn, buf.as_str());
        defmt::warn!($($arg)*);
    }};
}

/// Log a message at Error level.
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {{
        use core::fmt::Write;
        let mut buf: heapless::String<{ $crate::log_buffer::LOG_MSG_LEN }> = heapless::String::new();
        let _ = write!(buf, $($arg)*);
        $crate::log_buffer::push_log($crate::log_buffer::LogLevel::Error, buf.as_str());
        defmt::error!($($arg)*);
    }};
}
