//! Menu event log.
//!
//! A small ring buffer of human-readable event lines ("Light: OFF",
//! "Volume = 75"). The engine records into it; the firmware forwards new
//! lines to defmt and the simulator prints them to stdout.
//!
//! # Usage
//!
//! ```ignore
//! let mut log = EventLog::new();
//! log.push("Boot");
//! log.record(format_args!("Volume = {}", 75));
//!
//! for line in log.drain_new() {
//!     println!("{}", line);
//! }
//! ```

use core::fmt;

use heapless::{Deque, String};

// =============================================================================
// Event Log Configuration
// =============================================================================

/// Maximum number of lines kept in the ring buffer.
pub const EVENT_LOG_SIZE: usize = 8;

/// Maximum characters per line.
pub const EVENT_LINE_LENGTH: usize = 48;

type Line = String<EVENT_LINE_LENGTH>;

/// `fmt::Write` sink that keeps as many characters as fit.
struct Truncating<'a>(&'a mut Line);

impl fmt::Write for Truncating<'_> {
    fn write_str(
        &mut self,
        s: &str,
    ) -> fmt::Result {
        for c in s.chars() {
            if self.0.push(c).is_err() {
                break;
            }
        }
        Ok(())
    }
}

// =============================================================================
// Event Log Ring Buffer
// =============================================================================

/// Ring buffer of the last [`EVENT_LOG_SIZE`] event lines.
///
/// Tracks how many lines have not been read through
/// [`drain_new`](Self::drain_new) yet. Lines dropped by the ring are lost
/// whether read or not.
pub struct EventLog {
    buffer: Deque<Line, EVENT_LOG_SIZE>,
    unread: usize,
}

impl EventLog {
    pub const fn new() -> Self {
        Self {
            buffer: Deque::new(),
            unread: 0,
        }
    }

    /// Append a line, dropping the oldest if full. Long lines are truncated.
    pub fn push(
        &mut self,
        msg: &str,
    ) {
        self.record(format_args!("{msg}"));
    }

    /// Append a formatted line.
    pub fn record(
        &mut self,
        args: fmt::Arguments<'_>,
    ) {
        let mut line = Line::new();
        fmt::write(&mut Truncating(&mut line), args).ok();

        if self.buffer.is_full() {
            self.buffer.pop_front();
        }
        self.buffer.push_back(line).ok();
        self.unread = (self.unread + 1).min(self.buffer.len());
    }

    /// All retained lines, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &str> { self.buffer.iter().map(|line| line.as_str()) }

    #[inline]
    pub fn len(&self) -> usize { self.buffer.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.buffer.is_empty() }

    /// Lines pushed since the previous call, oldest first.
    pub fn drain_new(&mut self) -> impl Iterator<Item = &str> + '_ {
        let fresh = core::mem::take(&mut self.unread);
        let skip = self.buffer.len() - fresh;
        self.buffer.iter().skip(skip).map(|line| line.as_str())
    }
}

impl Default for EventLog {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Tests
// =============================================================================
