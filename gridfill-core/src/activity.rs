//! Bounded activity log shared between a running pipeline and its observer.
//!
//! The run task is the only writer; a polling frontend reads snapshots or
//! the lines appended since its last poll. Every line is also forwarded to
//! the `log` facade so a configured logger keeps the full history.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

/// Number of lines kept in memory before the oldest is evicted.
pub const DEFAULT_CAPACITY: usize = 80;

/// Fixed-capacity ring of text lines.
#[derive(Debug)]
pub struct RunLog {
    lines: VecDeque<String>,
    capacity: usize,
    /// Sequence number of the next line to be pushed.
    next_seq: u64,
}

impl RunLog {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            lines: VecDeque::with_capacity(capacity),
            capacity,
            next_seq: 0,
        }
    }

    pub fn push(&mut self, line: impl Into<String>) {
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line.into());
        self.next_seq += 1;
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.lines.iter()
    }

    /// Sequence number the next pushed line will get.
    pub fn next_seq(&self) -> u64 {
        self.next_seq
    }

    /// Lines pushed at or after `seq` that are still retained, plus the
    /// sequence number to pass on the next call.
    pub fn lines_since(&self, seq: u64) -> (Vec<String>, u64) {
        let oldest = self.next_seq - self.lines.len() as u64;
        let skip = seq.saturating_sub(oldest) as usize;
        let lines = self.lines.iter().skip(skip).cloned().collect();
        (lines, self.next_seq)
    }
}

impl Default for RunLog {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

/// Cloneable handle to a [`RunLog`] that mirrors lines to the `log` facade.
#[derive(Debug, Clone, Default)]
pub struct ActivityLog {
    inner: Arc<Mutex<RunLog>>,
}

impl ActivityLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(RunLog::new(capacity))),
        }
    }

    pub fn info(&self, line: impl Into<String>) {
        let line = line.into();
        log::info!("{}", line);
        self.lock().push(line);
    }

    pub fn warn(&self, line: impl Into<String>) {
        let line = line.into();
        log::warn!("{}", line);
        self.lock().push(line);
    }

    pub fn error(&self, line: impl Into<String>) {
        let line = line.into();
        log::error!("{}", line);
        self.lock().push(line);
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Copy of every retained line, oldest first.
    pub fn snapshot(&self) -> Vec<String> {
        self.lock().iter().cloned().collect()
    }

    pub fn lines_since(&self, seq: u64) -> (Vec<String>, u64) {
        self.lock().lines_since(seq)
    }

    /// A panic while holding the lock cannot leave the ring inconsistent,
    /// so a poisoned mutex is recovered rather than propagated.
    fn lock(&self) -> MutexGuard<'_, RunLog> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}
