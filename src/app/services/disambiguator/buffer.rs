//! Bounded buffer of fixes awaiting a calendar date

use crate::app::models::UndatedFix;

/// Ordered, capacity-bounded holding area for undated fixes
///
/// The buffer never drops a fix. Callers check [`Buffer::is_full`] after
/// each push and drain it with [`Buffer::flush`].
#[derive(Debug, Clone)]
pub struct Buffer {
    fixes: Vec<UndatedFix>,
    capacity: usize,
}

impl Buffer {
    /// Create a buffer; a zero capacity is treated as one
    pub fn new(capacity: usize) -> Self {
        Self {
            fixes: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, fix: UndatedFix) {
        self.fixes.push(fix);
    }

    pub fn is_full(&self) -> bool {
        self.fixes.len() >= self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.fixes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fixes.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Take every buffered fix, in arrival order, leaving the buffer empty
    pub fn flush(&mut self) -> Vec<UndatedFix> {
        std::mem::take(&mut self.fixes)
    }
}
