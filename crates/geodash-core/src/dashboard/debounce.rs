// crates/geodash-core/src/dashboard/debounce.rs
use std::mem::discriminant;

/// Trailing-edge debouncer over an injected millisecond clock.
///
/// Holds at most one pending value per enum variant; a newer value of the
/// same variant replaces the older one. Every push restarts the window.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    window_ms: u64,
    pending: Vec<T>,
    deadline: Option<u64>,
}

impl<T> Debouncer<T> {
    pub fn new(window_ms: u64) -> Self {
        Debouncer {
            window_ms,
            pending: Vec::new(),
            deadline: None,
        }
    }

    pub fn push(&mut self, value: T, now_ms: u64) {
        let kind = discriminant(&value);
        self.pending.retain(|p| discriminant(p) != kind);
        self.pending.push(value);
        self.deadline = Some(now_ms.saturating_add(self.window_ms));
    }

    /// Releases the pending values once the window has elapsed.
    pub fn poll(&mut self, now_ms: u64) -> Vec<T> {
        match self.deadline {
            Some(deadline) if now_ms >= deadline => self.flush(),
            _ => Vec::new(),
        }
    }

    /// Releases the pending values immediately.
    pub fn flush(&mut self) -> Vec<T> {
        self.deadline = None;
        std::mem::take(&mut self.pending)
    }

    pub fn is_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}
