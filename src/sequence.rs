//! Request Sequence
//!
//! Monotonic counter guarding a DOM container against stale responses:
//! only the most recently issued request may write to it.

use std::cell::Cell;

/// Token handed to a request when it is issued
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceToken(u64);

#[derive(Debug, Default)]
pub struct RequestSequence {
    latest: Cell<u64>,
}

impl RequestSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> SequenceToken {
        let next = self.latest.get() + 1;
        self.latest.set(next);
        SequenceToken(next)
    }

    /// True while no newer token has been issued
    pub fn is_current(&self, token: SequenceToken) -> bool {
        self.latest.get() == token.0
    }
}
