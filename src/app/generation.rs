//! Generation tickets for discarding stale responses.
//!
//! Each fetch a screen issues takes a [`FetchTicket`] from the screen's
//! [`Generation`] counter. When the response arrives the screen applies it only
//! if the ticket is still the newest one issued; anything older lost the race to
//! a later request and is dropped.
//!
//! # Example
//!
//! ```
//! use opsconsole::app::generation::Generation;
//!
//! let mut generation = Generation::default();
//! let first = generation.issue();
//! let second = generation.issue();
//! assert!(!generation.is_current(first));
//! assert!(generation.is_current(second));
//! ```

/// Identifies one issued fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FetchTicket(u64);

impl FetchTicket {
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

/// Monotonic per-screen fetch counter.
#[derive(Debug, Clone, Default)]
pub struct Generation {
    latest: u64,
}

impl Generation {
    /// Issues a new ticket, invalidating every earlier one.
    pub fn issue(&mut self) -> FetchTicket {
        self.latest = self.latest.wrapping_add(1);
        FetchTicket(self.latest)
    }

    /// Whether `ticket` is the most recently issued one.
    #[must_use]
    pub const fn is_current(&self, ticket: FetchTicket) -> bool {
        ticket.0 == self.latest
    }
}
