// SPDX-License-Identifier: MPL-2.0
//! Last-issued-wins tagging for screen fetches.
//!
//! Every fetch is tagged with a ticket when it is issued. When its response
//! arrives, only the most recently issued ticket may be applied; a slower,
//! older response is dropped instead of overwriting newer data.

/// Identifies one issued fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FetchTicket(u64);

/// Issues monotonically increasing tickets.
#[derive(Debug, Default)]
pub struct FetchSequence {
    latest: u64,
}

impl FetchSequence {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a ticket newer than every previous one.
    pub fn issue(&mut self) -> FetchTicket {
        self.latest += 1;
        FetchTicket(self.latest)
    }

    /// Returns `true` if `ticket` is the latest issued.
    #[must_use]
    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        ticket.0 == self.latest
    }

    /// Returns `true` if a fetch has been issued since `ticket`.
    #[must_use]
    pub fn is_stale(&self, ticket: FetchTicket) -> bool {
        !self.is_current(ticket)
    }
}
