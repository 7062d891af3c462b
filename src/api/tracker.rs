// SPDX-License-Identifier: MPL-2.0
//! Per-call loading and error status for remote operations.
//!
//! Each call registers itself with [`RequestTracker::begin`] under a scope
//! (the part of the interface that issued it) and is removed by
//! [`RequestTracker::finish`] or [`RequestTracker::discard`] with its own
//! [`RequestId`], so overlapping calls never clear each other's loading state.
//! Errors are kept per scope and cleared when a new call in that scope starts.

use super::error::ApiError;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// Remote operations the application can issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ListImages,
    ListVotes,
    ListFavourites,
    CreateFavourite,
    DeleteFavourite,
    CreateVote,
    UploadImage,
    DeleteImage,
}

impl Operation {
    /// Operations fetched together by the gallery screen.
    pub const GALLERY_LOAD: [Operation; 3] = [
        Operation::ListImages,
        Operation::ListVotes,
        Operation::ListFavourites,
    ];

    /// Prefix of the message stored when the operation fails.
    #[must_use]
    pub fn failure_prefix(self) -> &'static str {
        match self {
            Operation::ListImages => "Failed to fetch uploaded images",
            Operation::ListVotes => "Failed to get votes",
            Operation::ListFavourites => "Failed to fetch favorites",
            Operation::CreateFavourite => "Failed to post /favourites",
            Operation::DeleteFavourite => "Failed to delete favourite",
            Operation::CreateVote => "Failed to create vote",
            Operation::UploadImage => "Failed to upload image",
            Operation::DeleteImage => "Failed to delete image",
        }
    }
}

/// Handle identifying one in-flight call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(u64);

#[derive(Debug, Clone, Copy)]
struct Call<S> {
    scope: S,
    operation: Operation,
}

#[derive(Debug, Clone)]
struct ErrorEntry {
    message: String,
    /// Id of the failed call, to keep the most recently issued failure.
    seq: u64,
}

/// Registry of in-flight calls and last failures, keyed by scope `S`.
#[derive(Debug)]
pub struct RequestTracker<S> {
    next_id: u64,
    in_flight: HashMap<RequestId, Call<S>>,
    errors: HashMap<S, ErrorEntry>,
}

impl<S> Default for RequestTracker<S> {
    fn default() -> Self {
        Self {
            next_id: 0,
            in_flight: HashMap::new(),
            errors: HashMap::new(),
        }
    }
}

impl<S: Copy + Eq + Hash + Debug> RequestTracker<S> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new call and clears the previous error of its scope.
    pub fn begin(&mut self, scope: S, operation: Operation) -> RequestId {
        let id = RequestId(self.next_id);
        self.next_id += 1;
        self.in_flight.insert(id, Call { scope, operation });
        self.errors.remove(&scope);
        id
    }

    /// Completes a call, recording the failure message if it failed.
    ///
    /// Returns the message stored for a failure. Unknown ids are ignored. A
    /// failure never replaces one from a call issued later in the same scope.
    pub fn finish<T>(&mut self, id: RequestId, result: &Result<T, ApiError>) -> Option<String> {
        let call = self.in_flight.remove(&id)?;
        let err = result.as_ref().err()?;

        let message = format!("{}: {}", call.operation.failure_prefix(), err.user_message());
        tracing::warn!(
            scope = ?call.scope,
            operation = ?call.operation,
            error = %err,
            "{message}"
        );

        let newer_recorded = self
            .errors
            .get(&call.scope)
            .is_some_and(|entry| entry.seq > id.0);
        if !newer_recorded {
            self.errors.insert(
                call.scope,
                ErrorEntry {
                    message: message.clone(),
                    seq: id.0,
                },
            );
        }
        Some(message)
    }

    /// Completes a superseded call without recording its outcome.
    pub fn discard(&mut self, id: RequestId) {
        if let Some(call) = self.in_flight.remove(&id) {
            tracing::debug!(
                scope = ?call.scope,
                operation = ?call.operation,
                "discarding superseded call"
            );
        }
    }

    /// Returns `true` while any call is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        !self.in_flight.is_empty()
    }

    /// Returns `true` while a call issued from `scope` is in flight.
    #[must_use]
    pub fn is_loading_in(&self, scope: S) -> bool {
        self.in_flight.values().any(|call| call.scope == scope)
    }

    /// Number of calls currently in flight.
    #[must_use]
    pub fn in_flight_count(&self) -> usize {
        self.in_flight.len()
    }

    /// Latest error recorded in `scope`.
    #[must_use]
    pub fn error_for(&self, scope: S) -> Option<&str> {
        self.errors.get(&scope).map(|entry| entry.message.as_str())
    }
}
