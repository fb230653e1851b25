//! Capabilities supplied by the host application.
//!
//! # Design
//! The panel has no UI runtime or network access of its own. Confirmation prompts
//! and notifications go through `Dialogs`; requests go through `Transport`,
//! or are executed by the host however it likes and fed back through
//! `VehiclesPanel::complete`.

use std::collections::VecDeque;

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::panel::{PendingRequest, VehiclesPanel};

/// Yes/no prompts and user-facing notices.
pub trait Dialogs {
    /// Ask the user to confirm a destructive action.
    fn confirm(&mut self, message: &str) -> bool;

    fn notify(&mut self, message: &str);
}

/// Executes one request, attaching ambient session credentials.
///
/// Non-2xx statuses are returned as responses, not errors; `Err` is reserved
/// for requests that produced no response.
pub trait Transport {
    fn execute(&mut self, request: &HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// Execute `pending` and every follow-up request in order, until none remain.
pub fn run_until_idle<D, T>(panel: &mut VehiclesPanel<D>, transport: &mut T, pending: Vec<PendingRequest>)
where
    D: Dialogs,
    T: Transport + ?Sized,
{
    let mut queue: VecDeque<PendingRequest> = pending.into();
    while let Some(next) = queue.pop_front() {
        tracing::debug!(
            operation = ?next.operation,
            method = %next.request.method,
            path = %next.request.path,
            "executing request"
        );
        let outcome = transport.execute(&next.request);
        queue.extend(panel.complete(next.operation, outcome));
    }
}
