//! Request dispatcher: one prompt in, one outcome recorded on the session.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::backend::{ChatBackend, ChatRequest, DispatchError};
use crate::reply::ChatReply;
use crate::session::{SubmitRejected, SubmitTicket, ViewSession};

/// What happened to a dispatched prompt's result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchStatus {
    /// Recorded on the session.
    Applied,
    /// The session moved on (back, or a newer submit); result dropped.
    Stale,
}

/// Sends prompts to the assistant service on behalf of view sessions.
#[derive(Clone)]
pub struct Dispatcher {
    backend: Arc<dyn ChatBackend>,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher").finish_non_exhaustive()
    }
}

impl Dispatcher {
    #[must_use]
    pub fn new(backend: Arc<dyn ChatBackend>) -> Self {
        Self { backend }
    }

    /// Send `prompt` for the session. The prompt is kept on the session only
    /// when the submit is accepted.
    ///
    /// The round trip runs on its own task so that the session's submitting
    /// flag is cleared even if the caller goes away mid-request.
    pub async fn submit(
        &self,
        session: &ViewSession,
        prompt: impl Into<String>,
    ) -> Result<DispatchStatus, SubmitRejected> {
        let ticket = session.begin_submit(prompt)?;

        info!(
            name: "chat.dispatch.started",
            session_id = %session.id(),
            generation = ticket.generation,
            prompt_chars = ticket.prompt.chars().count(),
            "Dispatching prompt"
        );

        let task = tokio::spawn(round_trip(
            Arc::clone(&self.backend),
            session.clone(),
            ticket.clone(),
        ));

        match task.await {
            Ok(status) => Ok(status),
            Err(e) => {
                warn!(name: "chat.dispatch.aborted", session_id = %session.id(), error = %e, "Dispatch task aborted");
                let applied = session.complete(
                    &ticket,
                    Err(DispatchError::network("request was interrupted")),
                );
                Ok(if applied {
                    DispatchStatus::Applied
                } else {
                    DispatchStatus::Stale
                })
            }
        }
    }
}

async fn round_trip(
    backend: Arc<dyn ChatBackend>,
    session: ViewSession,
    ticket: SubmitTicket,
) -> DispatchStatus {
    let request = ChatRequest::new(ticket.prompt.clone());
    let result = backend.send(&request).await.and_then(ChatReply::from_value);

    match &result {
        Ok(reply) => info!(
            name: "chat.dispatch.completed",
            session_id = %session.id(),
            generation = ticket.generation,
            kind = ?reply.kind,
            "Reply received"
        ),
        Err(err) => warn!(
            name: "chat.dispatch.failed",
            session_id = %session.id(),
            generation = ticket.generation,
            kind = err.kind(),
            error = %err,
            "Dispatch failed"
        ),
    }

    if session.complete(&ticket, result) {
        DispatchStatus::Applied
    } else {
        debug!(
            name: "chat.dispatch.stale",
            session_id = %session.id(),
            generation = ticket.generation,
            "Discarding stale reply"
        );
        DispatchStatus::Stale
    }
}
