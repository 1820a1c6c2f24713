//! Async exchange for ChatSession.

use std::sync::PoisonError;

use tracing::{debug, warn};

use crate::{request_history, Message};

use super::manager::ChatSession;
use super::types::{BusyGuard, Reply, SessionError};

impl ChatSession {
    /// Send one user message and wait for the model's reply.
    ///
    /// The user message is appended before the request goes out, so it is
    /// kept even when the exchange fails. On failure nothing else is
    /// appended; the caller decides what, if anything, to show instead.
    pub async fn send_message(&self, text: &str) -> Result<Reply, SessionError> {
        if text.trim().is_empty() {
            return Err(SessionError::EmptyMessage);
        }
        let _guard = BusyGuard::acquire(&self.busy)?;

        let contents = {
            let mut history = self.lock_history();
            history.push(Message::user(text));
            request_history(&history)
        };

        debug!(session = %self.id, turns = contents.len(), "sending message");

        let response = self.client.generate(&contents).await.map_err(|e| {
            warn!(session = %self.id, error = %e, "message exchange failed");
            SessionError::Send(e)
        })?;

        self.usage
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .record(&response.usage);
        self.lock_history()
            .push(Message::assistant(response.content.clone()));

        Ok(Reply {
            text: response.content,
            done: true,
        })
    }
}
