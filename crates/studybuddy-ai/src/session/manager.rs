//! ChatSession struct, creation, and history access.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use studybuddy_common::SessionId;
use tracing::{info, warn};

use crate::usage::UsageTracker;
use crate::{AiClient, ChatSetup, Connector, Message, TokenUsage};

use super::types::SessionError;

/// One conversation: its history plus a live chat handle.
pub struct ChatSession {
    pub(super) id: SessionId,
    pub(super) client: Arc<dyn AiClient>,
    /// Append-only; mutated only by this session.
    pub(super) history: Mutex<Vec<Message>>,
    pub(super) usage: Mutex<UsageTracker>,
    /// Whether an exchange is currently outstanding.
    pub(super) busy: AtomicBool,
}

impl ChatSession {
    /// Open a chat handle for `setup` and seed the history with `seed`.
    ///
    /// `seed` holds prior turns only; display-only greetings do not belong
    /// here (they would be filtered out of requests anyway).
    pub fn create(
        connector: &dyn Connector,
        setup: &ChatSetup,
        seed: Vec<Message>,
    ) -> Result<Self, SessionError> {
        let client = connector.connect(setup).map_err(|e| {
            warn!(model = %setup.model, error = %e, "failed to open chat session");
            SessionError::Configuration(e)
        })?;

        let id = SessionId::new();
        info!(session = %id, model = %setup.model, seeded = seed.len(), "chat session created");

        Ok(Self {
            id,
            client,
            history: Mutex::new(seed),
            usage: Mutex::new(UsageTracker::new()),
            busy: AtomicBool::new(false),
        })
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// A snapshot of the conversation history.
    pub fn history(&self) -> Vec<Message> {
        self.lock_history().clone()
    }

    pub fn len(&self) -> usize {
        self.lock_history().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock_history().is_empty()
    }

    /// Whether an exchange is outstanding.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Cumulative token usage and the number of successful exchanges.
    pub fn usage(&self) -> (TokenUsage, u64) {
        let tracker = self.usage.lock().unwrap_or_else(PoisonError::into_inner);
        (tracker.total(), tracker.call_count())
    }

    pub(super) fn lock_history(&self) -> MutexGuard<'_, Vec<Message>> {
        self.history.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for ChatSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatSession")
            .field("id", &self.id)
            .field("messages", &self.len())
            .field("busy", &self.is_busy())
            .finish_non_exhaustive()
    }
}
