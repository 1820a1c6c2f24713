//! Chat controller: bridges user input to the chat session and keeps the
//! displayed message list.
//!
//! The displayed list and the session's history are kept separately. The
//! displayed list is `[welcome] ++ seed ++` one user entry per accepted
//! submission, each followed by the reply or, on failure, the apology. The
//! session's history holds the same turns minus the welcome message and the
//! apologies, which are never sent upstream.

mod types;


pub use types::{ChatView, ControllerOptions};

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use studybuddy_ai::{AiError, ChatSession, Connector, Message, SessionError, TokenUsage};
use studybuddy_common::{Notification, NotificationQueue, SessionId};
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use types::{
    ControllerState, SettleGuard, DISCARDED_TOAST, ERROR_TOAST, RESET_TOAST, UNAVAILABLE_TOAST,
};

/// UI-facing façade over one live chat session.
///
/// Cheap to clone; clones share state.
#[derive(Clone)]
pub struct ChatController {
    inner: Arc<Inner>,
}

struct Inner {
    connector: Arc<dyn Connector>,
    options: ControllerOptions,
    state: Mutex<ControllerState>,
    view_tx: watch::Sender<ChatView>,
}

impl ChatController {
    /// Start a conversation with an empty session history.
    pub fn initialize(connector: Arc<dyn Connector>, options: ControllerOptions) -> Self {
        Self::with_seed(connector, options, Vec::new())
    }

    /// Start a conversation pre-populated with prior turns.
    ///
    /// `seed` is displayed after the welcome message and becomes the
    /// session's initial history. A later [`reset`](Self::reset) drops it.
    pub fn with_seed(
        connector: Arc<dyn Connector>,
        options: ControllerOptions,
        seed: Vec<Message>,
    ) -> Self {
        let mut notifications = NotificationQueue::default();
        let session = open_session(&*connector, &options, seed.clone(), &mut notifications);

        let mut messages = Vec::with_capacity(seed.len() + 1);
        messages.push(Message::assistant(options.welcome_message.clone()));
        messages.extend(seed);

        let state = ControllerState {
            session,
            epoch: 0,
            messages,
            loading: false,
            notifications,
        };
        let (view_tx, _) = watch::channel(state.view());

        Self {
            inner: Arc::new(Inner {
                connector,
                options,
                state: Mutex::new(state),
                view_tx,
            }),
        }
    }

    /// Submit user text.
    ///
    /// Ignored when a submission is already in flight or `text` is blank.
    /// Failures never escape: they become the apology message plus an error
    /// notification, and the cause is logged.
    pub async fn submit(&self, text: &str) {
        let (session, epoch) = {
            let mut state = self.inner.lock_state();
            if state.loading || text.trim().is_empty() {
                debug!(loading = state.loading, "submission ignored");
                return;
            }
            state.loading = true;
            state.messages.push(Message::user(text));
            self.inner.publish(&state);
            (state.session.clone(), state.epoch)
        };
        let settle = SettleGuard {
            inner: &self.inner,
            epoch,
        };

        let outcome = match session {
            Some(session) => session.send_message(text).await,
            None => Err(SessionError::Send(AiError::NotConfigured(
                "no chat session is available".into(),
            ))),
        };

        {
            let mut state = self.inner.lock_state();
            if state.epoch != epoch {
                debug!("discarding result from a session that was reset");
            } else {
                match outcome {
                    Ok(reply) => state.messages.push(Message::assistant(reply.text)),
                    Err(e) => {
                        warn!(error = %e, "chat exchange failed");
                        let apology = self.inner.options.apology_message.clone();
                        state.messages.push(Message::assistant(apology));
                        state.notifications.push(Notification::error(ERROR_TOAST));
                    }
                }
            }
        }
        drop(settle);
    }

    /// Discard the current session and start over from the welcome message.
    ///
    /// An in-flight submission is not cancelled; its result is ignored.
    pub fn reset(&self) {
        let mut state = self.inner.lock_state();
        let session = open_session(
            &*self.inner.connector,
            &self.inner.options,
            Vec::new(),
            &mut state.notifications,
        );

        let abandoned = state.loading;
        state.epoch += 1;
        state.session = session;
        state.messages = vec![Message::assistant(self.inner.options.welcome_message.clone())];
        state.loading = false;
        state.notifications.push(Notification::success(RESET_TOAST));
        if abandoned {
            state.notifications.push(Notification::info(DISCARDED_TOAST));
        }
        info!(epoch = state.epoch, "conversation reset");
        self.inner.publish(&state);
    }

    /// A snapshot of the displayed message list and the loading flag.
    pub fn view(&self) -> ChatView {
        self.inner.lock_state().view()
    }

    /// Receive a fresh [`ChatView`] after every change.
    pub fn subscribe(&self) -> watch::Receiver<ChatView> {
        self.inner.view_tx.subscribe()
    }

    /// The live session's own history (no welcome message, no apologies).
    pub fn session_history(&self) -> Vec<Message> {
        self.current_session()
            .map(|session| session.history())
            .unwrap_or_default()
    }

    pub fn session_id(&self) -> Option<SessionId> {
        self.current_session().map(|session| session.id().clone())
    }

    /// Token usage and successful call count of the live session.
    pub fn usage(&self) -> (TokenUsage, u64) {
        self.current_session()
            .map(|session| session.usage())
            .unwrap_or_default()
    }

    /// Remove and return the pending notifications, oldest first.
    pub fn take_notifications(&self) -> Vec<Notification> {
        self.inner.lock_state().notifications.drain()
    }

    fn current_session(&self) -> Option<Arc<ChatSession>> {
        self.inner.lock_state().session.clone()
    }
}

impl Inner {
    fn lock_state(&self) -> MutexGuard<'_, ControllerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, state: &ControllerState) {
        self.view_tx.send_replace(state.view());
    }
}

fn open_session(
    connector: &dyn Connector,
    options: &ControllerOptions,
    seed: Vec<Message>,
    notifications: &mut NotificationQueue,
) -> Option<Arc<ChatSession>> {
    match ChatSession::create(connector, &options.setup, seed) {
        Ok(session) => Some(Arc::new(session)),
        Err(e) => {
            error!(error = %e, "chat session unavailable");
            notifications.push(Notification::error(UNAVAILABLE_TOAST));
            None
        }
    }
}
