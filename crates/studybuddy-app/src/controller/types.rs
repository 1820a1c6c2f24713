//! Controller view types, options, and the settle guard.

use std::sync::Arc;

use studybuddy_ai::{ChatSession, ChatSetup, Message};
use studybuddy_common::NotificationQueue;

use super::Inner;

pub(super) const ERROR_TOAST: &str = "Something went wrong. Please try again.";
pub(super) const RESET_TOAST: &str = "Chat has been reset";
pub(super) const DISCARDED_TOAST: &str = "The pending reply was discarded";
pub(super) const UNAVAILABLE_TOAST: &str =
    "The study assistant is unavailable. Check your API key and restart.";

/// What the presentation layer renders.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatView {
    /// Always starts with the welcome message.
    pub messages: Vec<Message>,
    pub loading: bool,
}

/// Fixed inputs every session of a controller is created with.
#[derive(Debug, Clone)]
pub struct ControllerOptions {
    pub setup: ChatSetup,
    pub welcome_message: String,
    pub apology_message: String,
}

pub(super) struct ControllerState {
    /// `None` when the chat handle could not be opened.
    pub(super) session: Option<Arc<ChatSession>>,
    /// Bumped on every reset; results from an older epoch are dropped.
    pub(super) epoch: u64,
    pub(super) messages: Vec<Message>,
    pub(super) loading: bool,
    pub(super) notifications: NotificationQueue,
}

impl ControllerState {
    pub(super) fn view(&self) -> ChatView {
        ChatView {
            messages: self.messages.clone(),
            loading: self.loading,
        }
    }
}

/// Clears the loading flag when a submission settles, including when the
/// submitting future is dropped before the reply arrives.
pub(super) struct SettleGuard<'a> {
    pub(super) inner: &'a Inner,
    pub(super) epoch: u64,
}

impl Drop for SettleGuard<'_> {
    fn drop(&mut self) {
        let mut state = self.inner.lock_state();
        if state.epoch == self.epoch && state.loading {
            state.loading = false;
            self.inner.publish(&state);
        }
    }
}
