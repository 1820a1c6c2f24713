//! Conversation session management.
//!
//! A `ChatSession` owns one conversation's authoritative history and its
//! chat handle, and enforces that at most one exchange is in flight.

mod chat;
mod manager;
mod types;


pub use manager::ChatSession;
pub use types::{Reply, SessionError};
