//! Request-shaped history: the view of a conversation the upstream API accepts.
//!
//! The generation API rejects a transcript that does not open with a user
//! turn, so every leading assistant message (the welcome greeting, most
//! commonly) is dropped. Everything from the first user message onward is
//! kept verbatim and in order.

use serde::Serialize;

use crate::{Message, Speaker};

/// Outbound role tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentRole {
    User,
    Model,
}

impl From<Speaker> for ContentRole {
    fn from(speaker: Speaker) -> Self {
        match speaker {
            Speaker::User => ContentRole::User,
            Speaker::Assistant => ContentRole::Model,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Part {
    pub text: String,
}

/// One turn of the outbound transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Content {
    pub role: ContentRole,
    pub parts: Vec<Part>,
}

impl Content {
    pub fn text(role: ContentRole, text: impl Into<String>) -> Self {
        Self {
            role,
            parts: vec![Part { text: text.into() }],
        }
    }
}

impl From<&Message> for Content {
    fn from(message: &Message) -> Self {
        Content::text(message.role.into(), message.content.clone())
    }
}

/// Derive the request-shaped history for `history`.
///
/// The result is empty or starts with a [`ContentRole::User`] turn.
pub fn request_history(history: &[Message]) -> Vec<Content> {
    history
        .iter()
        .skip_while(|message| message.role == Speaker::Assistant)
        .map(Content::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const WELCOME: &str = "Hi there! I'm your AI study assistant.";

    fn roles(contents: &[Content]) -> Vec<ContentRole> {
        contents.iter().map(|c| c.role).collect()
    }

    #[test]
    fn empty_history_is_empty() {
        assert!(request_history(&[]).is_empty());
    }

    #[test]
    fn assistant_only_history_is_empty() {
        let history = vec![Message::assistant(WELCOME), Message::assistant("anything else?")];
        assert!(request_history(&history).is_empty());
    }

    #[test]
    fn leading_assistant_messages_are_dropped() {
        let history = vec![
            Message::assistant(WELCOME),
            Message::assistant("second greeting"),
            Message::user("find me a calculus book"),
            Message::assistant("Try Stewart's Calculus."),
        ];

        let contents = request_history(&history);
        assert_eq!(roles(&contents), vec![ContentRole::User, ContentRole::Model]);
        assert_eq!(contents[0].parts[0].text, "find me a calculus book");
        assert_eq!(contents[1].parts[0].text, "Try Stewart's Calculus.");
    }

    #[test]
    fn later_assistant_messages_are_kept() {
        let history = vec![
            Message::user("a"),
            Message::assistant("b"),
            Message::assistant("c"),
            Message::user("d"),
        ];

        let contents = request_history(&history);
        assert_eq!(
            roles(&contents),
            vec![
                ContentRole::User,
                ContentRole::Model,
                ContentRole::Model,
                ContentRole::User
            ]
        );
    }

    #[test]
    fn consecutive_user_turns_are_preserved() {
        let history = vec![Message::user("first try"), Message::user("second try")];
        let contents = request_history(&history);
        assert_eq!(contents.len(), 2);
        assert_eq!(contents[1].parts[0].text, "second try");
    }

    #[test]
    fn welcome_message_never_reaches_upstream() {
        let seeds = [
            vec![Message::assistant(WELCOME)],
            vec![Message::assistant(WELCOME), Message::user("hi")],
            vec![
                Message::assistant(WELCOME),
                Message::assistant(WELCOME),
                Message::user("hi"),
                Message::assistant("hello"),
            ],
        ];

        for history in seeds {
            let contents = request_history(&history);
            assert!(contents.first().map_or(true, |c| c.role == ContentRole::User));
            assert!(contents.iter().all(|c| c.parts[0].text != WELCOME));
        }
    }

    #[test]
    fn shaping_is_pure() {
        let history = vec![
            Message::assistant(WELCOME),
            Message::user("schedule my week"),
            Message::assistant("Sure."),
        ];
        assert_eq!(request_history(&history), request_history(&history));
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn serializes_to_wire_shape() {
        let contents = request_history(&[Message::user("hi"), Message::assistant("hello")]);
        let json = serde_json::to_value(&contents).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                {"role": "user", "parts": [{"text": "hi"}]},
                {"role": "model", "parts": [{"text": "hello"}]}
            ])
        );
    }
}
