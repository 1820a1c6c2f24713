//! Line-oriented terminal front end.
//!
//! Plain lines are submitted to the controller; lines starting with `/` are
//! commands. What gets printed comes from the controller's published
//! [`ChatView`]: the message thread, a typing indicator while a reply is
//! pending, and notifications.

use std::io::Write;

use studybuddy_ai::{Message, Speaker};
use studybuddy_common::{Notification, NotificationLevel, StudyBuddyError};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::warn;

use crate::controller::{ChatController, ChatView};

const HELP: &str = "\
Commands:
  /reset    start a new conversation
  /history  show what the assistant has seen this session
  /usage    show token usage for this session
  /help     show this help
  /quit     exit

Ctrl-C abandons a pending reply, or exits when nothing is pending.";

const TYPING: &str = "  (Study Buddy is typing...)";

#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Submit(&'a str),
    Reset,
    History,
    Usage,
    Help,
    Quit,
    Unknown(&'a str),
}

fn parse_command(line: &str) -> Command<'_> {
    match line.trim() {
        "/reset" => Command::Reset,
        "/history" => Command::History,
        "/usage" => Command::Usage,
        "/help" | "/?" => Command::Help,
        "/quit" | "/exit" => Command::Quit,
        cmd if cmd.starts_with('/') => Command::Unknown(cmd),
        _ => Command::Submit(line),
    }
}

/// Prints the parts of a [`ChatView`] that have not been shown yet.
struct ThreadPrinter {
    shown: usize,
    typing: bool,
}

impl ThreadPrinter {
    fn new() -> Self {
        Self {
            shown: 0,
            typing: false,
        }
    }

    /// Forget what was shown, so the next render prints the whole thread.
    fn restart(&mut self) {
        self.shown = 0;
        self.typing = false;
    }

    /// Print new entries, then the typing indicator once per pending reply.
    /// User entries are skipped when `echo_user` is false, since the
    /// terminal already shows what was typed.
    fn render(
        &mut self,
        out: &mut impl Write,
        view: &ChatView,
        echo_user: bool,
    ) -> std::io::Result<()> {
        let messages = &view.messages;
        if messages.len() < self.shown {
            self.shown = 0;
        }
        for message in &messages[self.shown..] {
            if message.role == Speaker::User && !echo_user {
                continue;
            }
            write_message(out, message)?;
        }
        self.shown = messages.len();

        if view.loading && !self.typing {
            writeln!(out, "{TYPING}")?;
        }
        self.typing = view.loading;
        out.flush()
    }
}

fn write_message(out: &mut impl Write, message: &Message) -> std::io::Result<()> {
    let label = match message.role {
        Speaker::User => "you",
        Speaker::Assistant => "buddy",
    };
    writeln!(out, "{label}: {}", message.content)?;
    writeln!(out)
}

fn write_notifications(out: &mut impl Write, notifications: &[Notification]) -> std::io::Result<()> {
    for notification in notifications {
        let marker = match notification.level {
            NotificationLevel::Success => "ok",
            NotificationLevel::Info => "info",
            NotificationLevel::Error => "error",
        };
        writeln!(out, "[{marker}] {}", notification.text)?;
    }
    out.flush()
}

fn session_label(controller: &ChatController) -> String {
    match controller.session_id() {
        Some(id) => format!("session {id}"),
        None => "no active session".to_string(),
    }
}

/// Run the chat loop on the terminal until `/quit`, Ctrl-C or end of input.
pub async fn run(controller: ChatController) -> Result<(), StudyBuddyError> {
    let input = BufReader::new(tokio::io::stdin());
    drive(
        &controller,
        input,
        &mut std::io::stdout(),
        &mut std::io::stderr(),
    )
    .await
}

async fn drive<R>(
    controller: &ChatController,
    input: R,
    out: &mut impl Write,
    errs: &mut impl Write,
) -> Result<(), StudyBuddyError>
where
    R: AsyncBufRead + Unpin,
{
    let mut printer = ThreadPrinter::new();
    let mut views = controller.subscribe();
    let mut lines = input.lines();

    writeln!(out, "Study Buddy AI  (type /help for commands)\n")?;
    printer.render(out, &controller.view(), true)?;
    write_notifications(errs, &controller.take_notifications())?;

    loop {
        write!(out, "you> ")?;
        out.flush()?;

        let next = tokio::select! {
            next = lines.next_line() => next,
            _ = tokio::signal::ctrl_c() => {
                writeln!(out)?;
                break;
            }
        };
        let line = match next {
            Ok(Some(line)) => line,
            Ok(None) => {
                writeln!(out)?;
                break;
            }
            Err(e) if e.kind() == std::io::ErrorKind::InvalidData => {
                warn!(error = %e, "skipping unreadable input line");
                writeln!(errs, "[error] That line was not valid UTF-8 and was skipped.")?;
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        match parse_command(&line) {
            Command::Submit(text) => {
                if text.trim().is_empty() {
                    continue;
                }
                let _ = views.borrow_and_update();
                let cancelled = {
                    let submit = controller.submit(text);
                    tokio::pin!(submit);
                    loop {
                        // Published views are drained before checking for
                        // completion, so the indicator is never skipped.
                        tokio::select! {
                            biased;
                            Ok(()) = views.changed() => {
                                let view = views.borrow_and_update().clone();
                                printer.render(out, &view, false)?;
                            }
                            () = &mut submit => break false,
                            _ = tokio::signal::ctrl_c() => break true,
                        }
                    }
                };
                if cancelled {
                    writeln!(out, "(reply abandoned)")?;
                }
                printer.render(out, &controller.view(), false)?;
            }
            Command::Reset => {
                controller.reset();
                printer.restart();
                printer.render(out, &controller.view(), true)?;
            }
            Command::History => {
                writeln!(out, "-- {} --", session_label(controller))?;
                let history = controller.session_history();
                if history.is_empty() {
                    writeln!(out, "(no messages sent yet)\n")?;
                }
                for message in &history {
                    write_message(out, message)?;
                }
            }
            Command::Usage => {
                let (usage, calls) = controller.usage();
                writeln!(
                    out,
                    "{}: {calls} replies, {} tokens ({} prompt, {} reply)\n",
                    session_label(controller),
                    usage.total_tokens(),
                    usage.input_tokens,
                    usage.output_tokens
                )?;
            }
            Command::Help => writeln!(out, "{HELP}\n")?,
            Command::Quit => break,
            Command::Unknown(cmd) => writeln!(out, "unknown command {cmd}, try /help\n")?,
        }

        write_notifications(errs, &controller.take_notifications())?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use studybuddy_ai::{AiClient, AiError, AiResponse, ChatSetup, Connector, Content, TokenUsage};
    use tokio::sync::Notify;

    use super::*;
    use crate::controller::ControllerOptions;

    const WELCOME: &str = "Hi there! What are we studying today?";
    const APOLOGY: &str = "Sorry, try again.";

    /// Answers every request with the same text, optionally waiting for
    /// `release` first.
    struct StubBackend {
        reply: String,
        gate: Option<(Notify, Notify)>,
    }

    impl StubBackend {
        fn instant(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: reply.to_string(),
                gate: None,
            })
        }

        fn gated(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: reply.to_string(),
                gate: Some((Notify::new(), Notify::new())),
            })
        }
    }

    #[async_trait]
    impl AiClient for StubBackend {
        async fn generate(&self, _contents: &[Content]) -> Result<AiResponse, AiError> {
            if let Some((entered, release)) = &self.gate {
                entered.notify_one();
                release.notified().await;
            }
            Ok(AiResponse {
                content: self.reply.clone(),
                usage: TokenUsage {
                    input_tokens: 3,
                    output_tokens: 2,
                },
            })
        }
    }

    struct StubConnector(Option<Arc<StubBackend>>);

    impl Connector for StubConnector {
        fn connect(&self, _setup: &ChatSetup) -> Result<Arc<dyn AiClient>, AiError> {
            self.0
                .clone()
                .map(|backend| backend as Arc<dyn AiClient>)
                .ok_or_else(|| AiError::NotConfigured("missing API key".into()))
        }
    }

    fn controller(backend: Option<Arc<StubBackend>>) -> ChatController {
        ChatController::initialize(
            Arc::new(StubConnector(backend)),
            ControllerOptions {
                setup: ChatSetup::new("gemini-2.0-flash", "You are a study assistant."),
                welcome_message: WELCOME.into(),
                apology_message: APOLOGY.into(),
            },
        )
    }

    async fn drive_input(controller: &ChatController, input: &'static [u8]) -> (String, String) {
        let mut out = Vec::new();
        let mut errs = Vec::new();
        drive(controller, input, &mut out, &mut errs).await.unwrap();
        (
            String::from_utf8(out).unwrap(),
            String::from_utf8(errs).unwrap(),
        )
    }

    fn view(messages: Vec<Message>, loading: bool) -> ChatView {
        ChatView { messages, loading }
    }

    #[test]
    fn parses_commands_and_text() {
        assert_eq!(parse_command("/reset"), Command::Reset);
        assert_eq!(parse_command("  /quit "), Command::Quit);
        assert_eq!(parse_command("/exit"), Command::Quit);
        assert_eq!(parse_command("/history"), Command::History);
        assert_eq!(parse_command("/bogus"), Command::Unknown("/bogus"));
        assert_eq!(
            parse_command("what is osmosis?"),
            Command::Submit("what is osmosis?")
        );
    }

    #[test]
    fn submitted_text_is_not_trimmed() {
        assert_eq!(parse_command("  indented "), Command::Submit("  indented "));
    }

    #[test]
    fn printer_shows_only_new_messages() {
        let mut printer = ThreadPrinter::new();
        let mut out = Vec::new();
        let mut thread = vec![Message::assistant("welcome")];

        printer.render(&mut out, &view(thread.clone(), false), true).unwrap();
        thread.push(Message::user("question"));
        thread.push(Message::assistant("answer"));
        printer.render(&mut out, &view(thread, false), false).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "buddy: welcome\n\nbuddy: answer\n\n");
    }

    #[test]
    fn printer_restarts_when_thread_shrinks() {
        let mut printer = ThreadPrinter::new();
        let mut out = Vec::new();
        let thread = vec![
            Message::assistant("welcome"),
            Message::user("q"),
            Message::assistant("a"),
        ];
        printer.render(&mut out, &view(thread, false), true).unwrap();
        out.clear();

        printer
            .render(&mut out, &view(vec![Message::assistant("welcome")], false), true)
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "buddy: welcome\n\n");
    }

    #[test]
    fn typing_indicator_shown_once_per_pending_reply() {
        let mut printer = ThreadPrinter::new();
        let mut out = Vec::new();
        let pending = view(vec![Message::assistant("w"), Message::user("q")], true);

        printer.render(&mut out, &pending, false).unwrap();
        printer.render(&mut out, &pending, false).unwrap();
        let text = String::from_utf8(out.clone()).unwrap();
        assert_eq!(text.matches(TYPING).count(), 1);

        let settled = view(
            vec![
                Message::assistant("w"),
                Message::user("q"),
                Message::assistant("a"),
            ],
            false,
        );
        printer.render(&mut out, &settled, false).unwrap();
        printer.render(&mut out, &pending, false).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches(TYPING).count(), 2);
    }

    #[test]
    fn notifications_are_tagged_by_level() {
        let mut out = Vec::new();
        write_notifications(
            &mut out,
            &[
                Notification::success("Chat has been reset"),
                Notification::error("Something went wrong. Please try again."),
            ],
        )
        .unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "[ok] Chat has been reset\n[error] Something went wrong. Please try again.\n"
        );
    }

    #[tokio::test]
    async fn pending_reply_shows_typing_indicator_from_published_view() {
        let backend = StubBackend::gated("Mitochondria make ATP.");
        let controller = controller(Some(backend.clone()));

        let task = tokio::spawn({
            let controller = controller.clone();
            async move { drive_input(&controller, b"what do mitochondria do?\n").await }
        });
        if let Some((entered, release)) = &backend.gate {
            entered.notified().await;
            release.notify_one();
        }
        let (out, _) = task.await.unwrap();

        let typing = out.find(TYPING).expect("typing indicator");
        let reply = out.find("buddy: Mitochondria make ATP.").expect("reply");
        assert!(typing < reply);
        assert!(!out.contains("you: what do mitochondria do?"));
        assert!(!controller.view().loading);
    }

    #[tokio::test]
    async fn history_and_usage_name_the_live_session() {
        let controller = controller(Some(StubBackend::instant("Water moves across a membrane.")));
        let (out, _) = drive_input(&controller, b"what is osmosis?\n/history\n/usage\n/quit\n").await;

        let id = controller.session_id().unwrap();
        assert!(out.contains(&format!("-- session {id} --")));
        assert!(out.contains("you: what is osmosis?"));
        assert!(out.contains("buddy: Water moves across a membrane."));
        assert!(out.contains(&format!("session {id}: 1 replies, 5 tokens (3 prompt, 2 reply)")));
    }

    #[tokio::test]
    async fn invalid_utf8_line_is_skipped() {
        let controller = controller(Some(StubBackend::instant("ok")));
        let (out, errs) = drive_input(&controller, b"\xff\xfe\nhello\n").await;

        assert!(errs.contains("not valid UTF-8"));
        assert!(out.contains("buddy: ok"));
        assert_eq!(controller.session_history().len(), 2);
    }

    #[tokio::test]
    async fn reset_reprints_welcome_and_reports() {
        let controller = controller(Some(StubBackend::instant("ok")));
        let (out, errs) = drive_input(&controller, b"hi\n/reset\n").await;

        assert_eq!(out.matches(WELCOME).count(), 2);
        assert!(errs.contains("[ok] Chat has been reset"));
        assert!(controller.session_history().is_empty());
    }

    #[tokio::test]
    async fn unavailable_session_is_reported_and_apologises() {
        let controller = controller(None);
        let (out, errs) = drive_input(&controller, b"hello\n/usage\n").await;

        assert!(errs.contains("[error] The study assistant is unavailable"));
        assert!(out.contains(&format!("buddy: {APOLOGY}")));
        assert!(out.contains("no active session: 0 replies"));
    }
}
