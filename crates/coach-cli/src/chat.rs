//! Chat state machine: transcript ownership, input validation, and the
//! single-flight guard. Rendering-free so every property here is unit
//! testable.

use coach_api::InteractResponse;
use coach_tui::widgets::Turn;

/// Greeting shown before the first exchange
pub const GREETING: &str = "Hello! I am your AI Learning Coach. How can I help you today?";

/// The one user-visible message for any failed interaction. The underlying
/// error goes to the tracing channel, never to the transcript.
pub const FALLBACK_REPLY: &str = "Sorry, I encountered an error connecting to my brain.";

/// Ordered, append-only transcript plus the in-flight flag.
///
/// Per pending request the state machine is `idle -> awaiting-response ->
/// idle`: [`ChatLog::begin`] performs the first transition and
/// [`ChatLog::settle`] the second. A second `begin` while awaiting is
/// rejected, not queued.
pub struct ChatLog {
    turns: Vec<Turn>,
    in_flight: bool,
}

impl ChatLog {
    pub fn new() -> Self {
        Self {
            turns: vec![Turn::assistant(GREETING)],
            in_flight: false,
        }
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    /// Validate input and open a request slot.
    ///
    /// Returns the trimmed message to send, or `None` (with no state change)
    /// when the input is blank or a request is already awaiting its
    /// response. On `Some`, the user turn has been appended and the
    /// in-flight flag is set; the caller must eventually call [`settle`].
    ///
    /// [`settle`]: ChatLog::settle
    pub fn begin(&mut self, input: &str) -> Option<String> {
        let message = input.trim();
        if message.is_empty() || self.in_flight {
            return None;
        }

        let message = message.to_string();
        self.turns.push(Turn::user(message.clone()));
        self.in_flight = true;
        Some(message)
    }

    /// Record the outcome of the in-flight request.
    ///
    /// Appends exactly one turn: the coach's reply on success, the fixed
    /// fallback on any failure. The in-flight flag is released on both
    /// paths.
    pub fn settle(&mut self, result: coach_api::Result<InteractResponse>) {
        self.in_flight = false;

        match result {
            Ok(reply) => {
                self.turns.push(Turn::assistant(reply.response));
            }
            Err(error) => {
                tracing::error!(error = %error, "agent interaction failed");
                self.turns.push(Turn::fallback(FALLBACK_REPLY));
            }
        }
    }

    /// Reset the transcript to the greeting. Ignored while a request is in
    /// flight, so a settlement can never land in an emptied transcript.
    pub fn clear(&mut self) {
        if self.in_flight {
            return;
        }
        self.turns.clear();
        self.turns.push(Turn::assistant(GREETING));
    }
}

impl Default for ChatLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coach_api::{Error, StateMap};
    use coach_tui::widgets::Role;

    fn reply(text: &str) -> InteractResponse {
        InteractResponse {
            response: text.to_string(),
            next_agent: None,
            current_state: StateMap::new(),
        }
    }

    fn failure() -> Error {
        Error::Status {
            status: 500,
            body: "graph blew up".to_string(),
        }
    }

    #[test]
    fn test_starts_with_greeting() {
        let chat = ChatLog::new();
        assert_eq!(chat.turns().len(), 1);
        assert_eq!(chat.turns()[0].content, GREETING);
        assert!(!chat.in_flight());
    }

    #[test]
    fn test_blank_input_is_a_noop() {
        let mut chat = ChatLog::new();
        assert_eq!(chat.begin(""), None);
        assert_eq!(chat.begin("   \t\n"), None);
        assert_eq!(chat.turns().len(), 1);
        assert!(!chat.in_flight());
    }

    #[test]
    fn test_begin_trims_and_appends_user_turn() {
        let mut chat = ChatLog::new();
        let sent = chat.begin("  hello  ");
        assert_eq!(sent.as_deref(), Some("hello"));
        assert!(chat.in_flight());

        let last = chat.turns().last().unwrap();
        assert_eq!(last.role, Role::User);
        assert_eq!(last.content, "hello");
    }

    #[test]
    fn test_second_begin_while_in_flight_is_rejected() {
        let mut chat = ChatLog::new();
        chat.begin("first").unwrap();
        let before = chat.turns().len();

        assert_eq!(chat.begin("second"), None);
        assert_eq!(chat.turns().len(), before);
    }

    #[test]
    fn test_success_appends_exactly_two_turns_in_order() {
        let mut chat = ChatLog::new();
        let before = chat.turns().len();

        chat.begin("hello").unwrap();
        chat.settle(Ok(reply("hi there")));

        let turns = chat.turns();
        assert_eq!(turns.len(), before + 2);
        assert_eq!(turns[before].role, Role::User);
        assert_eq!(turns[before].content, "hello");
        assert_eq!(turns[before + 1].role, Role::Assistant);
        assert_eq!(turns[before + 1].content, "hi there");
        assert!(!chat.in_flight());
    }

    #[test]
    fn test_failure_appends_the_exact_fallback_turn() {
        let mut chat = ChatLog::new();
        let before = chat.turns().len();

        chat.begin("hello").unwrap();
        chat.settle(Err(failure()));

        let turns = chat.turns();
        assert_eq!(turns.len(), before + 2);
        let last = turns.last().unwrap();
        assert_eq!(last.content, FALLBACK_REPLY);
        assert_eq!(last.role, Role::Assistant);
        assert!(last.is_error);
        assert!(!chat.in_flight());
    }

    #[test]
    fn test_flag_released_allows_next_attempt() {
        let mut chat = ChatLog::new();
        chat.begin("one").unwrap();
        chat.settle(Err(failure()));

        // The widget stays usable after a failure.
        assert!(chat.begin("two").is_some());
    }

    #[test]
    fn test_clear_resets_to_greeting() {
        let mut chat = ChatLog::new();
        chat.begin("hello").unwrap();
        chat.settle(Ok(reply("hi")));

        chat.clear();
        assert_eq!(chat.turns().len(), 1);
        assert_eq!(chat.turns()[0].content, GREETING);
    }

    #[test]
    fn test_clear_is_ignored_while_in_flight() {
        let mut chat = ChatLog::new();
        chat.begin("hello").unwrap();

        chat.clear();
        assert_eq!(chat.turns().len(), 2);
        assert!(chat.in_flight());

        chat.settle(Ok(reply("hi")));
        assert_eq!(chat.turns().len(), 3);
    }
}
