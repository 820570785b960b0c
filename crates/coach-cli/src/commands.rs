//! Slash commands for interactive modes

/// Result of executing a slash command
#[derive(Debug, PartialEq, Eq)]
pub enum CommandResult {
    /// Show a message to the user (not sent to the agent)
    Message(String),
    /// Reset the conversation
    Clear,
    /// Exit the application
    Exit,
    /// Unknown command
    Unknown(String),
}

/// Parse a slash command. Returns `None` for regular chat input.
pub fn execute_command(input: &str) -> Option<CommandResult> {
    let input = input.trim();

    if !input.starts_with('/') {
        return None;
    }

    let command = input[1..]
        .split_whitespace()
        .next()
        .unwrap_or("")
        .to_lowercase();

    Some(match command.as_str() {
        "help" | "h" | "?" => CommandResult::Message(help_message()),
        "clear" | "c" => CommandResult::Clear,
        "quit" | "exit" | "q" => CommandResult::Exit,
        _ => CommandResult::Unknown(command),
    })
}

fn help_message() -> String {
    r#"Available commands:
  /help, /h, /?        Show this help message
  /clear, /c           Reset the conversation
  /quit, /exit, /q     Exit"#
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regular_input_is_not_a_command() {
        assert_eq!(execute_command("hello coach"), None);
        assert_eq!(execute_command(""), None);
    }

    #[test]
    fn test_quit_aliases() {
        for cmd in ["/quit", "/exit", "/q", "  /quit  "] {
            assert_eq!(execute_command(cmd), Some(CommandResult::Exit));
        }
    }

    #[test]
    fn test_clear() {
        assert_eq!(execute_command("/clear"), Some(CommandResult::Clear));
    }

    #[test]
    fn test_help_mentions_all_commands() {
        let Some(CommandResult::Message(help)) = execute_command("/help") else {
            panic!("expected help message");
        };
        assert!(help.contains("/clear"));
        assert!(help.contains("/quit"));
    }

    #[test]
    fn test_unknown_command() {
        assert_eq!(
            execute_command("/model sonnet"),
            Some(CommandResult::Unknown("model".to_string()))
        );
    }
}
