//! coach - terminal chat client for the AI learning coach

mod chat;
mod commands;
mod config;
mod ui;

use std::io::Write;

use clap::Parser;
use coach_api::{AgentClient, InteractRequest, client::API_URL_ENV_VAR};
use coach_tui::Theme;

use crate::chat::ChatLog;
use crate::commands::CommandResult;

/// coach - chat with your AI learning coach
#[derive(Parser, Debug)]
#[command(name = "coach")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Base URL of the agent service
    #[arg(long)]
    api_url: Option<String>,

    /// User identifier sent with each message
    #[arg(short, long)]
    user: Option<String>,

    /// Send a single message and print the reply
    #[arg(short = 'c', long)]
    command: Option<String>,

    /// Disable TUI mode (use simple stdin/stdout)
    #[arg(long)]
    no_tui: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Initialize config file
    #[arg(long)]
    init_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Setup tracing; diagnostics go to stderr, never to the transcript
    if args.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("coach_cli=debug,coach_api=debug")
            .with_writer(std::io::stderr)
            .init();
    }

    // Initialize config and exit
    if args.init_config {
        match config::Config::init() {
            Ok(path) => {
                println!("Config file created at: {}", path.display());
                println!("\nExample config:\n{}", config::example_config());
            }
            Err(e) => {
                eprintln!("Error creating config: {}", e);
                std::process::exit(1);
            }
        }
        return Ok(());
    }

    // Load config file; CLI takes precedence, then environment
    let cfg = config::Config::load();
    let env_url = std::env::var(API_URL_ENV_VAR).ok();
    let api_url = config::resolve_api_url(args.api_url.as_deref(), env_url.as_deref(), &cfg);
    let user_id = config::resolve_user_id(args.user.as_deref(), &cfg);
    let theme = Theme::by_name(cfg.theme.as_deref().unwrap_or("dark"));

    let client = AgentClient::new(api_url);

    // Non-interactive mode
    if let Some(message) = args.command {
        return run_once(&client, &user_id, &message).await;
    }

    // TUI mode
    if !args.no_tui {
        return ui::run_tui(client, user_id, theme).await;
    }

    // Plain stdin/stdout mode
    run_interactive(&client, &user_id).await
}

/// Send one message and print the reply (or the fallback line) to stdout
async fn run_once(client: &AgentClient, user_id: &str, input: &str) -> anyhow::Result<()> {
    let mut log = ChatLog::new();
    let Some(message) = log.begin(input) else {
        // Empty input: nothing to send, nothing to print.
        return Ok(());
    };

    let request = InteractRequest::new(user_id, message);
    log.settle(client.interact(&request).await);

    if let Some(turn) = log.turns().last() {
        println!("{}", turn.content);
    }
    Ok(())
}

/// Simple prompt loop over stdin/stdout with the same chat semantics as the
/// TUI
async fn run_interactive(client: &AgentClient, user_id: &str) -> anyhow::Result<()> {
    println!("coach> {}", chat::GREETING);
    println!("(type /help for commands)");

    let stdin = std::io::stdin();
    let mut log = ChatLog::new();

    loop {
        print!("you> ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            break;
        }

        if let Some(result) = commands::execute_command(&line) {
            match result {
                CommandResult::Message(text) => println!("{}", text),
                CommandResult::Clear => {
                    log.clear();
                    println!("Conversation cleared.");
                }
                CommandResult::Exit => break,
                CommandResult::Unknown(cmd) => {
                    println!("Unknown command: /{} (type /help)", cmd);
                }
            }
            continue;
        }

        let Some(message) = log.begin(&line) else {
            continue;
        };

        let request = InteractRequest::new(user_id, message);
        log.settle(client.interact(&request).await);

        if let Some(turn) = log.turns().last() {
            println!("coach> {}", turn.content);
        }
    }

    Ok(())
}
