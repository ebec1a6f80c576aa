//! chatflow CLI: terminal messenger with simulated replies

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chatflow_engine::{
    Config, ConversationSession, ConversationSummary, DataProvider, Message, SampleData,
    DEFAULT_CONFIG_PATH,
};
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Terminal messenger with a conversation list, thread and contact panel
#[derive(Parser)]
#[command(name = "chatflow")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the config file
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// File that receives log output
    #[arg(long, default_value = "/tmp/chatflow.log")]
    log_file: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the TUI (default when no command specified)
    Tui,

    /// Write the default config if none exists
    Init,

    /// List conversations
    Conversations {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Send messages to a conversation and print the transcript
    Demo {
        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Conversation id (defaults to the first conversation)
        #[arg(long)]
        conversation: Option<String>,

        /// Messages to send, in order
        #[arg(required = true)]
        messages: Vec<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli.log_file);

    match cli.command {
        None | Some(Commands::Tui) => {
            let config = load_config(&cli.config);
            let rt = runtime();
            let provider: Arc<dyn DataProvider> = Arc::new(SampleData::new());
            if let Err(e) = rt.block_on(chatflow_tui::run_tui(&config, provider)) {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::Init) => {
            cmd_init(&cli.config);
        }
        Some(Commands::Conversations { json }) => {
            cmd_conversations(json);
        }
        Some(Commands::Demo {
            json,
            conversation,
            messages,
        }) => {
            let config = load_config(&cli.config);
            let rt = runtime();
            let provider = SampleData::new();
            match rt.block_on(run_demo(&config, &provider, conversation.as_deref(), &messages)) {
                Some(transcript) => print_transcript(&transcript, json),
                None => {
                    eprintln!(
                        "Error: unknown conversation {}",
                        conversation.as_deref().unwrap_or("(none)")
                    );
                    std::process::exit(1);
                }
            }
        }
    }
}

/// Send log output to `path`; the terminal belongs to the UI.
fn init_logging(path: &Path) {
    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
    {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Warning: cannot open log file {}: {e}", path.display());
            return;
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("chatflow=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
}

fn runtime() -> tokio::runtime::Runtime {
    match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: failed to create tokio runtime: {e}");
            std::process::exit(1);
        }
    }
}

fn load_config(path: &Path) -> Config {
    match Config::load_or_default(path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: failed to load {}: {e}", path.display());
            std::process::exit(1);
        }
    }
}

fn cmd_init(path: &Path) {
    if path.exists() {
        println!("Config already exists at {}", path.display());
        return;
    }

    match Config::default().save(path) {
        Ok(()) => {
            info!(path = %path.display(), "Config created");
            println!("Created {}", path.display());
        }
        Err(e) => {
            eprintln!("Failed to write config: {e}");
            std::process::exit(1);
        }
    }
}

fn cmd_conversations(json: bool) {
    let conversations = SampleData::new().conversations();

    if json {
        match serde_json::to_string_pretty(&conversations) {
            Ok(out) => println!("{out}"),
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    println!("Conversations ({}):", conversations.len());
    println!();
    for c in &conversations {
        println!("{}", conversation_row(c));
    }
}

fn conversation_row(c: &ConversationSummary) -> String {
    let online = if c.online { "●" } else { " " };
    let unread = if c.unread { "*" } else { " " };
    format!(
        "  {:>2} {online}{unread} {:<16} {:<5} {:<14} {}",
        c.id,
        c.name,
        c.channel.label(),
        c.time,
        c.preview
    )
}

/// Open a conversation, send each message, and wait for every reply.
///
/// Returns `None` when the conversation does not exist.
async fn run_demo(
    config: &Config,
    provider: &dyn DataProvider,
    conversation: Option<&str>,
    messages: &[String],
) -> Option<Vec<Message>> {
    let target = match conversation {
        Some(id) => provider.conversation(id)?,
        None => provider.conversations().into_iter().next()?,
    };
    info!(conversation = %target.id, name = %target.name, "Running demo");

    let mut session = ConversationSession::new(
        target.id.as_str(),
        provider.history(&target.id),
        config.session_options(),
    );

    for text in messages {
        session.set_draft(text.as_str());
        if session.submit_draft().is_none() {
            info!(draft = %text, "Skipped blank message");
        }
    }
    session.settle().await;

    let transcript = session.messages().to_vec();
    session.shutdown();
    Some(transcript)
}

fn print_transcript(messages: &[Message], json: bool) {
    if json {
        match serde_json::to_string_pretty(messages) {
            Ok(out) => println!("{out}"),
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    let now = Utc::now();
    for message in messages {
        println!(
            "[{}] {}: {}",
            message.sent_at.display(now),
            message.sender,
            message.content
        );
    }
}
