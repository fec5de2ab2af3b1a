//! chatbot-cli — command-line front end for the chatbot API
//!
//! Usage:
//!   chatbot-cli health                        Check the backend is up
//!   chatbot-cli new-session [--lang en|fa]    Create a session
//!   chatbot-cli send <session-id> <text>      Send one message
//!   chatbot-cli chat [--lang en|fa]           Interactive conversation

use anyhow::{anyhow, bail, Context};
use chatbot_client::conversation::{chars_remaining, suggestions, ADVISORY_MAX_CHARS};
use chatbot_client::{ChatClient, Conversation, Language, SendOutcome, SessionId};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    let rest = &args[2..];
    let res = match args[1].as_str() {
        "health" => cmd_health().await,
        "new-session" => cmd_new_session(rest).await,
        "send" => cmd_send(rest).await,
        "session" => cmd_session(rest).await,
        "sessions" => cmd_sessions().await,
        "rate" => cmd_rate(rest).await,
        "knowledge" => cmd_knowledge().await,
        "search" => cmd_search(rest).await,
        "chat" => cmd_chat(rest).await,
        "version" | "--version" | "-V" => {
            cmd_version();
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };

    if let Err(e) = res {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn print_usage() {
    println!(
        r#"chatbot-cli — chatbot API command-line tool

USAGE:
    chatbot-cli <COMMAND> [OPTIONS]

COMMANDS:
    health                      Check backend health
    new-session [--lang <l>]    Create a session (en or fa, default en)
    send <session-id> <text>    Send a message and print the reply
    session <session-id>        Show a session with its history
    sessions                    List all sessions
    rate <message-id> <yes|no>  Rate an assistant reply
    knowledge                   List knowledge base entries
    search <query>              Search the knowledge base
    chat [--lang <l>]           Interactive chat (/lang en|fa, /quit)
    version                     Show version information
    help                        Show this help message

ENVIRONMENT:
    CHATBOT_API_URL             Backend base URL (default http://localhost:8000)
    CHATBOT_HTTP_TIMEOUT_SECS   Request timeout in seconds (default 30)
    CHATBOT_HTTP_POOL_MAX_IDLE_PER_HOST
                                Idle connections kept per host (default 8)
    RUST_LOG                    Log filter (default warn)"#
    );
}

fn cmd_version() {
    println!("chatbot-cli {}", env!("CARGO_PKG_VERSION"));
}

fn client() -> anyhow::Result<ChatClient> {
    ChatClient::from_env().context("failed to configure client")
}

fn parse_lang(args: &[String]) -> anyhow::Result<Language> {
    for (i, arg) in args.iter().enumerate() {
        if arg == "--lang" {
            let value = args
                .get(i + 1)
                .ok_or_else(|| anyhow!("--lang requires a value"))?;
            return value.parse::<Language>().map_err(|e| anyhow!(e));
        }
    }
    Ok(Language::default())
}

fn required<'a>(args: &'a [String], idx: usize, name: &str) -> anyhow::Result<&'a str> {
    args.get(idx)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("missing argument <{name}>"))
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn cmd_health() -> anyhow::Result<()> {
    let status = client()?.health().await?;
    match status.service.as_deref() {
        Some(service) => println!("{}: {}", service, status.status),
        None => println!("{}", status.status),
    }
    if !status.is_healthy() {
        bail!("backend reports status '{}'", status.status);
    }
    Ok(())
}

async fn cmd_new_session(args: &[String]) -> anyhow::Result<()> {
    let lang = parse_lang(args)?;
    let id = client()?.create_session(lang).await?;
    println!("{id}");
    Ok(())
}

async fn cmd_send(args: &[String]) -> anyhow::Result<()> {
    let session_id = SessionId::from(required(args, 0, "session-id")?);
    let text = args.get(1..).map(|t| t.join(" ")).unwrap_or_default();
    if text.trim().is_empty() {
        bail!("missing argument <text>");
    }
    let reply = client()?.send_message(&text, &session_id).await?;
    println!("{}", reply.content);
    println!();
    println!("message id: {}  ({} ms)", reply.message_id, reply.response_time_ms);
    if let Some(sources) = reply.sources.filter(|s| !s.is_empty()) {
        println!("sources: {}", sources.join(", "));
    }
    Ok(())
}

async fn cmd_session(args: &[String]) -> anyhow::Result<()> {
    let session_id = SessionId::from(required(args, 0, "session-id")?);
    let session = client()?.get_session(&session_id).await?;
    print_json(&session)
}

async fn cmd_sessions() -> anyhow::Result<()> {
    let sessions = client()?.list_sessions().await?;
    for s in &sessions {
        println!(
            "{}  created {}  {} messages{}",
            s.session_id,
            s.created_at,
            s.messages.len(),
            if s.is_active { "" } else { "  (inactive)" }
        );
    }
    Ok(())
}

async fn cmd_rate(args: &[String]) -> anyhow::Result<()> {
    let message_id = required(args, 0, "message-id")?;
    let helpful = match required(args, 1, "yes|no")? {
        "yes" | "y" | "true" | "1" => true,
        "no" | "n" | "false" | "0" => false,
        other => bail!("expected yes or no, got '{other}'"),
    };
    client()?.rate_message(message_id, helpful).await?;
    println!("rated message {message_id}");
    Ok(())
}

async fn cmd_knowledge() -> anyhow::Result<()> {
    let entries = client()?.list_knowledge().await?;
    print_entries(&entries);
    Ok(())
}

async fn cmd_search(args: &[String]) -> anyhow::Result<()> {
    let query = args.join(" ");
    if query.trim().is_empty() {
        bail!("missing argument <query>");
    }
    let entries = client()?.search_knowledge(&query).await?;
    if entries.is_empty() {
        println!("no entries match '{query}'");
    }
    print_entries(&entries);
    Ok(())
}

fn print_welcome(conv: &Conversation) {
    if let Some(welcome) = conv.messages().first() {
        println!("assistant> {}", welcome.content);
        println!("           try: {}", suggestions(conv.language()).join(" | "));
    }
}

fn print_entries(entries: &[chatbot_client::KnowledgeEntry]) {
    for e in entries {
        println!(
            "[{}] {} ({}, priority {})",
            e.id,
            e.title,
            e.category.label(),
            e.priority
        );
    }
}

async fn cmd_chat(args: &[String]) -> anyhow::Result<()> {
    let lang = parse_lang(args)?;
    let mut conv = Conversation::new(Arc::new(client()?), lang);
    if let Err(e) = conv.start().await {
        eprintln!("could not start a session: {e}");
    }
    print_welcome(&conv);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "/quit" || line == "/exit" {
            break;
        }
        if let Some(code) = line.strip_prefix("/lang") {
            let lang = match code.trim().parse::<Language>() {
                Ok(l) => l,
                Err(e) => {
                    eprintln!("{e}");
                    continue;
                }
            };
            match conv.change_language(lang).await {
                Ok(true) => print_welcome(&conv),
                Ok(false) => println!("already using {lang}"),
                Err(e) => eprintln!("could not start a session: {e}"),
            }
            continue;
        }
        if conv.session_id().is_none() {
            if let Err(e) = conv.start().await {
                eprintln!("no session available: {e}");
                continue;
            }
        }
        if chars_remaining(line) < 0 {
            eprintln!("(note: message is longer than {ADVISORY_MAX_CHARS} characters)");
        }

        match conv.send(line).await {
            SendOutcome::Replied(msg) => {
                println!("assistant> {}", msg.content);
                if let Some(sources) = msg.sources.filter(|s| !s.is_empty()) {
                    println!("           sources: {}", sources.join(", "));
                }
            }
            SendOutcome::Failed(_) => {
                if let Some(msg) = conv.messages().last() {
                    println!("assistant> {}", msg.content);
                }
            }
            SendOutcome::Skipped => {}
        }
    }
    Ok(())
}
