//! Dossier Console
//!
//! Interactive terminal client for the dossier backend:
//! - Log in and hold the bearer token in memory for the session
//! - Say hello and browse the greetings history
//! - Add people records and browse them

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dossier::api::client::ApiClient;
use dossier::api::dto::PersonCreate;
use dossier::config::Config;
use dossier::dashboard::{Dashboard, ListView, Notice};

#[derive(Parser)]
#[command(name = "dossier")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Terminal client for the dossier backend")]
struct Cli {
    /// Backend base URL (overrides config and DOSSIER_API_BASE)
    #[arg(long)]
    api_url: Option<String>,

    /// Path to a config file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };

    init_logging(&config);

    let base_url = cli.api_url.unwrap_or_else(|| config.api.base_url.clone());
    tracing::info!("Dossier Console v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("API base: {}", base_url);

    let mut dashboard = Dashboard::new(ApiClient::new(base_url));

    println!("Dossier Console - type 'help' for commands");
    run_console(&mut dashboard).await
}

/// Initialize the tracing subscriber from the logging config
fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| format!("dossier={}", config.logging.level)),
    );

    let registry = tracing_subscriber::registry().with(filter);

    if config.logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Line-driven event loop over the dashboard
async fn run_console(dashboard: &mut Dashboard) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    prompt()?;
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            prompt()?;
            continue;
        }

        let mut parts = line.split_whitespace();
        let command = parts.next().unwrap_or_default();
        let args: Vec<&str> = parts.collect();

        match command {
            "login" => match args.as_slice() {
                [username, password] => dashboard.login(username, password).await,
                _ => println!("Usage: login <username> <password>"),
            },

            "logout" => {
                dashboard.logout();
                println!("Logged out.");
            }

            "hello" => {
                let name = if args.is_empty() {
                    "World".to_string()
                } else {
                    args.join(" ")
                };
                dashboard.say_hello(&name).await;
            }

            "add" => match parse_person(&args) {
                Some(person) => dashboard.create_person(person).await,
                None => {
                    println!("Usage: add <full name> [telegram=@handle] [photo=url] [note=text]")
                }
            },

            "greetings" => print_greetings(&dashboard.greetings().await),

            "people" => print_people(&dashboard.people().await),

            "health" => {
                dashboard.health().await;
            }

            "help" => print_help(),

            "quit" | "exit" => break,

            other => println!("Unknown command '{}' - type 'help'", other),
        }

        print_notices(dashboard);
        prompt()?;
    }

    Ok(())
}

fn prompt() -> Result<()> {
    print!("> ");
    std::io::stdout().flush()?;
    Ok(())
}

fn print_help() {
    println!("Commands:");
    println!("  login <username> <password>   Get a token for this session");
    println!("  logout                        Drop the token and cached lists");
    println!("  hello [name]                  Say hello (default: World)");
    println!("  add <full name> [opts]        Add a person; opts: telegram=, photo=, note=");
    println!("  greetings                     List the greetings history");
    println!("  people                        List the people records");
    println!("  health                        Check the backend");
    println!("  quit                          Leave the console");
}

/// Parse `add` arguments: leading words form the full name, trailing
/// `key=value` tokens fill the optional fields.
fn parse_person(args: &[&str]) -> Option<PersonCreate> {
    let mut name_words = Vec::new();
    let mut person = PersonCreate::default();

    for arg in args {
        match arg.split_once('=') {
            Some(("telegram", value)) => person.telegram = Some(value.to_string()),
            Some(("photo", value)) => person.photo_url = Some(value.to_string()),
            Some(("note", value)) => person.note = Some(value.to_string()),
            _ => name_words.push(*arg),
        }
    }

    if name_words.is_empty() {
        return None;
    }

    person.full_name = name_words.join(" ");
    Some(person)
}

fn print_notices(dashboard: &mut Dashboard) {
    for notice in dashboard.drain_notices() {
        match notice {
            Notice::Success(message) => println!("[ok] {}", message),
            Notice::Error(message) => eprintln!("[err] {}", message),
        }
    }
}

fn print_greetings(view: &ListView<dossier::api::dto::Greeting>) {
    match view {
        ListView::AuthRequired => println!("Authentication required - log in first."),
        ListView::Rows(rows) if rows.is_empty() => println!("No greetings yet."),
        ListView::Rows(rows) => {
            println!("{:<6} {:<24} {}", "ID", "Name", "Created");
            println!("{}", "-".repeat(56));
            for greeting in rows {
                println!(
                    "{:<6} {:<24} {}",
                    greeting.id,
                    greeting.name,
                    greeting.created_at.format("%Y-%m-%d %H:%M:%S")
                );
            }
        }
    }
}

fn print_people(view: &ListView<dossier::api::dto::Person>) {
    match view {
        ListView::AuthRequired => println!("Authentication required - log in first."),
        ListView::Rows(rows) if rows.is_empty() => println!("No people on record."),
        ListView::Rows(rows) => {
            for person in rows {
                println!("#{} {}", person.id, person.full_name);
                if let Some(telegram) = &person.telegram {
                    println!("    Telegram: {}", telegram);
                }
                if let Some(photo_url) = &person.photo_url {
                    println!("    Photo: {}", photo_url);
                }
                if let Some(note) = &person.note {
                    println!("    Note: {}", note);
                }
                println!(
                    "    Created: {}",
                    person.created_at.format("%Y-%m-%d %H:%M:%S")
                );
            }
        }
    }
}
