use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use personacanvas::chat::{ChatSession, TurnOutcome, TurnRejection};
use personacanvas::config::{config_file_path, load_from, load_or_default};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("PERSONACANVAS_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse()?;
    let mut config = match &args.config {
        Some(path) => load_from(path)?,
        None => load_or_default()?,
    };
    if let Some(latency) = args.latency_ms {
        config.latency_ms = latency;
    }
    let mut session = ChatSession::new(&config);

    println!("PersonaCanvas chat. Type /help for commands.");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;
        let Some(line) = lines.next_line().await.context("Failed reading stdin")? else {
            break;
        };
        match line.trim() {
            "/quit" | "/exit" => break,
            "/help" => print_commands(),
            "/state" => println!("{}", serde_json::to_string_pretty(session.state())?),
            "/reset" => {
                session.reset();
                println!("Persona state restored to defaults.");
            }
            "/log" => {
                for message in session.messages() {
                    println!(
                        "[{}] {:?}: {}",
                        message.timestamp.format("%H:%M:%S"),
                        message.role,
                        message.text
                    );
                }
            }
            _ => match session.handle_message(&line).await {
                TurnOutcome::Completed(report) => println!("{}", report.reply.text),
                TurnOutcome::Rejected(TurnRejection::EmptyInput) => {}
                TurnOutcome::Rejected(TurnRejection::Busy) => {
                    println!("Still working on the previous message.")
                }
            },
        }
    }
    Ok(())
}

struct CliArgs {
    config: Option<PathBuf>,
    latency_ms: Option<u64>,
}

impl CliArgs {
    fn parse() -> Result<Self> {
        let mut args = env::args().skip(1);
        let mut config = None;
        let mut latency_ms = None;
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => {
                    let value = args.next().context("Expected a path after --config")?;
                    config = Some(PathBuf::from(value));
                }
                "--latency-ms" => {
                    let value = args
                        .next()
                        .context("Expected milliseconds after --latency-ms")?;
                    latency_ms = Some(
                        value
                            .parse()
                            .with_context(|| format!("Invalid --latency-ms value '{value}'"))?,
                    );
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                other => {
                    return Err(anyhow!(
                        "Unknown argument '{other}'. Run with --help for usage instructions."
                    ));
                }
            }
        }
        Ok(Self { config, latency_ms })
    }
}

fn print_usage() {
    println!("PersonaCanvas chat (persona command interpreter)");
    println!("Usage: cargo run --bin persona_chat -- [options]");
    println!("Options:");
    println!("  --config <path>      Read settings from this TOML file");
    println!("  --latency-ms <ms>    Override the simulated response latency");
    if let Ok(path) = config_file_path() {
        println!("Default config file: {}", path.display());
    }
}

fn print_commands() {
    println!("/state  show the persona snapshot");
    println!("/log    show the conversation log");
    println!("/reset  restore the default personas");
    println!("/quit   exit");
}
