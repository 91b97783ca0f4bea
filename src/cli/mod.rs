//! Command-line surface: argument parsing and command dispatch.

pub mod ask;

use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::ask::run_ask;
use crate::core::config::{resolve_base_url, Config};
use crate::core::gateway::AssistantGateway;
use crate::ui::chat_loop::run_chat;
use crate::utils::logging::{init_tracing, LogDestination};

#[derive(Parser, Debug)]
#[command(
    name = "crmchat",
    version,
    about = "Chat with your CRM assistant from the terminal"
)]
pub struct Args {
    /// Backend base URL, e.g. http://localhost:8000/api
    #[arg(short = 'u', long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Write diagnostic logs to FILE (the interactive view is silent otherwise)
    #[arg(long, global = true, value_name = "FILE")]
    pub debug_log: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open the interactive chat view (the default)
    Chat,
    /// Send one message and print the reply to stdout
    Ask {
        /// The message to send
        #[arg(trailing_var_arg = true)]
        message: Vec<String>,
    },
    /// Check that the backend is reachable
    Health,
    /// Persist a setting (supported: base-url)
    Set { key: String, value: String },
    /// Remove a persisted setting (supported: base-url)
    Unset { key: String },
}

pub fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async_main(args))
}

async fn async_main(args: Args) -> Result<(), Box<dyn Error>> {
    match args.command.unwrap_or(Commands::Chat) {
        Commands::Chat => {
            match args.debug_log.as_deref() {
                Some(path) => init_tracing(LogDestination::File(path))?,
                None => init_tracing(LogDestination::Discard)?,
            }
            let config = Config::load()?;
            let base_url = resolve_base_url(args.base_url.as_deref(), &config);
            run_chat(base_url).await
        }
        Commands::Ask { message } => {
            init_tracing(LogDestination::Stderr)?;
            let config = Config::load()?;
            let base_url = resolve_base_url(args.base_url.as_deref(), &config);
            run_ask(&AssistantGateway::new(base_url), &message.join(" ")).await
        }
        Commands::Health => {
            init_tracing(LogDestination::Stderr)?;
            let config = Config::load()?;
            let base_url = resolve_base_url(args.base_url.as_deref(), &config);
            run_health(&AssistantGateway::new(base_url)).await
        }
        Commands::Set { key, value } => {
            init_tracing(LogDestination::Stderr)?;
            set_setting(&key, &value)
        }
        Commands::Unset { key } => {
            init_tracing(LogDestination::Stderr)?;
            unset_setting(&key)
        }
    }
}

async fn run_health(gateway: &AssistantGateway) -> Result<(), Box<dyn Error>> {
    match gateway.health().await {
        Ok(health) => {
            println!(
                "✅ Backend reachable at {} (status: {})",
                gateway.base_url(),
                health.status
            );
            Ok(())
        }
        Err(err) => {
            eprintln!("❌ Health check failed: {err}");
            std::process::exit(1);
        }
    }
}

fn set_setting(key: &str, value: &str) -> Result<(), Box<dyn Error>> {
    match key {
        "base-url" => {
            let mut config = Config::load()?;
            config.base_url = Some(value.trim().to_string());
            config.save()?;
            println!("✅ Set base-url to: {}", value.trim());
            Ok(())
        }
        other => Err(format!("unknown setting: {other} (supported: base-url)").into()),
    }
}

fn unset_setting(key: &str) -> Result<(), Box<dyn Error>> {
    match key {
        "base-url" => {
            let mut config = Config::load()?;
            config.base_url = None;
            config.save()?;
            println!("✅ Unset base-url");
            Ok(())
        }
        other => Err(format!("unknown setting: {other} (supported: base-url)").into()),
    }
}
