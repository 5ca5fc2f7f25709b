//! termchat - a terminal chat client for completion servers.
//!
//! Sends each line you type to a llama.cpp style `/completion` endpoint and
//! prints the reply, playing a progress animation while the server works.

mod animation;
mod chat;
mod client;
mod config;
mod protocol;

use animation::{Animation, AnimationController};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::Command as ProcessCommand;
use std::time::Duration;
use tokio::io::BufReader;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "termchat")]
#[command(author, version, about = "A terminal chat client for completion servers")]
#[command(long_about = "Chat with a completion server from your terminal.\n\nType 'exit' to leave, '--help' at the prompt for the command list.")]
struct Cli {
    /// Path to the config file (default: ~/.config/termchat/config.toml)
    #[arg(short = 'c', long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Override the animation style for this session
    #[arg(short = 's', long, value_name = "STYLE")]
    style: Option<String>,

    /// Override the completion server address (host:port)
    #[arg(long, value_name = "HOST")]
    host: Option<String>,

    /// Log debug output to stderr
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open configuration file in $EDITOR
    Config,
    /// List available animation styles
    Styles,
    /// Play an animation for a few seconds, then stop it
    Preview {
        /// Animation style tag
        style: String,
        /// How long to play it
        #[arg(long, default_value_t = 3)]
        seconds: u64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Some(Commands::Config) => handle_config(cli.config),
        Some(Commands::Styles) => handle_styles(),
        Some(Commands::Preview { style, seconds }) => handle_preview(&style, seconds).await,
        None => handle_chat(cli.config, cli.style, cli.host).await,
    }
}

/// Initialize logging on stderr, leaving stdout to the chat.
fn init_logging(verbose: bool) {
    let default_directives = if verbose {
        "termchat=debug,reqwest=warn"
    } else {
        "termchat=warn,reqwest=warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Run the interactive chat.
async fn handle_chat(
    config_path: Option<PathBuf>,
    style: Option<String>,
    host: Option<String>,
) -> Result<()> {
    let mut config =
        config::Config::load(config_path.as_deref()).context("Failed to load configuration")?;
    if let Some(style) = style {
        config.animation_style = style;
    }
    if let Some(host) = host {
        config.host = host;
        config.validate()?;
    }
    info!(
        "Animation style: {}",
        Animation::from_tag(&config.animation_style)
    );

    let mut session = chat::Session::new(config, std::io::stdout())?;
    session.run(BufReader::new(tokio::io::stdin())).await
}

/// Handle the config command.
fn handle_config(config_path: Option<PathBuf>) -> Result<()> {
    let config_path = match config_path {
        Some(path) => path,
        None => config::Config::config_path()?,
    };

    // Create default config if it doesn't exist
    if !config_path.exists() {
        config::Config::default().save(&config_path)?;
        println!("Created default config at {}", config_path.display());
    }

    // Open in editor
    let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());
    let status = ProcessCommand::new(&editor)
        .arg(&config_path)
        .status()
        .context("Failed to open editor")?;

    if !status.success() {
        eprintln!("Editor exited with non-zero status");
    }

    Ok(())
}

/// Handle the styles subcommand.
fn handle_styles() -> Result<()> {
    println!("Animation Styles");
    println!("================\n");

    let default_style = Animation::default();
    for animation in Animation::ALL {
        let default_marker = if animation == default_style {
            " (default)"
        } else {
            ""
        };
        println!(
            "  {}{}\n    {} ({}ms per frame)\n",
            animation,
            default_marker,
            animation.description(),
            animation.frame_delay().as_millis()
        );
    }

    println!("Aliases: docker -> docker-style, telegram -> messenger-typing");
    println!("Unknown styles fall back to the default.");
    println!("\nUsage:");
    println!("  termchat --style speedtest        # Chat with a given style");
    println!("  termchat preview messenger-typing # Watch a style");

    Ok(())
}

/// Handle the preview subcommand.
async fn handle_preview(style: &str, seconds: u64) -> Result<()> {
    let animation = Animation::from_tag(style);
    println!("Previewing {} for {}s", animation, seconds);

    let mut controller = AnimationController::stdout();
    controller
        .run_while(animation, tokio::time::sleep(Duration::from_secs(seconds)))
        .await?;

    debug!("Preview finished");
    println!("Done");
    Ok(())
}
