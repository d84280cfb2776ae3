//! Dishchat CLI
//!
//! Command-line driver for the recipe assistant:
//! - Analyse a dish photo
//! - Chat about the recipe
//! - Generate a config file

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dishchat::chat::reply_to_plain_text;
use dishchat::config::generate_default_config;
use dishchat::{
    ChatRole, Config, HttpBackend, ImageFile, LoggingConfig, NoCamera, NoPreview, Outcome,
    RecipeAssistant,
};

type CliAssistant = RecipeAssistant<HttpBackend, NoCamera, NoPreview>;

#[derive(Parser)]
#[command(name = "dishchat")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Identify dishes from photos and chat about their recipes")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Backend base URL (overrides the config file)
    #[arg(long, global = true)]
    pub backend_url: Option<String>,

    /// Config file (default: ~/.config/dishchat/config.toml, ./dishchat.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Upload a dish photo for analysis
    Analyse {
        /// Path to a PNG or JPEG image
        path: PathBuf,
    },

    /// Chat with the recipe assistant
    Chat {
        /// Message to send; starts an interactive session when omitted
        message: Vec<String>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = cli.backend_url.clone() {
        config.backend.url = Some(url);
    }

    init_logging(&config.logging);

    match cli.command {
        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("writing {}", path.display()))?;
                    println!("Wrote config to {}", path.display());
                }
                None => print!("{}", content),
            }
        }

        Commands::Analyse { path } => {
            let app = build_assistant(&config)?;
            let image = ImageFile::from_path(&path)
                .with_context(|| format!("reading {}", path.display()))?;

            app.select_image(Some(image));
            let outcome = app.analyse().await;
            println!("{}", app.state().borrow().analyse_status);

            if outcome != Outcome::Succeeded {
                std::process::exit(1);
            }
        }

        Commands::Chat { message } => {
            let app = build_assistant(&config)?;

            if message.is_empty() {
                repl(&app).await?;
            } else if send_and_print(&app, &message.join(" ")).await == Outcome::Failed {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

fn init_logging(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(format!("dishchat={}", logging.level)));

    let registry = tracing_subscriber::registry().with(filter);
    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn build_assistant(config: &Config) -> anyhow::Result<CliAssistant> {
    let backend = HttpBackend::new(&config.backend)?;
    tracing::debug!(base_url = %config.backend.base_url(), "using backend");
    Ok(RecipeAssistant::new(backend, NoCamera, NoPreview, config.camera.clone()))
}

async fn send_and_print(app: &CliAssistant, message: &str) -> Outcome {
    let outcome = app.send(message).await;
    if outcome == Outcome::Skipped {
        return outcome;
    }

    let state = app.state().borrow();
    if let Some(reply) = state.transcript.last().filter(|m| m.role == ChatRole::Assistant) {
        println!("{}", reply_to_plain_text(&reply.content));
    }
    outcome
}

async fn repl(app: &CliAssistant) -> anyhow::Result<()> {
    if let Some(welcome) = app.state().borrow().transcript.last() {
        println!("{}", welcome.content);
    }
    println!("Type /quit to exit.");

    let stdin = std::io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        if line.trim() == "/quit" {
            break;
        }

        send_and_print(app, &line).await;
    }

    Ok(())
}
