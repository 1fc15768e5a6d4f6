//! tokencost - token counts and USD costs for LLM prompts and completions

#![allow(missing_docs)]

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tokencost::utils::logging::init_logging;
use tokencost::{ChatMessage, Config, CostCalculator, Prompt};
use tracing::info;

#[derive(Parser)]
#[command(
    name = "tokencost",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")"),
    about = "Count tokens and estimate USD costs for LLM prompts and completions"
)]
struct Cli {
    /// YAML configuration file
    #[arg(long, short, value_name = "FILE", env = "TOKENCOST_CONFIG")]
    config: Option<PathBuf>,

    /// Refresh prices from the remote feed before running the command
    #[arg(long)]
    refresh: bool,

    /// Log level (overridden by RUST_LOG)
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Count tokens of a text or a chat transcript
    Count {
        #[arg(long, short)]
        model: String,
        /// JSON file holding a list of {role, content, name?} messages
        #[arg(long, value_name = "FILE", conflicts_with = "text")]
        messages: Option<PathBuf>,
        /// Text to count
        #[arg(required_unless_present = "messages")]
        text: Option<String>,
    },
    /// Price a prompt and its completion, printed as JSON
    Cost {
        #[arg(long, short)]
        model: String,
        /// Prompt text
        #[arg(long, conflicts_with = "messages", required_unless_present = "messages")]
        prompt: Option<String>,
        /// JSON file holding the prompt as a list of messages
        #[arg(long, value_name = "FILE")]
        messages: Option<PathBuf>,
        /// Completion text
        #[arg(long)]
        completion: String,
    },
    /// List priced models
    Models {
        /// Only models of this LiteLLM provider
        #[arg(long)]
        provider: Option<String>,
        /// Print table statistics instead of model names
        #[arg(long)]
        stats: bool,
    },
    /// Fetch the remote feed and report the merged table size
    Refresh,
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Print error using Display (not Debug) to preserve newlines
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path).await?,
        None => Config::default(),
    };
    config.apply_env_overrides();
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    config.logging.json |= cli.json_logs;
    config.validate()?;

    init_logging(&config.logging)?;

    let calculator = CostCalculator::new(&config)?;
    if cli.refresh {
        let total = calculator
            .update_token_costs()
            .await
            .context("failed to refresh prices")?;
        info!("Price table refreshed, {} models", total);
    }

    match cli.command {
        Commands::Count {
            model,
            messages,
            text,
        } => {
            let tokens = match (messages, text) {
                (Some(path), _) => {
                    let messages = read_messages(&path).await?;
                    calculator.count_message_tokens(&messages, &model).await?
                }
                (None, Some(text)) => calculator.count_string_tokens(&text, &model)?,
                (None, None) => bail!("either TEXT or --messages is required"),
            };
            println!("{}", tokens);
        }
        Commands::Cost {
            model,
            prompt,
            messages,
            completion,
        } => {
            let prompt = match (messages, prompt) {
                (Some(path), _) => Prompt::from(read_messages(&path).await?),
                (None, Some(text)) => Prompt::from(text),
                (None, None) => bail!("either --prompt or --messages is required"),
            };
            let result = calculator
                .calculate_all_costs_and_tokens(&prompt, &completion, &model)
                .await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::Models { provider, stats } => {
            let pricing = calculator.pricing();
            if stats {
                println!("{}", serde_json::to_string_pretty(&pricing.get_statistics())?);
            } else {
                let models = match provider {
                    Some(provider) => pricing.get_models_by_provider(&provider),
                    None => {
                        let mut models: Vec<String> =
                            calculator.token_costs().keys().cloned().collect();
                        models.sort();
                        models
                    }
                };
                for model in models {
                    println!("{}", model);
                }
            }
        }
        Commands::Refresh => {
            let total = calculator.update_token_costs().await?;
            println!("{}", total);
        }
    }

    Ok(())
}

async fn read_messages(path: &Path) -> anyhow::Result<Vec<ChatMessage>> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    let messages = serde_json::from_str(&content)
        .with_context(|| format!("{} is not a list of chat messages", path.display()))?;
    Ok(messages)
}
