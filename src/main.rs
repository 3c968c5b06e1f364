use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use leasewise::{
    AppState, ClauseRequest, HumanReport, OpenAiClient, OpenAiConfig, PipelineConfig,
    ReviewConfig, RewriteConfig, TextGenerator, UsState, parse_clause_request_file, process,
    serve, write_result_json,
};

#[derive(Parser)]
#[command(name = "leasewise")]
#[command(author, version, about = "Lease clause rewriting and legal review", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args, Clone)]
struct GenerationArgs {
    /// Model to use (overrides OPENAI_MODEL)
    #[arg(long)]
    model: Option<String>,

    /// Temperature for the clause rewrite call
    #[arg(long, default_value = "0.7")]
    rewrite_temperature: f64,

    /// Temperature for the legal review call
    #[arg(long, default_value = "0.3")]
    review_temperature: f64,

    /// Retries per call on transient API failures
    #[arg(long, default_value = "2")]
    max_retries: usize,

    /// Fail when the rewrite response contains no numbered clauses
    #[arg(long)]
    strict_parse: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        /// Address to listen on
        #[arg(short, long, default_value = "127.0.0.1:3000")]
        bind: SocketAddr,

        /// Timeout for one clause pipeline run, in seconds
        #[arg(long, default_value = "120")]
        request_timeout_secs: u64,

        #[command(flatten)]
        generation: GenerationArgs,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Rewrite and review clauses once, without the HTTP API
    Generate {
        /// Target state, e.g. "New York"
        #[arg(short, long, required_unless_present = "input")]
        state: Option<String>,

        /// Clause text (repeatable)
        #[arg(short, long = "clause")]
        clauses: Vec<String>,

        /// JSON file with {"state": ..., "clauses": [...]}
        #[arg(short, long, conflicts_with_all = ["state", "clauses"])]
        input: Option<PathBuf>,

        /// Output file for the JSON result (stdout report if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        generation: GenerationArgs,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// List accepted state names and their lookup keys
    States,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            bind,
            request_timeout_secs,
            generation,
            verbose,
        } => {
            setup_logging(verbose);
            run_server(bind, Duration::from_secs(request_timeout_secs), generation).await
        }
        Commands::Generate {
            state,
            clauses,
            input,
            output,
            generation,
            verbose,
        } => {
            setup_logging(verbose);
            let request = match input {
                Some(path) => parse_clause_request_file(&path)
                    .context("Failed to load clause request")?,
                None => ClauseRequest::new(state.unwrap_or_default(), clauses),
            };
            generate_once(request, output, generation).await
        }
        Commands::States => {
            for state in UsState::ALL {
                println!("{:<16} {}", state.name(), state.key());
            }
            Ok(())
        }
    }
}

fn setup_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

fn pipeline_config(args: &GenerationArgs) -> PipelineConfig {
    PipelineConfig {
        rewrite: RewriteConfig {
            temperature: args.rewrite_temperature,
            strict_parse: args.strict_parse,
            ..Default::default()
        },
        review: ReviewConfig {
            temperature: args.review_temperature,
            ..Default::default()
        },
    }
}

fn build_client(args: &GenerationArgs) -> Result<OpenAiClient> {
    let mut config = OpenAiConfig::from_env()?;
    if let Some(model) = &args.model {
        config.model = model.clone();
    }
    config.max_retries = args.max_retries;

    let client = OpenAiClient::new(config)?;
    info!("Using model {}", client.model());
    Ok(client)
}

async fn run_server(
    bind: SocketAddr,
    request_timeout: Duration,
    generation: GenerationArgs,
) -> Result<()> {
    let generator: Option<Arc<dyn TextGenerator>> = match build_client(&generation) {
        Ok(client) => Some(Arc::new(client) as Arc<dyn TextGenerator>),
        Err(e) => {
            warn!("Text generation disabled: {}", e);
            None
        }
    };

    let state = AppState::new(generator, pipeline_config(&generation))
        .with_request_timeout(request_timeout);

    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("Failed to bind to {}", bind))?;
    info!("Listening on {}", listener.local_addr()?);

    serve(listener, state, shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}

async fn generate_once(
    request: ClauseRequest,
    output: Option<PathBuf>,
    generation: GenerationArgs,
) -> Result<()> {
    let client = build_client(&generation)?;
    let config = pipeline_config(&generation);

    info!(
        "Generating {} clauses for {:?}",
        request.clauses.len(),
        request.state
    );
    let result = process(&client, &request, &config).await?;

    match output {
        Some(path) => {
            write_result_json(&result, &path)?;
            info!("Result written to {:?}", path);
        }
        None => print!("{}", HumanReport::new(&result).format()),
    }

    Ok(())
}
