mod display;

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use specdesk_client::{BatchSession, ClientConfig, RelayClient, SystemClipboard};
use specdesk_core::{CsvStyle, PromptTemplate};
use specdesk_relay::config::{DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_UPSTREAM_URL};
use specdesk_relay::{AppState, RelayConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LOG_FILTER: &str =
    "specdesk_cli=info,specdesk_relay=info,specdesk_client=info,specdesk_core=info";

#[derive(Parser)]
#[command(name = "specdesk", version, about = "Spec sheets in, product descriptions out")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the relay that forwards spec text to the model service.
    Serve(ServeArgs),
    /// Send spec-sheet text through a relay and show the extracted products.
    Process(ProcessArgs),
    /// Print the prompt the relay would send for some spec text.
    Prompt(PromptArgs),
}

#[derive(clap::Args)]
struct ServeArgs {
    #[arg(long, env = "SPECDESK_BIND", default_value = "0.0.0.0:3000")]
    bind: String,

    #[arg(long, env = "ANTHROPIC_API_KEY", default_value = "", hide_env_values = true, hide_default_value = true)]
    api_key: String,

    #[arg(long, env = "SPECDESK_UPSTREAM_URL", default_value = DEFAULT_UPSTREAM_URL)]
    upstream_url: String,

    #[arg(long, env = "SPECDESK_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    #[arg(long, env = "SPECDESK_MAX_TOKENS", default_value_t = DEFAULT_MAX_TOKENS)]
    max_tokens: u32,

    /// Give up on the model service after this many seconds.
    #[arg(long, env = "SPECDESK_UPSTREAM_TIMEOUT_SECS")]
    upstream_timeout_secs: Option<u64>,

    /// Replacement prompt template containing `{{spec_input}}`.
    #[arg(long, env = "SPECDESK_PROMPT_FILE")]
    prompt_file: Option<PathBuf>,
}

#[derive(clap::Args)]
struct ProcessArgs {
    /// Spec-sheet text file; stdin when omitted or `-`.
    input: Option<PathBuf>,

    #[arg(long, env = "SPECDESK_RELAY_URL", default_value = specdesk_client::relay::DEFAULT_RELAY_URL)]
    relay_url: String,

    /// Give up on the relay after this many seconds.
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Write products_<date>.csv into this directory.
    #[arg(long, value_name = "DIR")]
    export: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = CsvStyleArg::Escaped)]
    csv_style: CsvStyleArg,

    /// Copy the description of this row (1-based) to the clipboard.
    #[arg(long, value_name = "ROW")]
    copy: Option<usize>,

    /// After `--copy`, keep the text available for at most this many
    /// seconds until a clipboard manager takes it (Linux); 0 to skip.
    #[arg(long, default_value_t = 10)]
    hold_secs: u64,

    /// Print the products as JSON instead of a table.
    #[arg(long)]
    json: bool,
}

#[derive(clap::Args)]
struct PromptArgs {
    /// Spec-sheet text file; stdin when `-`. Without one the raw template is shown.
    input: Option<PathBuf>,

    #[arg(long, env = "SPECDESK_PROMPT_FILE")]
    prompt_file: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum CsvStyleArg {
    /// Quote every cell, no escaping (matches the web front end).
    Verbatim,
    /// Quote every cell, double embedded quotes.
    Escaped,
}

impl From<CsvStyleArg> for CsvStyle {
    fn from(arg: CsvStyleArg) -> Self {
        match arg {
            CsvStyleArg::Verbatim => CsvStyle::Verbatim,
            CsvStyleArg::Escaped => CsvStyle::Escaped,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Serve(args) => serve(args).await,
        Command::Process(args) => process(args).await,
        Command::Prompt(args) => prompt(args),
    }
}

async fn serve(args: ServeArgs) -> anyhow::Result<ExitCode> {
    tracing::info!("specdesk v{}", env!("CARGO_PKG_VERSION"));
    let prompt = load_template(args.prompt_file.as_deref())?;
    let config = RelayConfig {
        upstream_url: args.upstream_url,
        api_key: args.api_key,
        model: args.model,
        max_tokens: args.max_tokens,
        timeout: args.upstream_timeout_secs.map(Duration::from_secs),
        prompt,
    };
    if config.api_key.is_empty() {
        tracing::warn!("ANTHROPIC_API_KEY not set; the model service will reject requests");
    }
    tracing::debug!(?config, "relay configuration");

    let state = AppState::new(config).context("building model service client")?;
    let listener = tokio::net::TcpListener::bind(&args.bind)
        .await
        .with_context(|| format!("binding {}", args.bind))?;
    specdesk_relay::serve(listener, state).await?;
    Ok(ExitCode::SUCCESS)
}

async fn process(args: ProcessArgs) -> anyhow::Result<ExitCode> {
    let client = RelayClient::new(&ClientConfig {
        relay_url: args.relay_url,
        timeout: args.timeout_secs.map(Duration::from_secs),
    })
    .context("building relay client")?;

    let mut session = BatchSession::new();
    session.set_input(read_input(args.input.as_deref())?);

    eprintln!("Processing...");
    let outcome = tokio::select! {
        result = session.process(&client) => Some(result),
        _ = tokio::signal::ctrl_c() => None,
    };
    match outcome {
        None => {
            eprintln!("Cancelled.");
            return Ok(ExitCode::FAILURE);
        }
        Some(Err(e)) => {
            tracing::debug!(error = ?e, relay = client.url(), "processing failed");
            eprintln!("{e}");
            return Ok(ExitCode::FAILURE);
        }
        Some(Ok(_)) => {}
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(session.products())?);
    } else {
        display::print_products(session.products());
        display::print_summary(&session.summary());
    }

    if let Some(dir) = &args.export
        && let Some(path) = session.export_csv(dir, args.csv_style.into())?
    {
        eprintln!("Exported {}", path.display());
    }

    if let Some(row) = args.copy {
        let index = copy_index(row)?;
        let mut clipboard = match clipboard_hold(args.hold_secs) {
            Some(hold) => SystemClipboard::holding(hold)?,
            None => SystemClipboard::new()?,
        };
        if let Some(hold) = clipboard.hold() {
            tracing::debug!(hold_secs = hold.as_secs(), "holding clipboard until taken over");
        }
        session.copy_description(index, &mut clipboard)?;
        eprintln!("Description copied!");
    }

    Ok(ExitCode::SUCCESS)
}

/// `--copy` rows are 1-based; the session's are 0-based.
fn copy_index(row: usize) -> anyhow::Result<usize> {
    row.checked_sub(1).context("rows are numbered from 1")
}

fn clipboard_hold(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}

fn prompt(args: PromptArgs) -> anyhow::Result<ExitCode> {
    let template = load_template(args.prompt_file.as_deref())?;
    let rendered = match args.input.as_deref() {
        Some(path) => template.render(&read_input(Some(path))?),
        None => template.render(specdesk_core::prompt::PLACEHOLDER),
    };
    eprintln!("template: {}", template.version());
    println!("{rendered}");
    Ok(ExitCode::SUCCESS)
}

fn load_template(path: Option<&Path>) -> anyhow::Result<PromptTemplate> {
    match path {
        Some(path) => PromptTemplate::from_file(path)
            .with_context(|| format!("loading prompt template {}", path.display())),
        None => Ok(PromptTemplate::builtin()),
    }
}

fn read_input(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display())),
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("reading spec text from stdin")?;
            Ok(text)
        }
    }
}
