use std::io::Write as _;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use admindash::chat::{self, AssistantTransport, ChatSession, DirectTransport, ProxyTransport};
use admindash::llm::Upstream;
use admindash::llm::config::LlmConfig;
use admindash::llm::types::LlmError;
use admindash::{routes, state};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("LLM config: {0}")]
    Config(#[from] LlmError),
    #[error("failed to bind {addr}: {source}")]
    Bind { addr: String, source: std::io::Error },
    #[error("server failed: {0}")]
    Serve(std::io::Error),
    #[error("failed to read context file {path}: {source}")]
    ContextRead { path: PathBuf, source: std::io::Error },
    #[error("context file {path} is not valid JSON: {source}")]
    ContextParse { path: PathBuf, source: serde_json::Error },
    #[error("chat transport: {0}")]
    Transport(#[from] chat::transport::TransportError),
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "admindash", about = "AdminDash AI proxy and chat client")]
struct Cli {
    #[command(flatten)]
    serve: ServeArgs,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the AI proxy HTTP server (default).
    Serve,
    /// Chat with the assistant from the terminal.
    Chat(ChatArgs),
}

#[derive(Args, Debug)]
struct ServeArgs {
    #[arg(long, env = "PORT", default_value_t = 3001)]
    port: u16,

    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,
}

#[derive(Args, Debug)]
struct ChatArgs {
    #[arg(long, env = "ADMINDASH_PROXY_URL", default_value = "http://127.0.0.1:3001")]
    proxy_url: String,

    /// Call the upstream API directly instead of going through the proxy.
    #[arg(long)]
    direct: bool,

    /// JSON file with the dashboard datasets sent as context.
    #[arg(long)]
    context: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    // A missing .env file is fine; real env vars still apply.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Some(Command::Chat(args)) => run_chat(args).await,
        Some(Command::Serve) | None => run_serve(cli.serve).await,
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "admindash exited with error");
        std::process::exit(1);
    }
}

// =============================================================================
// SERVE
// =============================================================================

async fn run_serve(args: ServeArgs) -> Result<(), CliError> {
    let config = LlmConfig::from_env()?;
    let upstream = Upstream::from_config(config.clone());

    // Non-fatal: requests report the problem instead.
    match &upstream {
        Upstream::Ready(_) => {
            tracing::info!(model = %config.model, base_url = %config.base_url, "upstream client initialized");
        }
        Upstream::MissingCredential { var } => {
            tracing::warn!(%var, "upstream credential not set; /api/ai will return 500");
        }
        Upstream::ClientUnavailable(e) => {
            tracing::warn!(error = %e, "no outbound HTTP client; /api/ai will return 500");
        }
    }

    let app = routes::app(state::AppState::new(upstream));
    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| CliError::Bind { addr: addr.clone(), source })?;

    tracing::info!(%addr, "AI proxy server listening");
    axum::serve(listener, app).await.map_err(CliError::Serve)
}

// =============================================================================
// CHAT
// =============================================================================

async fn run_chat(args: ChatArgs) -> Result<(), CliError> {
    let context = match &args.context {
        Some(path) => load_context(path)?,
        None => Value::Object(serde_json::Map::new()),
    };

    let config = LlmConfig::from_env()?;
    let transport: Box<dyn AssistantTransport> = if args.direct {
        let upstream = Upstream::from_config(config);
        if !upstream.is_ready() {
            tracing::warn!(?upstream, "direct mode without a ready upstream; replies will fail");
        }
        Box::new(DirectTransport::new(upstream))
    } else {
        let proxy = ProxyTransport::new(&args.proxy_url, config.timeouts)?;
        tracing::info!(endpoint = proxy.endpoint(), "chatting through proxy");
        Box::new(proxy)
    };

    let mut session = ChatSession::new(context);
    print_turn(&session.turns()[0]);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        match line.trim() {
            "/quit" | "/exit" => break,
            "/reset" => {
                session.reset();
                print_turn(&session.turns()[0]);
                continue;
            }
            _ => {}
        }

        session.set_draft(line);
        match session.ask(transport.as_ref()).await {
            Ok(turn) => print_turn(turn),
            Err(e) => tracing::debug!(error = %e, "chat: draft not submitted"),
        }
    }

    Ok(())
}

fn load_context(path: &Path) -> Result<Value, CliError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|source| CliError::ContextRead { path: path.to_path_buf(), source })?;
    serde_json::from_str(&raw).map_err(|source| CliError::ContextParse { path: path.to_path_buf(), source })
}

fn print_turn(turn: &chat::ChatTurn) {
    println!("[{}] {}", turn.role().as_str(), turn.content());
}
