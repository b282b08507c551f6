use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use scout_core::{Config, SearchMode};
use scout_http::AppState;
use scout_llm::LlmClient;
use scout_mcp::{ToolContext, run_mcp_server};
use scout_search::{Extractor, SerpApiClient};
use scout_service::{
    EventService, NotesService, Orchestrator, RunService, SearchBackend, SearchService,
};
use scout_storage::{SqliteStorage, Storage};

#[derive(Parser)]
#[command(name = "scout")]
#[command(about = "Research agent: plans subtopics, searches, extracts sources, and synthesizes reports", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the HTTP API
    Serve {
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,
        #[arg(short, long, default_value = "8000")]
        port: u16,
    },
    /// Serve the MCP tool dispatcher on stdio
    Mcp,
    /// Run the pipeline once and print the outcome
    Run {
        topic: String,
        #[arg(short = 'n', long)]
        max_results: Option<u32>,
    },
}

/// Everything the commands share, built once from config.
struct Services {
    notes: Arc<NotesService>,
    search: Arc<SearchService>,
    events: Arc<EventService>,
    runs: Arc<RunService>,
    llm: Arc<LlmClient>,
    extractor: Arc<Extractor>,
    orchestrator: Arc<Orchestrator>,
}

async fn build_services(config: &Config) -> Result<Services> {
    if let Some(parent) = config.db_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating database directory {}", parent.display()))?;
    }
    let storage: Arc<dyn Storage> = Arc::new(SqliteStorage::new(&config.db_path).await?);

    let backend = match (config.search_mode, config.serpapi_key.as_deref()) {
        (SearchMode::SerpApi, Some(key)) => SearchBackend::Live(SerpApiClient::new(
            key.to_owned(),
            config.request_timeout_secs,
        )?),
        (SearchMode::SerpApi, None) => {
            tracing::warn!("SERPAPI_KEY not set; falling back to mock search");
            SearchBackend::Local { seed_dir: config.seed_docs_dir.clone() }
        },
        (SearchMode::Mock, _) => SearchBackend::Local { seed_dir: config.seed_docs_dir.clone() },
    };

    let api_key = config.llm_api_key.clone().unwrap_or_else(|| {
        tracing::warn!("no LLM API key configured; model calls will be rejected upstream");
        String::new()
    });
    let llm = Arc::new(LlmClient::new(
        api_key,
        config.llm_base_url.clone(),
        config.model.clone(),
    )?);

    let notes = Arc::new(NotesService::new(Arc::clone(&storage)));
    let search = Arc::new(SearchService::new(Arc::clone(&storage), backend));
    let extractor = Arc::new(Extractor::new(
        config.request_timeout_secs,
        config.max_content_chars,
        config.summary_chars,
    )?);
    let orchestrator = Arc::new(Orchestrator::new(
        Arc::clone(&notes),
        Arc::clone(&search),
        Arc::clone(&llm),
        Arc::clone(&extractor),
        config.skip_threshold,
        config.summary_chars,
    ));

    Ok(Services {
        notes,
        search,
        events: Arc::new(EventService::new(Arc::clone(&storage))),
        runs: Arc::new(RunService::new(Arc::clone(&storage))),
        llm,
        extractor,
        orchestrator,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = Config::from_env();
    let services = build_services(&config).await?;

    match cli.command {
        Commands::Serve { host, port } => {
            let state = Arc::new(AppState {
                access_token: config.access_token.clone(),
                default_max_results: config.default_max_results,
                notes: services.notes,
                search: services.search,
                events: services.events,
                runs: services.runs,
                llm: services.llm,
                extractor: services.extractor,
                orchestrator: services.orchestrator,
            });
            let addr: SocketAddr = format!("{host}:{port}")
                .parse()
                .with_context(|| format!("invalid listen address {host}:{port}"))?;
            scout_http::serve(state, addr).await?;
        },
        Commands::Mcp => {
            run_mcp_server(ToolContext {
                search: services.search,
                extractor: services.extractor,
                llm: services.llm,
                notes: services.notes,
                default_max_results: config.default_max_results,
            })
            .await;
        },
        Commands::Run { topic, max_results } => {
            let max_results = max_results.unwrap_or(config.default_max_results);
            let outcome = services.orchestrator.run(&topic, max_results).await?;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        },
    }

    Ok(())
}
