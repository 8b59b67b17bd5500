// src/main.rs

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use solace::config::CONFIG;
use solace::llm::{OpenAIClient, OpenAiIntentClassifier, OpenAiReplyGenerator};
use solace::memory::InMemoryHistoryStore;
use solace::pipeline::{ChatPipeline, PipelineTables};
use solace::state::create_app_state;

#[derive(Parser, Debug)]
#[command(name = "solace", about = "Solace conversational safety pipeline server")]
struct Args {
    /// Bind host; falls back to SOLACE_HOST
    #[arg(long)]
    host: Option<String>,

    /// Bind port; falls back to SOLACE_PORT
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = if CONFIG.debug_logging {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting Solace pipeline server");
    info!(
        "Models: generation={}, classification={}",
        CONFIG.generation_model, CONFIG.classifier_model
    );

    let client = OpenAIClient::new(
        CONFIG.openai_api_key.clone(),
        CONFIG.openai_base_url.clone(),
        CONFIG.openai_timeout,
    )?;

    let classifier = Arc::new(OpenAiIntentClassifier::new(
        client.clone(),
        CONFIG.classifier_model.clone(),
    ));
    let generator = Arc::new(OpenAiReplyGenerator::new(
        client,
        CONFIG.generation_model.clone(),
        CONFIG.max_output_tokens,
    ));

    let tables = Arc::new(PipelineTables::standard());
    let pipeline = ChatPipeline::new(tables, classifier, generator);
    let history = Arc::new(InMemoryHistoryStore::new());

    let app_state = Arc::new(create_app_state(pipeline, history));

    let app = solace::api::router(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(CONFIG.request_timeout)))
        .layer(CorsLayer::permissive());

    let host = args.host.unwrap_or_else(|| CONFIG.host.clone());
    let port = args.port.unwrap_or(CONFIG.port);
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
