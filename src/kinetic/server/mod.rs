// SPDX-License-Identifier: MIT

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::sse::{Event, KeepAlive, Sse},
    routing::{get, post},
    Json, Router,
};
use futures::stream::Stream;
use serde_json::{json, Value};
use std::convert::Infallible;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::fs;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::StreamExt;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use uuid::Uuid;

use crate::adk::block::Block;
use crate::adk::error::KineticError;
use crate::kinetic::config::ServerConfig;
use crate::kinetic::registry::BlockRegistry;
use crate::kinetic::suite::{channels_to_json, run_suite, SuiteLoader};

const SUITE_EXTENSIONS: [&str; 3] = ["yaml", "yml", "json"];

#[derive(Clone)]
pub struct AppState {
    pub registry: BlockRegistry,
    pub config: Arc<ServerConfig>,
}

type ApiResult = Result<Json<Value>, (StatusCode, Json<Value>)>;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/blocks", get(list_blocks))
        .route("/api/blocks/{id}", get(get_block))
        .route("/api/blocks/{id}/execute", post(execute_block))
        .route("/api/blocks/{id}/stream", post(stream_block))
        .route("/api/suites", get(list_suites))
        .route("/api/suites/{id}/run", post(run_suite_file))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn serve(config: ServerConfig, registry: BlockRegistry) -> Result<(), KineticError> {
    let addr = config.addr();
    let app = router(AppState {
        registry,
        config: Arc::new(config),
    });

    log::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn error_response(err: KineticError) -> (StatusCode, Json<Value>) {
    let status = match &err {
        KineticError::BlockNotFound { .. } => StatusCode::NOT_FOUND,
        KineticError::InvalidInput { .. }
        | KineticError::Json(_)
        | KineticError::Yaml(_) => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(json!({ "error": err.to_string() })))
}

fn describe_block(block: &dyn Block) -> Value {
    json!({
        "id": block.id(),
        "name": block.name(),
        "description": block.description(),
        "categories": block.categories(),
        "input_schema": block.input_schema(),
        "output_schema": block.output_schema(),
    })
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "time": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn list_blocks(State(state): State<AppState>) -> Json<Value> {
    let blocks: Vec<Value> = state
        .registry
        .list()
        .await
        .iter()
        .map(|b| describe_block(b.as_ref()))
        .collect();
    Json(json!(blocks))
}

async fn get_block(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult {
    let block = state.registry.resolve(&id).await.map_err(error_response)?;
    Ok(Json(describe_block(block.as_ref())))
}

async fn execute_block(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<Value>,
) -> ApiResult {
    let block = state.registry.resolve(&id).await.map_err(error_response)?;
    let request_id = Uuid::new_v4();
    log::info!("Executing block {} (request {})", block.name(), request_id);

    let channels = block.execute(input).await.map_err(error_response)?;
    Ok(Json(json!({
        "request_id": request_id,
        "block": block.name(),
        "channels": channels_to_json(channels),
    })))
}

/// Streams one SSE event per output channel, in emission order
async fn stream_block(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<Value>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, (StatusCode, Json<Value>)> {
    let block = state.registry.resolve(&id).await.map_err(error_response)?;
    let (tx, rx) = mpsc::channel::<(String, Value)>(16);

    tokio::spawn(async move {
        log::info!("Starting streaming execution for block: {}", block.name());
        match block.execute(input).await {
            Ok(channels) => {
                for channel in channels {
                    if tx.send(channel).await.is_err() {
                        log::debug!("Stream client disconnected");
                        return;
                    }
                }
            }
            Err(e) => {
                log::error!("Block execution failed: {}", e);
                if tx
                    .send(("error".to_string(), json!({ "error": e.to_string() })))
                    .await
                    .is_err()
                {
                    log::debug!("Stream client disconnected");
                }
            }
        }
    });

    let stream = ReceiverStream::new(rx)
        .map(|(name, value)| Ok(Event::default().event(name).data(value.to_string())));

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}

fn suite_id(path: &std::path::Path) -> Option<String> {
    let ext = path.extension()?.to_str()?;
    if !SUITE_EXTENSIONS.contains(&ext) {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    is_valid_suite_id(stem).then(|| stem.to_string())
}

async fn list_suites(State(state): State<AppState>) -> Json<Value> {
    let mut suites = Vec::new();
    if let Ok(mut entries) = fs::read_dir(&state.config.suites_dir).await {
        while let Ok(Some(entry)) = entries.next_entry().await {
            let path = entry.path();
            if let Some(id) = suite_id(&path) {
                suites.push(json!({
                    "id": id,
                    "file": path.to_string_lossy()
                }));
            }
        }
    }
    suites.sort_by(|a, b| a["id"].as_str().cmp(&b["id"].as_str()));
    Json(json!(suites))
}

/// Suite ids are bare file stems; anything that could leave the suites directory is refused
fn is_valid_suite_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

async fn find_suite(dir: &std::path::Path, id: &str) -> Option<PathBuf> {
    if !is_valid_suite_id(id) {
        log::warn!("Rejected suite id: {:?}", id);
        return None;
    }
    for ext in SUITE_EXTENSIONS {
        let path = dir.join(format!("{}.{}", id, ext));
        if fs::try_exists(&path).await.unwrap_or(false) {
            return Some(path);
        }
    }
    None
}

async fn run_suite_file(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult {
    let path = find_suite(&state.config.suites_dir, &id).await.ok_or_else(|| {
        (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": format!("Suite '{}' not found", id) })),
        )
    })?;

    let content = fs::read_to_string(&path)
        .await
        .map_err(|e| error_response(e.into()))?;
    let suite = if path.extension().is_some_and(|ext| ext == "json") {
        SuiteLoader::parse_json(&content)
    } else {
        SuiteLoader::parse_yaml(&content)
    }
    .map_err(error_response)?;

    let report = run_suite(&state.registry, &suite)
        .await
        .map_err(error_response)?;
    Ok(Json(json!(report)))
}
