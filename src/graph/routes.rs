use super::assets::INDEX_HTML;
use super::data::GraphData;
use crate::api::{LineageError, load_records_with_fs};
use crate::builder::{GroupBy, build_graph};
use crate::fs::{FileSystem, default_fs};
use crate::layout::GridLayout;
use crate::style;
use axum::{
    Json, Router,
    extract::State,
    response::{
        Html, IntoResponse,
        sse::{Event, KeepAlive, Sse},
    },
    routing::get,
};
use std::convert::Infallible;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tokio::sync::{RwLock, broadcast};
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::{Stream, StreamExt};
use tower_http::cors::{Any, CorsLayer};

/// Application state shared across handlers
pub struct AppState {
    pub graph_data: RwLock<GraphData>,
    pub updates: broadcast::Sender<u64>,
}

/// Everything needed to rebuild the payload when the input file changes.
pub struct WatchContext {
    pub input: PathBuf,
    pub group_by: GroupBy,
    pub layout: GridLayout,
    pub title: String,
}

impl WatchContext {
    /// Re-read the input and build a fresh payload.
    pub fn reload(&self, fs: &dyn FileSystem) -> Result<GraphData, LineageError> {
        let records = load_records_with_fs(&self.input, fs)?;
        let graph = build_graph(&records, self.group_by);
        Ok(GraphData::from_graph(
            &graph,
            &self.layout,
            &self.title,
            self.group_by,
        ))
    }
}

fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any);

    Router::new()
        .route("/", get(index_handler))
        .route("/api/graph", get(graph_handler))
        .route("/api/events", get(events_handler))
        .layer(cors)
        .with_state(state)
}

fn new_state(graph_data: GraphData) -> Arc<AppState> {
    let (updates, _) = broadcast::channel(16);
    Arc::new(AppState {
        graph_data: RwLock::new(graph_data),
        updates,
    })
}

/// Start the HTTP server for the lineage viewer
pub async fn serve(
    graph_data: GraphData,
    port: u16,
    open_browser: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    run(new_state(graph_data), port, open_browser).await
}

/// Start the server and rebuild the graph whenever the input file changes.
pub async fn serve_with_watch(
    graph_data: GraphData,
    port: u16,
    open_browser: bool,
    ctx: WatchContext,
) -> Result<(), Box<dyn std::error::Error>> {
    let state = new_state(graph_data);
    tokio::spawn(watch_input(Arc::clone(&state), ctx));
    run(state, port, open_browser).await
}

async fn run(
    state: Arc<AppState>,
    port: u16,
    open_browser: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = router(state);

    let addr = format!("127.0.0.1:{}", port);
    let url = format!("http://{}", addr);

    style::status("Starting lineagemap viewer...");
    style::status(&format!("Open in browser: {}", style::url(&url)));
    style::hint("Press Ctrl+C to stop");

    if open_browser {
        if let Err(e) = open::that(&url) {
            style::warning(&format!("Could not open browser: {}", e));
        }
    }

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn watch_input(state: Arc<AppState>, ctx: WatchContext) {
    let fs = default_fs();
    let mut last_modified: Option<SystemTime> = fs.modified(&ctx.input).ok();
    let mut version: u64 = 0;
    let mut ticker = tokio::time::interval(Duration::from_secs(1));

    style::status(&format!(
        "Watching {} for changes",
        style::path(&ctx.input)
    ));

    loop {
        ticker.tick().await;
        poll_input(&state, &ctx, fs, &mut last_modified, &mut version).await;
    }
}

/// One watch step: rebuild and broadcast if the input changed since the last
/// poll. Returns whether a new payload was published.
async fn poll_input(
    state: &AppState,
    ctx: &WatchContext,
    fs: &dyn FileSystem,
    last_modified: &mut Option<SystemTime>,
    version: &mut u64,
) -> bool {
    let modified = fs.modified(&ctx.input).ok();
    if modified == *last_modified {
        return false;
    }
    *last_modified = modified;

    match ctx.reload(fs) {
        Ok(data) => {
            *state.graph_data.write().await = data;
            *version += 1;
            style::input_reloaded(&ctx.input);
            // no subscribers is fine
            let _ = state.updates.send(*version);
            true
        }
        Err(e) => {
            style::warning(&format!("Keeping previous graph: {}", e));
            false
        }
    }
}

async fn index_handler() -> impl IntoResponse {
    Html(INDEX_HTML)
}

async fn graph_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.graph_data.read().await.clone())
}

async fn events_handler(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let stream = BroadcastStream::new(state.updates.subscribe()).filter_map(|msg| {
        msg.ok().map(|version| {
            Ok::<_, Infallible>(Event::default().event("update").data(version.to_string()))
        })
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
