use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use clap::Parser;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

mod handlers;
mod state;

use crate::handlers::proxy_handler;
use crate::state::AppState;

const ANNOTATION_ROUTES: [&str; 5] = ["/draw", "/erase", "/highlight", "/text", "/night"];

/// Hosts the viewer bundle and forwards its API calls to the annotation
/// backend.
#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    /// Directory holding index.html and the wasm package.
    #[arg(long)]
    public_dir: Option<PathBuf>,
    /// Base URL of the annotation backend.
    #[arg(long, env = "PDFINK_BACKEND", default_value = "http://127.0.0.1:5000")]
    backend: String,
    #[arg(long, env = "PORT", default_value_t = 3000)]
    port: u16,
    /// Largest accepted upload, in megabytes.
    #[arg(long, default_value_t = 64)]
    max_upload_mb: usize,
}

fn upload_limit_bytes(max_upload_mb: usize) -> usize {
    max_upload_mb.saturating_mul(1024 * 1024)
}

fn build_router(state: AppState, public_dir: PathBuf, max_upload_bytes: usize) -> Router {
    let mut router = Router::new()
        .route("/process", post(proxy_handler))
        .route("/page/:page_num", get(proxy_handler));
    for path in ANNOTATION_ROUTES {
        router = router.route(path, post(proxy_handler));
    }
    router
        .fallback_service(ServeDir::new(public_dir).append_index_html_on_directories(true))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("pdfink_server=info,tower_http=info")),
        )
        .init();

    let args = Args::parse();
    let public_dir = args
        .public_dir
        .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../public"));
    let state = AppState::new(&args.backend);
    let app = build_router(state, public_dir.clone(), upload_limit_bytes(args.max_upload_mb));

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(
        port = args.port,
        backend = %args.backend,
        public_dir = %public_dir.display(),
        "PDFInk viewer running at http://localhost:{}",
        args.port
    );
    axum::serve(listener, app).await.context("server crashed")?;
    Ok(())
}
