use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};

use crate::state::AppState;

#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("backend request failed: {0}")]
    Upstream(#[from] reqwest::Error),
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        tracing::warn!(error = %self, "backend unavailable");
        (StatusCode::BAD_GATEWAY, self.to_string()).into_response()
    }
}

/// Forwards a viewer request to the annotation backend and relays its
/// status, body and content headers.
pub async fn proxy_handler(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ProxyError> {
    let path = uri.path_and_query().map_or("/", |value| value.as_str());
    let url = state.upstream_url(path);
    tracing::debug!(%method, %url, bytes = body.len(), "forwarding");

    let mut request = state.client.request(method, &url).body(body);
    if let Some(content_type) = headers.get(CONTENT_TYPE) {
        request = request.header(CONTENT_TYPE, content_type.clone());
    }
    let upstream = request.send().await?;

    let status = upstream.status();
    let mut relayed = HeaderMap::new();
    for name in [CONTENT_TYPE, CACHE_CONTROL] {
        if let Some(value) = upstream.headers().get(&name) {
            relayed.insert(name, value.clone());
        }
    }
    let bytes = upstream.bytes().await?;
    if !status.is_success() {
        tracing::info!(%url, %status, "backend rejected request");
    }
    Ok((status, relayed, bytes).into_response())
}
