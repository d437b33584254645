use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub client: reqwest::Client,
    pub backend: Arc<str>,
}

impl AppState {
    pub fn new(backend: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            backend: Arc::from(backend.trim_end_matches('/')),
        }
    }

    /// Backend URL for a request path, query string included.
    pub fn upstream_url(&self, path_and_query: &str) -> String {
        format!("{}{}", self.backend, path_and_query)
    }
}
