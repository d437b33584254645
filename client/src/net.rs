use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{FormData, Headers, RequestInit, Response, Window};

use pdfink_shared::{Annotation, ProcessResponse, PROCESS_PATH};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("fetch failed: {0}")]
    Js(String),
    #[error("{path} returned HTTP {status}")]
    Status { path: &'static str, status: u16 },
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<JsValue> for ApiError {
    fn from(value: JsValue) -> Self {
        Self::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

async fn fetch(window: &Window, path: &str, init: &RequestInit) -> Result<Response, ApiError> {
    let response = JsFuture::from(window.fetch_with_str_and_init(path, init)).await?;
    Ok(response.dyn_into::<Response>()?)
}

async fn response_text(response: &Response) -> Result<String, ApiError> {
    let text = JsFuture::from(response.text()?).await?;
    Ok(text.as_string().unwrap_or_default())
}

/// Uploads the document form and decodes the `/process` reply.
pub async fn process_document(
    window: &Window,
    form: &FormData,
) -> Result<ProcessResponse, ApiError> {
    let init = RequestInit::new();
    init.set_method("POST");
    init.set_body(form.as_ref());
    let response = fetch(window, PROCESS_PATH, &init).await?;
    let text = response_text(&response).await?;
    Ok(serde_json::from_str(&text)?)
}

/// Posts one annotation. Only the HTTP status of the reply matters.
pub async fn post_annotation(window: &Window, annotation: &Annotation) -> Result<(), ApiError> {
    let body = annotation.to_json()?;
    let headers = Headers::new()?;
    headers.set("Content-Type", "application/json")?;
    let init = RequestInit::new();
    init.set_method("POST");
    init.set_headers(headers.as_ref());
    init.set_body(&JsValue::from_str(&body));
    let path = annotation.endpoint();
    let response = fetch(window, path, &init).await?;
    if !response.ok() {
        return Err(ApiError::Status {
            path,
            status: response.status(),
        });
    }
    Ok(())
}
