use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, RequestInit, Response, window};

use gridfall_core::net::{Action, ActionRequest, StateResponse};

#[derive(Debug)]
pub enum FetchError {
    /// The browser fetch layer threw, or `window` is missing.
    Js(String),
    /// The server answered with a non-2xx status.
    Http(u16),
    Json(serde_json::Error),
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Js(e) => write!(f, "fetch error: {e}"),
            Self::Http(status) => write!(f, "server answered with status {status}"),
            Self::Json(e) => write!(f, "JSON error: {e}"),
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Js(_) | Self::Http(_) => None,
            Self::Json(ref e) => Some(e),
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl From<JsValue> for FetchError {
    fn from(value: JsValue) -> Self {
        Self::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<FetchError> for JsValue {
    fn from(err: FetchError) -> Self {
        Self::from_str(&err.to_string())
    }
}

/// The two-endpoint HTTP contract with the game server. An empty base URL
/// means same-origin relative requests.
pub struct Api {
    base_url: String,
}

impl Api {
    pub const fn new(base_url: String) -> Self {
        Self { base_url }
    }

    pub async fn fetch_state(&self) -> Result<StateResponse, FetchError> {
        let text = self.request("/api/state", None).await?;
        Ok(serde_json::from_str(&text)?)
    }

    pub async fn send_action(&self, action: Action) -> Result<(), FetchError> {
        let body = serde_json::to_string(&ActionRequest { action })?;
        self.request("/api/action", Some(&body)).await?;
        Ok(())
    }

    /// GET without a body, POST with one.
    async fn request(&self, path: &str, body: Option<&str>) -> Result<String, FetchError> {
        let window = window().ok_or_else(|| FetchError::Js("no global `window`".into()))?;

        let options = RequestInit::new();
        if let Some(body) = body {
            options.set_method("POST");
            let headers = Headers::new()?;
            headers.set("Content-Type", "application/json")?;
            options.set_headers(&JsValue::from(headers));
            options.set_body(&JsValue::from_str(body));
        }

        let url = format!("{}{path}", self.base_url);
        let response = JsFuture::from(window.fetch_with_str_and_init(&url, &options)).await?;
        let response: Response = response
            .dyn_into()
            .map_err(|_| FetchError::Js("fetch did not produce a Response".into()))?;
        if !response.ok() {
            return Err(FetchError::Http(response.status()));
        }

        let text = JsFuture::from(response.text()?).await?;
        Ok(text.as_string().unwrap_or_default())
    }
}
