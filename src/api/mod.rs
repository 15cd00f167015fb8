//! REST client untuk backend dashboard.

pub mod envelope;

use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::RwLock;
use std::time::Duration;

use crate::config::ApiConfig;
use crate::errors::{AppError, AppResult};
use crate::{log_debug, log_request, log_warn};

pub use envelope::{decode_record, Page};

/// Pasangan query string yang dikirim ke endpoint list.
pub type QueryPairs = Vec<(String, String)>;

pub struct ApiClient {
    http: Client,
    base_url: String,
    token: RwLock<Option<String>>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> AppResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| AppError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: RwLock::new(None),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn set_token(&self, token: Option<String>) {
        if let Ok(mut guard) = self.token.write() {
            *guard = token;
        }
    }

    pub fn has_token(&self) -> bool {
        self.token.read().map(|t| t.is_some()).unwrap_or(false)
    }

    fn bearer(&self) -> Option<String> {
        self.token.read().ok().and_then(|t| t.clone())
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<Value>,
    ) -> AppResult<Value> {
        let url = format!("{}{}", self.base_url, path);
        let request_id = uuid::Uuid::new_v4().to_string();

        log_request!(
            method.as_str(),
            path,
            &serde_json::json!({ "request_id": request_id, "query": query, "body": body })
        );

        let mut request = self
            .http
            .request(method.clone(), &url)
            .header("X-Request-Id", &request_id);

        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(token) = self.bearer() {
            request = request.bearer_auth(token);
        }
        if let Some(body) = &body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            let msg = if e.is_timeout() {
                "Koneksi timeout".to_string()
            } else {
                e.to_string()
            };
            log_warn!("API", "request gagal terkirim", serde_json::json!({
                "request_id": request_id,
                "path": path,
                "error": msg
            }));
            AppError::Network(msg)
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| AppError::Network(e.to_string()))?;

        if !status.is_success() {
            let message = error_message(&text);
            log_warn!("API", "server menolak request", serde_json::json!({
                "request_id": request_id,
                "method": method.as_str(),
                "path": path,
                "status": status.as_u16(),
                "error": message
            }));
            return Err(AppError::from_status(status.as_u16(), message));
        }

        log_debug!("API", "response diterima", serde_json::json!({
            "request_id": request_id,
            "status": status.as_u16(),
            "bytes": text.len()
        }));

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(String, String)]) -> AppResult<T> {
        let value = self.send(Method::GET, path, query, None).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Ambil satu halaman list dalam bentuk mentah (belum di-decode ke tipe entitas).
    pub async fn get_page(&self, path: &str, query: &[(String, String)]) -> AppResult<Page<Value>> {
        let value = self.send(Method::GET, path, query, None).await?;
        Page::from_response(value)
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> AppResult<T> {
        self.with_body(Method::POST, path, body).await
    }

    pub async fn put<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> AppResult<T> {
        self.with_body(Method::PUT, path, body).await
    }

    pub async fn patch<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> AppResult<T> {
        self.with_body(Method::PATCH, path, body).await
    }

    pub async fn delete(&self, path: &str) -> AppResult<()> {
        self.send(Method::DELETE, path, &[], None).await?;
        Ok(())
    }

    async fn with_body<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> AppResult<T> {
        let body = serde_json::to_value(body)?;
        let value = self.send(method, path, &[], Some(body)).await?;
        Ok(serde_json::from_value(value)?)
    }
}

/// Ambil pesan error dari body `{ "error": "..." }` (atau `message`).
fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["error", "message"].iter().find_map(|key| {
        value
            .get(*key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
    })
}
