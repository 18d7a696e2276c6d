pub mod appointments;
pub mod auth;
pub mod cash;
pub mod clients;
pub mod insights;
pub mod pos;
pub mod public;
pub mod services;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::transport::{HttpMethod, HttpRequest, HttpTransport};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiSession {
    base_url: String,
    token: Option<String>,
}

impl ApiSession {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            token: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/api{path}", self.base_url)
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: anyhow::Error,
    },
    #[error(
        "server rejected request (status {status}): {}",
        detail.as_deref().unwrap_or("no detail provided")
    )]
    Rejected {
        url: String,
        status: u16,
        detail: Option<String>,
    },
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    pub fn server_detail(&self) -> Option<&str> {
        match self {
            Self::Rejected { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Rejected { status: 401, .. })
    }
}

fn send<T: DeserializeOwned>(
    transport: &dyn HttpTransport,
    session: &ApiSession,
    method: HttpMethod,
    path: &str,
    body: Option<serde_json::Value>,
) -> Result<T, ApiError> {
    let url = session.endpoint(path);
    let request = HttpRequest {
        method,
        url: url.clone(),
        bearer: session.token.clone(),
        body,
    };

    let response = transport
        .execute(&request)
        .map_err(|source| ApiError::Transport {
            url: url.clone(),
            source,
        })?;

    if !response.is_success() {
        return Err(ApiError::Rejected {
            url,
            status: response.status,
            detail: extract_detail(&response.body),
        });
    }

    serde_json::from_str(&response.body).map_err(|source| ApiError::Decode { url, source })
}

pub(crate) fn get<T: DeserializeOwned>(
    transport: &dyn HttpTransport,
    session: &ApiSession,
    path: &str,
) -> Result<T, ApiError> {
    send(transport, session, HttpMethod::Get, path, None)
}

pub(crate) fn post<T: DeserializeOwned, B: Serialize>(
    transport: &dyn HttpTransport,
    session: &ApiSession,
    path: &str,
    body: &B,
) -> Result<T, ApiError> {
    let body = encode_body(session, path, body)?;
    send(transport, session, HttpMethod::Post, path, Some(body))
}

pub(crate) fn put<T: DeserializeOwned, B: Serialize>(
    transport: &dyn HttpTransport,
    session: &ApiSession,
    path: &str,
    body: &B,
) -> Result<T, ApiError> {
    let body = encode_body(session, path, body)?;
    send(transport, session, HttpMethod::Put, path, Some(body))
}

pub(crate) fn delete<T: DeserializeOwned>(
    transport: &dyn HttpTransport,
    session: &ApiSession,
    path: &str,
) -> Result<T, ApiError> {
    send(transport, session, HttpMethod::Delete, path, None)
}

fn encode_body<B: Serialize>(
    session: &ApiSession,
    path: &str,
    body: &B,
) -> Result<serde_json::Value, ApiError> {
    serde_json::to_value(body).map_err(|source| ApiError::Decode {
        url: session.endpoint(path),
        source,
    })
}

/// Backend errors carry a human-readable `detail` field; FastAPI validation
/// errors put a list there instead, which is not worth surfacing verbatim.
fn extract_detail(body: &str) -> Option<String> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("detail")
                .and_then(|detail| detail.as_str())
                .map(str::to_string)
        })
}
