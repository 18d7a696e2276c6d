use std::collections::VecDeque;
use std::fs;
use std::path::Path;
use std::sync::Mutex;

use anyhow::anyhow;
use navalha_core::session::{StoredSession, store_session};
use navalha_core::transport::{HttpRequest, HttpResponse, HttpTransport};

pub static ENV_LOCK: Mutex<()> = Mutex::new(());

#[derive(Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<anyhow::Result<HttpResponse>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn new(responses: Vec<anyhow::Result<HttpResponse>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().expect("requests lock").clone()
    }
}

impl HttpTransport for ScriptedTransport {
    fn execute(&self, request: &HttpRequest) -> anyhow::Result<HttpResponse> {
        self.requests
            .lock()
            .expect("requests lock")
            .push(request.clone());

        self.responses
            .lock()
            .expect("responses lock")
            .pop_front()
            .unwrap_or_else(|| Err(anyhow!("missing scripted response")))
    }
}

pub fn response(status: u16, body: &str) -> anyhow::Result<HttpResponse> {
    Ok(HttpResponse {
        status,
        body: body.to_string(),
    })
}

pub fn write_valid_config(home: &Path) {
    let config_dir = home.join(".config").join("navalha");
    fs::create_dir_all(&config_dir).expect("create config dir");
    fs::write(
        config_dir.join("config.toml"),
        r#"
version = 1

[api]
base_url = "http://localhost:8000"
"#,
    )
    .expect("write config");
}

#[allow(dead_code)]
pub fn write_logged_in_session(home: &Path) {
    let config_dir = home.join(".config").join("navalha");
    fs::create_dir_all(&config_dir).expect("create config dir");
    store_session(
        &config_dir,
        StoredSession {
            email: "admin@barbearia.com".to_string(),
            access_token: "jwt-abc".to_string(),
            saved_at: "2026-02-01T10:00:00Z".to_string(),
        },
    )
    .expect("store session");
}
