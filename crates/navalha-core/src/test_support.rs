use std::collections::VecDeque;
use std::sync::Mutex;

use anyhow::anyhow;

use crate::transport::{HttpRequest, HttpResponse, HttpTransport};

#[derive(Default)]
pub(crate) struct RecordingTransport {
    responses: Mutex<VecDeque<anyhow::Result<HttpResponse>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl RecordingTransport {
    pub(crate) fn new(responses: Vec<anyhow::Result<HttpResponse>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().expect("requests lock").clone()
    }
}

impl HttpTransport for RecordingTransport {
    fn execute(&self, request: &HttpRequest) -> anyhow::Result<HttpResponse> {
        self.requests
            .lock()
            .expect("requests lock")
            .push(request.clone());

        self.responses
            .lock()
            .expect("responses lock")
            .pop_front()
            .unwrap_or_else(|| Err(anyhow!("missing response")))
    }
}

pub(crate) fn json_response(status: u16, body: &str) -> anyhow::Result<HttpResponse> {
    Ok(HttpResponse {
        status,
        body: body.to_string(),
    })
}
