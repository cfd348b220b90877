use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crudkit::{Envelope, HttpClient, HttpRequest, TransportError};

type Scripted = (Duration, Result<Envelope, TransportError>);

/// Scripted HTTP client: responses are consumed in request-issuance order,
/// each optionally delayed to exercise out-of-order resolution.
#[derive(Clone, Default)]
pub struct StubClient {
    responses: Arc<Mutex<VecDeque<Scripted>>>,
    requests: Arc<Mutex<Vec<HttpRequest>>>,
}

impl StubClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_ok(&self, data: Value) {
        self.push(Duration::ZERO, Ok(Envelope::ok(data)));
    }

    pub fn push_delayed_ok(&self, delay_ms: u64, data: Value) {
        self.push(Duration::from_millis(delay_ms), Ok(Envelope::ok(data)));
    }

    pub fn push_fail(&self, message: &str) {
        self.push(Duration::ZERO, Ok(Envelope::fail(message)));
    }

    #[allow(dead_code)]
    pub fn push_response(&self, response: Result<Envelope, TransportError>) {
        self.push(Duration::ZERO, response);
    }

    #[allow(dead_code)]
    pub fn push_network_error(&self, message: &str) {
        self.push(
            Duration::ZERO,
            Err(TransportError::Network(message.to_string())),
        );
    }

    fn push(&self, delay: Duration, response: Result<Envelope, TransportError>) {
        self.responses
            .lock()
            .unwrap()
            .push_back((delay, response));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_url(&self) -> Option<String> {
        self.requests
            .lock()
            .unwrap()
            .last()
            .map(|request| request.url.clone())
    }
}

#[async_trait]
impl HttpClient for StubClient {
    async fn request(&self, request: HttpRequest) -> Result<Envelope, TransportError> {
        self.requests.lock().unwrap().push(request);
        let (delay, response) = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or((Duration::ZERO, Ok(Envelope::fail("no scripted response"))));
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        response
    }
}
