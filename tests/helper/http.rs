//! Scripted HTTP client for testing

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::{Request, StatusCode};

use atlassian_version_collector::marketplace::{HttpClient, HttpResponse};

enum Scripted {
    Response(StatusCode, String),
    Failure(String),
}

/// Returns queued responses in call order and records every requested URL
#[derive(Default)]
pub struct ScriptedClient {
    script: Mutex<VecDeque<Scripted>>,
    requested: Mutex<Vec<String>>,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, status: StatusCode, body: &str) -> Self {
        self.push(Scripted::Response(status, body.to_string()))
    }

    pub fn fail(self, message: &str) -> Self {
        self.push(Scripted::Failure(message.to_string()))
    }

    pub fn requested_urls(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }

    fn push(self, scripted: Scripted) -> Self {
        self.script.lock().unwrap().push_back(scripted);
        self
    }
}

#[async_trait]
impl HttpClient for ScriptedClient {
    async fn execute(&self, request: Request) -> anyhow::Result<HttpResponse> {
        let url = request.url().to_string();
        self.requested.lock().unwrap().push(url.clone());

        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some(Scripted::Response(status, body)) => Ok(HttpResponse::new(status, body)),
            Some(Scripted::Failure(message)) => Err(anyhow::anyhow!(message)),
            None => Err(anyhow::anyhow!("unexpected request: {url}")),
        }
    }
}
