//! Reply service backed by a remote HTTP endpoint.
//!
//! Posts `{"userText": ...}` and expects `{"replyText": ...}`. Response
//! parsing lives in `parse_reply` so it can be tested without a server.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::{ChatError, ReplyError};
use crate::responder::ReplyService;
use crate::types::{ReplyRequest, ReplyResponse};

const CONNECT_TIMEOUT_SECS: u64 = 5;

pub struct HttpReplyService {
    http: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl HttpReplyService {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, ChatError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| ChatError::Config(format!("http client: {}", e)))?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
            timeout,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ReplyService for HttpReplyService {
    async fn generate_reply(&self, request: &ReplyRequest) -> Result<ReplyResponse, ReplyError> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| self.classify(e))?;

        parse_reply(status, &body)
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

impl HttpReplyService {
    fn classify(&self, err: reqwest::Error) -> ReplyError {
        if err.is_timeout() {
            ReplyError::Timeout(self.timeout)
        } else {
            ReplyError::Upstream(err.to_string())
        }
    }
}

/// Interpret a reply-service HTTP response.
pub(crate) fn parse_reply(status: u16, body: &str) -> Result<ReplyResponse, ReplyError> {
    if !(200..300).contains(&status) {
        return Err(ReplyError::Upstream(format!("status {}: {}", status, body)));
    }
    serde_json::from_str(body)
        .map_err(|e| ReplyError::Upstream(format!("malformed reply body: {}", e)))
}
