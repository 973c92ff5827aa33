use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use serde_json::json;
use zava_core::api::{AgentError, AgentStream, Partial, PartialStream};

use super::lines::LineBuffer;

const BODY_PREVIEW_LIMIT: usize = 512;

/// Remote agent reached over HTTP.
///
/// The request is `POST {url}` with `{query, contextId, instructions?}`; the
/// response body is one JSON partial per line. Lines may carry an SSE style
/// `data:` prefix.
#[derive(Clone)]
pub struct HttpAgent {
    http: reqwest::Client,
    url: String,
    api_key: String,
    instructions: Option<String>,
}

impl HttpAgent {
    pub fn new(
        url: impl Into<String>,
        api_key: impl Into<String>,
        timeout_ms: u64,
        instructions: Option<String>,
    ) -> anyhow::Result<Self> {
        let url = url.into();
        if url.trim().is_empty() {
            anyhow::bail!("http agent requires a url");
        }
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()?;
        Ok(Self {
            http,
            url,
            api_key: api_key.into(),
            instructions,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl AgentStream for HttpAgent {
    fn name(&self) -> &str {
        "http"
    }

    async fn stream(&self, query: &str, context_id: &str) -> Result<PartialStream, AgentError> {
        let mut payload = json!({
            "query": query,
            "contextId": context_id,
        });
        if let Some(instructions) = &self.instructions {
            payload["instructions"] = json!(instructions);
        }

        let mut req = self.http.post(&self.url).json(&payload);
        if !self.api_key.trim().is_empty() {
            req = req.bearer_auth(&self.api_key);
        }

        tracing::debug!(
            target: "zava.agent",
            agent = "http",
            url = %self.url,
            context_id = %context_id,
            "opening remote agent stream"
        );

        let resp = req
            .send()
            .await
            .map_err(|e| AgentError::Request(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(AgentError::Status {
                status: status.as_u16(),
                body: preview_body(&body),
            });
        }

        let mut bytes = resp.bytes_stream();
        let stream = async_stream::stream! {
            let mut buf = LineBuffer::default();
            while let Some(chunk) = bytes.next().await {
                match chunk {
                    Ok(b) => {
                        for line in buf.push(&b) {
                            if let Some(item) = parse_line(&line) {
                                yield item;
                            }
                        }
                    }
                    Err(e) => {
                        yield Err(AgentError::Stream(e.to_string()));
                        return;
                    }
                }
            }
            if let Some(item) = buf.finish().as_deref().and_then(parse_line) {
                yield item;
            }
        };

        Ok(stream.boxed())
    }
}

/// Blank lines, SSE comments and `[DONE]` markers carry no partial.
fn parse_line(line: &str) -> Option<Result<Partial, AgentError>> {
    let line = line.trim();
    let line = line.strip_prefix("data:").map(str::trim).unwrap_or(line);
    if line.is_empty() || line.starts_with(':') || line == "[DONE]" {
        return None;
    }
    Some(serde_json::from_str::<Partial>(line).map_err(|e| {
        AgentError::Decode(format!("{e} | line={}", preview_body(line)))
    }))
}

fn preview_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "<empty body>".to_string();
    }

    let mut out: String = trimmed.chars().take(BODY_PREVIEW_LIMIT).collect();
    if trimmed.chars().count() > BODY_PREVIEW_LIMIT {
        out.push_str("...");
    }
    out
}
