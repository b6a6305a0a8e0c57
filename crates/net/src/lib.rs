//! Model-endpoint client: blocking streamed chat-completion requests.
//!
//! The endpoint speaks the common chat-completions protocol: a JSON request
//! with `stream: true`, answered by `data:`-prefixed server-sent-event lines
//! each carrying a delta chunk. Chunks are forwarded to a callback as they
//! arrive, so the parser downstream can emit hints before the reply ends.

mod config;
mod error;

use std::io::{BufRead, BufReader};
use std::time::Duration;

pub use config::ModelConfig;
pub use error::NetError;

/// One model invocation: a fixed system prompt plus the canonicalized block.
#[derive(Debug)]
pub struct ModelRequest<'a> {
    pub system_prompt: &'a str,
    pub user_content: &'a str,
}

/// Streaming transport seam; the orchestrator only sees this trait, so tests
/// substitute scripted transports for the HTTP client.
pub trait ModelTransport {
    fn stream(
        &self,
        request: &ModelRequest<'_>,
        on_chunk: &mut dyn FnMut(&str),
    ) -> Result<(), NetError>;
}

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const READ_TIMEOUT: Duration = Duration::from_secs(120);

pub struct HttpModelTransport {
    config: ModelConfig,
    agent: ureq::Agent,
}

impl HttpModelTransport {
    pub fn new(config: ModelConfig) -> Result<Self, NetError> {
        config.validate()?;
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(CONNECT_TIMEOUT)
            .timeout_read(READ_TIMEOUT)
            .user_agent("hoverlay/0.1")
            .build();
        Ok(HttpModelTransport { config, agent })
    }
}

impl ModelTransport for HttpModelTransport {
    fn stream(
        &self,
        request: &ModelRequest<'_>,
        on_chunk: &mut dyn FnMut(&str),
    ) -> Result<(), NetError> {
        let body = build_request_body(&self.config, request);
        log::debug!("model request to {} ({} bytes)", self.config.url, request.user_content.len());

        let response = self
            .agent
            .post(&self.config.url)
            .set("Authorization", &format!("Bearer {}", self.config.key))
            .set("Accept", "text/event-stream")
            .send_json(body);

        match response {
            Ok(response) => read_sse(BufReader::new(response.into_reader()), on_chunk),
            Err(ureq::Error::Status(code, response)) => {
                let body = response.into_string().unwrap_or_default();
                Err(NetError::from_status(code, &body))
            }
            Err(ureq::Error::Transport(transport)) => Err(classify_transport(&transport)),
        }
    }
}

fn classify_transport(transport: &ureq::Transport) -> NetError {
    use std::error::Error;
    match transport.kind() {
        ureq::ErrorKind::Dns => NetError::Dns,
        ureq::ErrorKind::ConnectionFailed => NetError::ConnectionReset,
        ureq::ErrorKind::Io => transport
            .source()
            .and_then(|source| source.downcast_ref::<std::io::Error>())
            .map(NetError::from_io)
            .unwrap_or_else(|| NetError::Transport(transport.to_string())),
        _ => NetError::Transport(transport.to_string()),
    }
}

/// Builds the chat-completions request body. `additional_arguments` are
/// merged last and may override the defaults.
fn build_request_body(config: &ModelConfig, request: &ModelRequest<'_>) -> serde_json::Value {
    let mut body = serde_json::json!({
        "model": config.model,
        "stream": true,
        "response_format": { "type": "json_object" },
        "messages": [
            { "role": "system", "content": request.system_prompt },
            { "role": "user", "content": request.user_content },
        ],
    });
    if let (Some(arguments), Some(map)) = (&config.additional_arguments, body.as_object_mut()) {
        for (key, value) in arguments {
            map.insert(key.clone(), value.clone());
        }
    }
    body
}

/// Reads server-sent-event lines, forwarding each delta's text content.
/// Replies that are not event streams (endpoint ignored `stream: true`) fall
/// back to the whole-body message content.
fn read_sse<R: BufRead>(mut reader: R, on_chunk: &mut dyn FnMut(&str)) -> Result<(), NetError> {
    let mut line = String::new();
    let mut saw_event = false;
    let mut rest = String::new();

    loop {
        line.clear();
        let n = reader
            .read_line(&mut line)
            .map_err(|e| NetError::from_io(&e))?;
        if n == 0 {
            break;
        }
        let trimmed = line.trim();
        if let Some(payload) = trimmed.strip_prefix("data:") {
            saw_event = true;
            let payload = payload.trim();
            if payload == "[DONE]" {
                break;
            }
            match serde_json::from_str::<serde_json::Value>(payload) {
                Ok(event) => {
                    if let Some(content) = event["choices"][0]["delta"]["content"].as_str() {
                        on_chunk(content);
                    }
                }
                Err(err) => log::warn!("unparseable stream event: {err}; raw: {payload}"),
            }
        } else if !trimmed.is_empty() {
            rest.push_str(&line);
        }
    }

    if !saw_event && !rest.trim().is_empty() {
        // Whole-body JSON reply.
        let mut tail = String::new();
        reader
            .read_to_string(&mut tail)
            .map_err(|e| NetError::from_io(&e))?;
        rest.push_str(&tail);
        match serde_json::from_str::<serde_json::Value>(rest.trim()) {
            Ok(reply) => {
                if let Some(content) = reply["choices"][0]["message"]["content"].as_str() {
                    on_chunk(content);
                }
            }
            Err(err) => return Err(NetError::Transport(format!("unparseable reply: {err}"))),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{ModelConfig, ModelRequest, build_request_body, read_sse};

    fn config() -> ModelConfig {
        ModelConfig::from_toml_str(
            r#"
            key = "sk-test"
            url = "https://api.example.com/v1/chat/completions"
            model = "annotator-small"

            [additional_arguments]
            temperature = 0.0
            "#,
        )
        .unwrap()
    }

    #[test]
    fn request_body_carries_prompt_schema_and_extra_arguments() {
        let body = build_request_body(
            &config(),
            &ModelRequest {
                system_prompt: "sys",
                user_content: "<id=0/>x</>",
            },
        );
        assert_eq!(body["model"], "annotator-small");
        assert_eq!(body["stream"], true);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "<id=0/>x</>");
        assert_eq!(body["temperature"], 0.0);
        assert_eq!(body["response_format"]["type"], "json_object");
    }

    #[test]
    fn sse_lines_are_forwarded_in_order_until_done() {
        let feed = concat!(
            "data: {\"choices\":[{\"delta\":{\"content\":\"{\\\"hoverHintList\\\":[\"}}]}\n",
            "\n",
            "data: {\"choices\":[{\"delta\":{\"content\":\"{}\"}}]}\n",
            "data: [DONE]\n",
            "data: {\"choices\":[{\"delta\":{\"content\":\"ignored\"}}]}\n",
        );
        let mut chunks = Vec::new();
        read_sse(feed.as_bytes(), &mut |c| chunks.push(c.to_string())).unwrap();
        assert_eq!(chunks, vec!["{\"hoverHintList\":[", "{}"]);
    }

    #[test]
    fn events_without_content_are_skipped() {
        let feed = "data: {\"choices\":[{\"delta\":{\"role\":\"assistant\"}}]}\ndata: [DONE]\n";
        let mut chunks = Vec::new();
        read_sse(feed.as_bytes(), &mut |c| chunks.push(c.to_string())).unwrap();
        assert!(chunks.is_empty());
    }

    #[test]
    fn non_streamed_reply_falls_back_to_message_content() {
        let feed = "{\"choices\":[{\"message\":{\"content\":\"whole\"}}]}\n";
        let mut chunks = Vec::new();
        read_sse(feed.as_bytes(), &mut |c| chunks.push(c.to_string())).unwrap();
        assert_eq!(chunks, vec!["whole"]);
    }
}
