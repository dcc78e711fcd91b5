//! OpenAI-compatible streaming chat completions over HTTP.
//!
//! Works against any endpoint speaking the OpenAI wire format (OpenRouter in
//! the default configuration). Completion responses arrive as SSE `data:`
//! lines carrying JSON chunks, terminated by a `[DONE]` marker.

use std::collections::VecDeque;
use std::time::Duration;

use async_trait::async_trait;
use futures::stream::BoxStream;
use futures::StreamExt;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::error::GenerationError;
use crate::provider::{CompletionProvider, CompletionRequest, CompletionStream};

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct StreamChunk {
    choices: Vec<StreamChoice>,
}

#[derive(Debug, Deserialize)]
struct StreamChoice {
    delta: StreamDelta,
}

#[derive(Debug, Deserialize)]
struct StreamDelta {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ModelList {
    data: Vec<ModelEntry>,
}

#[derive(Debug, Deserialize)]
struct ModelEntry {
    id: String,
}

pub struct OpenAiProvider {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OpenAiProvider {
    pub fn new(base_url: String, api_key: String) -> Result<Self, GenerationError> {
        // No total request timeout: a completion stream legitimately runs
        // for minutes. Only connecting is bounded.
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| GenerationError::Transport(format!("failed to create HTTP client: {e}")))?;

        Ok(OpenAiProvider {
            client,
            base_url,
            api_key,
        })
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    async fn create_stream(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionStream, GenerationError> {
        let url = format!("{}/chat/completions", self.base_url);

        let body = ChatRequest {
            model: request.model,
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: request.system_prompt,
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: request.user_prompt,
                },
            ],
            temperature: request.temperature,
            stream: true,
        };

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(GenerationError::RateLimited);
        }
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(GenerationError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(decode_stream(response.bytes_stream().boxed()))
    }

    async fn list_models(&self) -> Result<Vec<String>, GenerationError> {
        let url = format!("{}/models", self.base_url);

        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(GenerationError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let list: ModelList = response.json().await?;
        Ok(list.data.into_iter().map(|entry| entry.id).collect())
    }
}

struct DecodeState {
    inner: BoxStream<'static, reqwest::Result<bytes::Bytes>>,
    buffer: SseBuffer,
    ready: VecDeque<String>,
    finished: bool,
}

/// Adapts a raw byte stream of SSE frames into a fragment stream. Lazy: no
/// bytes are pulled until the caller polls, and dropping the result drops
/// the connection.
fn decode_stream(inner: BoxStream<'static, reqwest::Result<bytes::Bytes>>) -> CompletionStream {
    let state = DecodeState {
        inner,
        buffer: SseBuffer::default(),
        ready: VecDeque::new(),
        finished: false,
    };

    Box::pin(futures::stream::unfold(state, |mut state| async move {
        loop {
            if let Some(fragment) = state.ready.pop_front() {
                return Some((Ok(fragment), state));
            }
            if state.finished {
                return None;
            }
            match state.inner.next().await {
                Some(Ok(bytes)) => {
                    let (fragments, done) = state.buffer.feed(&bytes);
                    state.ready.extend(fragments);
                    state.finished = done;
                }
                Some(Err(e)) => {
                    state.finished = true;
                    return Some((Err(GenerationError::StreamDecode(e.to_string())), state));
                }
                None => {
                    state.finished = true;
                }
            }
        }
    }))
}

/// Incremental decoder for SSE `data:` lines. Carries partial lines across
/// network chunk boundaries.
#[derive(Default)]
struct SseBuffer {
    pending: String,
}

enum DataLine {
    Delta(String),
    Done,
    Skip,
}

impl SseBuffer {
    /// Feeds raw bytes, returning the non-empty content deltas of any
    /// complete lines and whether the `[DONE]` marker was seen.
    fn feed(&mut self, bytes: &[u8]) -> (Vec<String>, bool) {
        self.pending.push_str(&String::from_utf8_lossy(bytes));

        let mut fragments = Vec::new();
        while let Some(position) = self.pending.find('\n') {
            let line: String = self.pending.drain(..=position).collect();
            match parse_data_line(line.trim_end_matches(['\n', '\r'])) {
                DataLine::Delta(text) => fragments.push(text),
                DataLine::Done => return (fragments, true),
                DataLine::Skip => {}
            }
        }
        (fragments, false)
    }
}

fn parse_data_line(line: &str) -> DataLine {
    let Some(payload) = line.strip_prefix("data:") else {
        // Blank keep-alive lines and SSE comments
        return DataLine::Skip;
    };
    let payload = payload.trim();
    if payload == "[DONE]" {
        return DataLine::Done;
    }

    match serde_json::from_str::<StreamChunk>(payload) {
        Ok(chunk) => {
            let delta = chunk
                .choices
                .into_iter()
                .next()
                .and_then(|choice| choice.delta.content)
                .unwrap_or_default();
            if delta.is_empty() {
                DataLine::Skip
            } else {
                DataLine::Delta(delta)
            }
        }
        Err(_) => DataLine::Skip,
    }
}
