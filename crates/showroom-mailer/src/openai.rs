//! OpenAI-compatible streaming chat completions backend.

use async_trait::async_trait;
use futures::channel::mpsc;
use futures::StreamExt;
use serde::{Deserialize, Serialize};

use crate::{ChunkStream, CompletionBackend, GenerationError, MailerSettings};

/// Request body for chat completions (OpenAI format, streaming).
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    stream: bool,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// One server-sent event frame: `choices[0].delta.content`.
#[derive(Debug, Deserialize)]
struct StreamChunk {
    #[serde(default)]
    choices: Vec<StreamChoice>,
}

#[derive(Debug, Deserialize)]
struct StreamChoice {
    #[serde(default)]
    delta: Delta,
}

#[derive(Debug, Default, Deserialize)]
struct Delta {
    #[serde(default)]
    content: Option<String>,
}

/// Buffers raw SSE bytes and yields complete `\n`-terminated lines.
/// Bytes are only decoded per complete line, so a multi-byte character
/// split across network frames stays buffered until its line arrives.
struct LineBuffer {
    pending: Vec<u8>,
}

impl LineBuffer {
    fn new() -> Self {
        Self {
            pending: Vec::new(),
        }
    }

    fn push(&mut self, bytes: &[u8]) {
        self.pending.extend_from_slice(bytes);
    }

    fn next_line(&mut self) -> Option<String> {
        let pos = self.pending.iter().position(|&b| b == b'\n')?;
        let line: Vec<u8> = self.pending.drain(..=pos).collect();
        Some(String::from_utf8_lossy(&line).into_owned())
    }
}

/// HTTP backend speaking the OpenAI streaming chat-completions wire
/// format (`data:` SSE lines terminated by `[DONE]`).
pub struct OpenAiBackend {
    client: reqwest::Client,
    inference_url: String,
    model: String,
    api_key: Option<String>,
}

impl OpenAiBackend {
    /// New backend against an explicit endpoint and model.
    #[must_use]
    pub fn new(inference_url: String, model: String, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            inference_url,
            model,
            api_key,
        }
    }

    /// Backend configured from resolved mailer settings.
    #[must_use]
    pub fn from_settings(settings: &MailerSettings) -> Self {
        Self::new(
            settings.resolved_inference_url(),
            settings.resolved_model(),
            settings.api_key.clone(),
        )
    }
}

#[async_trait]
impl CompletionBackend for OpenAiBackend {
    async fn stream_completion(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<ChunkStream, GenerationError> {
        let body = ChatCompletionRequest {
            model: &self.model,
            stream: true,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
        };

        let mut req = self
            .client
            .post(&self.inference_url)
            .json(&body)
            .header("Content-Type", "application/json");
        if let Some(ref key) = self.api_key {
            req = req.header("Authorization", format!("Bearer {key}"));
        }

        let res = req.send().await?;
        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(GenerationError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let (tx, rx) = mpsc::unbounded();
        let mut frames = res.bytes_stream();
        tokio::spawn(async move {
            // Carry over partial lines between network frames.
            let mut pending = LineBuffer::new();
            while let Some(frame) = frames.next().await {
                let bytes = match frame {
                    Ok(bytes) => bytes,
                    Err(err) => {
                        let _ = tx.unbounded_send(Err(GenerationError::Stream(err.to_string())));
                        return;
                    }
                };
                pending.push(&bytes);
                while let Some(line) = pending.next_line() {
                    let Some(data) = line.trim().strip_prefix("data:") else {
                        continue;
                    };
                    let data = data.trim();
                    if data == "[DONE]" {
                        return;
                    }
                    match serde_json::from_str::<StreamChunk>(data) {
                        Ok(chunk) => {
                            let text = chunk
                                .choices
                                .into_iter()
                                .next()
                                .and_then(|choice| choice.delta.content);
                            if let Some(text) = text {
                                if tx.unbounded_send(Ok(text)).is_err() {
                                    // Receiver dropped; stop reading.
                                    return;
                                }
                            }
                        }
                        Err(err) => {
                            let _ = tx.unbounded_send(Err(GenerationError::Stream(format!(
                                "bad stream frame: {err}"
                            ))));
                            return;
                        }
                    }
                }
            }
        });

        Ok(Box::pin(rx))
    }
}
