//! Generation session state machine.

use std::sync::Arc;

use futures::StreamExt;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use crate::{CompletionBackend, GenerationError, PromptContext};

/// Lifecycle of one generation: `Idle -> Streaming -> Done | Failed`,
/// with a `Streaming -> Streaming` self-transition per received chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationStatus {
    /// No generation requested yet.
    Idle,
    /// A background stream is appending chunks.
    Streaming,
    /// The stream ended normally.
    Done,
    /// The stream failed; the message is surfaced once, not retried.
    Failed(String),
}

/// Shared observable state. The buffer is the only cross-task
/// shared-mutable path in the system; every read-append-write runs
/// under the lock because the UI reads it for rendering while the
/// background task appends.
#[derive(Debug)]
struct ComposerState {
    status: GenerationStatus,
    buffer: String,
    /// Bumped on every `start()`; a consumer whose epoch no longer
    /// matches has been superseded and must drop its writes.
    epoch: u64,
}

/// Drives at most one logically-current streaming generation per UI
/// session. Starting a new generation supersedes the previous one: the
/// buffer is reset and late chunks from the old stream are discarded
/// instead of interleaving into the fresh draft.
pub struct EmailComposer {
    backend: Arc<dyn CompletionBackend>,
    state: Arc<RwLock<ComposerState>>,
}

impl EmailComposer {
    /// New idle composer over an injected backend.
    #[must_use]
    pub fn new(backend: Arc<dyn CompletionBackend>) -> Self {
        Self {
            backend,
            state: Arc::new(RwLock::new(ComposerState {
                status: GenerationStatus::Idle,
                buffer: String::new(),
                epoch: 0,
            })),
        }
    }

    /// Current `(status, buffer)` view for rendering.
    pub async fn snapshot(&self) -> (GenerationStatus, String) {
        let g = self.state.read().await;
        (g.status.clone(), g.buffer.clone())
    }

    /// Begin a streaming generation for `ctx`.
    ///
    /// On success the buffer is cleared, the status moves to
    /// `Streaming`, and the returned handle resolves when the consumer
    /// task finishes (tests await it; the UI simply drops it).
    ///
    /// # Errors
    /// [`GenerationError::MissingCustomer`] when no target record is
    /// selected; the session transitions to `Failed` and no stream is
    /// opened.
    pub async fn start(&self, ctx: &PromptContext) -> Result<JoinHandle<()>, GenerationError> {
        let (system_prompt, user_prompt) = match ctx.prompts() {
            Ok(prompts) => prompts,
            Err(err) => {
                let mut g = self.state.write().await;
                g.status = GenerationStatus::Failed(err.to_string());
                tracing::warn!(error = %err, "generation rejected before streaming");
                return Err(err);
            }
        };

        let epoch = {
            let mut g = self.state.write().await;
            g.epoch += 1;
            g.buffer.clear();
            g.status = GenerationStatus::Streaming;
            g.epoch
        };
        tracing::debug!(epoch, "generation started");

        let backend = Arc::clone(&self.backend);
        let state = Arc::clone(&self.state);
        Ok(tokio::spawn(async move {
            consume(backend, state, epoch, &system_prompt, &user_prompt).await;
        }))
    }
}

/// Background consumer: pulls chunks until the stream ends or fails.
/// Writes are guarded by the epoch so a superseded consumer cannot
/// touch the current draft.
async fn consume(
    backend: Arc<dyn CompletionBackend>,
    state: Arc<RwLock<ComposerState>>,
    epoch: u64,
    system_prompt: &str,
    user_prompt: &str,
) {
    let mut stream = match backend.stream_completion(system_prompt, user_prompt).await {
        Ok(stream) => stream,
        Err(err) => {
            fail(&state, epoch, &err).await;
            return;
        }
    };

    while let Some(item) = stream.next().await {
        match item {
            Ok(chunk) => {
                let mut g = state.write().await;
                if g.epoch != epoch {
                    tracing::debug!(epoch, "superseded stream dropped");
                    return;
                }
                g.buffer.push_str(&chunk);
            }
            Err(err) => {
                // Partial output is preserved; only the status flips.
                fail(&state, epoch, &err).await;
                return;
            }
        }
    }

    let mut g = state.write().await;
    if g.epoch == epoch {
        g.status = GenerationStatus::Done;
        tracing::debug!(epoch, chars = g.buffer.len(), "generation finished");
    }
}

async fn fail(state: &Arc<RwLock<ComposerState>>, epoch: u64, err: &GenerationError) {
    let mut g = state.write().await;
    if g.epoch == epoch {
        g.status = GenerationStatus::Failed(err.to_string());
        tracing::warn!(epoch, error = %err, "generation failed");
    }
}
