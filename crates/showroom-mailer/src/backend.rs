//! Streaming completion capability.

use std::pin::Pin;

use async_trait::async_trait;
use futures::Stream;

use crate::GenerationError;

/// A finite sequence of text chunks. Not restartable: every
/// [`CompletionBackend::stream_completion`] call opens a fresh stream,
/// and a stream may fail mid-way.
pub type ChunkStream = Pin<Box<dyn Stream<Item = Result<String, GenerationError>> + Send>>;

/// Text-generation capability consumed by the session. Injected
/// explicitly; the session never reaches for a global client.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Open a completion stream for the given prompts.
    ///
    /// # Errors
    /// When the stream cannot be opened at all (request or auth fault).
    async fn stream_completion(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<ChunkStream, GenerationError>;
}
