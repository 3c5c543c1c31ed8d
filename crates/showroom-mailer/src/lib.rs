//! showroom-mailer: AI-assisted sales email drafting.
//!
//! An [`EmailComposer`] drives one single-flight streaming generation
//! per UI session: chunks from the completion backend are
//! appended to a shared observable buffer under a lock, and the session
//! moves through `Idle -> Streaming -> Done | Failed`.
//!
//! The completion backend is an injected capability
//! ([`CompletionBackend`]), not a global client, so tests run against a
//! scripted fake and the HTTP backend stays at the edge.

mod backend;
mod error;
mod openai;
mod prompt;
mod session;
mod settings;

pub use backend::{ChunkStream, CompletionBackend};
pub use error::GenerationError;
pub use openai::OpenAiBackend;
pub use prompt::{product_catalog, Product, PromptContext};
pub use session::{EmailComposer, GenerationStatus};
pub use settings::MailerSettings;
