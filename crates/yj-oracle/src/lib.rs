//! Interpretation and session layer for Yijing divination.
//!
//! Wraps the pure engine in `yj-core` with:
//!
//! - an [`Interpreter`] that turns a cast into a structured reading through
//!   an external provider, with a persistent cache and in-flight coalescing;
//! - a [`Diviner`] that casts, resolves and starts interpretation early;
//! - a [`History`] of finished readings with Markdown and text export.
//!
//! Interpretation never fails from the caller's point of view. Missing keys,
//! network errors and malformed replies all degrade to a fixed fallback.

pub mod cache;
pub mod config;
pub mod error;
pub mod history;
pub mod interpretation;
pub mod interpreter;
pub mod pending;
pub mod prompt;
pub mod provider;
pub mod session;

pub use cache::{CacheStore, FileStore, MemoryStore};
pub use config::OracleConfig;
pub use error::{CacheError, ProviderError, SessionError, SessionResult};
pub use history::{DivinationRecord, History};
pub use interpretation::{Interpretation, LibraryCommentary, StructuredReply};
pub use interpreter::Interpreter;
pub use pending::PendingInterpretation;
pub use provider::{GeminiProvider, InterpretationProvider, ProviderRequest};
pub use session::{DivinationSession, Diviner};
