//! Divination history: finished readings with Markdown and text export.

pub mod journal;
pub mod record;

pub use journal::History;
pub use record::DivinationRecord;
