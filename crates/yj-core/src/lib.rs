//! Core engine for Yijing divination.
//!
//! Provides the three-coin casting model, line classification, the static
//! King Wen hexagram table with per-hexagram line texts, and resolution of a
//! six-line casting into its primary and relating hexagrams.
//!
//! Everything in this crate is synchronous and free of I/O.

pub mod cast;
pub mod detail;
pub mod error;
pub mod line;
pub mod pattern;
pub mod resolve;
pub mod table;

pub use cast::{Casting, cast, toss_line};
pub use detail::{HexagramDetail, LineNature, LineText, lookup_detail_by_number};
pub use error::{CoreError, CoreResult};
pub use line::{Coin, LineResult, LineValue};
pub use pattern::Pattern;
pub use resolve::{Resolution, resolve};
pub use table::{Hexagram, by_number, lookup_by_binary, lookup_pattern, require_number};
