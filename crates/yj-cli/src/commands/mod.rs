pub mod cast;
pub mod history;
pub mod list;
pub mod show;
pub mod study;

use std::path::PathBuf;

use yj_core::{Hexagram, require_number};
use yj_oracle::OracleConfig;

/// Configuration from the environment with command-line overrides applied.
fn oracle_config(offline: bool, cache: Option<PathBuf>, seed: Option<u64>) -> OracleConfig {
    let mut config = OracleConfig::from_env();
    if offline {
        config = config.offline();
    }
    if let Some(path) = cache {
        config = config.with_cache_path(path);
    }
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }
    config
}

/// History file location: explicit path, `YJ_HISTORY`, or the user data dir.
fn history_path(explicit: Option<PathBuf>) -> PathBuf {
    explicit
        .or_else(|| std::env::var_os("YJ_HISTORY").map(PathBuf::from))
        .or_else(|| dirs::data_dir().map(|dir| dir.join("yijing").join("history.json")))
        .unwrap_or_else(|| PathBuf::from("yijing-history.json"))
}

fn hexagram(number: u32) -> Result<Hexagram, String> {
    require_number(number).map_err(|e| e.to_string())
}

/// Render a line as the traditional solid or broken bar.
fn line_glyph(is_yang: bool) -> &'static str {
    if is_yang { "━━━━━━━━━" } else { "━━━━ ━━━━" }
}
