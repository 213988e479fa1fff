use std::path::{Path, PathBuf};

use yj_oracle::History;

pub fn run(format: &str, history: Option<PathBuf>, output: Option<&Path>) -> Result<(), String> {
    let path = super::history_path(history);
    let history =
        History::load(&path).map_err(|e| format!("cannot read history {}: {e}", path.display()))?;

    let content = match format {
        "markdown" | "md" => history.export_markdown(),
        "text" | "txt" => history.export_text(),
        _ => {
            return Err(format!(
                "unsupported format: \"{format}\". Use: markdown, text"
            ));
        }
    };

    if let Some(path) = output {
        std::fs::write(path, &content)
            .map_err(|e| format!("cannot write to {}: {e}", path.display()))?;
        println!("  Exported {} readings to {}", history.len(), path.display());
    } else {
        print!("{content}");
    }

    Ok(())
}
