use std::path::PathBuf;
use std::time::Duration;

use colored::Colorize;
use yj_core::detail::POSITION_NAMES;
use yj_core::{Hexagram, LineResult};
use yj_oracle::{Diviner, History, Interpretation};

pub struct CastOptions {
    pub seed: Option<u64>,
    pub offline: bool,
    pub cache: Option<PathBuf>,
    pub history: Option<PathBuf>,
    pub delay: u64,
    pub json: bool,
}

pub async fn run(question: &str, options: CastOptions) -> Result<(), String> {
    let config = super::oracle_config(options.offline, options.cache, options.seed);
    let history_path = super::history_path(options.history);
    // An unreadable history is left untouched and this reading is not saved.
    let history = match History::load(&history_path) {
        Ok(history) => Some(history),
        Err(e) => {
            tracing::warn!(path = %history_path.display(), error = %e, "history unreadable, reading will not be saved");
            None
        }
    };
    let keep_history = history.is_some();

    let mut diviner = Diviner::from_config(&config).with_history(history.unwrap_or_default());
    // The interpretation request is already running once `begin` returns.
    let mut session = diviner.begin(question).map_err(|e| e.to_string())?;

    if !options.json {
        println!("  {} {}", "问:".bold(), session.question());
        println!();
    }

    for (i, line) in session.lines().iter().enumerate() {
        if options.delay > 0 {
            tokio::time::sleep(Duration::from_millis(options.delay)).await;
        }
        if !options.json {
            print_line(i, line);
        }
    }

    if !options.json {
        println!();
        print_hexagram("本卦", session.primary());
        match session.relating() {
            Some(relating) => print_hexagram("变卦", relating),
            None => println!("  {}", "无动爻，不取变卦".dimmed()),
        }
        let moving = session.casting().moving_lines_description();
        if !moving.is_empty() {
            println!("  {} {moving}", "动爻:".bold());
        }
        println!();
        if !session.is_interpretation_ready() {
            println!("  {}", "正在解卦...".dimmed());
        }
    }

    let reading = session.interpretation().await.clone();
    let record = diviner.record(&session);
    if keep_history {
        diviner
            .history()
            .save(&history_path)
            .map_err(|e| format!("cannot write history {}: {e}", history_path.display()))?;
        tracing::debug!(path = %history_path.display(), records = diviner.history().len(), "history saved");
    }

    if options.json {
        let json = serde_json::to_string_pretty(&record)
            .map_err(|e| format!("JSON serialization error: {e}"))?;
        println!("{json}");
    } else {
        print_interpretation(&reading);
    }

    Ok(())
}

fn print_line(index: usize, line: &LineResult) {
    let glyph = super::line_glyph(line.is_yang());
    let glyph = if line.is_changing() {
        glyph.yellow().bold()
    } else {
        glyph.normal()
    };
    let marker = if line.is_changing() { " 动" } else { "" };
    println!(
        "  {}爻  {glyph}  {}{}",
        POSITION_NAMES[index],
        line.to_string().dimmed(),
        marker.yellow()
    );
}

fn print_hexagram(label: &str, hexagram: &Hexagram) {
    println!(
        "  {} {}  {}",
        format!("{label}:").bold(),
        hexagram.to_string().cyan().bold(),
        hexagram.nature.dimmed()
    );
    if !hexagram.judgment.is_empty() {
        println!("        {}", hexagram.judgment);
    }
}

fn print_interpretation(reading: &Interpretation) {
    section("策略", &reading.concrete_strategy);
    section("原文", &reading.original);
    section("白话", &reading.vernacular);
    section("总结", &reading.master_quotes.summary);
    section("建议", &reading.master_quotes.advice);

    let traditional = &reading.traditional;
    labelled(
        "传统解卦",
        &[
            ("总论", &traditional.description),
            ("事业", &traditional.career),
            ("经商", &traditional.business),
            ("求名", &traditional.fame),
            ("婚恋", &traditional.love),
            ("决策", &traditional.decision),
        ],
    );

    let commentary = &reading.commentary;
    labelled(
        "张铭仁解卦",
        &[
            ("解释", &commentary.explanation),
            ("特性", &commentary.characteristics),
            ("运势", &commentary.luck),
            ("家庭", &commentary.family),
            ("疾病", &commentary.sickness),
            ("失物", &commentary.lost),
            ("出行", &commentary.travel),
            ("诉讼", &commentary.lawsuit),
            ("经商", &commentary.business),
        ],
    );

    section("动爻分析", &reading.line_analysis);
}

fn labelled(title: &str, entries: &[(&str, &String)]) {
    if entries.iter().all(|(_, text)| text.is_empty()) {
        return;
    }
    println!("  {}", title.bold().underline());
    for (label, text) in entries {
        if !text.is_empty() {
            println!("    {}: {text}", label.bold());
        }
    }
    println!();
}

fn section(title: &str, text: &str) {
    if text.is_empty() {
        return;
    }
    println!("  {}", title.bold().underline());
    for line in text.lines() {
        println!("    {}", line.trim());
    }
    println!();
}
