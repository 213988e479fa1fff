use std::path::PathBuf;

use colored::Colorize;
use yj_oracle::Interpreter;

pub async fn run(number: u32, offline: bool, cache: Option<PathBuf>) -> Result<(), String> {
    let hexagram = super::hexagram(number)?;
    let config = super::oracle_config(offline, cache, None);
    let interpreter = Interpreter::from_config(&config);

    let notes = interpreter.study(&hexagram).await;

    println!("  {}", hexagram.to_string().bold());
    println!();
    for (title, text) in [
        ("原文", &notes.original_text),
        ("哲理", &notes.philosophy),
        ("占断", &notes.divination_meaning),
    ] {
        println!("  {}", title.bold().underline());
        for line in text.lines() {
            println!("    {}", line.trim());
        }
        println!();
    }

    Ok(())
}
