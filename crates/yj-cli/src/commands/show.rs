use colored::Colorize;
use yj_core::lookup_detail_by_number;

pub fn run(number: u32) -> Result<(), String> {
    let hexagram = super::hexagram(number)?;
    let detail = lookup_detail_by_number(number)
        .ok_or_else(|| format!("no detail for hexagram {number}"))?;

    println!(
        "  {} [{}]",
        hexagram.to_string().bold(),
        hexagram.nature.dimmed()
    );
    println!();

    // Top line first, the way a hexagram is drawn.
    for position in (0..6).rev() {
        println!("    {}", super::line_glyph(hexagram.is_yang(position)));
    }
    println!();

    println!("  {}", detail.full_judgment);
    if !detail.image.is_empty() {
        println!("  {}", detail.image.dimmed());
    }
    println!();

    for line in &detail.lines {
        println!(
            "  {} [{}]  {}",
            line.name.bold(),
            line.nature.to_string().dimmed(),
            line.text
        );
        if let Some(ref image) = line.image {
            println!("      {}", image.dimmed());
        }
    }

    Ok(())
}
