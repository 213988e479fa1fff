use comfy_table::{ContentArrangement, Table};

pub fn run() -> Result<(), String> {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Name", "Lines", "Nature", "Judgment"]);

    let hexagrams = yj_core::table::all();
    for hexagram in hexagrams {
        table.add_row(vec![
            hexagram.number.to_string(),
            hexagram.name.to_string(),
            hexagram.binary.to_string(),
            hexagram.nature.to_string(),
            hexagram.judgment.to_string(),
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} hexagrams", hexagrams.len());

    Ok(())
}
