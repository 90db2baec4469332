use crate::app::AppContext;
use crate::output::{severity_label, Output};
use color_eyre::Result;
use comfy_table::{Attribute, Cell, ContentArrangement, Table};
use watchsync_models::LogEntry;

fn recent(mut entries: Vec<LogEntry>, limit: Option<usize>) -> Vec<LogEntry> {
    if let Some(limit) = limit {
        entries.truncate(limit);
    }
    entries
}

pub fn run_logs(limit: Option<usize>, output: &Output) -> Result<()> {
    let ctx = AppContext::open()?;
    let entries = recent(ctx.log.entries(), limit);

    if !output.is_human() {
        output.json(&serde_json::to_value(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        output.info("Operation log is empty");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("Time").add_attribute(Attribute::Bold),
        Cell::new("Type").add_attribute(Attribute::Bold),
        Cell::new("Message").add_attribute(Attribute::Bold),
    ]);
    for entry in &entries {
        table.add_row(vec![
            Cell::new(entry.timestamp.format("%Y-%m-%d %H:%M:%S").to_string()),
            Cell::new(severity_label(entry)),
            Cell::new(&entry.message),
        ]);
    }
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    println!("{}", table);
    Ok(())
}
