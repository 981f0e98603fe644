//! `chanbot inspect`: read-only view of the data file.
//!
//! Unlike `Store::open`, a missing or malformed file is reported as an error
//! and never rewritten.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::Context;
use chancore::storage::read_document;
use chancore::{Document, EntityKind};

/// Human-readable listing of every entity.
pub fn render_summary(doc: &Document) -> String {
    let mut out = String::new();
    for (kind, label) in [(EntityKind::Channel, "Channels"), (EntityKind::Group, "Groups")] {
        let entities = doc.entities(kind);
        let _ = writeln!(out, "{} ({}):", label, entities.len());
        for (id, record) in entities {
            let _ = writeln!(
                out,
                "  {}  {}  added {}  members {}",
                id,
                record.title_or(id),
                record.text_or("added_date", "unknown"),
                record.text_or("member_count", "unknown"),
            );
        }
    }
    if !doc.settings.is_empty() {
        let _ = writeln!(out, "Settings ({}):", doc.settings.len());
        for (key, value) in &doc.settings {
            let _ = writeln!(out, "  {} = {}", key, value);
        }
    }
    out
}

/// Prints the document at `path` as a summary or as pretty JSON.
pub fn run_inspect(path: &Path, json: bool) -> anyhow::Result<()> {
    let doc = read_document(path)
        .with_context(|| format!("failed to read {}", path.display()))?
        .with_context(|| format!("{} does not exist", path.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        print!("{}", render_summary(&doc));
    }
    Ok(())
}
