//! @acp:module "Deck Command"
//! @acp:summary "Validate and summarize a deck catalog"
//! @acp:domain cli
//! @acp:layer handler

use std::path::PathBuf;

use anyhow::Result;
use console::style;

use crate::deck::DeckCatalog;

/// Options for the deck command
#[derive(Debug, Clone)]
pub struct DeckOptions {
    /// Catalog file; the standard deck when absent
    pub file: Option<PathBuf>,
    /// Output as JSON
    pub json: bool,
}

/// Execute the deck command
pub fn execute_deck(options: DeckOptions) -> Result<()> {
    let catalog = match DeckCatalog::load_or_standard(options.file.as_deref()) {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("{} {}", style("✗").red(), e);
            std::process::exit(1);
        }
    };

    if options.json {
        println!("{}", serde_json::to_string_pretty(&catalog)?);
        return Ok(());
    }

    println!(
        "{} Deck '{}' is valid: {} cards",
        style("✓").green(),
        catalog.name,
        catalog.size()
    );
    println!("  Fingerprint: {}\n", style(catalog.fingerprint()?).dim());

    for entry in &catalog.entries {
        let mut notes: Vec<String> = Vec::new();
        if entry.draw_amount > 0 {
            notes.push(format!("+{}", entry.draw_amount));
        }
        notes.extend(entry.effects.iter().map(|e| format!("{:?}", e)));

        let colors: Vec<&str> = entry.colors.iter().map(|c| c.name()).collect();
        println!(
            "  {:<16} x{:<3} {:<28} {}",
            entry.value.name(),
            entry.copies as usize * entry.colors.len(),
            colors.join("/"),
            style(notes.join(" ")).dim()
        );
    }

    Ok(())
}
