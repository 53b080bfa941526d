//! @acp:module "Info Command"
//! @acp:summary "Print the build descriptor"
//! @acp:domain cli
//! @acp:layer handler

use anyhow::Result;
use console::style;

use crate::descriptor::BuildDescriptor;

/// Options for the info command
#[derive(Debug, Clone)]
pub struct InfoOptions {
    /// Output as JSON
    pub json: bool,
}

/// Execute the info command
pub fn execute_info(options: InfoOptions) -> Result<()> {
    let descriptor = BuildDescriptor::current()?;

    if options.json {
        println!("{}", descriptor.to_json()?);
        return Ok(());
    }

    println!(
        "{} {} {}",
        style("→").cyan(),
        style(descriptor.package).bold(),
        descriptor.version
    );
    println!("  Binary:       {}", descriptor.binary);
    println!("  Entry point:  {}", style(descriptor.entry_point).cyan());
    println!("  Dependencies: {}", descriptor.dependency_source);
    println!("  Profile:      {}", descriptor.profile);
    println!(
        "  Quality gate: {} (rust {}), forbid {}",
        descriptor.quality.tool,
        descriptor.quality.rust_version,
        descriptor.quality.forbid.join(", ")
    );
    println!("  Deck:         {}", style(&descriptor.deck_fingerprint).dim());

    Ok(())
}
