//! pcicfg-dump: decode a captured PCI/PCIe configuration space.
//!
//! Reads a raw or `lspci -xxx` hex capture and prints the header, class
//! descriptions, and capability lists.

mod cli;
mod input;
mod logger;
mod report;

use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;
use pcicfg::ConfigSpace;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    logger::init(cli.log_level());

    let data = input::load(&cli.input, cli.format)?;
    log::info!("loaded {} bytes from {}", data.len(), cli.input.display());
    if data.len() > pcicfg::regs::EXTENDED_SPACE_SIZE {
        log::warn!(
            "capture is {} bytes, ignoring everything past {:#x}",
            data.len(),
            pcicfg::regs::EXTENDED_SPACE_SIZE
        );
    }

    let space = ConfigSpace::new(&data);
    let mut out = String::new();
    report::write_report(&mut out, &space, &cli.sections, cli.indent)
        .with_context(|| format!("decoding {}", cli.input.display()))?;

    std::io::stdout()
        .lock()
        .write_all(out.as_bytes())
        .context("writing report")?;
    Ok(())
}
