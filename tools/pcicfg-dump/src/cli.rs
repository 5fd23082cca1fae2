//! Command-line interface definitions for pcicfg-dump.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Decode a captured PCI/PCIe configuration space.
#[derive(Parser)]
#[command(name = "pcicfg-dump", version, about)]
pub struct Cli {
    /// Capture file: raw bytes, or `lspci -xxx`/`-xxxx` hex text.
    pub input: PathBuf,

    /// Format of the capture file.
    #[arg(long, short = 'f', value_enum, default_value_t = InputFormat::Auto)]
    pub format: InputFormat,

    /// Spaces before the report title (clamped to 32).
    #[arg(long, short = 'i', default_value_t = 0)]
    pub indent: usize,

    /// Report sections to print, comma separated.
    #[arg(
        long,
        short = 's',
        value_enum,
        value_delimiter = ',',
        default_values_t = Section::ALL
    )]
    pub sections: Vec<Section>,

    /// Only print errors.
    #[arg(long, short = 'q', conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log decoder diagnostics (repeat for more detail).
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Log level selected by `-q`/`-v`.
    pub fn log_level(&self) -> log::LevelFilter {
        if self.quiet {
            return log::LevelFilter::Error;
        }
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}

/// How to read the capture file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    /// Hex text if the file looks like an `lspci` dump, raw bytes otherwise.
    Auto,
    /// Raw configuration space bytes.
    Raw,
    /// `offset: xx xx ...` hex lines as printed by `lspci -xxx`.
    Hex,
}

/// A section of the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Section {
    /// The 64-byte header.
    Header,
    /// Class code descriptions.
    Class,
    /// Legacy capability list.
    Caps,
    /// Extended capability list.
    Ecaps,
}

impl Section {
    /// Every section, in report order.
    pub const ALL: [Self; 4] = [Self::Header, Self::Class, Self::Caps, Self::Ecaps];
}
