//! Text report of a decoded header.
//!
//! The report is a title line followed by one `Label  Value` line per header
//! field:
//!
//! ```text
//! PCIe Config Space HDR:
//!   Vendor ID             0x8086
//!   Device ID             0x1234
//!   ...
//!   Maximum Latency       0
//! ```

use core::fmt;

use crate::error::DecodeError;
use crate::header::{Header, RawHeader};

/// Indents above this are clamped.
pub const MAX_INDENT: usize = 32;

/// Field width labels are padded to.
const LABEL_WIDTH: usize = 22;

const BAR_LABELS: [&str; 6] = ["BAR0", "BAR1", "BAR2", "BAR3", "BAR4", "BAR5"];

/// Renders the header at the start of `data`, with the title indented by
/// `indent` spaces and the fields by two more.
///
/// Both indents are clamped to [`MAX_INDENT`]. A `None` buffer yields an
/// empty report.
///
/// # Errors
///
/// Returns [`DecodeError::BufferTooShort`] if `data` is shorter than 64
/// bytes; nothing is rendered in that case.
pub fn render(data: Option<&[u8]>, indent: usize) -> Result<HeaderReport, DecodeError> {
    let header = data
        .map(|data| Header::decode(data).map(|hdr| *hdr.raw()))
        .transpose()?;
    Ok(HeaderReport {
        header,
        indent: indent.min(MAX_INDENT),
    })
}

/// A rendered header report; formats through [`fmt::Display`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderReport {
    header: Option<RawHeader>,
    indent: usize,
}

impl HeaderReport {
    /// Builds a report for an already decoded header.
    #[must_use]
    pub fn new(header: &Header<'_>, indent: usize) -> Self {
        Self {
            header: Some(*header.raw()),
            indent: indent.min(MAX_INDENT),
        }
    }

    /// Returns `true` if the report renders nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.header.is_none()
    }

    /// Indent of the title line, after clamping.
    #[must_use]
    pub fn indent(&self) -> usize {
        self.indent
    }

    /// Indent of the field lines.
    #[must_use]
    pub fn field_indent(&self) -> usize {
        (self.indent + 2).min(MAX_INDENT)
    }
}

fn field(
    f: &mut fmt::Formatter<'_>,
    indent: usize,
    label: &str,
    value: fmt::Arguments<'_>,
) -> fmt::Result {
    writeln!(f, "{:indent$}{label:<width$}{value}", "", width = LABEL_WIDTH)
}

impl fmt::Display for HeaderReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(raw) = &self.header else {
            return Ok(());
        };
        let hdr = Header::from(raw);
        let ind = self.field_indent();

        writeln!(f, "{:indent$}PCIe Config Space HDR:", "", indent = self.indent)?;

        field(f, ind, "Vendor ID", format_args!("{:#06x}", hdr.vendor_id()))?;
        field(f, ind, "Device ID", format_args!("{:#06x}", hdr.device_id()))?;
        field(f, ind, "Command", format_args!("{:#06x}", hdr.command().bits()))?;
        field(f, ind, "Status", format_args!("{:#06x}", hdr.status().bits()))?;
        field(f, ind, "Revision ID", format_args!("{:#04x}", hdr.revision_id()))?;
        field(f, ind, "Programming Interface", format_args!("{:#04x}", hdr.prog_if()))?;
        field(f, ind, "Sub Class", format_args!("{:#04x}", hdr.subclass()))?;
        field(f, ind, "Base Class", format_args!("{:#04x}", hdr.base_class()))?;
        field(f, ind, "Cache Line Size", format_args!("{:#04x}", hdr.cache_line_size()))?;
        field(f, ind, "Latency Timer", format_args!("{:#04x}", hdr.latency_timer()))?;
        field(f, ind, "Header Type", format_args!("{:#04x}", hdr.header_type().bits()))?;
        field(f, ind, "BIST", format_args!("{:#04x}", hdr.bist().bits()))?;

        for (label, bar) in BAR_LABELS.iter().zip(hdr.bars()) {
            field(f, ind, label, format_args!("{bar:#010x}"))?;
        }

        field(f, ind, "Cardbus CIS Ptr", format_args!("{:#010x}", hdr.cardbus_cis()))?;
        field(f, ind, "Subsystem Vendor ID", format_args!("{:#06x}", hdr.subsystem_vendor_id()))?;
        field(f, ind, "Subsystem Device ID", format_args!("{:#06x}", hdr.subsystem_id()))?;
        field(f, ind, "Expansion ROM Addr", format_args!("{:#010x}", hdr.expansion_rom()))?;
        field(f, ind, "Capabilities Ptr", format_args!("{:#04x}", hdr.capabilities_ptr()))?;
        field(f, ind, "Interrupt Line", format_args!("{}", hdr.interrupt_line()))?;
        field(f, ind, "Interrupt Pin", format_args!("{}", hdr.interrupt_pin()))?;
        field(f, ind, "Minimum Grant", format_args!("{}", hdr.min_grant()))?;
        field(f, ind, "Maximum Latency", format_args!("{}", hdr.max_latency()))
    }
}
