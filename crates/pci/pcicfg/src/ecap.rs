//! `PCIe` extended capabilities (configuration space 0x100-0xFFF).

use core::fmt;

use log::{debug, trace};

use crate::class::{self, CodeSpace};
use crate::error::DecodeError;
use crate::register::{DvsecHeader1, ExtendedCapabilityHeader, VsecHeader};
use crate::regs;
use crate::space::ConfigSpace;

/// Upper bound on list length: one node per dword of the extended region.
pub const MAX_EXTENDED_CAPABILITIES: usize =
    (regs::EXTENDED_SPACE_SIZE - regs::EXTENDED_CAPABILITIES) / 4;

/// A `PCIe` extended capability node header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtendedCapabilityEntry {
    /// Extended capability ID.
    pub id: u16,
    /// Capability structure version (4 bits).
    pub version: u8,
    /// Offset of the next node (12 bits), 0 ends the list.
    pub next: u16,
}

impl ExtendedCapabilityEntry {
    /// Size of a node header in bytes.
    pub const SIZE: usize = 4;

    /// Description of the capability ID, if it is a known one.
    #[must_use]
    pub fn name(self) -> Option<&'static str> {
        class::resolve(CodeSpace::ExtendedCapability, self.id.into())
    }
}

impl From<ExtendedCapabilityHeader> for ExtendedCapabilityEntry {
    // Field widths are 16, 4 and 12 bits.
    #[allow(clippy::cast_possible_truncation)]
    fn from(hdr: ExtendedCapabilityHeader) -> Self {
        Self {
            id: hdr.id() as u16,
            version: hdr.version() as u8,
            next: hdr.next() as u16,
        }
    }
}

/// Iterator over the extended capability list, yielding `(offset, entry)`.
///
/// The list starts at 0x100. Iteration ends on an empty (all zeros) or
/// absent (all ones) node, a `next` pointer of 0 or below 0x100, a node that
/// does not fit in the buffer, or after [`MAX_EXTENDED_CAPABILITIES`] nodes.
#[derive(Debug, Clone)]
pub struct ExtendedCapabilities<'a> {
    space: ConfigSpace<'a>,
    next_offset: usize,
    remaining: usize,
}

impl<'a> ExtendedCapabilities<'a> {
    pub(crate) fn new(space: ConfigSpace<'a>) -> Self {
        let next_offset =
            if space.len() >= regs::EXTENDED_CAPABILITIES + ExtendedCapabilityEntry::SIZE {
                regs::EXTENDED_CAPABILITIES
            } else {
                0
            };
        Self {
            space,
            next_offset,
            remaining: MAX_EXTENDED_CAPABILITIES,
        }
    }
}

impl Iterator for ExtendedCapabilities<'_> {
    type Item = (usize, ExtendedCapabilityEntry);

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_offset == 0 {
            return None;
        }
        let offset = self.next_offset;
        self.next_offset = 0;

        if self.remaining == 0 {
            debug!(
                "pcicfg: extended capability list longer than {MAX_EXTENDED_CAPABILITIES} nodes, stopping"
            );
            return None;
        }
        self.remaining -= 1;

        let raw = match self.space.read_u32(offset) {
            Ok(raw) => raw,
            Err(err) => {
                debug!("pcicfg: extended capability list cut short: {err}");
                return None;
            }
        };
        if raw == 0 || raw == u32::MAX {
            trace!("pcicfg: no extended capability at {offset:#05x}");
            return None;
        }

        let entry = ExtendedCapabilityEntry::from(ExtendedCapabilityHeader::from_bits(raw));
        trace!(
            "pcicfg: extended capability {:#06x} v{} at {offset:#05x}",
            entry.id, entry.version
        );

        let next = usize::from(entry.next) & !0x3;
        if next != 0 {
            if next < regs::EXTENDED_CAPABILITIES {
                debug!("pcicfg: extended capability pointer {next:#05x} leaves the extended region");
            } else {
                self.next_offset = next;
            }
        }
        Some((offset, entry))
    }
}

/// Checks that `size` bytes at `offset` are present and that the node there
/// has ID `id`.
fn expect(
    space: &ConfigSpace<'_>,
    offset: usize,
    size: usize,
    id: u16,
) -> Result<ExtendedCapabilityEntry, DecodeError> {
    space.check(offset, size)?;
    let entry = space.extended_capability(offset)?;
    if entry.id != id {
        return Err(DecodeError::UnexpectedCapability {
            offset,
            expected: id,
            found: entry.id,
        });
    }
    Ok(entry)
}

// ---------------------------------------------------------------------------
// Device serial number
// ---------------------------------------------------------------------------

/// Decoded Device Serial Number capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceSerialNumber {
    /// Offset of the capability node.
    pub offset: usize,
    /// Node header.
    pub entry: ExtendedCapabilityEntry,
    /// Lower dword of the serial number.
    pub low: u32,
    /// Upper dword of the serial number.
    pub high: u32,
}

impl DeviceSerialNumber {
    /// Size of the capability structure in bytes.
    pub const SIZE: usize = 12;

    /// The 64-bit serial number.
    #[must_use]
    pub const fn serial(&self) -> u64 {
        ((self.high as u64) << 32) | self.low as u64
    }

    pub(crate) fn decode(space: &ConfigSpace<'_>, offset: usize) -> Result<Self, DecodeError> {
        let entry = expect(space, offset, Self::SIZE, regs::ECAP_ID_DSN)?;
        Ok(Self {
            offset,
            entry,
            low: space.read_u32(offset + 4)?,
            high: space.read_u32(offset + 8)?,
        })
    }
}

/// Formats the serial number as eight dash-separated bytes, most
/// significant first.
impl fmt::Display for DeviceSerialNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bytes = self.serial().to_be_bytes();
        for (i, byte) in bytes.iter().enumerate() {
            if i != 0 {
                f.write_str("-")?;
            }
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Vendor-specific
// ---------------------------------------------------------------------------

/// A Vendor-Specific Extended Capability (VSEC): identity and length only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VendorExtendedCapability {
    /// Offset of the capability node.
    pub offset: usize,
    /// Node header.
    pub entry: ExtendedCapabilityEntry,
    /// VSEC header.
    pub header: VsecHeader,
}

impl VendorExtendedCapability {
    pub(crate) fn decode(space: &ConfigSpace<'_>, offset: usize) -> Result<Self, DecodeError> {
        let entry = expect(space, offset, 8, regs::ECAP_ID_VSEC)?;
        Ok(Self {
            offset,
            entry,
            header: VsecHeader::from_bits(space.read_u32(offset + 4)?),
        })
    }
}

/// A Designated Vendor-Specific Extended Capability (DVSEC): identity and
/// length only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DesignatedVendorCapability {
    /// Offset of the capability node.
    pub offset: usize,
    /// Node header.
    pub entry: ExtendedCapabilityEntry,
    /// DVSEC header 1: vendor, revision, length.
    pub header: DvsecHeader1,
    /// DVSEC ID (header 2), defined by the vendor in `header`.
    pub dvsec_id: u16,
}

impl DesignatedVendorCapability {
    pub(crate) fn decode(space: &ConfigSpace<'_>, offset: usize) -> Result<Self, DecodeError> {
        let entry = expect(space, offset, 10, regs::ECAP_ID_DVSEC)?;
        Ok(Self {
            offset,
            entry,
            header: DvsecHeader1::from_bits(space.read_u32(offset + 4)?),
            dvsec_id: space.read_u16(offset + 8)?,
        })
    }
}
