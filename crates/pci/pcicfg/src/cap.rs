//! Legacy PCI capabilities (configuration space 0x40-0xFF).
//!
//! Walks the capability linked list starting from the Capabilities Pointer
//! (header offset 0x34) and decodes the capability structures this crate
//! understands: power management, MSI, MSI-X, and the presence/length of
//! vendor-specific capabilities.

use log::{debug, trace};

use crate::class::{self, CodeSpace};
use crate::error::DecodeError;
use crate::register::{
    BridgeSupportExtension, CapabilityHeader, MsiMessageControl, MsixLocation,
    MsixMessageControl, PowerManagementCapabilities, PowerManagementControlStatus,
};
use crate::regs;
use crate::space::ConfigSpace;

/// Upper bound on list length: one node per dword of the capability region.
pub const MAX_CAPABILITIES: usize = (regs::LEGACY_SPACE_SIZE - regs::HEADER_SIZE) / 4;

/// A legacy capability node header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapabilityEntry {
    /// Capability ID (e.g. 0x01 for power management, 0x11 for MSI-X).
    pub id: u8,
    /// Offset of the next node, 0 ends the list.
    pub next: u8,
}

impl CapabilityEntry {
    /// Size of a node header in bytes.
    pub const SIZE: usize = 2;

    /// Description of the capability ID, if it is a known one.
    #[must_use]
    pub fn name(self) -> Option<&'static str> {
        class::resolve(CodeSpace::Capability, self.id.into())
    }
}

impl From<CapabilityHeader> for CapabilityEntry {
    // Both fields are 8 bits wide.
    #[allow(clippy::cast_possible_truncation)]
    fn from(hdr: CapabilityHeader) -> Self {
        Self {
            id: hdr.id() as u8,
            next: hdr.next() as u8,
        }
    }
}

/// Iterator over the legacy capability list, yielding `(offset, entry)`.
///
/// Stops at the end of the list, at a pointer into the header region, at a
/// node that does not fit in the buffer, or after [`MAX_CAPABILITIES`] nodes
/// (a looped list).
#[derive(Debug, Clone)]
pub struct Capabilities<'a> {
    space: ConfigSpace<'a>,
    next_offset: u8,
    remaining: usize,
}

impl<'a> Capabilities<'a> {
    pub(crate) fn new(space: ConfigSpace<'a>, first: u8) -> Self {
        Self {
            space,
            next_offset: first,
            remaining: MAX_CAPABILITIES,
        }
    }
}

impl Iterator for Capabilities<'_> {
    type Item = (usize, CapabilityEntry);

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_offset == 0 {
            return None;
        }
        let offset = usize::from(self.next_offset & 0xFC); // dword-aligned
        self.next_offset = 0;

        if offset < regs::HEADER_SIZE {
            debug!("pcicfg: capability pointer {offset:#04x} points into the header, stopping");
            return None;
        }
        if self.remaining == 0 {
            debug!("pcicfg: capability list longer than {MAX_CAPABILITIES} nodes, stopping");
            return None;
        }
        self.remaining -= 1;

        let entry = match self.space.capability(offset) {
            Ok(entry) => entry,
            Err(err) => {
                debug!("pcicfg: capability list cut short: {err}");
                return None;
            }
        };
        trace!("pcicfg: capability {:#04x} at {offset:#04x}", entry.id);

        self.next_offset = entry.next;
        Some((offset, entry))
    }
}

/// Checks that `size` bytes at `offset` are present and that the node there
/// has ID `id`.
fn expect(
    space: &ConfigSpace<'_>,
    offset: usize,
    size: usize,
    id: u8,
) -> Result<CapabilityEntry, DecodeError> {
    space.check(offset, size)?;
    let entry = space.capability(offset)?;
    if entry.id != id {
        return Err(DecodeError::UnexpectedCapability {
            offset,
            expected: id.into(),
            found: entry.id.into(),
        });
    }
    Ok(entry)
}

// ---------------------------------------------------------------------------
// Power management
// ---------------------------------------------------------------------------

/// Device power state from PMCSR.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerState {
    /// Fully on.
    D0,
    /// Light sleep.
    D1,
    /// Deeper sleep.
    D2,
    /// Off, configuration space still accessible.
    D3Hot,
}

impl PowerManagementControlStatus {
    /// Decodes the power state field.
    #[must_use]
    pub const fn device_state(self) -> PowerState {
        match self.power_state() {
            0 => PowerState::D0,
            1 => PowerState::D1,
            2 => PowerState::D2,
            _ => PowerState::D3Hot,
        }
    }
}

/// Decoded power management capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerManagement {
    /// Offset of the capability node.
    pub offset: usize,
    /// Offset of the next node.
    pub next: u8,
    /// Power Management Capabilities.
    pub pmc: PowerManagementCapabilities,
    /// Power Management Control/Status.
    pub pmcsr: PowerManagementControlStatus,
    /// PMCSR Bridge Support Extensions.
    pub bse: BridgeSupportExtension,
    /// Data register, selected by `pmcsr.data_select`.
    pub data: u8,
}

impl PowerManagement {
    /// Size of the capability structure in bytes.
    pub const SIZE: usize = 8;

    pub(crate) fn decode(space: &ConfigSpace<'_>, offset: usize) -> Result<Self, DecodeError> {
        let entry = expect(space, offset, Self::SIZE, regs::CAP_ID_POWER_MANAGEMENT)?;
        Ok(Self {
            offset,
            next: entry.next,
            pmc: PowerManagementCapabilities::from_bits(space.read_u16(offset + 2)?),
            pmcsr: PowerManagementControlStatus::from_bits(space.read_u16(offset + 4)?),
            bse: BridgeSupportExtension::from_bits(space.read_u8(offset + 6)?),
            data: space.read_u8(offset + 7)?,
        })
    }
}

// ---------------------------------------------------------------------------
// MSI
// ---------------------------------------------------------------------------

/// Decoded MSI capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MsiCapability {
    /// Offset of the capability node.
    pub offset: usize,
    /// Offset of the next node.
    pub next: u8,
    /// Message Control.
    pub control: MsiMessageControl,
    /// Message address; the upper half is zero unless `control.addr64`.
    pub address: u64,
    /// Message data.
    pub data: u16,
    /// Mask bits, present when `control.per_vector_masking`.
    pub mask: Option<u32>,
    /// Pending bits, present when `control.per_vector_masking`.
    pub pending: Option<u32>,
}

impl MsiCapability {
    /// Size of the structure described by `control`.
    #[must_use]
    pub const fn size_for(control: MsiMessageControl) -> usize {
        match (control.addr64(), control.per_vector_masking()) {
            (false, false) => 10,
            (true, false) => 14,
            (false, true) => 20,
            (true, true) => 24,
        }
    }

    pub(crate) fn decode(space: &ConfigSpace<'_>, offset: usize) -> Result<Self, DecodeError> {
        let control = read_msi_control(space, offset)?;
        let entry = expect(space, offset, Self::size_for(control), regs::CAP_ID_MSI)?;

        let low = space.read_u32(offset + 4)?;
        let (address, data_offset) = if control.addr64() {
            let high = space.read_u32(offset + 8)?;
            ((u64::from(high) << 32) | u64::from(low), offset + 12)
        } else {
            (u64::from(low), offset + 8)
        };
        let (mask, pending) = if control.per_vector_masking() {
            // Mask bits follow the data word and two reserved bytes.
            (
                Some(space.read_u32(data_offset + 4)?),
                Some(space.read_u32(data_offset + 8)?),
            )
        } else {
            (None, None)
        };

        Ok(Self {
            offset,
            next: entry.next,
            control,
            address,
            data: space.read_u16(data_offset)?,
            mask,
            pending,
        })
    }
}

/// Reads MSI Message Control of the MSI capability at `offset`.
pub(crate) fn read_msi_control(
    space: &ConfigSpace<'_>,
    offset: usize,
) -> Result<MsiMessageControl, DecodeError> {
    expect(space, offset, 4, regs::CAP_ID_MSI)?;
    Ok(MsiMessageControl::from_bits(space.read_u16(offset + 2)?))
}

// ---------------------------------------------------------------------------
// MSI-X
// ---------------------------------------------------------------------------

/// Decoded MSI-X capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MsixCapability {
    /// Offset of the capability node.
    pub offset: usize,
    /// Offset of the next node.
    pub next: u8,
    /// Message Control.
    pub control: MsixMessageControl,
    /// MSI-X table location.
    pub table: MsixLocation,
    /// Pending Bit Array location.
    pub pba: MsixLocation,
}

impl MsixCapability {
    /// Size of the capability structure in bytes.
    pub const SIZE: usize = 12;

    /// Number of MSI-X table entries.
    #[must_use]
    pub const fn table_size(&self) -> u16 {
        self.control.table_size() + 1
    }

    pub(crate) fn decode(space: &ConfigSpace<'_>, offset: usize) -> Result<Self, DecodeError> {
        let entry = expect(space, offset, Self::SIZE, regs::CAP_ID_MSIX)?;
        Ok(Self {
            offset,
            next: entry.next,
            control: MsixMessageControl::from_bits(space.read_u16(offset + 2)?),
            table: MsixLocation::from_bits(space.read_u32(offset + 4)?),
            pba: MsixLocation::from_bits(space.read_u32(offset + 8)?),
        })
    }
}

// ---------------------------------------------------------------------------
// Vendor-specific
// ---------------------------------------------------------------------------

/// A vendor-specific capability: presence and advertised length only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VendorCapability {
    /// Offset of the capability node.
    pub offset: usize,
    /// Offset of the next node.
    pub next: u8,
    /// Length of the structure in bytes, header included.
    pub length: u8,
}

impl VendorCapability {
    pub(crate) fn decode(space: &ConfigSpace<'_>, offset: usize) -> Result<Self, DecodeError> {
        let entry = expect(space, offset, 3, regs::CAP_ID_VENDOR)?;
        Ok(Self {
            offset,
            next: entry.next,
            length: space.read_u8(offset + 2)?,
        })
    }
}

#[cfg(test)]
mod tests {
    extern crate alloc;

    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    /// A 256-byte space with the capability list enabled and starting at
    /// `first`.
    fn space_with_list(first: u8) -> Vec<u8> {
        let mut data = vec![0u8; regs::LEGACY_SPACE_SIZE];
        data[regs::STATUS..regs::STATUS + 2]
            .copy_from_slice(&regs::STATUS_CAPABILITIES_LIST.to_le_bytes());
        data[regs::CAPABILITIES_PTR] = first;
        data
    }

    fn put_cap(data: &mut [u8], offset: usize, id: u8, next: u8) {
        data[offset] = id;
        data[offset + 1] = next;
    }

    #[test]
    fn walks_until_next_is_zero() {
        let mut data = space_with_list(0x40);
        put_cap(&mut data, 0x40, 0x01, 0x50);
        put_cap(&mut data, 0x50, 0x05, 0x70);
        put_cap(&mut data, 0x70, 0x10, 0x00);
        let space = ConfigSpace::new(&data);
        let ids: Vec<_> = space.capabilities().map(|(off, e)| (off, e.id)).collect();
        assert_eq!(ids, [(0x40, 0x01), (0x50, 0x05), (0x70, 0x10)]);
    }

    #[test]
    fn no_list_without_status_bit() {
        let mut data = space_with_list(0x40);
        data[regs::STATUS] = 0;
        put_cap(&mut data, 0x40, 0x01, 0x00);
        assert_eq!(ConfigSpace::new(&data).capabilities().count(), 0);
    }

    #[test]
    fn pointers_are_dword_aligned() {
        let mut data = space_with_list(0x43);
        put_cap(&mut data, 0x40, 0x09, 0x00);
        let first = ConfigSpace::new(&data).capabilities().next();
        assert_eq!(first, Some((0x40, CapabilityEntry { id: 0x09, next: 0 })));
    }

    #[test]
    fn loops_are_bounded() {
        let mut data = space_with_list(0x40);
        put_cap(&mut data, 0x40, 0x01, 0x40);
        assert_eq!(
            ConfigSpace::new(&data).capabilities().count(),
            MAX_CAPABILITIES
        );
    }

    #[test]
    fn pointer_into_header_stops() {
        let mut data = space_with_list(0x40);
        put_cap(&mut data, 0x40, 0x01, 0x20);
        assert_eq!(ConfigSpace::new(&data).capabilities().count(), 1);
    }

    #[test]
    fn truncated_buffer_stops() {
        let mut data = space_with_list(0x40);
        put_cap(&mut data, 0x40, 0x01, 0x80);
        data.truncate(0x80);
        assert_eq!(ConfigSpace::new(&data).capabilities().count(), 1);
    }

    #[test]
    fn power_management_decode() {
        let mut data = space_with_list(0x40);
        put_cap(&mut data, 0x40, 0x01, 0x00);
        data[0x42..0x44].copy_from_slice(&0xC9C3u16.to_le_bytes());
        data[0x44..0x46].copy_from_slice(&0x0103u16.to_le_bytes());
        data[0x46] = 0x40;
        data[0x47] = 0x5A;
        let pm = ConfigSpace::new(&data).power_management(0x40).unwrap();
        assert_eq!(pm.pmc.version(), 3);
        assert_eq!(pm.pmcsr.device_state(), PowerState::D3Hot);
        assert!(pm.pmcsr.pme_enable());
        assert!(pm.bse.b2_b3());
        assert_eq!(pm.data, 0x5A);
    }

    #[test]
    fn wrong_id_is_reported() {
        let mut data = space_with_list(0x40);
        put_cap(&mut data, 0x40, 0x05, 0x00);
        assert_eq!(
            ConfigSpace::new(&data).power_management(0x40),
            Err(DecodeError::UnexpectedCapability {
                offset: 0x40,
                expected: 0x01,
                found: 0x05
            })
        );
    }

    #[test]
    fn msi_64_bit_with_masking() {
        let mut data = space_with_list(0x50);
        put_cap(&mut data, 0x50, 0x05, 0x00);
        data[0x52..0x54].copy_from_slice(&0x0183u16.to_le_bytes());
        data[0x54..0x58].copy_from_slice(&0xFEE0_0000u32.to_le_bytes());
        data[0x58..0x5C].copy_from_slice(&0x0000_0001u32.to_le_bytes());
        data[0x5C..0x5E].copy_from_slice(&0x4021u16.to_le_bytes());
        data[0x60..0x64].copy_from_slice(&0x0000_00FEu32.to_le_bytes());
        data[0x64..0x68].copy_from_slice(&0x0000_0001u32.to_le_bytes());
        let space = ConfigSpace::new(&data);
        let msi = space.msi(0x50).unwrap();
        assert!(msi.control.enable());
        assert_eq!(msi.control.vectors_requested(), 2);
        assert_eq!(msi.address, 0x0000_0001_FEE0_0000);
        assert_eq!(msi.data, 0x4021);
        assert_eq!(msi.mask, Some(0xFE));
        assert_eq!(msi.pending, Some(0x01));
        assert_eq!(space.msi_control(0x50).unwrap(), msi.control);
    }

    #[test]
    fn msi_32_bit_layout() {
        let mut data = space_with_list(0x50);
        put_cap(&mut data, 0x50, 0x05, 0x00);
        data[0x52..0x54].copy_from_slice(&0x0001u16.to_le_bytes());
        data[0x54..0x58].copy_from_slice(&0xFEE0_1000u32.to_le_bytes());
        data[0x58..0x5A].copy_from_slice(&0x0031u16.to_le_bytes());
        let msi = ConfigSpace::new(&data).msi(0x50).unwrap();
        assert_eq!(msi.address, 0xFEE0_1000);
        assert_eq!(msi.data, 0x0031);
        assert_eq!(msi.mask, None);
    }

    #[test]
    fn msix_decode() {
        let mut data = space_with_list(0x70);
        put_cap(&mut data, 0x70, 0x11, 0x00);
        data[0x72..0x74].copy_from_slice(&0x8003u16.to_le_bytes());
        data[0x74..0x78].copy_from_slice(&0x0000_2000u32.to_le_bytes());
        data[0x78..0x7C].copy_from_slice(&0x0000_3004u32.to_le_bytes());
        let msix = ConfigSpace::new(&data).msix(0x70).unwrap();
        assert_eq!(msix.table_size(), 4);
        assert!(msix.control.enable());
        assert!(!msix.control.function_mask());
        assert_eq!(msix.table.bir(), 0);
        assert_eq!(msix.table.byte_offset(), 0x2000);
        assert_eq!(msix.pba.bir(), 4);
        assert_eq!(msix.pba.byte_offset(), 0x3000);
    }

    #[test]
    fn vendor_length_only() {
        let mut data = space_with_list(0x80);
        put_cap(&mut data, 0x80, 0x09, 0x00);
        data[0x82] = 0x14;
        let space = ConfigSpace::new(&data);
        let vendor = space.vendor_capability(0x80).unwrap();
        assert_eq!(vendor.length, 0x14);
        assert_eq!(
            space.find_capability(regs::CAP_ID_VENDOR).map(|(off, _)| off),
            Some(0x80)
        );
    }
}
