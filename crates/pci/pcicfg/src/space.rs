//! Bounds-checked view over a configuration space buffer.

use pcicfg_binparse::{FromBytes, Le16, Le32};

use crate::cap::{
    Capabilities, CapabilityEntry, MsiCapability, MsixCapability, PowerManagement,
    VendorCapability,
};
use crate::ecap::{
    DesignatedVendorCapability, DeviceSerialNumber, ExtendedCapabilities,
    ExtendedCapabilityEntry, VendorExtendedCapability,
};
use crate::error::DecodeError;
use crate::header::Header;
use crate::register::{CapabilityHeader, ExtendedCapabilityHeader, MsiMessageControl};
use crate::{cap, regs};

/// A read-only view over a function's configuration space.
///
/// The buffer is usually 256 bytes (PCI) or 4096 bytes (`PCIe`). Shorter
/// buffers are accepted; every decode that needs bytes past the end fails
/// with [`DecodeError::BufferTooShort`]. Bytes beyond 4096 are ignored.
#[derive(Debug, Clone, Copy)]
pub struct ConfigSpace<'a> {
    data: &'a [u8],
}

impl<'a> ConfigSpace<'a> {
    /// Wraps a configuration space buffer.
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        let len = data.len().min(regs::EXTENDED_SPACE_SIZE);
        Self { data: &data[..len] }
    }

    /// Returns the viewed bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &'a [u8] {
        self.data
    }

    /// Number of viewed bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the buffer is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns `true` if the buffer covers the `PCIe` extended region.
    #[must_use]
    pub fn is_extended(&self) -> bool {
        self.data.len() > regs::LEGACY_SPACE_SIZE
    }

    /// Fails unless `size` bytes starting at `offset` are in the buffer.
    pub(crate) fn check(&self, offset: usize, size: usize) -> Result<(), DecodeError> {
        match offset.checked_add(size) {
            Some(end) if end <= self.data.len() => Ok(()),
            _ => Err(self.too_short(offset, size)),
        }
    }

    fn too_short(&self, offset: usize, size: usize) -> DecodeError {
        DecodeError::BufferTooShort {
            offset,
            size,
            len: self.data.len(),
        }
    }

    fn read<T: FromBytes>(&self, offset: usize) -> Result<T, DecodeError> {
        T::read_at(self.data, offset).ok_or_else(|| self.too_short(offset, T::SIZE))
    }

    // ---- Raw reads ----------------------------------------------------------

    /// Reads a byte.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::BufferTooShort`] if `offset` is out of range.
    pub fn read_u8(&self, offset: usize) -> Result<u8, DecodeError> {
        self.read::<u8>(offset)
    }

    /// Reads a little-endian 16-bit word.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::BufferTooShort`] if the word does not fit.
    pub fn read_u16(&self, offset: usize) -> Result<u16, DecodeError> {
        self.read::<Le16>(offset).map(Le16::get)
    }

    /// Reads a little-endian 32-bit dword.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::BufferTooShort`] if the dword does not fit.
    pub fn read_u32(&self, offset: usize) -> Result<u32, DecodeError> {
        self.read::<Le32>(offset).map(Le32::get)
    }

    // ---- Structures ---------------------------------------------------------

    /// Decodes the 64-byte header.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::BufferTooShort`] if the buffer is shorter than
    /// 64 bytes.
    pub fn header(&self) -> Result<Header<'a>, DecodeError> {
        Header::decode(self.data)
    }

    /// Decodes the legacy capability node header at `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::BufferTooShort`] if the two header bytes do not
    /// fit.
    pub fn capability(&self, offset: usize) -> Result<CapabilityEntry, DecodeError> {
        self.read_u16(offset)
            .map(|raw| CapabilityHeader::from_bits(raw).into())
    }

    /// Decodes the extended capability node header at `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::BufferTooShort`] if the header dword does not
    /// fit.
    pub fn extended_capability(
        &self,
        offset: usize,
    ) -> Result<ExtendedCapabilityEntry, DecodeError> {
        self.read_u32(offset)
            .map(|raw| ExtendedCapabilityHeader::from_bits(raw).into())
    }

    /// Decodes the power management capability at `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::BufferTooShort`] if the 8-byte structure does
    /// not fit, or [`DecodeError::UnexpectedCapability`] if the node at
    /// `offset` is not a power management capability.
    pub fn power_management(&self, offset: usize) -> Result<PowerManagement, DecodeError> {
        PowerManagement::decode(self, offset)
    }

    /// Reads MSI Message Control of the MSI capability at `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::BufferTooShort`] if the register does not fit,
    /// or [`DecodeError::UnexpectedCapability`] if the node at `offset` is not
    /// an MSI capability.
    pub fn msi_control(&self, offset: usize) -> Result<MsiMessageControl, DecodeError> {
        cap::read_msi_control(self, offset)
    }

    /// Decodes the MSI capability at `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::BufferTooShort`] if the structure, whose size
    /// depends on Message Control, does not fit, or
    /// [`DecodeError::UnexpectedCapability`] for a node of another type.
    pub fn msi(&self, offset: usize) -> Result<MsiCapability, DecodeError> {
        MsiCapability::decode(self, offset)
    }

    /// Decodes the MSI-X capability at `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::BufferTooShort`] if the 12-byte structure does
    /// not fit, or [`DecodeError::UnexpectedCapability`] for a node of another
    /// type.
    pub fn msix(&self, offset: usize) -> Result<MsixCapability, DecodeError> {
        MsixCapability::decode(self, offset)
    }

    /// Decodes the vendor-specific capability at `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::BufferTooShort`] if the length byte does not
    /// fit, or [`DecodeError::UnexpectedCapability`] for a node of another
    /// type.
    pub fn vendor_capability(&self, offset: usize) -> Result<VendorCapability, DecodeError> {
        VendorCapability::decode(self, offset)
    }

    /// Decodes the Device Serial Number capability at `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::BufferTooShort`] if the 12-byte structure does
    /// not fit, or [`DecodeError::UnexpectedCapability`] for a node of another
    /// type.
    pub fn device_serial_number(&self, offset: usize) -> Result<DeviceSerialNumber, DecodeError> {
        DeviceSerialNumber::decode(self, offset)
    }

    /// Decodes the VSEC capability at `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::BufferTooShort`] or
    /// [`DecodeError::UnexpectedCapability`].
    pub fn vendor_extended_capability(
        &self,
        offset: usize,
    ) -> Result<VendorExtendedCapability, DecodeError> {
        VendorExtendedCapability::decode(self, offset)
    }

    /// Decodes the DVSEC capability at `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::BufferTooShort`] or
    /// [`DecodeError::UnexpectedCapability`].
    pub fn designated_vendor_capability(
        &self,
        offset: usize,
    ) -> Result<DesignatedVendorCapability, DecodeError> {
        DesignatedVendorCapability::decode(self, offset)
    }

    // ---- Chains -------------------------------------------------------------

    /// Returns an iterator over the legacy capability list.
    ///
    /// The list is empty unless the header decodes and its Status register
    /// advertises a capability list.
    #[must_use]
    pub fn capabilities(&self) -> Capabilities<'a> {
        let first = match self.header() {
            Ok(hdr) if hdr.status().capabilities_list() => hdr.capabilities_ptr(),
            _ => 0,
        };
        Capabilities::new(*self, first)
    }

    /// Returns an iterator over the extended capability list.
    #[must_use]
    pub fn extended_capabilities(&self) -> ExtendedCapabilities<'a> {
        ExtendedCapabilities::new(*self)
    }

    /// Returns the first legacy capability with ID `id`.
    #[must_use]
    pub fn find_capability(&self, id: u8) -> Option<(usize, CapabilityEntry)> {
        self.capabilities().find(|(_, entry)| entry.id == id)
    }

    /// Returns the first extended capability with ID `id`.
    #[must_use]
    pub fn find_extended_capability(&self, id: u16) -> Option<(usize, ExtendedCapabilityEntry)> {
        self.extended_capabilities().find(|(_, entry)| entry.id == id)
    }
}
