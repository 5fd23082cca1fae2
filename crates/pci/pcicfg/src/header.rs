//! The 64-byte configuration header.
//!
//! [`RawHeader`] is the byte-exact layout (all multi-byte fields
//! little-endian, alignment 1) and can be overlaid on any buffer offset.
//! [`Header`] is a borrowed view over it with native-endian accessors and
//! typed registers.

use pcicfg_binparse::{FromBytes, Le16, Le32, Unaligned};

use crate::class::ClassCode;
use crate::error::DecodeError;
use crate::register::{Bist, CommandRegister, HeaderType, StatusRegister};
use crate::regs;

/// Raw configuration header as laid out in configuration space.
///
/// The layout is that of a type 0 (endpoint) header; other header types
/// share the first 16 bytes and reuse the rest for their own fields.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, FromBytes, Unaligned)]
#[repr(C)]
#[binparse(size = 64)]
pub struct RawHeader {
    /// Vendor ID.
    pub vendor_id: Le16,
    /// Device ID.
    pub device_id: Le16,
    /// Command register.
    pub command: Le16,
    /// Status register.
    pub status: Le16,
    /// Revision ID.
    pub revision_id: u8,
    /// Programming interface.
    pub prog_if: u8,
    /// Subclass code.
    pub subclass: u8,
    /// Base class code.
    pub base_class: u8,
    /// Cache line size, in dwords.
    pub cache_line_size: u8,
    /// Latency timer.
    pub latency_timer: u8,
    /// Header type.
    pub header_type: u8,
    /// Built-in self test.
    pub bist: u8,
    /// Base address registers 0-5.
    pub bars: [Le32; regs::BAR_COUNT],
    /// `CardBus` CIS pointer.
    pub cardbus_cis: Le32,
    /// Subsystem vendor ID.
    pub subsystem_vendor_id: Le16,
    /// Subsystem device ID.
    pub subsystem_id: Le16,
    /// Expansion ROM base address.
    pub expansion_rom: Le32,
    /// Offset of the first legacy capability.
    pub capabilities_ptr: u8,
    /// Reserved bytes 0x35-0x3B.
    pub reserved: [u8; 7],
    /// Interrupt line.
    pub interrupt_line: u8,
    /// Interrupt pin (0 = none, 1-4 = INTA#-INTD#).
    pub interrupt_pin: u8,
    /// Min grant.
    pub min_grant: u8,
    /// Max latency.
    pub max_latency: u8,
}

/// Borrowed view of the configuration header at the start of a buffer.
#[derive(Clone, Copy, Debug)]
pub struct Header<'a> {
    raw: &'a RawHeader,
}

impl<'a> Header<'a> {
    /// Decodes the header at the start of `data`.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::BufferTooShort`] if `data` is shorter than 64
    /// bytes.
    pub fn decode(data: &'a [u8]) -> Result<Self, DecodeError> {
        let raw = RawHeader::ref_from(data).ok_or(DecodeError::BufferTooShort {
            offset: 0,
            size: RawHeader::SIZE,
            len: data.len(),
        })?;
        Ok(Self { raw })
    }

    /// Returns the underlying raw layout.
    #[must_use]
    pub fn raw(&self) -> &'a RawHeader {
        self.raw
    }

    /// Vendor ID.
    #[must_use]
    pub fn vendor_id(&self) -> u16 {
        self.raw.vendor_id.get()
    }

    /// Device ID.
    #[must_use]
    pub fn device_id(&self) -> u16 {
        self.raw.device_id.get()
    }

    /// Command register.
    #[must_use]
    pub fn command(&self) -> CommandRegister {
        CommandRegister::from_bits(self.raw.command.get())
    }

    /// Status register.
    #[must_use]
    pub fn status(&self) -> StatusRegister {
        StatusRegister::from_bits(self.raw.status.get())
    }

    /// Revision ID.
    #[must_use]
    pub fn revision_id(&self) -> u8 {
        self.raw.revision_id
    }

    /// Programming interface.
    #[must_use]
    pub fn prog_if(&self) -> u8 {
        self.raw.prog_if
    }

    /// Subclass code.
    #[must_use]
    pub fn subclass(&self) -> u8 {
        self.raw.subclass
    }

    /// Base class code.
    #[must_use]
    pub fn base_class(&self) -> u8 {
        self.raw.base_class
    }

    /// Base class, subclass and programming interface together.
    #[must_use]
    pub fn class_code(&self) -> ClassCode {
        ClassCode::new(self.raw.base_class, self.raw.subclass, self.raw.prog_if)
    }

    /// Cache line size.
    #[must_use]
    pub fn cache_line_size(&self) -> u8 {
        self.raw.cache_line_size
    }

    /// Latency timer.
    #[must_use]
    pub fn latency_timer(&self) -> u8 {
        self.raw.latency_timer
    }

    /// Header Type register.
    #[must_use]
    pub fn header_type(&self) -> HeaderType {
        HeaderType::from_bits(self.raw.header_type)
    }

    /// BIST register.
    #[must_use]
    pub fn bist(&self) -> Bist {
        Bist::from_bits(self.raw.bist)
    }

    /// Raw value of BAR `index`, or `None` if `index` is not 0-5.
    #[must_use]
    pub fn bar(&self, index: usize) -> Option<u32> {
        self.raw.bars.get(index).map(|bar| bar.get())
    }

    /// All six raw BAR values.
    #[must_use]
    pub fn bars(&self) -> [u32; regs::BAR_COUNT] {
        self.raw.bars.map(Le32::get)
    }

    /// Decoded type of BAR `index`.
    #[must_use]
    pub fn bar_kind(&self, index: usize) -> Option<BarKind> {
        self.bar(index).map(BarKind::from_raw)
    }

    /// Base address programmed into BAR `index`, type bits masked off.
    ///
    /// A 64-bit memory BAR takes its upper half from the following BAR;
    /// `None` is returned if that BAR does not exist.
    #[must_use]
    pub fn bar_address(&self, index: usize) -> Option<u64> {
        let low = self.bar(index)?;
        match BarKind::from_raw(low) {
            BarKind::Io => Some(u64::from(low & !0x3)),
            BarKind::Memory64 { .. } => {
                let high = self.bar(index + 1)?;
                Some((u64::from(high) << 32) | u64::from(low & !0xF))
            }
            BarKind::Memory32 { .. } | BarKind::MemoryReserved => Some(u64::from(low & !0xF)),
        }
    }

    /// `CardBus` CIS pointer.
    #[must_use]
    pub fn cardbus_cis(&self) -> u32 {
        self.raw.cardbus_cis.get()
    }

    /// Subsystem vendor ID.
    #[must_use]
    pub fn subsystem_vendor_id(&self) -> u16 {
        self.raw.subsystem_vendor_id.get()
    }

    /// Subsystem device ID.
    #[must_use]
    pub fn subsystem_id(&self) -> u16 {
        self.raw.subsystem_id.get()
    }

    /// Expansion ROM base address register.
    #[must_use]
    pub fn expansion_rom(&self) -> u32 {
        self.raw.expansion_rom.get()
    }

    /// Capabilities pointer, meaningful only when
    /// [`StatusRegister::capabilities_list`] is set.
    #[must_use]
    pub fn capabilities_ptr(&self) -> u8 {
        self.raw.capabilities_ptr
    }

    /// Reserved bytes 0x35-0x3B, as found.
    #[must_use]
    pub fn reserved(&self) -> [u8; 7] {
        self.raw.reserved
    }

    /// Interrupt line.
    #[must_use]
    pub fn interrupt_line(&self) -> u8 {
        self.raw.interrupt_line
    }

    /// Interrupt pin.
    #[must_use]
    pub fn interrupt_pin(&self) -> u8 {
        self.raw.interrupt_pin
    }

    /// Min grant.
    #[must_use]
    pub fn min_grant(&self) -> u8 {
        self.raw.min_grant
    }

    /// Max latency.
    #[must_use]
    pub fn max_latency(&self) -> u8 {
        self.raw.max_latency
    }
}

impl<'a> From<&'a RawHeader> for Header<'a> {
    fn from(raw: &'a RawHeader) -> Self {
        Self { raw }
    }
}

// ---- Header type ------------------------------------------------------------

/// Configuration header layout selected by the Header Type register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderKind {
    /// Type 0: endpoint.
    Endpoint,
    /// Type 1: PCI-to-PCI bridge.
    PciBridge,
    /// Type 2: `CardBus` bridge.
    CardBusBridge,
    /// Any other layout value.
    Unknown(u8),
}

impl HeaderType {
    /// Decodes the layout field.
    #[must_use]
    pub const fn kind(self) -> HeaderKind {
        match self.layout() {
            0 => HeaderKind::Endpoint,
            1 => HeaderKind::PciBridge,
            2 => HeaderKind::CardBusBridge,
            other => HeaderKind::Unknown(other),
        }
    }
}

// ---- BARs -------------------------------------------------------------------

/// Type of a base address register, from its low bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarKind {
    /// I/O space BAR.
    Io,
    /// 32-bit memory BAR.
    Memory32 {
        /// Reads have no side effects.
        prefetchable: bool,
    },
    /// 64-bit memory BAR; the next BAR holds the upper half.
    Memory64 {
        /// Reads have no side effects.
        prefetchable: bool,
    },
    /// Memory BAR with the reserved type encoding `01b`.
    MemoryReserved,
}

impl BarKind {
    /// Decodes the type bits of a raw BAR value.
    #[must_use]
    pub const fn from_raw(raw: u32) -> Self {
        if raw & 0x1 != 0 {
            return Self::Io;
        }
        let prefetchable = raw & 0x8 != 0;
        match (raw >> 1) & 0x3 {
            0b00 => Self::Memory32 { prefetchable },
            0b10 => Self::Memory64 { prefetchable },
            _ => Self::MemoryReserved,
        }
    }
}
