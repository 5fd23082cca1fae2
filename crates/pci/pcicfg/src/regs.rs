//! Configuration space offsets and well-known IDs.

// -- Regions ------------------------------------------------------------------

/// Size of the standard header (type 0 and type 1 alike).
pub const HEADER_SIZE: usize = 0x40;
/// Size of a legacy PCI configuration space.
pub const LEGACY_SPACE_SIZE: usize = 0x100;
/// Size of a `PCIe` configuration space.
pub const EXTENDED_SPACE_SIZE: usize = 0x1000;
/// First byte of the extended capability region; root of the extended chain.
pub const EXTENDED_CAPABILITIES: usize = 0x100;

// -- Header fields ------------------------------------------------------------

/// Vendor ID (16-bit, offset 0x00).
pub const VENDOR_ID: usize = 0x00;
/// Device ID (16-bit, offset 0x02).
pub const DEVICE_ID: usize = 0x02;
/// Command register (16-bit, offset 0x04).
pub const COMMAND: usize = 0x04;
/// Status register (16-bit, offset 0x06).
pub const STATUS: usize = 0x06;
/// Revision ID (8-bit, offset 0x08).
pub const REVISION: usize = 0x08;
/// Programming Interface (8-bit, offset 0x09).
pub const PROG_IF: usize = 0x09;
/// Subclass code (8-bit, offset 0x0A).
pub const SUBCLASS: usize = 0x0A;
/// Base class code (8-bit, offset 0x0B).
pub const CLASS: usize = 0x0B;
/// Cache Line Size (8-bit, offset 0x0C).
pub const CACHE_LINE_SIZE: usize = 0x0C;
/// Latency Timer (8-bit, offset 0x0D).
pub const LATENCY_TIMER: usize = 0x0D;
/// Header type (8-bit, offset 0x0E). Bit 7 = multi-function.
pub const HEADER_TYPE: usize = 0x0E;
/// Built-in self test (8-bit, offset 0x0F).
pub const BIST: usize = 0x0F;
/// Base Address Register 0 (32-bit, offset 0x10). BAR1-5 at +4 intervals.
pub const BAR0: usize = 0x10;
/// Number of BARs in a type 0 header.
pub const BAR_COUNT: usize = 6;
/// `CardBus` CIS Pointer (32-bit, offset 0x28).
pub const CARDBUS_CIS: usize = 0x28;
/// Subsystem Vendor ID (16-bit, offset 0x2C).
pub const SUBSYSTEM_VENDOR_ID: usize = 0x2C;
/// Subsystem Device ID (16-bit, offset 0x2E).
pub const SUBSYSTEM_DEVICE_ID: usize = 0x2E;
/// Expansion ROM Base Address (32-bit, offset 0x30).
pub const EXPANSION_ROM: usize = 0x30;
/// Capabilities Pointer (8-bit, offset 0x34), pointer to the first capability.
pub const CAPABILITIES_PTR: usize = 0x34;
/// Reserved bytes 0x35-0x3B.
pub const RESERVED: usize = 0x35;
/// Interrupt Line (8-bit, offset 0x3C).
pub const INTERRUPT_LINE: usize = 0x3C;
/// Interrupt Pin (8-bit, offset 0x3D).
pub const INTERRUPT_PIN: usize = 0x3D;
/// Min Grant (8-bit, offset 0x3E).
pub const MIN_GRANT: usize = 0x3E;
/// Max Latency (8-bit, offset 0x3F).
pub const MAX_LATENCY: usize = 0x3F;

// -- Status register bits -----------------------------------------------------

/// Bit 4 of the Status register: capabilities list present.
pub const STATUS_CAPABILITIES_LIST: u16 = 1 << 4;

// -- PCI capability IDs -------------------------------------------------------

/// Power Management capability ID.
pub const CAP_ID_POWER_MANAGEMENT: u8 = 0x01;
/// MSI capability ID.
pub const CAP_ID_MSI: u8 = 0x05;
/// Vendor-specific capability ID.
pub const CAP_ID_VENDOR: u8 = 0x09;
/// PCI Express capability ID.
pub const CAP_ID_PCI_EXPRESS: u8 = 0x10;
/// MSI-X capability ID.
pub const CAP_ID_MSIX: u8 = 0x11;

// -- PCIe extended capability IDs ---------------------------------------------

/// Advanced Error Reporting extended capability ID.
pub const ECAP_ID_AER: u16 = 0x0001;
/// Device Serial Number extended capability ID.
pub const ECAP_ID_DSN: u16 = 0x0003;
/// Vendor-Specific Extended Capability ID.
pub const ECAP_ID_VSEC: u16 = 0x000B;
/// Designated Vendor-Specific Extended Capability ID.
pub const ECAP_ID_DVSEC: u16 = 0x0023;
