//! `pcicfg` --- a standalone, `no_std` PCI/PCIe configuration space decoder.
//!
//! This crate decodes a raw configuration space buffer (256 bytes for PCI,
//! 4096 bytes for `PCIe`) into typed, bit-exact register views and resolves the
//! numeric classification codes found there (class codes, capability IDs)
//! into their PCI-SIG descriptions. It never writes to the buffer and never
//! reads past its end.
//!
//! # Usage
//!
//! ```ignore
//! let space = ConfigSpace::new(bytes);
//! let hdr = space.header()?;
//! println!("{:04x}:{:04x} {}", hdr.vendor_id(), hdr.device_id(), hdr.class_code());
//! for (offset, cap) in space.capabilities() {
//!     println!("{offset:#04x} {}", cap.name().unwrap_or("Unknown"));
//! }
//! print!("{}", printer::render(Some(bytes), 2)?);
//! ```

#![no_std]
#![warn(missing_docs)]

pub mod cap;
pub mod class;
pub mod ecap;
pub mod error;
pub mod header;
pub mod printer;
pub mod register;
pub mod regs;
mod space;

pub use cap::{
    Capabilities, CapabilityEntry, MsiCapability, MsixCapability, PowerManagement, PowerState,
    VendorCapability,
};
pub use class::{ClassCode, CodeSpace, prog_if_name, resolve, subclass_name};
pub use ecap::{
    DesignatedVendorCapability, DeviceSerialNumber, ExtendedCapabilities, ExtendedCapabilityEntry,
    VendorExtendedCapability,
};
pub use error::DecodeError;
pub use header::{BarKind, Header, HeaderKind, RawHeader};
pub use printer::{HeaderReport, render};
pub use space::ConfigSpace;
