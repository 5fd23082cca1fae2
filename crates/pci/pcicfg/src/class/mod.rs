//! Classification code resolution.
//!
//! Each hardware-defined numeric code space gets its own resolver. The two
//! capability ID spaces are dense and resolved by index
//! ([`capability`]); the class code spaces are sparse and resolved by exact
//! match in sorted tables ([`device`]). Every resolver is total over `u32`:
//! codes outside a space's known values resolve to `None`.

pub mod capability;
pub mod device;

use core::fmt;

/// A numeric code space with its own table and validity policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodeSpace {
    /// Legacy capability IDs (dense, 0x01..0x16).
    Capability,
    /// `PCIe` extended capability IDs (dense with gaps, 0x0001..0x0035).
    ExtendedCapability,
    /// Base class codes.
    BaseClass,
    /// Subclass codes of the given base class.
    Subclass(u8),
    /// Programming interfaces of CXL memory devices (base 0x05, subclass 0x02).
    CxlMemoryProgIf,
}

/// Base class of memory controllers.
pub const BASE_CLASS_MEMORY: u8 = 0x05;
/// Memory controller subclass of CXL memory devices.
pub const SUBCLASS_CXL_MEMORY: u8 = 0x02;

/// Resolves `code` in `space` to its description.
///
/// Returns `None` for any code the space does not define, including codes
/// wider than the space itself.
#[must_use]
pub fn resolve(space: CodeSpace, code: u32) -> Option<&'static str> {
    match space {
        CodeSpace::Capability => capability::capability_name(code),
        CodeSpace::ExtendedCapability => capability::extended_capability_name(code),
        CodeSpace::BaseClass => device::lookup(device::BASE_CLASSES, code),
        CodeSpace::Subclass(base) => {
            device::subclass_table(base).and_then(|table| device::lookup(table, code))
        }
        CodeSpace::CxlMemoryProgIf => device::lookup(device::CXL_MEMORY_PROG_IF, code),
    }
}

/// Resolves a base class code.
#[must_use]
pub fn base_class_name(base: u8) -> Option<&'static str> {
    resolve(CodeSpace::BaseClass, base.into())
}

/// Resolves `sub` in the subclass space of `base`.
#[must_use]
pub fn subclass_name(base: u8, sub: u8) -> Option<&'static str> {
    resolve(CodeSpace::Subclass(base), sub.into())
}

/// Resolves a programming interface.
///
/// Only CXL memory devices (base 0x05, subclass 0x02) have a programming
/// interface table; every other pair resolves to `None`.
#[must_use]
pub fn prog_if_name(base: u8, sub: u8, prog_if: u8) -> Option<&'static str> {
    match (base, sub) {
        (BASE_CLASS_MEMORY, SUBCLASS_CXL_MEMORY) => {
            resolve(CodeSpace::CxlMemoryProgIf, prog_if.into())
        }
        _ => None,
    }
}

/// The three class code bytes of a header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClassCode {
    /// Base class (header offset 0x0B).
    pub base: u8,
    /// Subclass (header offset 0x0A).
    pub sub: u8,
    /// Programming interface (header offset 0x09).
    pub prog_if: u8,
}

impl ClassCode {
    /// Creates a class code from its three bytes.
    #[must_use]
    pub const fn new(base: u8, sub: u8, prog_if: u8) -> Self {
        Self { base, sub, prog_if }
    }

    /// Returns the 24-bit class code as it appears in the header dword.
    #[must_use]
    pub const fn to_u32(self) -> u32 {
        ((self.base as u32) << 16) | ((self.sub as u32) << 8) | (self.prog_if as u32)
    }

    /// Base class description.
    #[must_use]
    pub fn base_name(self) -> Option<&'static str> {
        base_class_name(self.base)
    }

    /// Subclass description.
    #[must_use]
    pub fn subclass_name(self) -> Option<&'static str> {
        subclass_name(self.base, self.sub)
    }

    /// Programming interface description.
    #[must_use]
    pub fn prog_if_name(self) -> Option<&'static str> {
        prog_if_name(self.base, self.sub, self.prog_if)
    }
}

/// Formats as `BB:SS:PP` followed by whatever descriptions resolve, e.g.
/// `05:02:01 Memory controller / CXL Memory / CXL 2.0 or later`.
impl fmt::Display for ClassCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02x}:{:02x}:{:02x}", self.base, self.sub, self.prog_if)?;
        let names = [self.base_name(), self.subclass_name(), self.prog_if_name()];
        let mut sep = " ";
        for name in names.into_iter().flatten() {
            write!(f, "{sep}{name}")?;
            sep = " / ";
        }
        Ok(())
    }
}
