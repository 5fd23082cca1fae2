//! Declarative bit-field register layouts.
//!
//! This crate re-exports the [`bitfield!`] macro from
//! `pcicfg-bitfield-macros`, which generates a typed newtype over a register
//! value with explicit shift/mask accessors for each named bit range, and
//! provides the [`BitField`] descriptor the generated types publish as their
//! `FIELDS` table.
//!
//! Layouts are checked twice: the macro rejects gaps, overlaps, and short or
//! long layouts at expansion time, and every generated type carries a
//! `const` assertion built on [`layout_is_exact`].
//!
//! # Example
//!
//! ```ignore
//! use pcicfg_bitfield::bitfield;
//!
//! bitfield! {
//!     /// MSI Message Control.
//!     pub MsiMessageControl: u16 {
//!         /// MSI Enable.
//!         [0] enable,
//!         /// Multiple Message Capable (log2 of vectors requested).
//!         [1..4] multiple_message_capable,
//!         // ...
//!         /// Reserved.
//!         [9..16] reserved,
//!     }
//! }
//! ```

#![no_std]
#![warn(missing_docs)]

// Lets the macro output (`pcicfg_bitfield::BitField`) resolve in this crate's
// own tests.
extern crate self as pcicfg_bitfield;

pub use pcicfg_bitfield_macros::bitfield;

/// One named bit range of a register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitField {
    /// Field name as declared.
    pub name: &'static str,
    /// Lowest bit of the field.
    pub lsb: u32,
    /// Number of bits in the field.
    pub width: u32,
}

impl BitField {
    /// Creates a field descriptor.
    #[must_use]
    pub const fn new(name: &'static str, lsb: u32, width: u32) -> Self {
        Self { name, lsb, width }
    }

    /// Returns the bit just above the field.
    #[must_use]
    pub const fn end(self) -> u32 {
        self.lsb + self.width
    }

    /// Returns the field mask shifted into register position.
    #[must_use]
    pub const fn mask(self) -> u64 {
        let unshifted = if self.width >= 64 {
            u64::MAX
        } else {
            (1u64 << self.width) - 1
        };
        unshifted << self.lsb
    }

    /// Returns `true` for fields that hold reserved bits.
    #[must_use]
    pub fn is_reserved(self) -> bool {
        self.name.starts_with("reserved") || self.name.starts_with("rsvd")
    }
}

/// Returns `true` if `fields` start at bit 0, are contiguous, do not overlap,
/// and their widths sum to exactly `bits`.
#[must_use]
pub const fn layout_is_exact(fields: &[BitField], bits: u32) -> bool {
    let mut next_bit = 0;
    let mut i = 0;
    while i < fields.len() {
        let field = fields[i];
        if field.width == 0 || field.lsb != next_bit {
            return false;
        }
        next_bit = field.end();
        i += 1;
    }
    next_bit == bits
}

#[cfg(test)]
mod tests {
    use super::*;

    bitfield! {
        /// A register exercising single bits, ranges, and reserved space.
        pub Sample: u16 {
            /// Low flag.
            [0] flag,
            /// Three-bit count.
            [1..4] count,
            /// Reserved.
            [4..=11] reserved,
            /// High nibble.
            [12..16] top,
        }
    }

    #[test]
    fn getters_shift_and_mask() {
        let reg = Sample::from_bits(0xA5F7);
        assert!(reg.flag());
        assert_eq!(reg.count(), 0b011);
        assert_eq!(reg.reserved(), 0x5F);
        assert_eq!(reg.top(), 0xA);
    }

    #[test]
    fn builders_preserve_other_bits() {
        let reg = Sample::from_bits(0xFFFF).with_flag(false).with_count(0);
        assert_eq!(reg.bits(), 0xFFF0);
        // Oversized values are truncated to the field width.
        let reg = Sample::default().with_top(0x1F);
        assert_eq!(reg.bits(), 0xF000);
    }

    #[test]
    fn reserved_bits_survive_round_trip() {
        let reg = Sample::default()
            .with_flag(true)
            .with_count(5)
            .with_reserved(0xC3)
            .with_top(9);
        let again = Sample::from_bits(u16::from(reg));
        assert_eq!(again, reg);
        assert_eq!(again.reserved(), 0xC3);
    }

    #[test]
    fn field_table_is_exact() {
        assert_eq!(Sample::BITS, 16);
        assert_eq!(Sample::FIELDS.len(), 4);
        assert!(layout_is_exact(Sample::FIELDS, Sample::BITS));
        assert!(Sample::FIELDS[2].is_reserved());
        assert_eq!(Sample::FIELDS[1].mask(), 0b1110);
    }

    #[test]
    fn layout_check_rejects_gaps_and_overlaps() {
        let gap = [BitField::new("a", 0, 3), BitField::new("b", 4, 4)];
        assert!(!layout_is_exact(&gap, 8));
        let overlap = [BitField::new("a", 0, 4), BitField::new("b", 3, 5)];
        assert!(!layout_is_exact(&overlap, 8));
        let short = [BitField::new("a", 0, 7)];
        assert!(!layout_is_exact(&short, 8));
        let exact = [BitField::new("a", 0, 7), BitField::new("b", 7, 1)];
        assert!(layout_is_exact(&exact, 8));
    }
}
