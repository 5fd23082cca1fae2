//! `pcicfg-binparse` --- bounds-checked reads of fixed-layout structures from
//! byte slices.
//!
//! Configuration space captures arrive as plain `&[u8]`. This crate provides
//! the [`FromBytes`] trait for copying a `#[repr(C)]` structure out of such a
//! slice at an arbitrary offset, the [`Unaligned`] trait for borrowing one in
//! place, and the little-endian integer wrappers [`Le16`], [`Le32`] and
//! [`Le64`] that make a layout independent of host byte order.
//!
//! # Usage
//!
//! ```ignore
//! #[derive(Clone, Copy, FromBytes, Unaligned)]
//! #[repr(C)]
//! #[binparse(size = 4)]
//! struct NodeHeader {
//!     id: Le16,
//!     next: Le16,
//! }
//!
//! let node = NodeHeader::ref_at(data, 0x100).ok_or(Error::Truncated)?;
//! ```

#![no_std]
#![warn(missing_docs)]

// Lets the derive output (`pcicfg_binparse::FromBytes`) resolve in this crate's
// own tests.
extern crate self as pcicfg_binparse;

use core::fmt;
use core::mem::{align_of, size_of};

pub use pcicfg_binparse_macros::{FromBytes, Unaligned};

/// Types that are valid for every bit pattern and can be copied out of a
/// byte slice.
///
/// # Safety
///
/// Implementors must be `#[repr(C)]` (or `#[repr(transparent)]`) types whose
/// fields all implement `FromBytes`, so that any sequence of
/// `size_of::<Self>()` bytes is a valid value.
pub unsafe trait FromBytes: Copy + Sized {
    /// Size of the encoded structure in bytes.
    const SIZE: usize = size_of::<Self>();

    /// Copies a value out of `data` starting at `offset`.
    ///
    /// Returns `None` if `offset + Self::SIZE` overflows or exceeds
    /// `data.len()`. No byte outside `data` is ever touched.
    #[must_use]
    fn read_at(data: &[u8], offset: usize) -> Option<Self> {
        let end = offset.checked_add(Self::SIZE)?;
        let bytes = data.get(offset..end)?;
        // SAFETY: `bytes` holds exactly `size_of::<Self>()` initialized bytes
        // and the trait contract guarantees every bit pattern is valid.
        // `read_unaligned` imposes no alignment requirement.
        Some(unsafe { core::ptr::read_unaligned(bytes.as_ptr().cast::<Self>()) })
    }

    /// Copies a value out of the start of `data`.
    #[must_use]
    fn read_from(data: &[u8]) -> Option<Self> {
        Self::read_at(data, 0)
    }
}

/// `FromBytes` types with an alignment of one and no padding, which can be
/// borrowed directly from a byte slice and viewed as bytes again.
///
/// # Safety
///
/// Implementors must have `align_of::<Self>() == 1` and contain no padding
/// bytes. `#[derive(Unaligned)]` checks both at compile time.
pub unsafe trait Unaligned: FromBytes {
    /// Borrows a value from `data` starting at `offset` without copying.
    ///
    /// Returns `None` under the same conditions as [`FromBytes::read_at`].
    #[must_use]
    fn ref_at(data: &[u8], offset: usize) -> Option<&Self> {
        const { assert!(align_of::<Self>() == 1) };
        let end = offset.checked_add(Self::SIZE)?;
        let bytes = data.get(offset..end)?;
        // SAFETY: alignment is 1, the slice is exactly `Self::SIZE` bytes long,
        // and every bit pattern is valid. The returned reference borrows
        // `data`, so it cannot outlive the buffer.
        Some(unsafe { &*bytes.as_ptr().cast::<Self>() })
    }

    /// Borrows a value from the start of `data`.
    #[must_use]
    fn ref_from(data: &[u8]) -> Option<&Self> {
        Self::ref_at(data, 0)
    }

    /// Returns the in-memory encoding of `self`.
    #[must_use]
    fn as_bytes(&self) -> &[u8] {
        // SAFETY: the trait contract guarantees no padding, so all
        // `Self::SIZE` bytes behind `self` are initialized.
        unsafe { core::slice::from_raw_parts(core::ptr::from_ref(self).cast::<u8>(), Self::SIZE) }
    }
}

macro_rules! impl_primitive {
    ($($ty:ty),* $(,)?) => {
        $(
            // SAFETY: primitive integers are valid for every bit pattern.
            unsafe impl FromBytes for $ty {}
        )*
    };
}

impl_primitive!(u8, i8, u16, i16, u32, i32, u64, i64);

// SAFETY: single-byte integers have alignment 1 and no padding.
unsafe impl Unaligned for u8 {}
// SAFETY: single-byte integers have alignment 1 and no padding.
unsafe impl Unaligned for i8 {}

// SAFETY: an array of `FromBytes` elements is valid for every bit pattern.
unsafe impl<T: FromBytes, const N: usize> FromBytes for [T; N] {}
// SAFETY: arrays have the alignment of their element and no padding between
// elements.
unsafe impl<T: Unaligned, const N: usize> Unaligned for [T; N] {}

macro_rules! le_int {
    ($(#[$meta:meta])* $name:ident, $int:ty, $bytes:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
        #[repr(transparent)]
        pub struct $name([u8; $bytes]);

        // SAFETY: `repr(transparent)` over a byte array, all bit patterns are
        // valid.
        unsafe impl FromBytes for $name {}
        // SAFETY: alignment 1, no padding.
        unsafe impl Unaligned for $name {}

        impl $name {
            /// Encodes a native-endian value.
            #[must_use]
            pub const fn new(value: $int) -> Self {
                Self(value.to_le_bytes())
            }

            /// Decodes to a native-endian value.
            #[must_use]
            pub const fn get(self) -> $int {
                <$int>::from_le_bytes(self.0)
            }
        }

        impl From<$int> for $name {
            fn from(value: $int) -> Self {
                Self::new(value)
            }
        }

        impl From<$name> for $int {
            fn from(value: $name) -> Self {
                value.get()
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{:#x}", self.get())
            }
        }
    };
}

le_int!(
    /// Little-endian 16-bit integer with alignment 1.
    Le16, u16, 2
);
le_int!(
    /// Little-endian 32-bit integer with alignment 1.
    Le32, u32, 4
);
le_int!(
    /// Little-endian 64-bit integer with alignment 1.
    Le64, u64, 8
);

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Debug, FromBytes, Unaligned)]
    #[repr(C)]
    #[binparse(size = 7)]
    struct Sample {
        tag: u8,
        word: Le16,
        dword: Le32,
    }

    const BYTES: [u8; 9] = [0xAA, 0x34, 0x12, 0x78, 0x56, 0x34, 0x12, 0xEE, 0xFF];

    #[test]
    fn le_wrappers_decode_little_endian() {
        assert_eq!(Le16::new(0x1234).get(), 0x1234);
        assert_eq!(Le16::read_from(&[0x34, 0x12]).map(Le16::get), Some(0x1234));
        assert_eq!(Le32::read_at(&BYTES, 3).map(Le32::get), Some(0x1234_5678));
        assert_eq!(
            Le64::new(0x0102_0304_0506_0708).as_bytes(),
            &[8, 7, 6, 5, 4, 3, 2, 1]
        );
    }

    #[test]
    fn read_at_copies_fields() {
        let s = Sample::read_at(&BYTES, 0).unwrap();
        assert_eq!(s.tag, 0xAA);
        assert_eq!(s.word.get(), 0x1234);
        assert_eq!(s.dword.get(), 0x1234_5678);
        assert_eq!(Sample::SIZE, 7);
    }

    #[test]
    fn read_past_end_is_rejected() {
        assert!(Sample::read_at(&BYTES, 2).is_some());
        assert!(Sample::read_at(&BYTES, 3).is_none());
        assert!(Sample::read_at(&BYTES, usize::MAX).is_none());
        assert!(Le32::read_from(&[1, 2, 3]).is_none());
    }

    #[test]
    fn ref_at_borrows_in_place() {
        let s = Sample::ref_at(&BYTES, 1).unwrap();
        assert_eq!(s.tag, 0x34);
        assert_eq!(s.as_bytes(), &BYTES[1..8]);
        assert!(Sample::ref_at(&BYTES, 3).is_none());
    }

    #[test]
    fn odd_offsets_are_fine() {
        // Every offset that fits must succeed regardless of alignment.
        for offset in 0..=BYTES.len() - 4 {
            assert!(Le32::read_at(&BYTES, offset).is_some());
            assert!(Le32::ref_at(&BYTES, offset).is_some());
        }
    }
}
