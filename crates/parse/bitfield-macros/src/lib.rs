//! Proc-macro crate for the `bitfield!` register layout DSL.
//!
//! Generates a typed newtype over a fixed-width register value with one
//! shift/mask getter and one `with_*` builder per named bit range. The raw
//! value is stored as-is, so reserved bits survive a decode/encode cycle.

mod codegen;
mod parse;

use proc_macro::TokenStream;
use syn::parse_macro_input;

use crate::parse::Register;

/// Generates a bit-field register type.
///
/// # Syntax
///
/// ```ignore
/// bitfield! {
///     /// Doc comment for the struct.
///     pub StructName: width {
///         /// Doc comment for the field.
///         [bit] name,
///         [lo..hi] name,
///         [lo..=hi] name,
///     }
/// }
/// ```
///
/// - `width`: `u8`, `u16`, `u32`, or `u64`
/// - `[bit]`: a single-bit field, read as `bool`
/// - `[lo..hi]` / `[lo..=hi]`: a multi-bit field, read as the register type
///
/// Fields are declared lowest bit first. Expansion fails unless the first
/// field starts at bit 0, each field starts where the previous one ended, and
/// the last field ends at the register width. Reserved ranges must therefore
/// be declared like any other field.
///
/// # Generated Code
///
/// - `const BITS: u32` and `const FIELDS: &[BitField]`
/// - `from_bits(raw)` / `bits()`
/// - per field: `fn name(self)` and `fn with_name(self, value) -> Self`
/// - `From` conversions to and from the raw integer, and a field-wise `Debug`
///
/// # Example
///
/// ```ignore
/// use pcicfg_bitfield::bitfield;
///
/// bitfield! {
///     /// Header Type register.
///     pub HeaderType: u8 {
///         /// Configuration header layout.
///         [0..7] layout,
///         /// Multi-function device.
///         [7] multi_function,
///     }
/// }
/// ```
#[proc_macro]
pub fn bitfield(input: TokenStream) -> TokenStream {
    let reg = parse_macro_input!(input as Register);
    codegen::generate(&reg).into()
}
