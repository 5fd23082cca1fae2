//! Parsing logic for the `bitfield!` DSL.
//!
//! Handles parsing of the DSL syntax into intermediate representation types
//! and validates the field layout before the code generator sees it.

use syn::parse::{Parse, ParseStream};
use syn::{Attribute, Ident, LitInt, Token, Visibility, braced, bracketed};

/// A complete register definition.
pub struct Register {
    /// Doc attributes on the struct.
    pub attrs: Vec<Attribute>,
    /// Visibility of the generated struct.
    pub vis: Visibility,
    /// Name of the generated struct.
    pub name: Ident,
    /// Backing integer width.
    pub width: RegWidth,
    /// Field definitions, lowest bit first.
    pub fields: Vec<FieldDef>,
}

/// Width of a register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegWidth {
    /// 8-bit register.
    U8,
    /// 16-bit register.
    U16,
    /// 32-bit register.
    U32,
    /// 64-bit register.
    U64,
}

impl RegWidth {
    /// Returns the Rust type name for this width.
    pub fn type_name(self) -> &'static str {
        match self {
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
        }
    }

    /// Returns the number of bits in this width.
    pub fn bits(self) -> u32 {
        match self {
            Self::U8 => 8,
            Self::U16 => 16,
            Self::U32 => 32,
            Self::U64 => 64,
        }
    }
}

/// A single bit-field definition.
pub struct FieldDef {
    /// Doc attributes on this field.
    pub attrs: Vec<Attribute>,
    /// Lowest bit of the field.
    pub lsb: u32,
    /// Number of bits in the field.
    pub width: u32,
    /// Field name (used for getter and builder names).
    pub name: Ident,
}

impl FieldDef {
    /// Returns the bit just above the field.
    pub fn end(&self) -> u32 {
        self.lsb + self.width
    }

    /// Returns the unshifted mask for the field.
    pub fn mask(&self) -> u64 {
        if self.width >= 64 {
            u64::MAX
        } else {
            (1u64 << self.width) - 1
        }
    }
}

impl Parse for Register {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let attrs = input.call(Attribute::parse_outer)?;
        let vis: Visibility = input.parse()?;
        let name: Ident = input.parse()?;
        input.parse::<Token![:]>()?;

        let width_ident: Ident = input.parse()?;
        let width = match width_ident.to_string().as_str() {
            "u8" => RegWidth::U8,
            "u16" => RegWidth::U16,
            "u32" => RegWidth::U32,
            "u64" => RegWidth::U64,
            _ => {
                return Err(syn::Error::new(
                    width_ident.span(),
                    "expected register width: u8, u16, u32, or u64",
                ));
            }
        };

        let content;
        braced!(content in input);

        let mut fields = Vec::new();
        while !content.is_empty() {
            fields.push(content.call(parse_field)?);
        }

        validate_layout(&name, width, &fields)?;

        Ok(Self {
            attrs,
            vis,
            name,
            width,
            fields,
        })
    }
}

/// Parses a single field definition line: `[bit] name` or `[lo..hi] name`.
fn parse_field(input: ParseStream) -> syn::Result<FieldDef> {
    let attrs = input.call(Attribute::parse_outer)?;

    let bracket_content;
    bracketed!(bracket_content in input);

    let lo_lit: LitInt = bracket_content.parse()?;
    let lsb: u32 = lo_lit.base10_parse()?;

    let width = if bracket_content.peek(Token![..=]) {
        bracket_content.parse::<Token![..=]>()?;
        let hi_lit: LitInt = bracket_content.parse()?;
        let hi: u32 = hi_lit.base10_parse()?;
        if hi < lsb {
            return Err(syn::Error::new(hi_lit.span(), "bit range is reversed"));
        }
        hi - lsb + 1
    } else if bracket_content.peek(Token![..]) {
        bracket_content.parse::<Token![..]>()?;
        let hi_lit: LitInt = bracket_content.parse()?;
        let hi: u32 = hi_lit.base10_parse()?;
        if hi <= lsb {
            return Err(syn::Error::new(hi_lit.span(), "bit range is empty"));
        }
        hi - lsb
    } else {
        1
    };

    let name: Ident = input.parse()?;

    // Consume trailing comma if present.
    let _ = input.parse::<Option<Token![,]>>();

    Ok(FieldDef {
        attrs,
        lsb,
        width,
        name,
    })
}

/// Checks that fields start at bit 0, follow each other without gaps or
/// overlap, and together cover exactly the register width.
fn validate_layout(name: &Ident, width: RegWidth, fields: &[FieldDef]) -> syn::Result<()> {
    let mut next_bit = 0u32;
    for field in fields {
        if field.lsb != next_bit {
            let msg = if field.lsb < next_bit {
                format!("field `{}` overlaps the previous field", field.name)
            } else {
                format!(
                    "gap before field `{}`: bits {}..{} are not declared",
                    field.name, next_bit, field.lsb
                )
            };
            return Err(syn::Error::new(field.name.span(), msg));
        }
        next_bit = field.end();
        if next_bit > width.bits() {
            return Err(syn::Error::new(
                field.name.span(),
                format!(
                    "field `{}` extends past bit {} of a {}-bit register",
                    field.name,
                    width.bits() - 1,
                    width.bits()
                ),
            ));
        }
    }

    if next_bit != width.bits() {
        return Err(syn::Error::new(
            name.span(),
            format!(
                "fields of `{}` cover {} bits, register is {} bits wide",
                name,
                next_bit,
                width.bits()
            ),
        ));
    }

    Ok(())
}
