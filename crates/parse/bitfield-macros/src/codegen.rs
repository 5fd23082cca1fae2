//! Code generation for the `bitfield!` macro.
//!
//! Transforms the parsed register definition into a `repr(transparent)`
//! newtype with shift/mask getters, `with_*` builders, a field table, and a
//! field-by-field `Debug` impl.

use proc_macro2::{Literal, TokenStream};
use quote::{format_ident, quote};

use crate::parse::{FieldDef, Register};

/// Generates the complete output for a register definition.
pub fn generate(reg: &Register) -> TokenStream {
    let vis = &reg.vis;
    let name = &reg.name;
    let attrs = &reg.attrs;
    let ty = width_type(reg);
    let bits = reg.width.bits();

    let descriptors = reg.fields.iter().map(|f| {
        let field_name = f.name.to_string();
        let lsb = f.lsb;
        let width = f.width;
        quote! { pcicfg_bitfield::BitField::new(#field_name, #lsb, #width) }
    });

    let accessors: Vec<TokenStream> = reg
        .fields
        .iter()
        .map(|f| generate_accessors(f, &ty))
        .collect();

    let debug_fields = reg.fields.iter().map(|f| {
        let field_name = &f.name;
        let label = field_name.to_string();
        if f.width == 1 {
            quote! { .field(#label, &self.#field_name()) }
        } else {
            quote! { .field(#label, &format_args!("{:#x}", self.#field_name())) }
        }
    });

    let name_str = name.to_string();
    let layout_msg = format!("field layout of {name_str} does not cover the register exactly");

    quote! {
        #(#attrs)*
        #[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
        #[repr(transparent)]
        #vis struct #name(#ty);

        impl #name {
            /// Register width in bits.
            pub const BITS: u32 = #bits;

            /// Field layout, lowest bit first.
            pub const FIELDS: &'static [pcicfg_bitfield::BitField] = &[#(#descriptors),*];

            /// Wraps a raw register value. Every bit, reserved or not, is kept.
            #[must_use]
            #[inline]
            pub const fn from_bits(raw: #ty) -> Self {
                Self(raw)
            }

            /// Returns the raw register value.
            #[must_use]
            #[inline]
            pub const fn bits(self) -> #ty {
                self.0
            }

            #(#accessors)*
        }

        const _: () = assert!(
            pcicfg_bitfield::layout_is_exact(#name::FIELDS, #name::BITS),
            #layout_msg
        );

        impl From<#ty> for #name {
            fn from(raw: #ty) -> Self {
                Self(raw)
            }
        }

        impl From<#name> for #ty {
            fn from(reg: #name) -> Self {
                reg.0
            }
        }

        impl core::fmt::Debug for #name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.debug_struct(#name_str)
                    #(#debug_fields)*
                    .finish()
            }
        }
    }
}

/// Generates the getter and builder for a single field.
fn generate_accessors(field: &FieldDef, ty: &TokenStream) -> TokenStream {
    let name = &field.name;
    let builder = format_ident!("with_{}", name);
    let attrs = &field.attrs;
    let mask = Literal::u64_unsuffixed(field.mask());
    let lsb = Literal::u32_unsuffixed(field.lsb);
    let builder_doc = format!("Returns a copy with `{name}` replaced.");

    let extracted = if field.lsb == 0 {
        quote! { self.0 & #mask }
    } else {
        quote! { (self.0 >> #lsb) & #mask }
    };
    let cleared = if field.lsb == 0 {
        quote! { self.0 & !#mask }
    } else {
        quote! { self.0 & !(#mask << #lsb) }
    };

    if field.width == 1 {
        let inserted = if field.lsb == 0 {
            quote! { (value as #ty) }
        } else {
            quote! { ((value as #ty) << #lsb) }
        };
        quote! {
            #(#attrs)*
            #[must_use]
            #[inline]
            pub const fn #name(self) -> bool {
                (#extracted) != 0
            }

            #[doc = #builder_doc]
            #[must_use]
            #[inline]
            pub const fn #builder(self, value: bool) -> Self {
                Self((#cleared) | #inserted)
            }
        }
    } else {
        let inserted = if field.lsb == 0 {
            quote! { (value & #mask) }
        } else {
            quote! { ((value & #mask) << #lsb) }
        };
        let builder_doc_trunc = "Bits of `value` above the field width are discarded.";
        quote! {
            #(#attrs)*
            #[must_use]
            #[inline]
            pub const fn #name(self) -> #ty {
                #extracted
            }

            #[doc = #builder_doc]
            #[doc = ""]
            #[doc = #builder_doc_trunc]
            #[must_use]
            #[inline]
            pub const fn #builder(self, value: #ty) -> Self {
                Self((#cleared) | #inserted)
            }
        }
    }
}

/// Returns the token stream for the register's backing type.
fn width_type(reg: &Register) -> TokenStream {
    let ident = format_ident!("{}", reg.width.type_name());
    quote! { #ident }
}
