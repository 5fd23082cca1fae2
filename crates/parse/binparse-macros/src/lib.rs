//! Proc-macro crate for `#[derive(FromBytes)]` and `#[derive(Unaligned)]`.
//!
//! `FromBytes` generates `unsafe impl pcicfg_binparse::FromBytes for T {}` with
//! compile-time assertions verifying `#[repr(C)]` layout, that every field type
//! implements `FromBytes`, and (optionally) the encoded size.
//!
//! `Unaligned` generates `unsafe impl pcicfg_binparse::Unaligned for T {}`
//! after asserting that every field is itself `Unaligned` and that the struct
//! has alignment 1 and no padding.

use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::{format_ident, quote};
use syn::{Data, DeriveInput, Fields, LitInt, Type, parse_macro_input};

/// Derives `pcicfg_binparse::FromBytes` for a `#[repr(C)]` struct.
///
/// # Requirements
///
/// - The struct must have `#[repr(C)]`, `#[repr(C, packed)]` or
///   `#[repr(transparent)]`.
/// - All fields must implement `FromBytes`.
///
/// # Size check
///
/// `#[binparse(size = N)]` adds a compile-time assertion that the struct
/// occupies exactly `N` bytes, pinning the layout to the register map it
/// mirrors.
///
/// # Example
///
/// ```ignore
/// #[derive(Clone, Copy, FromBytes)]
/// #[repr(C)]
/// #[binparse(size = 4)]
/// pub struct RawEcapHeader {
///     pub id: Le16,
///     pub version_next: Le16,
/// }
/// ```
#[proc_macro_derive(FromBytes, attributes(binparse))]
pub fn derive_from_bytes(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match derive_from_bytes_impl(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

/// Derives `pcicfg_binparse::Unaligned` for a `#[repr(C)]` struct whose
/// fields are all `Unaligned`.
///
/// The struct must also derive (or implement) `FromBytes`.
#[proc_macro_derive(Unaligned, attributes(binparse))]
pub fn derive_unaligned(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match derive_unaligned_impl(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn derive_from_bytes_impl(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;
    require_repr_c(input)?;
    let fields = struct_fields(input, "FromBytes")?;

    let field_assertions =
        field_bound_assertions(name, fields, &quote!(pcicfg_binparse::FromBytes), "FromBytes");

    let size_assertion = match expected_size(input)? {
        Some(size) => {
            if !input.generics.params.is_empty() {
                return Err(syn::Error::new_spanned(
                    &input.generics,
                    "#[binparse(size = ..)] is not supported on generic structs",
                ));
            }
            let msg = format!("{name} must be exactly {size} bytes");
            quote! {
                const _: () = assert!(core::mem::size_of::<#name>() == #size, #msg);
            }
        }
        None => quote! {},
    };

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        #(#field_assertions)*

        #size_assertion

        // SAFETY: The derive macro has verified:
        // 1. The struct has #[repr(C)] or #[repr(transparent)] layout.
        // 2. All field types implement FromBytes (checked via where-clause assertions).
        // 3. The struct must also be Copy (enforced by the trait bound).
        unsafe impl #impl_generics pcicfg_binparse::FromBytes for #name #ty_generics #where_clause {}
    })
}

fn derive_unaligned_impl(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;
    require_repr_c(input)?;
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Unaligned can only be derived for non-generic structs",
        ));
    }
    let fields = struct_fields(input, "Unaligned")?;

    let field_assertions =
        field_bound_assertions(name, fields, &quote!(pcicfg_binparse::Unaligned), "Unaligned");

    let field_types: Vec<&Type> = fields.iter().map(|f| &f.ty).collect();
    let align_msg = format!("{name} must have alignment 1");
    let padding_msg = format!("{name} must not contain padding");

    Ok(quote! {
        #(#field_assertions)*

        const _: () = assert!(core::mem::align_of::<#name>() == 1, #align_msg);
        const _: () = assert!(
            core::mem::size_of::<#name>() == 0 #(+ core::mem::size_of::<#field_types>())*,
            #padding_msg
        );

        // SAFETY: every field is Unaligned, and the assertions above prove the
        // struct has alignment 1 and no padding.
        unsafe impl pcicfg_binparse::Unaligned for #name {}
    })
}

/// Verifies `#[repr(C)]`, `#[repr(C, packed)]` or `#[repr(transparent)]`.
fn require_repr_c(input: &DeriveInput) -> syn::Result<()> {
    let has_repr_c = input.attrs.iter().any(|attr| {
        if !attr.path().is_ident("repr") {
            return false;
        }
        let mut found = false;
        let _ = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("C") || meta.path.is_ident("transparent") {
                found = true;
            }
            Ok(())
        });
        found
    });

    if has_repr_c {
        Ok(())
    } else {
        Err(syn::Error::new_spanned(
            &input.ident,
            "binparse derives require #[repr(C)], #[repr(C, packed)] or #[repr(transparent)]",
        ))
    }
}

fn struct_fields<'a>(input: &'a DeriveInput, derive: &str) -> syn::Result<&'a Fields> {
    match &input.data {
        Data::Struct(data) => Ok(&data.fields),
        _ => Err(syn::Error::new_spanned(
            &input.ident,
            format!("{derive} can only be derived for structs"),
        )),
    }
}

/// Generates one zero-sized marker struct per field whose where-clause fails
/// to compile unless the field type satisfies `bound`.
fn field_bound_assertions(
    name: &syn::Ident,
    fields: &Fields,
    bound: &proc_macro2::TokenStream,
    tag: &str,
) -> Vec<proc_macro2::TokenStream> {
    fields
        .iter()
        .enumerate()
        .map(|(i, f)| {
            let ty = &f.ty;
            let assert_name = match &f.ident {
                Some(field_name) => format_ident!("_Assert{}_{}_{}", tag, name, field_name),
                None => format_ident!("_Assert{}_{}_{}", tag, name, i),
            };
            quote! {
                #[doc(hidden)]
                #[allow(non_camel_case_types, dead_code)]
                struct #assert_name where #ty: #bound;
            }
        })
        .collect()
}

/// Parses the optional `#[binparse(size = N)]` attribute.
fn expected_size(input: &DeriveInput) -> syn::Result<Option<usize>> {
    let mut size = None;
    for attr in &input.attrs {
        if !attr.path().is_ident("binparse") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("size") {
                let lit: LitInt = meta.value()?.parse()?;
                size = Some(lit.base10_parse::<usize>()?);
                Ok(())
            } else {
                Err(meta.error("unsupported binparse attribute, expected `size = N`"))
            }
        })?;
    }
    if size == Some(0) {
        return Err(syn::Error::new(
            Span::call_site(),
            "#[binparse(size = 0)] describes no bytes",
        ));
    }
    Ok(size)
}
