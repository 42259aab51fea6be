//! Macro expansion for `#[derive(EnvDefault)]`.
//!
//! Generates an `impl ::envdefault::EnvDefault` containing:
//!
//! - `PREFIX` - from `#[env_default(prefix = "...")]`, if present
//! - `FIELDS` - one `::envdefault::Field` per named field, in declaration order
//!
//! The loading logic itself lives in the runtime crate; the generated code
//! only describes the struct.

use proc_macro2::TokenStream as QuoteStream;
use quote::quote;
use syn::{
    Data, DeriveInput, Error as SynError, Fields, FieldsNamed, Generics, Result as SynResult,
    parse_quote,
};

use crate::field::FieldPlan;
use crate::parse::EnvDefaultAttr;

/// Entry point for the derive.
pub struct Expander;

impl Expander {
    /// Expand the derive input into the trait implementation.
    pub fn expand(input: &DeriveInput) -> SynResult<QuoteStream> {
        let struct_name = &input.ident;
        let generics = Self::with_static_bounds(&input.generics);
        let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

        let struct_attr = EnvDefaultAttr::parse_from_struct(input)?;
        let fields = Self::extract_struct_fields(input)?;

        let plans = fields
            .named
            .iter()
            .map(FieldPlan::new)
            .collect::<SynResult<Vec<_>>>()?;

        let entries = plans.iter().map(FieldPlan::entry);

        let prefix = match struct_attr.prefix.as_deref() {
            Some(prefix) => quote! { ::core::option::Option::Some(#prefix) },
            None => quote! { ::core::option::Option::None },
        };

        Ok(quote! {
            #[automatically_derived]
            impl #impl_generics ::envdefault::EnvDefault for #struct_name #ty_generics #where_clause {
                const PREFIX: ::core::option::Option<&'static str> = #prefix;

                const FIELDS: &'static [::envdefault::Field<Self>] = &[
                    #(#entries),*
                ];
            }
        })
    }

    /// Adds `'static` bounds for every generic parameter.
    ///
    /// The field table is a `&'static [Field<Self>]`, so `Self` must be
    /// `'static`.
    fn with_static_bounds(generics: &Generics) -> Generics {
        let mut bounded = generics.clone();
        let where_clause = bounded.make_where_clause();

        for param in generics.type_params() {
            let ident = &param.ident;
            where_clause.predicates.push(parse_quote!(#ident: 'static));
        }

        for param in generics.lifetimes() {
            let lifetime = &param.lifetime;
            where_clause.predicates.push(parse_quote!(#lifetime: 'static));
        }

        bounded
    }

    /// Ensures the input is a struct with named fields.
    fn extract_struct_fields(input: &DeriveInput) -> SynResult<&FieldsNamed> {
        match &input.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(fields) => Ok(fields),

                Fields::Unnamed(_) => Err(SynError::new_spanned(
                    &input.ident,
                    "EnvDefault does not support tuple structs.\n\
                     Use a struct with named fields instead:\n\
                     struct Config { pub field: Type }",
                )),

                Fields::Unit => Err(SynError::new_spanned(
                    &input.ident,
                    "EnvDefault does not support unit structs.\n\
                     Add at least one field:\n\
                     struct Config { pub field: Type }",
                )),
            },

            Data::Enum(_) => Err(SynError::new_spanned(
                &input.ident,
                "EnvDefault can only be derived for structs, not enums.",
            )),

            Data::Union(_) => Err(SynError::new_spanned(
                &input.ident,
                "EnvDefault can only be derived for structs, not unions.",
            )),
        }
    }
}
