//! Procedural macro for `envdefault`.
//!
//! Provides `#[derive(EnvDefault)]`, which describes a struct's fields as a
//! static table the `envdefault` runtime walks to fill them from the
//! environment. Use the re-export from the `envdefault` crate rather than
//! depending on this crate directly.
//!
//! # Modules
//!
//! - `parse` - Attribute parsing for `#[env(...)]` and `#[env_default(...)]`
//! - `field` - Per-field table entries and setters
//! - `expand` - The generated `impl EnvDefault`

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod expand;
mod field;
mod parse;

/// Derive macro for filling a struct from environment variables and defaults.
///
/// Every named field gets an entry in the generated `FIELDS` table. Fields
/// with `pub` or `pub(...)` visibility are written by the loader; private
/// fields and `#[env(skip)]` fields are left alone.
///
/// # Field Attributes
///
/// All optional, on `#[env(...)]`:
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `var = "NAME"` | Environment key (derived from the field name otherwise) |
/// | `default = "value"` | Used when the key is not set; `""` means no default |
/// | `skip` | Never write this field |
/// | `parse` | Coerce with `FromStr` instead of `Coerce` |
/// | `secret` | Mask the value in errors and logs |
///
/// # Struct Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `prefix = "APP_"` | Prepended to derived keys |
///
/// # Example
///
/// ```ignore
/// use envdefault::EnvDefault;
///
/// #[derive(EnvDefault, Default)]
/// #[env_default(prefix = "APP_")]
/// pub struct Config {
///     #[env(var = "DATABASE_URL", secret)]
///     pub db_url: String,
///
///     // reads APP_SERVER_PORT
///     #[env(default = "8080")]
///     pub server_port: u16,
/// }
/// ```
///
/// A field whose type has no `Coerce` impl fails to compile unless it is
/// marked `parse`, `skip`, or is not `pub`.
#[proc_macro_derive(EnvDefault, attributes(env, env_default))]
pub fn derive_env_default(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    expand::Expander::expand(&input)
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}
