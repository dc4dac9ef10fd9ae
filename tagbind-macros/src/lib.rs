#![warn(missing_docs)]
//! Derive macro for `tagbind::Reflect`. Use it through the `tagbind` crate.

use proc_macro2::TokenStream;

mod emit;
mod parse;
mod unescape;

/// Derives `Reflect` (and `StructSlot`) for a struct with named fields.
///
/// Field attributes, all under `#[bind(...)]`:
///
/// - `key = "name"` records a tag for an arbitrary tag key, e.g.
///   `#[bind(http = "sid")]`. Several keys may share one attribute:
///   `#[bind(http = "sid", json = "session")]`. Values are plain string
///   literals; escapes such as `\u{e9}` are resolved.
/// - `flatten` marks an embedded sub-structure whose tagged fields are
///   promoted into the enclosing namespace.
/// - `skip` leaves the field out of the shape; its type need not implement
///   `Reflect`.
///
/// Every other field type must implement `Reflect`.
#[proc_macro_derive(Reflect, attributes(bind))]
pub fn reflect_derive(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = TokenStream::from(input);
    match parse::parse_struct(input) {
        Ok(parsed) => emit::emit(&parsed).into(),
        Err(err) => err.to_compile_error().into(),
    }
}
