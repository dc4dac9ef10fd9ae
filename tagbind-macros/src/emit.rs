use proc_macro2::{Literal, TokenStream};
use quote::quote;

use crate::parse::{PField, PStruct};

/// Generates the `Reflect` and `StructSlot` impls for a parsed struct.
///
/// Field indices in the shape and in `field_slot` are positions among the
/// non-skipped fields, so the two always agree.
pub(crate) fn emit(parsed: &PStruct) -> TokenStream {
    let name = &parsed.name;
    let type_identifier = name.to_string();
    let fields: Vec<&PField> = parsed.fields.iter().filter(|f| !f.skip).collect();

    let field_defs = fields.iter().map(|field| {
        let field_name = &field.name;
        let ty = &field.ty;
        let attributes = field.attrs.iter().map(|attr| {
            let key = &attr.key;
            let value = match &attr.value {
                Some(value) => quote! { ::core::option::Option::Some(#value) },
                None => quote! { ::core::option::Option::None },
            };
            quote! {
                ::tagbind::FieldAttribute { key: #key, value: #value }
            }
        });
        quote! {
            ::tagbind::Field {
                name: #field_name,
                shape: ::tagbind::shape_of::<#ty>,
                attributes: &[#(#attributes),*],
            }
        }
    });

    let arms = fields.iter().enumerate().map(|(index, field)| {
        let ident = &field.ident;
        let index = Literal::usize_unsuffixed(index);
        quote! {
            #index => ::core::option::Option::Some(::tagbind::Reflect::slot(&mut self.#ident))
        }
    });

    quote! {
        #[automatically_derived]
        impl ::tagbind::Reflect for #name {
            const SHAPE: &'static ::tagbind::Shape = &::tagbind::Shape {
                id: ::tagbind::ConstTypeId::of::<#name>(),
                type_identifier: #type_identifier,
                type_params: &[],
                kind: ::tagbind::Kind::Struct(::tagbind::StructDef {
                    fields: &[#(#field_defs),*],
                }),
            };

            fn slot(&mut self) -> ::tagbind::Slot<'_> {
                ::tagbind::Slot::Struct(self)
            }
        }

        #[automatically_derived]
        impl ::tagbind::StructSlot for #name {
            fn shape(&self) -> &'static ::tagbind::Shape {
                <Self as ::tagbind::Reflect>::SHAPE
            }

            fn field_slot(
                &mut self,
                index: usize,
            ) -> ::core::option::Option<::tagbind::Slot<'_>> {
                match index {
                    #(#arms,)*
                    _ => ::core::option::Option::None,
                }
            }
        }
    }
}
