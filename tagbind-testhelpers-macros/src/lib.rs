//! Attribute macro behind `tagbind_testhelpers::test`.

use quote::quote;
use unsynn::*;

keyword! {
    KFn = "fn";
}

unsynn! {
    /// Attributes, doc comments and qualifiers before `fn`
    struct UntilFn {
        items: Any<Cons<Except<KFn>, TokenTree>>,
    }

    /// Generics, parameters and return type
    struct UntilBody {
        items: Any<Cons<Except<BraceGroup>, TokenTree>>,
    }

    struct Body {
        items: BraceGroup,
    }

    struct FunctionDecl {
        until_fn: UntilFn,
        _fn: KFn,
        name: Ident,
        until_body: UntilBody,
        body: Body,
    }
}

impl quote::ToTokens for UntilFn {
    fn to_tokens(&self, tokens: &mut unsynn::TokenStream) {
        self.items.to_tokens(tokens)
    }
}

impl quote::ToTokens for UntilBody {
    fn to_tokens(&self, tokens: &mut unsynn::TokenStream) {
        self.items.to_tokens(tokens)
    }
}

impl quote::ToTokens for Body {
    fn to_tokens(&self, tokens: &mut unsynn::TokenStream) {
        tokens.extend(self.items.0.stream())
    }
}

/// Test attribute that sets up tracing before running the test body.
///
/// ```ignore
/// #[tagbind_testhelpers::test]
/// fn binds_labels() {
///     // tracing is set up here
/// }
/// ```
///
/// A different harness attribute can be passed as argument, e.g.
/// `#[tagbind_testhelpers::test(some_runtime::test)]`.
#[proc_macro_attribute]
pub fn test(
    attr: proc_macro::TokenStream,
    item: proc_macro::TokenStream,
) -> proc_macro::TokenStream {
    let item = TokenStream::from(item);
    let mut i = item.to_token_iter();
    let FunctionDecl {
        until_fn,
        _fn,
        name,
        until_body,
        body,
    } = match i.parse::<Cons<FunctionDecl, EndOfStream>>() {
        Ok(decl) => decl.first,
        Err(e) => {
            let message = format!("#[tagbind_testhelpers::test] expects a function: {e}");
            return quote! { ::core::compile_error!(#message); }.into();
        }
    };

    let test_attr = if attr.is_empty() {
        quote! { #[::core::prelude::v1::test] }
    } else {
        let attr = TokenStream::from(attr);
        quote! { #[#attr] }
    };

    quote! {
        #test_attr
        #until_fn fn #name #until_body {
            ::tagbind_testhelpers::setup();

            #body
        }
    }
    .into()
}
