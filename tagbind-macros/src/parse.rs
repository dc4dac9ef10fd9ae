//! Parses the struct a `#[derive(Reflect)]` is attached to.
//!
//! Only the parts the derive needs are kept: the struct name, each named
//! field's identifier and type tokens, and `#[bind(...)]` attributes. Doc
//! comments, other attributes and visibility are parsed and dropped.

use proc_macro2::{Span, TokenStream};
use quote::quote_spanned;
use unsynn::*;

use crate::unescape::unescape;

keyword! {
    KStruct = "struct";
    KPub = "pub";
    KBind = "bind";
}

operator! {
    Eq = "=";
    RArrow = "->";
    LAngle = "<";
    RAngle = ">";
}

unsynn! {
    /// Visibility: `pub`, `pub(crate)`, `pub(in path)`
    enum Vis {
        PubIn(Cons<KPub, ParenthesisGroup>),
        Pub(KPub),
    }

    /// An attribute: `#[...]`
    struct Attribute {
        _pound: Pound,
        content: BracketGroup,
    }

    /// The derive input: a struct, or anything else (rejected later)
    enum DeriveInput {
        Struct(StructDef),
        Other(OtherDef),
    }

    struct StructDef {
        attrs: Vec<Attribute>,
        vis: Option<Vis>,
        _kw_struct: KStruct,
        name: Ident,
        body: StructBody,
    }

    /// Enums, unions, or structs whose body did not parse
    struct OtherDef {
        attrs: Vec<Attribute>,
        vis: Option<Vis>,
        keyword: Ident,
        rest: Vec<TokenTree>,
    }

    enum StructBody {
        Named(BraceGroupContaining<CommaDelimitedVec<StructField>>),
        Tuple(Cons<ParenthesisGroup, Vec<TokenTree>>),
        Generic(Cons<LAngle, Vec<TokenTree>>),
        Unit(Semicolon),
    }

    struct StructField {
        attrs: Vec<Attribute>,
        vis: Option<Vis>,
        name: Ident,
        _colon: Colon,
        ty: FieldType,
    }

    /// Field type: tokens up to the next comma outside `<...>`
    struct FieldType {
        tokens: Vec<Cons<Except<Comma>, AngleTokenTree>>,
    }

    /// A token tree, or a whole `<...>` run so commas inside generics are kept
    enum AngleTokenTree {
        Arrow(RArrow),
        Angle(AngleGroup),
        Tree(TokenTree),
    }

    struct AngleGroup {
        _open: LAngle,
        tokens: Vec<Cons<Except<RAngle>, AngleTokenTree>>,
        _close: RAngle,
    }

    /// Attribute content: `bind(key = "value", flag, ...)`
    struct BindAttr {
        _bind: KBind,
        entries: ParenthesisGroupContaining<CommaDelimitedVec<BindEntry>>,
    }

    struct BindEntry {
        key: Ident,
        value: Option<Cons<Eq, LiteralString>>,
    }
}

/// A derive error pointing at the tokens that caused it.
pub(crate) struct Error {
    message: String,
    span: Span,
}

impl Error {
    pub(crate) fn new(span: Span, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }

    pub(crate) fn to_compile_error(&self) -> TokenStream {
        let message = &self.message;
        quote_spanned! { self.span=>
            ::core::compile_error!(#message);
        }
    }
}

/// Parsed struct.
pub(crate) struct PStruct {
    pub name: Ident,
    pub fields: Vec<PField>,
}

/// Parsed named field.
pub(crate) struct PField {
    /// Identifier as written, possibly raw (`r#type`).
    pub ident: Ident,
    /// Name without the raw prefix.
    pub name: String,
    pub ty: TokenStream,
    pub attrs: Vec<PBindAttr>,
    /// `#[bind(skip)]`: the field is left out of the shape entirely.
    pub skip: bool,
}

/// One `key` or `key = "value"` entry of `#[bind(...)]`.
pub(crate) struct PBindAttr {
    pub key: String,
    pub value: Option<String>,
}

pub(crate) fn parse_struct(input: TokenStream) -> core::result::Result<PStruct, Error> {
    let mut iter = input.to_token_iter();
    let parsed = match iter.parse::<Cons<DeriveInput, EndOfStream>>() {
        Ok(parsed) => parsed.first,
        Err(e) => return Err(Error::new(Span::call_site(), e.to_string())),
    };

    let def = match parsed {
        DeriveInput::Struct(def) => def,
        DeriveInput::Other(other) => {
            let keyword = other.keyword.to_string();
            let message = match keyword.as_str() {
                "enum" | "union" => {
                    format!("#[derive(Reflect)] only supports structs, not {keyword}s")
                }
                "struct" => "#[derive(Reflect)] expects a struct with named fields".to_owned(),
                _ => format!("unexpected `{keyword}`"),
            };
            return Err(Error::new(other.keyword.span(), message));
        }
    };

    let fields = match &def.body {
        StructBody::Named(fields) => fields,
        StructBody::Tuple(_) => {
            return Err(Error::new(
                def.name.span(),
                "#[derive(Reflect)] does not support tuple structs",
            ));
        }
        StructBody::Generic(_) => {
            return Err(Error::new(
                def.name.span(),
                "#[derive(Reflect)] does not support generic structs",
            ));
        }
        StructBody::Unit(_) => {
            return Err(Error::new(
                def.name.span(),
                "#[derive(Reflect)] does not support unit structs",
            ));
        }
    };

    let fields = fields
        .content
        .iter()
        .map(|d| PField::parse(&d.value))
        .collect::<core::result::Result<Vec<_>, _>>()?;

    Ok(PStruct {
        name: def.name.clone(),
        fields,
    })
}

impl PField {
    fn parse(field: &StructField) -> core::result::Result<Self, Error> {
        let ty = field.ty.to_token_stream();
        if ty.is_empty() {
            return Err(Error::new(field.name.span(), "expected a field type"));
        }

        let mut attrs = Vec::new();
        let mut skip = false;
        for attr in &field.attrs {
            PBindAttr::parse(attr, &mut attrs, &mut skip)?;
        }

        let raw = field.name.to_string();
        let name = raw.strip_prefix("r#").unwrap_or(&raw).to_owned();

        Ok(PField {
            ident: field.name.clone(),
            name,
            ty,
            attrs,
            skip,
        })
    }
}

/// Returns true if the attribute is `#[bind ...]`.
fn is_bind_attr(attr: &Attribute) -> bool {
    matches!(
        attr.content.0.stream().into_iter().next(),
        Some(TokenTree::Ident(ident)) if ident == "bind"
    )
}

impl PBindAttr {
    /// Collects the entries of one `#[bind(...)]`. Other attributes are ignored.
    fn parse(
        attr: &Attribute,
        dest: &mut Vec<PBindAttr>,
        skip: &mut bool,
    ) -> core::result::Result<(), Error> {
        if !is_bind_attr(attr) {
            return Ok(());
        }

        let content = attr.content.0.stream();
        let mut iter = content.to_token_iter();
        let bind = match iter.parse::<Cons<BindAttr, EndOfStream>>() {
            Ok(bind) => bind.first,
            Err(e) => {
                return Err(Error::new(
                    attr.content.0.span(),
                    format!("expected `#[bind(...)]`, e.g. `#[bind(http = \"name\")]`: {e}"),
                ));
            }
        };

        for entry in bind.entries.content.iter().map(|d| &d.value) {
            let key = entry.key.to_string();
            let value = entry
                .value
                .as_ref()
                .map(|assign| tag_value(&assign.second))
                .transpose()?;

            match key.as_str() {
                "skip" | "flatten" if value.is_some() => {
                    return Err(Error::new(
                        entry.key.span(),
                        format!("`{key}` does not take a value"),
                    ));
                }
                "skip" => *skip = true,
                "flatten" => {
                    if !dest.iter().any(|a| a.key == key) {
                        dest.push(PBindAttr { key, value: None });
                    }
                }
                _ if value.is_none() => {
                    return Err(Error::new(
                        entry.key.span(),
                        format!("expected `{key} = \"name\"`"),
                    ));
                }
                _ if dest.iter().any(|a| a.key == key) => {
                    return Err(Error::new(
                        entry.key.span(),
                        format!("duplicate `{key}` tag"),
                    ));
                }
                _ => dest.push(PBindAttr { key, value }),
            }
        }

        Ok(())
    }
}

/// The unescaped contents of a tag's string literal.
fn tag_value(lit: &LiteralString) -> core::result::Result<String, Error> {
    // LiteralString::value() includes the quotes
    let raw = lit.value();
    let raw: &str = &raw;
    let body = raw
        .strip_prefix('"')
        .and_then(|r| r.strip_suffix('"'))
        .unwrap_or(raw);

    unescape(body).map_err(|e| {
        let span = lit
            .to_token_stream()
            .into_iter()
            .next()
            .map_or_else(Span::call_site, |t| t.span());
        Error::new(span, e.to_string())
    })
}
