use core::fmt;

use crate::Shape;

/// Attribute key marking an embedded sub-structure whose fields are promoted
/// into the enclosing namespace.
pub const FLATTEN_ATTR: &str = "flatten";

/// Describes a named field of a struct.
#[derive(Clone, Copy)]
pub struct Field {
    /// Rust name of the field (without any `r#` prefix).
    pub name: &'static str,

    /// Shape of the field's type.
    ///
    /// The layer of indirection lets a shape refer to types whose shapes are
    /// declared elsewhere, without const-evaluation ordering issues.
    pub shape: fn() -> &'static Shape,

    /// Attributes from `#[bind(...)]`, in source order.
    pub attributes: &'static [FieldAttribute],
}

impl Field {
    /// Returns the shape of the field's type.
    #[inline]
    pub fn shape(&self) -> &'static Shape {
        (self.shape)()
    }

    /// Gets an attribute by key.
    #[inline]
    pub fn get_attr(&self, key: &str) -> Option<&'static FieldAttribute> {
        let attributes: &'static [FieldAttribute] = self.attributes;
        attributes.iter().find(|attr| attr.key == key)
    }

    /// Checks whether the field carries an attribute with the given key.
    #[inline]
    pub fn has_attr(&self, key: &str) -> bool {
        self.get_attr(key).is_some()
    }

    /// Returns the raw tag value for `key`, as written in
    /// `#[bind(key = "value")]`.
    #[inline]
    pub fn tag(&self, key: &str) -> Option<&'static str> {
        self.get_attr(key).and_then(|attr| attr.value)
    }

    /// Returns true if the field is an embedded sub-structure (`#[bind(flatten)]`).
    #[inline]
    pub fn is_flattened(&self) -> bool {
        self.get_attr(FLATTEN_ATTR)
            .is_some_and(|attr| attr.value.is_none())
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("shape", &format_args!("{}", self.shape()))
            .field("attributes", &self.attributes)
            .finish()
    }
}

/// One entry of a field's `#[bind(...)]` list.
///
/// `http = "sid"` becomes `{ key: "http", value: Some("sid") }`,
/// a bare `flatten` becomes `{ key: "flatten", value: None }`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FieldAttribute {
    /// Attribute key (a tag key, or a flag like `flatten`).
    pub key: &'static str,

    /// The string literal after `=`, if any.
    pub value: Option<&'static str>,
}
