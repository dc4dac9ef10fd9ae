use core::fmt;

use crate::{ConstTypeId, Field};

/// Schema for a bindable type.
///
/// Shapes are `'static` constants: one per type, built by `#[derive(Reflect)]`
/// or by the impls in this crate. They never change after compilation, which
/// is what makes access paths computed from them valid for every instance.
#[derive(Clone, Copy)]
pub struct Shape {
    /// Unique type identifier.
    pub id: ConstTypeId,

    /// Type name without generic parameters, e.g. `Vec` or `SearchRequest`.
    pub type_identifier: &'static str,

    /// Generic parameters, rendered by `Display` as `Vec<String>`.
    pub type_params: &'static [fn() -> &'static Shape],

    /// What kind of value this is, and how its slot behaves.
    pub kind: Kind,
}

impl Shape {
    /// Returns true if this shape describes a struct with named fields.
    #[inline]
    pub const fn is_struct(&self) -> bool {
        matches!(self.kind, Kind::Struct(_))
    }

    /// Fields of a struct shape, or an empty slice for every other kind.
    #[inline]
    pub const fn fields(&self) -> &'static [Field] {
        match self.kind {
            Kind::Struct(def) => def.fields,
            _ => &[],
        }
    }

    /// Returns true if `self` and `other` describe the same type.
    #[inline]
    pub fn is_shape(&self, other: &Shape) -> bool {
        self.id == other.id
    }
}

impl PartialEq for Shape {
    fn eq(&self, other: &Self) -> bool {
        self.is_shape(other)
    }
}

impl Eq for Shape {}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_identifier)?;
        if let Some((first, rest)) = self.type_params.split_first() {
            write!(f, "<{}", first())?;
            for param in rest {
                write!(f, ", {}", param())?;
            }
            f.write_str(">")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shape")
            .field("type", &format_args!("{self}"))
            .field("kind", &self.kind)
            .finish()
    }
}

/// The closed set of value kinds a [`Shape`] can describe.
///
/// Only `Text`, `Integer`, `Boolean` and `List` (of those) can be written from
/// a string. `Struct` is navigable but not assignable; `Opaque` is neither.
#[derive(Clone, Copy, Debug)]
pub enum Kind {
    /// `String`
    Text,

    /// A signed integer, parsed at 64 bits and stored at `width`.
    Integer(IntegerWidth),

    /// `bool`
    Boolean,

    /// A growable sequence; new elements are appended.
    List(ListDef),

    /// A struct with named fields.
    Struct(StructDef),

    /// Any other type. Described, but not bindable.
    Opaque,
}

impl Kind {
    /// Short lowercase name of the kind, used in diagnostics.
    pub const fn name(&self) -> &'static str {
        match self {
            Kind::Text => "text",
            Kind::Integer(_) => "integer",
            Kind::Boolean => "boolean",
            Kind::List(_) => "list",
            Kind::Struct(_) => "struct",
            Kind::Opaque => "opaque",
        }
    }
}

/// Storage width of an integer destination.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IntegerWidth {
    /// `i64`
    I64,
    /// `isize`
    Isize,
}

impl IntegerWidth {
    /// Number of bits the destination holds.
    pub const fn bits(self) -> u32 {
        match self {
            IntegerWidth::I64 => i64::BITS,
            IntegerWidth::Isize => isize::BITS,
        }
    }
}

/// Definition of a list kind.
#[derive(Clone, Copy)]
pub struct ListDef {
    /// Shape of the elements.
    pub elem: fn() -> &'static Shape,
}

impl ListDef {
    /// Returns the element shape.
    #[inline]
    pub fn elem(&self) -> &'static Shape {
        (self.elem)()
    }
}

impl fmt::Debug for ListDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListDef")
            .field("elem", &format_args!("{}", self.elem()))
            .finish()
    }
}

/// Definition of a struct kind: its fields, in declaration order.
#[derive(Clone, Copy, Debug)]
pub struct StructDef {
    /// Fields, indexed by position. The index is what access paths record.
    pub fields: &'static [Field],
}
