//! Typed, writable views of a value.
//!
//! A [`Slot`] is what a binder holds once it has navigated to a field. Each
//! variant carries the one operation its kind supports, so the set of kinds
//! that can be written from text is checked exhaustively at compile time.

use core::num::TryFromIntError;

use crate::{IntegerWidth, Reflect, Shape};

/// A mutable borrow of a value, tagged with its kind.
pub enum Slot<'a> {
    /// A `String`; assignment replaces its contents.
    Text(&'a mut String),

    /// A signed integer of some width.
    Integer(IntegerSlot<'a>),

    /// A `bool`.
    Boolean(&'a mut bool),

    /// A growable sequence.
    List(&'a mut dyn ListSlot),

    /// A struct whose fields can be borrowed by index.
    Struct(&'a mut dyn StructSlot),

    /// A value of a type with no writable kind. Only its shape is exposed.
    Opaque(&'static Shape),
}

impl Slot<'_> {
    /// Returns the shape of the borrowed value.
    pub fn shape(&self) -> &'static Shape {
        match self {
            Slot::Text(_) => String::SHAPE,
            Slot::Integer(int) => int.shape(),
            Slot::Boolean(_) => bool::SHAPE,
            Slot::List(list) => list.shape(),
            Slot::Struct(s) => s.shape(),
            Slot::Opaque(shape) => *shape,
        }
    }
}

impl core::fmt::Debug for Slot<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("Slot")
            .field(&format_args!("{}", self.shape()))
            .finish()
    }
}

/// Mutable borrow of a signed integer destination.
pub enum IntegerSlot<'a> {
    /// `i64`
    I64(&'a mut i64),
    /// `isize`
    Isize(&'a mut isize),
}

impl IntegerSlot<'_> {
    /// Width of the destination.
    pub fn width(&self) -> IntegerWidth {
        match self {
            IntegerSlot::I64(_) => IntegerWidth::I64,
            IntegerSlot::Isize(_) => IntegerWidth::Isize,
        }
    }

    /// Shape of the destination type.
    pub fn shape(&self) -> &'static Shape {
        match self {
            IntegerSlot::I64(_) => i64::SHAPE,
            IntegerSlot::Isize(_) => isize::SHAPE,
        }
    }

    /// Current value, widened to `i64`.
    pub fn get(&self) -> i64 {
        match self {
            IntegerSlot::I64(v) => **v,
            IntegerSlot::Isize(v) => **v as i64,
        }
    }

    /// Stores `value`, failing without writing if it does not fit the
    /// destination width.
    pub fn set(self, value: i64) -> Result<(), TryFromIntError> {
        match self {
            IntegerSlot::I64(v) => *v = value,
            IntegerSlot::Isize(v) => *v = isize::try_from(value)?,
        }
        Ok(())
    }
}

/// A sequence that can grow by one default element at a time.
pub trait ListSlot {
    /// Shape of the whole list.
    fn shape(&self) -> &'static Shape;

    /// Shape of the elements.
    fn elem_shape(&self) -> &'static Shape;

    /// Number of elements.
    fn len(&self) -> usize;

    /// Returns true if the list holds no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends a default-valued element.
    fn push_default(&mut self);

    /// Borrows the last element.
    fn last_mut(&mut self) -> Option<Slot<'_>>;

    /// Removes the last element, if any.
    fn pop_last(&mut self);
}

/// A struct whose fields can be borrowed by declaration index.
pub trait StructSlot {
    /// Shape of the struct; its fields match the indices accepted by
    /// [`StructSlot::field_slot`].
    fn shape(&self) -> &'static Shape;

    /// Borrows the field at `index`, or `None` if out of range.
    fn field_slot(&mut self, index: usize) -> Option<Slot<'_>>;
}
