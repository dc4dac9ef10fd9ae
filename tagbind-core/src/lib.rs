#![warn(missing_docs)]
#![warn(clippy::std_instead_of_core)]
#![warn(clippy::std_instead_of_alloc)]
#![doc = include_str!("../README.md")]

extern crate alloc;

mod typeid;
pub use typeid::ConstTypeId;

mod shape;
pub use shape::*;

mod field;
pub use field::*;

mod slot;
pub use slot::*;

mod impls;

/// A type whose structure can be described and whose fields can be written
/// through [`Slot`]s.
///
/// Usually derived with `#[derive(Reflect)]` from the `tagbind` crate. Scalar
/// and container impls for std types live in this crate.
pub trait Reflect: 'static {
    /// The shape of this type. Equal for every instance.
    const SHAPE: &'static Shape;

    /// Borrow this value as a typed, writable slot.
    fn slot(&mut self) -> Slot<'_>;
}

/// Returns `T::SHAPE`.
///
/// Exists so that shapes can be referenced lazily as `fn() -> &'static Shape`,
/// which is how [`Field`] and [`ListDef`] point at their inner types.
pub fn shape_of<T: Reflect>() -> &'static Shape {
    T::SHAPE
}
