use crate::{ConstTypeId, IntegerSlot, IntegerWidth, Kind, Reflect, Shape, Slot};

impl Reflect for bool {
    const SHAPE: &'static Shape = &Shape {
        id: ConstTypeId::of::<bool>(),
        type_identifier: "bool",
        type_params: &[],
        kind: Kind::Boolean,
    };

    fn slot(&mut self) -> Slot<'_> {
        Slot::Boolean(self)
    }
}

macro_rules! impl_reflect_for_integer {
    ($type:ty, $width:ident) => {
        impl Reflect for $type {
            const SHAPE: &'static Shape = &Shape {
                id: ConstTypeId::of::<$type>(),
                type_identifier: stringify!($type),
                type_params: &[],
                kind: Kind::Integer(IntegerWidth::$width),
            };

            fn slot(&mut self) -> Slot<'_> {
                Slot::Integer(IntegerSlot::$width(self))
            }
        }
    };
}

impl_reflect_for_integer!(i64, I64);
impl_reflect_for_integer!(isize, Isize);

// Described so they can appear in derived structs; binding into them fails
// with an unsupported-kind error.
macro_rules! impl_reflect_for_opaque {
    ($($type:ty),* $(,)?) => {
        $(
            impl Reflect for $type {
                const SHAPE: &'static Shape = &Shape {
                    id: ConstTypeId::of::<$type>(),
                    type_identifier: stringify!($type),
                    type_params: &[],
                    kind: Kind::Opaque,
                };

                fn slot(&mut self) -> Slot<'_> {
                    Slot::Opaque(Self::SHAPE)
                }
            }
        )*
    };
}

impl_reflect_for_opaque!(
    i8, i16, i32, i128, u8, u16, u32, u64, u128, usize, f32, f64, char
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_slot_range_checks_isize() {
        let mut value: isize = 7;
        let Slot::Integer(int) = value.slot() else {
            panic!("expected an integer slot");
        };
        assert_eq!(int.width(), IntegerWidth::Isize);
        assert_eq!(int.get(), 7);
        int.set(-12).unwrap();
        assert_eq!(value, -12);

        if isize::BITS < 64 {
            let Slot::Integer(int) = value.slot() else {
                panic!("expected an integer slot");
            };
            assert!(int.set(i64::MAX).is_err());
            assert_eq!(value, -12);
        }
    }

    #[test]
    fn opaque_scalars_report_their_shape() {
        let mut value = 1.5f64;
        match value.slot() {
            Slot::Opaque(shape) => assert_eq!(shape.to_string(), "f64"),
            other => panic!("expected an opaque slot, got {other:?}"),
        }
        assert_eq!(u8::SHAPE.kind.name(), "opaque");
        assert_eq!(i64::SHAPE.kind.name(), "integer");
    }
}
