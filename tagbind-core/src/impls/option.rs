use crate::{ConstTypeId, Kind, Reflect, Shape, Slot, shape_of};

impl<T: Reflect> Reflect for Option<T> {
    const SHAPE: &'static Shape = &Shape {
        id: ConstTypeId::of::<Option<T>>(),
        type_identifier: "Option",
        type_params: &[shape_of::<T>],
        kind: Kind::Opaque,
    };

    fn slot(&mut self) -> Slot<'_> {
        Slot::Opaque(Self::SHAPE)
    }
}
