use crate::{ConstTypeId, Kind, Reflect, Shape, Slot};

impl Reflect for String {
    const SHAPE: &'static Shape = &Shape {
        id: ConstTypeId::of::<String>(),
        type_identifier: "String",
        type_params: &[],
        kind: Kind::Text,
    };

    fn slot(&mut self) -> Slot<'_> {
        Slot::Text(self)
    }
}
