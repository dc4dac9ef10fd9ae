use crate::{ConstTypeId, Kind, ListDef, ListSlot, Reflect, Shape, Slot, shape_of};

impl<T> Reflect for Vec<T>
where
    T: Reflect + Default,
{
    const SHAPE: &'static Shape = &Shape {
        id: ConstTypeId::of::<Vec<T>>(),
        type_identifier: "Vec",
        type_params: &[shape_of::<T>],
        kind: Kind::List(ListDef {
            elem: shape_of::<T>,
        }),
    };

    fn slot(&mut self) -> Slot<'_> {
        Slot::List(self)
    }
}

impl<T> ListSlot for Vec<T>
where
    T: Reflect + Default,
{
    fn shape(&self) -> &'static Shape {
        <Self as Reflect>::SHAPE
    }

    fn elem_shape(&self) -> &'static Shape {
        T::SHAPE
    }

    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn push_default(&mut self) {
        self.push(T::default());
    }

    fn last_mut(&mut self) -> Option<Slot<'_>> {
        self.as_mut_slice().last_mut().map(Reflect::slot)
    }

    fn pop_last(&mut self) {
        self.pop();
    }
}
