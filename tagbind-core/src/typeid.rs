use core::any::TypeId;
use core::fmt;
use core::hash::{Hash, Hasher};

/// [`TypeId`] equivalent usable in const contexts.
///
/// Stores the monomorphized `TypeId::of::<T>` function and calls it on demand,
/// so it can be embedded in a `const` [`Shape`](crate::Shape).
#[derive(Clone, Copy)]
pub struct ConstTypeId {
    type_id_fn: fn() -> TypeId,
}

impl ConstTypeId {
    /// Create a [`ConstTypeId`] for a type.
    #[must_use]
    pub const fn of<T>() -> Self
    where
        T: ?Sized + 'static,
    {
        ConstTypeId {
            type_id_fn: TypeId::of::<T>,
        }
    }

    /// Get the underlying [`TypeId`].
    #[inline]
    pub fn get(self) -> TypeId {
        (self.type_id_fn)()
    }
}

impl fmt::Debug for ConstTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.get(), f)
    }
}

impl PartialEq for ConstTypeId {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.get() == other.get()
    }
}

impl PartialEq<TypeId> for ConstTypeId {
    #[inline]
    fn eq(&self, other: &TypeId) -> bool {
        self.get() == *other
    }
}

impl Eq for ConstTypeId {}

impl Hash for ConstTypeId {
    // Function pointers are not unique per type (identical code folding can
    // merge them), so hash the resolved TypeId.
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.get().hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_type_same_id() {
        assert_eq!(ConstTypeId::of::<String>(), ConstTypeId::of::<String>());
        assert_eq!(ConstTypeId::of::<u8>(), TypeId::of::<u8>());
        assert_ne!(ConstTypeId::of::<Vec<i64>>(), ConstTypeId::of::<Vec<u64>>());
    }
}
