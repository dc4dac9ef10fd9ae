//! Applies a [`BindInput`] to a target through a [`FieldMapper`].

use std::sync::LazyLock;

use crate::{BindError, BindInput, FieldMapper, Reflect, Slot, StructSlot, coerce, debug, trace};

/// Tag key read by [`default_mapper`].
pub const DEFAULT_TAG: &str = "http";

static DEFAULT_MAPPER: LazyLock<FieldMapper> = LazyLock::new(|| FieldMapper::new(DEFAULT_TAG));

/// The process-wide mapper for the [`DEFAULT_TAG`] key, used by [`bind`].
///
/// Construct a separate [`FieldMapper`] when a different tag key or an
/// isolated cache is wanted.
pub fn default_mapper() -> &'static FieldMapper {
    &DEFAULT_MAPPER
}

/// Binds `input` onto `target` using [`default_mapper`].
pub fn bind<T: Reflect>(target: &mut T, input: &BindInput) -> Result<(), BindError> {
    default_mapper().bind(target, input)
}

/// Writes input values into the fields a [`FieldMapper`] maps them to.
#[derive(Debug, Clone, Copy)]
pub struct Binder<'m> {
    mapper: &'m FieldMapper,
}

impl<'m> Binder<'m> {
    /// A binder using `mapper` to locate fields.
    pub const fn new(mapper: &'m FieldMapper) -> Self {
        Self { mapper }
    }

    /// The mapper in use.
    pub fn mapper(&self) -> &'m FieldMapper {
        self.mapper
    }

    /// Binds `input` onto `target`.
    ///
    /// Names are visited in input order and values in their given order.
    /// Names with no mapped field are skipped. The first value that fails
    /// to coerce ends the bind with an error naming its field; everything
    /// assigned before that stays assigned.
    ///
    /// A `T` that is not a struct has no mapped names, so every input is
    /// skipped.
    pub fn bind<T: Reflect>(&self, target: &mut T, input: &BindInput) -> Result<(), BindError> {
        match target.slot() {
            Slot::Struct(root) => self.bind_struct(root, input),
            _ => {
                debug!("{} is not a struct, nothing to bind", T::SHAPE);
                Ok(())
            }
        }
    }

    /// Binds `input` onto a struct known only through its [`StructSlot`].
    pub fn bind_struct(
        &self,
        target: &mut dyn StructSlot,
        input: &BindInput,
    ) -> Result<(), BindError> {
        let mapping = self.mapper.mapping_for_shape(target.shape());

        for (name, values) in input {
            let Some(field) = mapping.get(name) else {
                trace!("skipping unknown name {name:?}");
                continue;
            };

            for value in values {
                let slot = field
                    .path()
                    .resolve(Slot::Struct(&mut *target))
                    .ok_or_else(|| BindError::unreachable_path(name, field.path().clone()))?;
                trace!("{name}={value:?} -> {}", field.path());
                coerce(slot, value).map_err(|err| BindError::coerce(name, err))?;
            }
        }

        Ok(())
    }
}

impl FieldMapper {
    /// Binds `input` onto `target` with this mapper. See [`Binder::bind`].
    pub fn bind<T: Reflect>(&self, target: &mut T, input: &BindInput) -> Result<(), BindError> {
        Binder::new(self).bind(target, input)
    }
}
