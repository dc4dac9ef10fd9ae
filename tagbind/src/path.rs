use core::fmt;
use core::hash::{Hash, Hasher};

use crate::{Shape, Slot};

/// A route from a root struct to one of its (possibly embedded) fields.
///
/// Stores only field indices; names and types are recovered by replaying the
/// steps against the root [`Shape`]. Because shapes are static, a path built
/// from a type's shape resolves on every instance of that type.
#[derive(Debug, Clone)]
pub struct AccessPath {
    shape: &'static Shape,
    steps: Vec<u32>,
}

impl AccessPath {
    /// Create an empty path rooted at `shape`.
    pub const fn new(shape: &'static Shape) -> Self {
        Self {
            shape,
            steps: Vec::new(),
        }
    }

    /// The root shape.
    pub fn shape(&self) -> &'static Shape {
        self.shape
    }

    /// Field indices, outermost first.
    pub fn steps(&self) -> &[u32] {
        &self.steps
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns true for the path to the root itself.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Push a field index.
    pub fn push(&mut self, index: u32) {
        self.steps.push(index);
    }

    /// Pop the last field index.
    pub fn pop(&mut self) -> Option<u32> {
        self.steps.pop()
    }

    /// Shape of the field this path leads to, or `None` if a step does not
    /// name a struct field.
    pub fn target_shape(&self) -> Option<&'static Shape> {
        let mut shape = self.shape;
        for &index in &self.steps {
            shape = shape.fields().get(index as usize)?.shape();
        }
        Some(shape)
    }

    /// Follows the path from `root` down to the target field.
    ///
    /// Returns `None` if a step passes through something that is not a
    /// struct, or names a field index the struct does not have.
    pub fn resolve<'a>(&self, root: Slot<'a>) -> Option<Slot<'a>> {
        let mut slot = root;
        for &index in &self.steps {
            slot = match slot {
                Slot::Struct(s) => s.field_slot(index as usize)?,
                _ => return None,
            };
        }
        Some(slot)
    }
}

impl PartialEq for AccessPath {
    fn eq(&self, other: &Self) -> bool {
        self.shape.is_shape(other.shape) && self.steps == other.steps
    }
}

impl Eq for AccessPath {}

impl Hash for AccessPath {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.shape.id.hash(state);
        self.steps.hash(state);
    }
}

/// Formats as the dotted Rust field path, e.g. `context.session_id`.
impl fmt::Display for AccessPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut shape = self.shape;
        for (i, &index) in self.steps.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            match shape.fields().get(index as usize) {
                Some(field) => {
                    f.write_str(field.name)?;
                    shape = field.shape();
                }
                None => write!(f, "#{index}")?,
            }
        }
        Ok(())
    }
}
