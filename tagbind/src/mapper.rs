//! Tag-driven field mappings, built once per type and cached.

use alloc::borrow::Cow;
use alloc::sync::Arc;
use core::fmt;
use std::collections::HashMap;

use indexmap::IndexMap;
use parking_lot::RwLock;

use crate::{AccessPath, ConstTypeId, Field, Reflect, Shape, Slot, debug, trace};

/// Tag value that excludes a field from the mapping.
pub const EXCLUDE_TAG: &str = "-";

/// Derives an external name from a Rust field name, for untagged fields.
pub type NameFn = fn(&str) -> String;

/// Where one external name lands inside a type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    name: String,
    path: AccessPath,
    options: Vec<String>,
    shape: &'static Shape,
    embedded: bool,
}

impl FieldDescriptor {
    /// The external name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Field indices from the root struct to this field.
    pub fn path(&self) -> &AccessPath {
        &self.path
    }

    /// Tag options after the name, e.g. `["omitempty"]` for `"sid,omitempty"`.
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Returns true if `option` was listed in the tag.
    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }

    /// Shape of the field's type.
    pub fn shape(&self) -> &'static Shape {
        self.shape
    }

    /// Returns true if the field was reached through a flattened sub-structure.
    pub fn is_embedded(&self) -> bool {
        self.embedded
    }
}

/// Mapping from external name to [`FieldDescriptor`] for one type.
///
/// Entries are ordered by discovery (depth-first, declaration order). When an
/// embedded field and another field share a name, the later one replaces the
/// earlier one's descriptor but keeps its position. Nesting depth plays no
/// part: an embedded field declared after an outer one overrides it.
#[derive(Debug, Clone)]
pub struct TypeMapping {
    shape: &'static Shape,
    fields: IndexMap<String, FieldDescriptor>,
}

impl TypeMapping {
    /// Shape of the mapped type.
    pub fn shape(&self) -> &'static Shape {
        self.shape
    }

    /// Looks up an external name.
    pub fn get(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.get(name)
    }

    /// Returns true if `name` is mapped.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// External names, in discovery order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Descriptors, in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.values()
    }

    /// Number of mapped names.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if no field is mapped.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Maps external names onto struct fields by reading one tag key.
///
/// Each mapper owns its cache: mappings are built lazily the first time a
/// type is seen and kept for the mapper's lifetime. The cache is safe to use
/// from many threads; two threads missing on the same type may both build
/// the mapping, but only the first insert is kept and both get that one.
pub struct FieldMapper {
    tag: Cow<'static, str>,
    name_fn: Option<NameFn>,
    cache: RwLock<HashMap<ConstTypeId, Arc<TypeMapping>>>,
}

/// Configures a [`FieldMapper`].
#[derive(Clone)]
pub struct FieldMapperBuilder {
    tag: Cow<'static, str>,
    name_fn: Option<NameFn>,
}

impl FieldMapperBuilder {
    /// Map untagged fields under `f(rust_field_name)` instead of ignoring them.
    ///
    /// Flattened fields are still recursed into, and `-` still excludes.
    pub fn name_fn(mut self, f: NameFn) -> Self {
        self.name_fn = Some(f);
        self
    }

    /// Builds the mapper, with an empty cache.
    pub fn build(self) -> FieldMapper {
        FieldMapper {
            tag: self.tag,
            name_fn: self.name_fn,
            cache: RwLock::new(HashMap::new()),
        }
    }
}

enum ExternalName<'a> {
    Tagged { name: &'a str, options: Vec<String> },
    Excluded,
    Untagged,
}

impl FieldMapper {
    /// A mapper reading `#[bind(<tag> = "...")]`, ignoring untagged fields.
    pub fn new(tag: impl Into<Cow<'static, str>>) -> Self {
        Self::builder(tag).build()
    }

    /// Starts configuring a mapper for `tag`.
    pub fn builder(tag: impl Into<Cow<'static, str>>) -> FieldMapperBuilder {
        FieldMapperBuilder {
            tag: tag.into(),
            name_fn: None,
        }
    }

    /// The tag key this mapper reads.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Mapping for `T`, built on first use.
    pub fn mapping_for<T: Reflect>(&self) -> Arc<TypeMapping> {
        self.mapping_for_shape(T::SHAPE)
    }

    /// Mapping for the type described by `shape`, built on first use.
    ///
    /// Non-struct shapes map to an empty mapping.
    pub fn mapping_for_shape(&self, shape: &'static Shape) -> Arc<TypeMapping> {
        // Fast path: read lock only
        if let Some(mapping) = self.cache.read().get(&shape.id) {
            trace!("field mapping cache hit for {shape}");
            return Arc::clone(mapping);
        }

        debug!("field mapping cache miss for {shape}, building with tag {:?}", self.tag);
        let built = Arc::new(self.build_mapping(shape));

        let mut cache = self.cache.write();
        // Another thread may have inserted while we were building.
        Arc::clone(cache.entry(shape.id).or_insert(built))
    }

    /// Number of types whose mapping is cached.
    pub fn cached_types(&self) -> usize {
        self.cache.read().len()
    }

    /// Access paths for each of `names` in `shape`, in the order requested.
    pub fn traversals_by_name<I, S>(&self, shape: &'static Shape, names: I) -> Vec<Option<AccessPath>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mapping = self.mapping_for_shape(shape);
        names
            .into_iter()
            .map(|name| mapping.get(name.as_ref()).map(|field| field.path().clone()))
            .collect()
    }

    /// Borrows the field of `target` that `name` maps to.
    pub fn field_by_name<'a, T: Reflect>(&self, target: &'a mut T, name: &str) -> Option<Slot<'a>> {
        let mapping = self.mapping_for::<T>();
        let field = mapping.get(name)?;
        field.path().resolve(target.slot())
    }

    fn build_mapping(&self, shape: &'static Shape) -> TypeMapping {
        let mut fields = IndexMap::new();
        let mut path = AccessPath::new(shape);
        self.walk(shape, &mut path, false, &mut fields);
        debug!("mapped {} names for {shape}", fields.len());
        TypeMapping { shape, fields }
    }

    fn walk(
        &self,
        shape: &'static Shape,
        path: &mut AccessPath,
        embedded: bool,
        fields: &mut IndexMap<String, FieldDescriptor>,
    ) {
        for (index, field) in shape.fields().iter().enumerate() {
            path.push(index as u32);

            match self.external_name(field) {
                ExternalName::Tagged { name, options } => {
                    self.record(fields, name.to_owned(), path, options, field, embedded);
                }
                ExternalName::Excluded => {
                    trace!("{} excluded by tag", field.name);
                }
                ExternalName::Untagged if field.is_flattened() && field.shape().is_struct() => {
                    trace!("descending into embedded {}: {}", field.name, field.shape());
                    self.walk(field.shape(), path, true, fields);
                }
                ExternalName::Untagged => {
                    if let Some(name_fn) = self.name_fn {
                        let name = name_fn(field.name);
                        self.record(fields, name, path, Vec::new(), field, embedded);
                    }
                }
            }

            path.pop();
        }
    }

    fn record(
        &self,
        fields: &mut IndexMap<String, FieldDescriptor>,
        name: String,
        path: &AccessPath,
        options: Vec<String>,
        field: &Field,
        embedded: bool,
    ) {
        trace!("{name:?} -> {path}");
        let descriptor = FieldDescriptor {
            name: name.clone(),
            path: path.clone(),
            options,
            shape: field.shape(),
            embedded,
        };
        if let Some(previous) = fields.insert(name, descriptor) {
            debug!("{:?} at {} replaced by a later field", previous.name, previous.path);
        }
    }

    fn external_name<'f>(&self, field: &'f Field) -> ExternalName<'f> {
        let Some(value) = field.tag(&self.tag) else {
            return ExternalName::Untagged;
        };
        if value == EXCLUDE_TAG {
            return ExternalName::Excluded;
        }

        let mut parts = value.split(',');
        let name = parts.next().unwrap_or_default();
        if name.is_empty() {
            return ExternalName::Untagged;
        }
        let options = parts
            .filter(|o| !o.is_empty())
            .map(str::to_owned)
            .collect();
        ExternalName::Tagged { name, options }
    }
}

impl fmt::Debug for FieldMapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldMapper")
            .field("tag", &self.tag)
            .field("name_fn", &self.name_fn.is_some())
            .field("cached_types", &self.cached_types())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Reflect;

    #[derive(Reflect)]
    struct Inner {
        #[bind(http = "a")]
        a: String,
        #[bind(http = "shared")]
        from_inner: String,
    }

    #[derive(Reflect)]
    struct Outer {
        #[bind(http = "shared")]
        from_outer: String,
        #[bind(flatten)]
        inner: Inner,
        #[bind(http = "tail,omitempty,,x")]
        tail: i64,
    }

    #[test]
    fn later_entries_win_and_keep_position() {
        let mapper = FieldMapper::new("http");
        let mapping = mapper.mapping_for::<Outer>();

        assert_eq!(mapping.names().collect::<Vec<_>>(), ["shared", "a", "tail"]);
        let shared = mapping.get("shared").unwrap();
        assert_eq!(shared.path().to_string(), "inner.from_inner");
        assert!(shared.is_embedded());
    }

    #[derive(Reflect)]
    struct OuterLast {
        #[bind(flatten)]
        inner: Inner,
        #[bind(http = "shared")]
        from_outer: String,
    }

    #[test]
    fn depth_does_not_decide_collisions() {
        let mapper = FieldMapper::new("http");
        let mapping = mapper.mapping_for::<OuterLast>();

        assert_eq!(mapping.names().collect::<Vec<_>>(), ["a", "shared"]);
        let shared = mapping.get("shared").unwrap();
        assert_eq!(shared.path().to_string(), "from_outer");
        assert!(!shared.is_embedded());
    }

    #[test]
    fn tag_options_are_split() {
        let mapper = FieldMapper::new("http");
        let mapping = mapper.mapping_for::<Outer>();
        let tail = mapping.get("tail").unwrap();
        assert_eq!(tail.options(), ["omitempty", "x"]);
        assert!(tail.has_option("omitempty"));
        assert!(!tail.is_embedded());
    }
}
