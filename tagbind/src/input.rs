use indexmap::IndexMap;
use indexmap::map::Iter;

/// Ordered mapping from external name to the values given for it.
///
/// Names keep the order of their first appearance; values keep the order in
/// which they were appended. Repeated parameters (`l=foo&l=bar`) therefore
/// group under one name without losing their relative order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindInput {
    entries: IndexMap<String, Vec<String>>,
}

impl BindInput {
    /// An empty input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes an `application/x-www-form-urlencoded` query string.
    ///
    /// A leading `?` is ignored. `+` decodes to a space and percent-escapes
    /// are resolved; invalid UTF-8 is replaced lossily.
    pub fn from_query(query: &str) -> Self {
        Self::from_form_bytes(query.strip_prefix('?').unwrap_or(query).as_bytes())
    }

    /// Decodes an `application/x-www-form-urlencoded` body.
    pub fn from_form_bytes(body: &[u8]) -> Self {
        form_urlencoded::parse(body)
            .map(|(name, value)| (name.into_owned(), value.into_owned()))
            .collect()
    }

    /// Appends one value for `name`.
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries
            .entry(name.into())
            .or_default()
            .push(value.into());
    }

    /// Replaces all values for `name`, returning the previous ones.
    pub fn insert<I, V>(&mut self, name: impl Into<String>, values: I) -> Option<Vec<String>>
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.entries
            .insert(name.into(), values.into_iter().map(Into::into).collect())
    }

    /// Values for `name`, in order.
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.entries.get(name).map(Vec::as_slice)
    }

    /// Iterates names and their values, in order.
    pub fn iter(&self) -> Iter<'_, String, Vec<String>> {
        self.entries.iter()
    }

    /// Number of distinct names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no names.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a BindInput {
    type Item = (&'a String, &'a Vec<String>);
    type IntoIter = Iter<'a, String, Vec<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<K, V> Extend<(K, V)> for BindInput
where
    K: Into<String>,
    V: Into<String>,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (name, value) in iter {
            self.append(name, value);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for BindInput
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut input = Self::new();
        input.extend(iter);
        input
    }
}
