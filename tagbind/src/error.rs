use core::fmt;
use core::num::ParseIntError;

use crate::{AccessPath, Shape};

/// Accepted boolean literals, in the order they are listed in diagnostics.
pub const BOOL_LITERALS: &[(&str, bool)] = &[
    ("1", true),
    ("t", true),
    ("T", true),
    ("TRUE", true),
    ("true", true),
    ("True", true),
    ("0", false),
    ("f", false),
    ("F", false),
    ("FALSE", false),
    ("false", false),
    ("False", false),
];

/// Failure to convert one string value into a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoerceError {
    /// The destination's kind cannot be written from text.
    UnsupportedKind {
        /// Shape of the destination (or of the list element that was tried).
        shape: &'static Shape,
    },

    /// The value is not a base-10 signed 64-bit integer.
    InvalidInteger {
        /// The rejected input.
        value: String,
        /// Why the standard parser rejected it.
        source: ParseIntError,
    },

    /// The value parsed, but does not fit the destination width.
    IntegerOutOfRange {
        /// The parsed value.
        value: i64,
        /// Shape of the destination.
        target: &'static Shape,
    },

    /// The value is not one of [`BOOL_LITERALS`].
    InvalidBoolean {
        /// The rejected input.
        value: String,
    },
}

impl CoerceError {
    /// Returns true for errors caused by the value's text rather than by the
    /// destination's kind.
    pub fn is_parse_failure(&self) -> bool {
        !matches!(self, CoerceError::UnsupportedKind { .. })
    }
}

impl fmt::Display for CoerceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoerceError::UnsupportedKind { shape } => {
                write!(f, "unsupported kind {} ({})", shape.kind.name(), shape)
            }
            CoerceError::InvalidInteger { value, source } => {
                write!(f, "invalid integer {value:?}: {source}")
            }
            CoerceError::IntegerOutOfRange { value, target } => {
                write!(f, "integer {value} out of range for {target}")
            }
            CoerceError::InvalidBoolean { value } => {
                write!(f, "invalid boolean {value:?}, expected one of ")?;
                for (i, (literal, _)) in BOOL_LITERALS.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    f.write_str(literal)?;
                }
                Ok(())
            }
        }
    }
}

impl core::error::Error for CoerceError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            CoerceError::InvalidInteger { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Failure to bind an input onto a target.
///
/// Binding stops at the first failing value. Fields assigned before it keep
/// their new values; there is no rollback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindError {
    name: String,
    kind: BindErrorKind,
}

/// What went wrong while binding a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindErrorKind {
    /// The value could not be coerced into the field.
    Coerce(CoerceError),

    /// The mapping's access path did not lead to a field of the target.
    /// Shapes are static, so this indicates a broken `StructSlot` impl.
    UnreachablePath {
        /// The path that failed to resolve.
        path: AccessPath,
    },
}

impl BindError {
    pub(crate) fn coerce(name: &str, source: CoerceError) -> Self {
        Self {
            name: name.to_owned(),
            kind: BindErrorKind::Coerce(source),
        }
    }

    pub(crate) fn unreachable_path(name: &str, path: AccessPath) -> Self {
        Self {
            name: name.to_owned(),
            kind: BindErrorKind::UnreachablePath { path },
        }
    }

    /// The external name of the offending field.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// What went wrong.
    pub fn kind(&self) -> &BindErrorKind {
        &self.kind
    }

    /// The coercion failure, if that is what stopped the bind.
    pub fn coerce_error(&self) -> Option<&CoerceError> {
        match &self.kind {
            BindErrorKind::Coerce(err) => Some(err),
            BindErrorKind::UnreachablePath { .. } => None,
        }
    }
}

impl fmt::Display for BindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            BindErrorKind::Coerce(err) => write!(f, "{}: {}", self.name, err),
            BindErrorKind::UnreachablePath { path } => {
                write!(f, "{}: access path {} does not resolve", self.name, path)
            }
        }
    }
}

impl core::error::Error for BindError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match &self.kind {
            BindErrorKind::Coerce(err) => Some(err),
            BindErrorKind::UnreachablePath { .. } => None,
        }
    }
}
