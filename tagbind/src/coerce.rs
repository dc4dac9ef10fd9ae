//! String-to-value coercion, dispatched on the destination's kind.

use crate::{BOOL_LITERALS, CoerceError, Slot, trace};

/// Parses `value` into the field behind `slot` and stores it.
///
/// - text: assigned unchanged
/// - integer: base-10, optional sign, 64-bit; narrower destinations are
///   range-checked
/// - boolean: one of [`BOOL_LITERALS`]
/// - list: a new default element is coerced from `value` and appended, so
///   repeated values accumulate in order. If the element fails, the list is
///   left as it was.
/// - struct and opaque: [`CoerceError::UnsupportedKind`]
pub fn coerce(slot: Slot<'_>, value: &str) -> Result<(), CoerceError> {
    match slot {
        Slot::List(list) => {
            list.push_default();
            let result = match list.last_mut() {
                Some(elem) => coerce(elem, value),
                None => Err(CoerceError::UnsupportedKind {
                    shape: list.elem_shape(),
                }),
            };
            if result.is_err() {
                list.pop_last();
            }
            result
        }
        Slot::Text(text) => {
            text.clear();
            text.push_str(value);
            Ok(())
        }
        Slot::Integer(int) => {
            let parsed = parse_integer(value)?;
            let target = int.shape();
            int.set(parsed)
                .map_err(|_| CoerceError::IntegerOutOfRange {
                    value: parsed,
                    target,
                })
        }
        Slot::Boolean(b) => {
            *b = parse_bool(value)?;
            Ok(())
        }
        Slot::Struct(s) => {
            trace!("refusing to assign text to struct {}", s.shape());
            Err(CoerceError::UnsupportedKind { shape: s.shape() })
        }
        Slot::Opaque(shape) => Err(CoerceError::UnsupportedKind { shape }),
    }
}

/// Parses a base-10 signed 64-bit integer.
pub fn parse_integer(value: &str) -> Result<i64, CoerceError> {
    value
        .parse::<i64>()
        .map_err(|source| CoerceError::InvalidInteger {
            value: value.to_owned(),
            source,
        })
}

/// Parses one of [`BOOL_LITERALS`]. Matching is exact.
pub fn parse_bool(value: &str) -> Result<bool, CoerceError> {
    BOOL_LITERALS
        .iter()
        .find(|(literal, _)| *literal == value)
        .map(|&(_, parsed)| parsed)
        .ok_or_else(|| CoerceError::InvalidBoolean {
            value: value.to_owned(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Reflect;

    #[test]
    fn text_is_replaced() {
        let mut s = String::from("old");
        coerce(s.slot(), "new").unwrap();
        assert_eq!(s, "new");
    }

    #[test]
    fn integers_parse_base_10() {
        let mut n = 0i64;
        coerce(n.slot(), "-42").unwrap();
        assert_eq!(n, -42);
        coerce(n.slot(), "+7").unwrap();
        assert_eq!(n, 7);

        for bad in ["", "abc", "0x10", "1.5", "9223372036854775808", " 1"] {
            let err = coerce(n.slot(), bad).unwrap_err();
            assert!(
                matches!(err, CoerceError::InvalidInteger { .. }),
                "{bad:?} gave {err:?}"
            );
            assert!(err.is_parse_failure());
        }
        assert_eq!(n, 7);
    }

    #[test]
    fn booleans_accept_fixed_literals() {
        let mut b = false;
        for (literal, expected) in BOOL_LITERALS {
            coerce(b.slot(), literal).unwrap();
            assert_eq!(b, *expected, "{literal}");
        }
        for bad in ["yes", "no", "tRuE", "", "2"] {
            assert!(matches!(
                coerce(b.slot(), bad),
                Err(CoerceError::InvalidBoolean { .. })
            ));
        }
    }

    #[test]
    fn failed_element_is_not_appended() {
        let mut list = vec![1i64, 2];
        coerce(list.slot(), "3").unwrap();
        assert!(coerce(list.slot(), "three").is_err());
        assert_eq!(list, [1, 2, 3]);

        let mut floats: Vec<f64> = Vec::new();
        let err = coerce(floats.slot(), "1.0").unwrap_err();
        assert!(matches!(err, CoerceError::UnsupportedKind { shape } if shape == f64::SHAPE));
        assert!(floats.is_empty());
    }

    #[test]
    fn nested_lists_wrap_each_value() {
        let mut nested: Vec<Vec<String>> = Vec::new();
        coerce(nested.slot(), "a").unwrap();
        coerce(nested.slot(), "b").unwrap();
        assert_eq!(nested, [vec!["a".to_string()], vec!["b".to_string()]]);
    }

    #[test]
    fn error_messages() {
        let mut n = 0i64;
        insta::assert_snapshot!(
            coerce(n.slot(), "abc").unwrap_err().to_string(),
            @r#"invalid integer "abc": invalid digit found in string"#
        );
        let mut b = false;
        insta::assert_snapshot!(
            coerce(b.slot(), "yes").unwrap_err().to_string(),
            @r#"invalid boolean "yes", expected one of 1, t, T, TRUE, true, True, 0, f, F, FALSE, false, False"#
        );
        let mut c = 'x';
        insta::assert_snapshot!(
            coerce(c.slot(), "y").unwrap_err().to_string(),
            @"unsupported kind opaque (char)"
        );
        let out_of_range = CoerceError::IntegerOutOfRange {
            value: 1 << 40,
            target: isize::SHAPE,
        };
        assert!(out_of_range.is_parse_failure());
        insta::assert_snapshot!(
            out_of_range.to_string(),
            @"integer 1099511627776 out of range for isize"
        );
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn isize_takes_the_full_i64_range() {
        let mut n: isize = 0;
        coerce(n.slot(), "9223372036854775807").unwrap();
        assert_eq!(n, isize::MAX);
        coerce(n.slot(), "-9223372036854775808").unwrap();
        assert_eq!(n, isize::MIN);
    }

    #[test]
    #[cfg(target_pointer_width = "32")]
    fn isize_rejects_values_that_do_not_fit() {
        let mut n: isize = 5;
        let err = coerce(n.slot(), "4294967296").unwrap_err();
        assert!(
            matches!(err, CoerceError::IntegerOutOfRange { value: 4294967296, target } if target == isize::SHAPE),
            "{err:?}"
        );
        assert_eq!(err.to_string(), "integer 4294967296 out of range for isize");
        assert_eq!(n, 5);

        coerce(n.slot(), "-2147483648").unwrap();
        assert_eq!(n, isize::MIN);
    }
}
