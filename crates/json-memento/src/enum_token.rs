//! Enum tokens: `"__enum__.<EnumName>.<MemberName>"`.

use crate::error::{MementoError, Result};

pub const ENUM_MARKER: &str = "__enum__";

pub fn format_enum_token(enum_name: &str, member: &str) -> String {
    format!("{ENUM_MARKER}.{enum_name}.{member}")
}

/// Parses a token into `(enum_name, member)`.
///
/// Strings that do not start with the marker are not tokens and yield
/// `Ok(None)`. A string that carries the marker but does not split into
/// exactly three dot-separated segments is an error.
pub fn parse_enum_token(s: &str) -> Result<Option<(&str, &str)>> {
    if !s.starts_with(ENUM_MARKER) {
        return Ok(None);
    }
    let mut segments = s.split('.');
    match (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) {
        (Some(ENUM_MARKER), Some(enum_name), Some(member), None) => Ok(Some((enum_name, member))),
        _ => Err(MementoError::MalformedEnumToken(s.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format() {
        assert_eq!(format_enum_token("Color", "RED"), "__enum__.Color.RED");
    }

    #[test]
    fn test_parse_well_formed() {
        assert_eq!(
            parse_enum_token("__enum__.Color.RED").unwrap(),
            Some(("Color", "RED"))
        );
    }

    #[test]
    fn test_parse_plain_string() {
        assert_eq!(parse_enum_token("Color.RED").unwrap(), None);
        assert_eq!(parse_enum_token("").unwrap(), None);
        assert_eq!(parse_enum_token("x__enum__.Color.RED").unwrap(), None);
    }

    #[test]
    fn test_parse_wrong_segment_count() {
        for bad in [
            "__enum__",
            "__enum__.BadFormat",
            "__enum__.Color.RED.extra",
            "__enum__x.Color.RED",
        ] {
            let err = parse_enum_token(bad).unwrap_err();
            assert!(
                matches!(err, MementoError::MalformedEnumToken(ref s) if s == bad),
                "input: {bad}, got: {err}"
            );
        }
    }
}
