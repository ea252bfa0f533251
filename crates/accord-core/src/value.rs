//! Canonical string forms for path parameter values.

use thiserror::Error;
use uuid::Uuid;

/// A raw path component that could not be parsed into the field's type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected {expected}, got {value:?}")]
pub struct PathValueError {
    /// Human-readable name of the expected type.
    pub expected: &'static str,
    /// The decoded component that failed to parse.
    pub value: String,
}

impl PathValueError {
    /// Creates an error for `value` failing to parse as `expected`.
    #[must_use]
    pub fn new(expected: &'static str, value: impl Into<String>) -> Self {
        Self {
            expected,
            value: value.into(),
        }
    }
}

/// A type with a canonical, bidirectional string form usable as a path
/// component.
///
/// `from_path_value(&v.to_path_value())` must give back `v`. Values are
/// percent-encoded by the path template, so implementations deal only in
/// plain text.
pub trait PathValue: Sized {
    /// Renders the value.
    fn to_path_value(&self) -> String;

    /// Parses a decoded path component.
    fn from_path_value(raw: &str) -> Result<Self, PathValueError>;
}

impl PathValue for String {
    fn to_path_value(&self) -> String {
        self.clone()
    }

    fn from_path_value(raw: &str) -> Result<Self, PathValueError> {
        Ok(raw.to_string())
    }
}

impl PathValue for bool {
    fn to_path_value(&self) -> String {
        self.to_string()
    }

    fn from_path_value(raw: &str) -> Result<Self, PathValueError> {
        match raw {
            "true" => Ok(true),
            "false" => Ok(false),
            other => Err(PathValueError::new("bool", other)),
        }
    }
}

impl PathValue for char {
    fn to_path_value(&self) -> String {
        self.to_string()
    }

    fn from_path_value(raw: &str) -> Result<Self, PathValueError> {
        let mut chars = raw.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(PathValueError::new("char", raw)),
        }
    }
}

/// Lower-case hyphenated on output; any case accepted on input.
impl PathValue for Uuid {
    fn to_path_value(&self) -> String {
        self.hyphenated().to_string()
    }

    fn from_path_value(raw: &str) -> Result<Self, PathValueError> {
        Uuid::parse_str(raw).map_err(|_| PathValueError::new("uuid", raw))
    }
}

macro_rules! integer_path_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl PathValue for $ty {
                fn to_path_value(&self) -> String {
                    self.to_string()
                }

                fn from_path_value(raw: &str) -> Result<Self, PathValueError> {
                    raw.parse()
                        .map_err(|_| PathValueError::new(stringify!($ty), raw))
                }
            }
        )*
    };
}

integer_path_value!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip<T: PathValue + PartialEq + std::fmt::Debug>(value: T) {
        assert_eq!(T::from_path_value(&value.to_path_value()).unwrap(), value);
    }

    #[test]
    fn test_round_trips() {
        round_trip(String::from("hello world/slash"));
        round_trip(true);
        round_trip('é');
        round_trip(-42_i64);
        round_trip(u128::MAX);
        round_trip(Uuid::nil());
    }

    #[test]
    fn test_uuid_is_lowercase_and_parses_uppercase() {
        let id = Uuid::parse_str("BC8EBCAE-282A-41CE-8BAE-43A624A55E91").unwrap();
        assert_eq!(id.to_path_value(), "bc8ebcae-282a-41ce-8bae-43a624a55e91");
        assert_eq!(
            Uuid::from_path_value("BC8EBCAE-282A-41CE-8BAE-43A624A55E91").unwrap(),
            id
        );
    }

    #[test]
    fn test_parse_failures() {
        assert_eq!(
            u32::from_path_value("abc").unwrap_err(),
            PathValueError::new("u32", "abc")
        );
        assert!(bool::from_path_value("yes").is_err());
        assert!(char::from_path_value("ab").is_err());
        assert!(char::from_path_value("").is_err());
        assert!(Uuid::from_path_value("not-a-uuid").is_err());
    }
}
