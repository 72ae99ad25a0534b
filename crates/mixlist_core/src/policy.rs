//! Named editor policies for numeric input and image retention.
//!
//! Both policies are plain values carried by `AppConfig`, so tests can pick
//! one deliberately instead of relying on implicit coercion.

use std::str::FromStr;
use thiserror::Error;

/// How numeric form input (age, calories) is parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NumericPolicy {
    /// Unparsable input becomes `0`.
    ///
    /// Input is trimmed first, so `" 42 "` is 42 rather than 0.
    #[default]
    Lenient,
    /// Unparsable input is rejected.
    Strict,
}

/// What happens to a food image reference when an edit picks no new image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ImageRetention {
    /// Keep the reference already stored on the record.
    #[default]
    Preserve,
    /// Replace it with an empty reference.
    Clear,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("`{input}` is not a valid whole number")]
pub struct InvalidNumber {
    pub input: String,
}

impl NumericPolicy {
    /// Parses one numeric field; surrounding whitespace is ignored.
    pub fn parse(self, input: &str) -> Result<i32, InvalidNumber> {
        match (input.trim().parse::<i32>(), self) {
            (Ok(value), _) => Ok(value),
            (Err(_), Self::Lenient) => Ok(0),
            (Err(_), Self::Strict) => Err(InvalidNumber {
                input: input.to_string(),
            }),
        }
    }
}

impl FromStr for NumericPolicy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "lenient" => Ok(Self::Lenient),
            "strict" => Ok(Self::Strict),
            other => Err(format!("expected lenient|strict, got `{other}`")),
        }
    }
}

impl FromStr for ImageRetention {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "preserve" => Ok(Self::Preserve),
            "clear" => Ok(Self::Clear),
            other => Err(format!("expected preserve|clear, got `{other}`")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ImageRetention, NumericPolicy};

    #[test]
    fn lenient_policy_turns_garbage_into_zero() {
        assert_eq!(NumericPolicy::Lenient.parse("abc"), Ok(0));
        assert_eq!(NumericPolicy::Lenient.parse(""), Ok(0));
        assert_eq!(NumericPolicy::Lenient.parse(" 42 "), Ok(42));
    }

    #[test]
    fn strict_policy_rejects_garbage() {
        let err = NumericPolicy::Strict.parse("12kg").unwrap_err();
        assert_eq!(err.input, "12kg");
        assert_eq!(NumericPolicy::Strict.parse("-3"), Ok(-3));
    }

    #[test]
    fn overflow_is_treated_as_unparsable() {
        assert_eq!(NumericPolicy::Lenient.parse("99999999999"), Ok(0));
    }

    #[test]
    fn policies_parse_from_config_strings() {
        assert_eq!("STRICT".parse::<NumericPolicy>(), Ok(NumericPolicy::Strict));
        assert_eq!("clear".parse::<ImageRetention>(), Ok(ImageRetention::Clear));
        assert!("keep".parse::<ImageRetention>().is_err());
    }
}
