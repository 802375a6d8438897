use std::{fmt, ops::Deref, str::FromStr};

use serde::Serialize;

/// A vehicle registration number.
///
/// Format: exactly six characters, three letters followed by three digits
/// (e.g. `ABC123`). Letters are folded to uppercase on construction, so
/// `abc123` and `ABC123` name the same vehicle.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct RegNo(String);

impl RegNo {
    /// The exact number of characters in a registration number.
    pub const LENGTH: usize = 6;

    /// Validates and normalises a registration number.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not six characters long, does not
    /// start with three ASCII letters, or does not end with three ASCII
    /// digits.
    pub fn new(s: &str) -> Result<Self, Error> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != Self::LENGTH {
            return Err(Error::Length(s.to_string()));
        }

        let (letters, digits) = chars.split_at(3);
        if !letters.iter().all(char::is_ascii_alphabetic) {
            return Err(Error::Letters(s.to_string()));
        }
        if !digits.iter().all(char::is_ascii_digit) {
            return Err(Error::Digits(s.to_string()));
        }

        Ok(Self(s.to_ascii_uppercase()))
    }

    /// Returns the string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for RegNo {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<&str> for RegNo {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl AsRef<str> for RegNo {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Deref for RegNo {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for RegNo {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Errors that can occur when validating a registration number.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// The input is not exactly six characters long.
    #[error("invalid registration number '{0}': must be 6 characters")]
    Length(String),

    /// The first three characters are not all letters.
    #[error("invalid registration number '{0}': must begin with three letters")]
    Letters(String),

    /// The last three characters are not all digits.
    #[error("invalid registration number '{0}': must end with three digits")]
    Digits(String),
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case("ABC123", "ABC123"; "uppercase")]
    #[test_case("abc123", "ABC123"; "lowercase folded")]
    #[test_case("aBc007", "ABC007"; "mixed case folded")]
    fn accepts_valid(input: &str, expected: &str) {
        let reg = RegNo::new(input).unwrap();
        assert_eq!(reg.as_str(), expected);
        assert_eq!(reg.to_string(), expected);
    }

    #[test_case(""; "empty")]
    #[test_case("AB123"; "too short")]
    #[test_case("ABCD1234"; "too long")]
    #[test_case("ABC 123"; "embedded space")]
    fn rejects_wrong_length(input: &str) {
        assert_eq!(RegNo::new(input), Err(Error::Length(input.to_string())));
    }

    #[test_case("A1C123"; "digit in letters")]
    #[test_case("12A345"; "leading digits")]
    #[test_case("ÄBC123"; "non ascii letter")]
    fn rejects_bad_letters(input: &str) {
        assert_eq!(RegNo::new(input), Err(Error::Letters(input.to_string())));
    }

    #[test_case("ABC12D"; "letter in digits")]
    #[test_case("ABCDEF"; "all letters")]
    fn rejects_bad_digits(input: &str) {
        assert_eq!(RegNo::new(input), Err(Error::Digits(input.to_string())));
    }

    #[test]
    fn orders_lexicographically() {
        let mut regs: Vec<RegNo> = ["ZED001", "abc999", "ABC100"]
            .into_iter()
            .map(|s| s.parse().unwrap())
            .collect();
        regs.sort();

        let sorted: Vec<&str> = regs.iter().map(RegNo::as_str).collect();
        assert_eq!(sorted, ["ABC100", "ABC999", "ZED001"]);
    }

    #[test]
    fn error_display() {
        let error = RegNo::new("AB1").unwrap_err();
        assert_eq!(
            error.to_string(),
            "invalid registration number 'AB1': must be 6 characters"
        );
    }
}
