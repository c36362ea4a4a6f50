//! Checkout contact fields: phone number and postal pincode.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Phone`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneError {
    /// The input string is empty.
    #[error("phone number cannot be empty")]
    Empty,
    /// The input contains something other than ASCII digits.
    #[error("phone number must contain digits only")]
    NonDigit,
    /// The input has the wrong number of digits.
    #[error("phone number must be exactly {expected} digits (got {actual})")]
    WrongLength {
        /// Required digit count.
        expected: usize,
        /// Digit count of the input.
        actual: usize,
    },
}

/// A 10-digit mobile number, without country code.
///
/// ## Examples
///
/// ```
/// use flutter_store_core::Phone;
///
/// assert!(Phone::parse("9876543210").is_ok());
/// assert!(Phone::parse("12345").is_err());
/// assert!(Phone::parse("98765-4321").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Phone(String);

impl Phone {
    /// Number of digits in a phone number.
    pub const LENGTH: usize = 10;

    /// Parse a `Phone` from a string. Surrounding whitespace is ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, contains non-digits, or does
    /// not have exactly 10 digits.
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(PhoneError::Empty);
        }
        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PhoneError::NonDigit);
        }
        if s.len() != Self::LENGTH {
            return Err(PhoneError::WrongLength {
                expected: Self::LENGTH,
                actual: s.len(),
            });
        }
        Ok(Self(s.to_owned()))
    }

    /// Returns the phone number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Phone {
    type Err = PhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Phone {
    type Error = PhoneError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Phone> for String {
    fn from(phone: Phone) -> Self {
        phone.0
    }
}

/// Errors that can occur when parsing a [`Pincode`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PincodeError {
    /// The input string is empty.
    #[error("pincode cannot be empty")]
    Empty,
    /// The input contains something other than ASCII digits.
    #[error("pincode must contain digits only")]
    NonDigit,
    /// The input has the wrong number of digits.
    #[error("pincode must be exactly {expected} digits (got {actual})")]
    WrongLength {
        /// Required digit count.
        expected: usize,
        /// Digit count of the input.
        actual: usize,
    },
}

/// A 6-digit Indian postal index number.
///
/// ## Examples
///
/// ```
/// use flutter_store_core::Pincode;
///
/// assert!(Pincode::parse("600001").is_ok());
/// assert!(Pincode::parse("60000").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Pincode(String);

impl Pincode {
    /// Number of digits in a pincode.
    pub const LENGTH: usize = 6;

    /// Parse a `Pincode` from a string. Surrounding whitespace is ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, contains non-digits, or does
    /// not have exactly 6 digits.
    pub fn parse(s: &str) -> Result<Self, PincodeError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(PincodeError::Empty);
        }
        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PincodeError::NonDigit);
        }
        if s.len() != Self::LENGTH {
            return Err(PincodeError::WrongLength {
                expected: Self::LENGTH,
                actual: s.len(),
            });
        }
        Ok(Self(s.to_owned()))
    }

    /// Returns the pincode as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Pincode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Pincode {
    type Err = PincodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Pincode {
    type Error = PincodeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Pincode> for String {
    fn from(pincode: Pincode) -> Self {
        pincode.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_valid() {
        let phone = Phone::parse("9876543210").unwrap();
        assert_eq!(phone.as_str(), "9876543210");
        assert_eq!(Phone::parse(" 9876543210 ").unwrap(), phone);
    }

    #[test]
    fn test_phone_too_short() {
        assert_eq!(
            Phone::parse("12345"),
            Err(PhoneError::WrongLength {
                expected: 10,
                actual: 5
            })
        );
    }

    #[test]
    fn test_phone_too_long() {
        assert!(matches!(
            Phone::parse("98765432100"),
            Err(PhoneError::WrongLength { actual: 11, .. })
        ));
    }

    #[test]
    fn test_phone_non_digit_and_empty() {
        assert_eq!(Phone::parse("+919876543"), Err(PhoneError::NonDigit));
        assert_eq!(Phone::parse("   "), Err(PhoneError::Empty));
    }

    #[test]
    fn test_pincode_valid_and_invalid() {
        assert!(Pincode::parse("600001").is_ok());
        assert_eq!(
            Pincode::parse("60000"),
            Err(PincodeError::WrongLength {
                expected: 6,
                actual: 5
            })
        );
        assert_eq!(Pincode::parse("60000a"), Err(PincodeError::NonDigit));
        assert_eq!(Pincode::parse(""), Err(PincodeError::Empty));
    }

    #[test]
    fn test_serde_validates() {
        let phone: Phone = serde_json::from_str("\"9876543210\"").unwrap();
        assert_eq!(phone.to_string(), "9876543210");
        assert!(serde_json::from_str::<Pincode>("\"123\"").is_err());
    }
}
