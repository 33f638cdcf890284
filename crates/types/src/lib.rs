//! Validated value types shared by the store and the adapters.

/// Longest accepted customer id, in characters.
pub const MAX_CUSTOMER_ID_LEN: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TextError {
    #[error("Text cannot be empty")]
    Empty,
    #[error("Text is longer than {max} characters")]
    TooLong { max: usize },
    #[error("Text contains control characters")]
    ControlCharacter,
}

/// Identifier of the customer an assessment belongs to.
///
/// Customer records themselves live in another system; this type only guarantees the id is
/// trimmed, non-empty, at most [`MAX_CUSTOMER_ID_LEN`] characters and free of control
/// characters, so it can be printed and compared safely.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CustomerId(String);

impl CustomerId {
    /// # Errors
    ///
    /// Returns a [`TextError`] if the trimmed input is empty, too long or contains control
    /// characters.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        if trimmed.chars().count() > MAX_CUSTOMER_ID_LEN {
            return Err(TextError::TooLong {
                max: MAX_CUSTOMER_ID_LEN,
            });
        }
        if trimmed.chars().any(char::is_control) {
            return Err(TextError::ControlCharacter);
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CustomerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for CustomerId {
    type Err = TextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for CustomerId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for CustomerId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for CustomerId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        CustomerId::new(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(CustomerId::new("  cust-001 ").unwrap().as_str(), "cust-001");
    }

    #[test]
    fn rejects_blank_long_and_control_input() {
        assert_eq!(CustomerId::new("   "), Err(TextError::Empty));
        assert_eq!(
            CustomerId::new("x".repeat(MAX_CUSTOMER_ID_LEN + 1)),
            Err(TextError::TooLong {
                max: MAX_CUSTOMER_ID_LEN
            })
        );
        assert_eq!(CustomerId::new("a\u{0}b"), Err(TextError::ControlCharacter));
        assert!(CustomerId::new("x".repeat(MAX_CUSTOMER_ID_LEN)).is_ok());
    }

    #[test]
    fn deserialization_validates() {
        let id: CustomerId = serde_json::from_str("\" c-42 \"").unwrap();
        assert_eq!(id.as_str(), "c-42");
        assert!(serde_json::from_str::<CustomerId>("\"\"").is_err());
    }
}
