//! US ZIP code value object

use std::fmt;

use crate::errors::DomainError;

/// A US postal code, reduced to its five-digit primary form
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ZipCode {
    primary: String,
}

fn is_digits(s: &str, len: usize) -> bool {
    s.len() == len && s.bytes().all(|b| b.is_ascii_digit())
}

impl ZipCode {
    /// Create a ZIP code from exactly five ASCII digits
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidZipCode` for anything else.
    pub fn new(code: &str) -> Result<Self, DomainError> {
        if !is_digits(code, 5) {
            return Err(DomainError::InvalidZipCode(code.to_string()));
        }
        Ok(Self {
            primary: code.to_string(),
        })
    }

    /// Parse a whole input as `12345` or `12345-6789` (surrounding whitespace ignored)
    ///
    /// A +4 extension is validated and then discarded.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidZipCode` if the trimmed input is anything
    /// other than a ZIP or ZIP+4.
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let trimmed = input.trim();
        let invalid = || DomainError::InvalidZipCode(trimmed.to_string());

        match trimmed.split_once('-') {
            None => Self::new(trimmed).map_err(|_| invalid()),
            Some((primary, extension)) if is_digits(extension, 4) => {
                Self::new(primary).map_err(|_| invalid())
            },
            Some(_) => Err(invalid()),
        }
    }

    /// The 5-digit primary code
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.primary
    }
}

impl fmt::Display for ZipCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.primary)
    }
}
