//! Raw location input as submitted by a user

/// Free-form location text (ZIP, street address, or city/state)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationQuery {
    raw: String,
}

impl LocationQuery {
    /// Wrap the submitted text unchanged
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// The text exactly as submitted
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The text without surrounding whitespace
    #[must_use]
    pub fn trimmed(&self) -> &str {
        self.raw.trim()
    }

    /// True when the input is empty or whitespace only
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.trimmed().is_empty()
    }

    /// Lower-cased text with runs of whitespace collapsed to one space
    ///
    /// Two queries that differ only in case or spacing normalize identically.
    #[must_use]
    pub fn normalized(&self) -> String {
        self.raw
            .split_whitespace()
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl From<&str> for LocationQuery {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_is_preserved() {
        let query = LocationQuery::new("  Austin, TX ");
        assert_eq!(query.raw(), "  Austin, TX ");
        assert_eq!(query.trimmed(), "Austin, TX");
    }

    #[test]
    fn blank_detection() {
        assert!(LocationQuery::new("").is_blank());
        assert!(LocationQuery::new(" \t\n").is_blank());
        assert!(!LocationQuery::new(" a ").is_blank());
    }

    #[test]
    fn normalized_ignores_case_and_spacing() {
        let a = LocationQuery::new("  123 Main St,   Austin TX ");
        let b = LocationQuery::new("123 main st, austin tx");
        assert_eq!(a.normalized(), b.normalized());
        assert_eq!(a.normalized(), "123 main st, austin tx");
    }
}
