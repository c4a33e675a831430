//! ZIP code extraction from free-form text
//!
//! Finds the first run of exactly five ASCII digits standing on word
//! boundaries: the neighbouring characters, if any, are not letters, digits
//! or `_`. A ZIP+4 such as `90210-1234` yields `90210` because the hyphen
//! ends the first run.

use crate::value_objects::ZipCode;

/// Return the first word-bounded 5-digit run in `text`, if any
#[must_use]
pub fn extract_zip(text: &str) -> Option<ZipCode> {
    let bytes = text.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        if !bytes[i].is_ascii_digit() {
            i += 1;
            continue;
        }

        let start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }

        // ASCII digits are always char boundaries
        let before = text[..start].chars().next_back();
        let after = text[i..].chars().next();

        let bounded = !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char);
        if i - start == 5 && bounded {
            return ZipCode::new(&text[start..i]).ok();
        }
    }

    None
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extracted(text: &str) -> Option<String> {
        extract_zip(text).map(|z| z.as_str().to_string())
    }

    #[test]
    fn bare_zip() {
        assert_eq!(extracted("90210"), Some("90210".to_string()));
    }

    #[test]
    fn zip_inside_sentence() {
        assert_eq!(
            extracted("Weather for New York, NY 10001 please"),
            Some("10001".to_string())
        );
    }

    #[test]
    fn zip_plus_four_yields_primary() {
        assert_eq!(extracted("Beverly Hills 90210-1234"), Some("90210".to_string()));
    }

    #[test]
    fn first_match_wins() {
        assert_eq!(extracted("from 10001 to 94105"), Some("10001".to_string()));
    }

    #[test]
    fn longer_runs_are_skipped() {
        assert_eq!(extracted("order 123456 shipped"), None);
        assert_eq!(extracted("order 123456 to 73301"), Some("73301".to_string()));
    }

    #[test]
    fn shorter_runs_are_skipped() {
        assert_eq!(extracted("350 5th Ave"), None);
    }

    #[test]
    fn adjacent_word_characters_block_a_match() {
        assert_eq!(extracted("ZIP90210"), None);
        assert_eq!(extracted("90210abc"), None);
        assert_eq!(extracted("a_90210"), None);
        assert_eq!(extracted("é90210"), None);
    }

    #[test]
    fn punctuation_bounds_a_run() {
        assert_eq!(extracted("zip:90210."), Some("90210".to_string()));
        assert_eq!(extracted("(10001)"), Some("10001".to_string()));
    }

    #[test]
    fn blocked_run_does_not_hide_a_later_one() {
        assert_eq!(extracted("ZIP90210 or 10001"), Some("10001".to_string()));
    }

    #[test]
    fn no_digits() {
        assert_eq!(extracted("London, UK"), None);
        assert_eq!(extracted(""), None);
    }

    #[test]
    fn multibyte_text_around_zip() {
        assert_eq!(extracted("Café 75001 Straße"), Some("75001".to_string()));
    }
}
