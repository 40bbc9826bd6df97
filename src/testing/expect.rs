//! Field-level assertions returning [`Error::TestAssertion`]

use std::fmt::Debug;

use crate::common::{Error, Result};

/// Fail with `<field>: expected <x>, got <y>` when the values differ
pub fn expect_eq<T: PartialEq + Debug + ?Sized>(field: &str, expected: &T, actual: &T) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(Error::TestAssertion(format!(
            "{field}: expected {expected:?}, got {actual:?}"
        )))
    }
}

/// Fail when a returned string is empty or whitespace
pub fn expect_non_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        Err(Error::TestAssertion(format!("{field}: expected a non-empty value")))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expect_eq_message() {
        assert!(expect_eq("department", &Some("a"), &Some("a")).is_ok());
        let err = expect_eq("department", &Some("Ministry of Testing"), &None).unwrap_err();
        assert_eq!(
            err.to_string(),
            r#"Test assertion failed: department: expected Some("Ministry of Testing"), got None"#
        );
    }

    #[test]
    fn test_expect_non_empty() {
        assert!(expect_non_empty("id", "abc").is_ok());
        assert!(expect_non_empty("id", "  ").is_err());
    }
}
