//! Equality assertions that fail the enclosing scenario

use std::fmt::Display;

use crate::common::{Error, Result};

/// Compare the string forms of `actual` and `expected`
///
/// On mismatch returns [`Error::AssertionFailure`] carrying both values.
pub fn assert_equal(what: &str, actual: impl Display, expected: impl Display) -> Result<()> {
    let actual = actual.to_string();
    let expected = expected.to_string();
    if actual == expected {
        Ok(())
    } else {
        Err(Error::assertion(what, expected, actual))
    }
}
