use std::fmt;

use regex::bytes::{Regex, RegexBuilder};

use crate::util::Result;

/// Byte regex that must match its whole subject, like RE2's `FullMatch`.
///
/// Compiled once when the filter is built; `.` does not match `\n` unless
/// the pattern enables `(?s)`.
#[derive(Clone)]
pub struct FullMatchRegex {
    pattern: String,
    regex: Regex,
}

impl FullMatchRegex {
    pub fn new(pattern: &str) -> Result<Self> {
        // The bare pattern must parse on its own, or a stray `)` could close
        // the anchoring group.
        build(pattern)?;
        let regex = build(&format!("^(?:{pattern})$"))?;
        Ok(FullMatchRegex {
            pattern: pattern.to_string(),
            regex,
        })
    }

    #[inline]
    pub fn is_match(&self, subject: &[u8]) -> bool {
        self.regex.is_match(subject)
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

fn build(pattern: &str) -> Result<Regex> {
    Ok(RegexBuilder::new(pattern).unicode(false).build()?)
}

impl PartialEq for FullMatchRegex {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern
    }
}

impl Eq for FullMatchRegex {}

impl fmt::Debug for FullMatchRegex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.pattern)
    }
}
