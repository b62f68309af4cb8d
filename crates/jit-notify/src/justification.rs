//! Free-text justification validation (spec §4.7).

use crate::error::NotifyError;
use jit_kernel::UserEmail;
use regex::Regex;

const DEFAULT_PATTERN: &str = ".*";
const DEFAULT_HINT: &str = "Bug or case number";

/// A compiled justification pattern and the hint shown when it rejects.
#[derive(Debug, Clone)]
pub struct JustificationPolicy {
    pattern: Regex,
    hint: String,
}

impl JustificationPolicy {
    pub fn new(pattern: &str, hint: impl Into<String>) -> Result<Self, NotifyError> {
        let pattern = Regex::new(pattern)
            .map_err(|e| NotifyError::InvalidArgument(format!("invalid justification pattern: {e}")))?;
        Ok(Self {
            pattern,
            hint: hint.into(),
        })
    }

    pub fn hint(&self) -> &str {
        &self.hint
    }

    /// `user` is accepted but unused by the default policy; it is part of
    /// the port contract because deployments may scope the pattern per
    /// caller (spec §4.7 signature).
    pub fn validate(&self, text: &str, _user: &UserEmail) -> Result<(), NotifyError> {
        if self.pattern.is_match(text) {
            Ok(())
        } else {
            Err(NotifyError::InvalidArgument(self.hint.clone()))
        }
    }
}

impl Default for JustificationPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_PATTERN, DEFAULT_HINT).expect("default pattern is valid")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn user() -> UserEmail {
        UserEmail::from_str("alice@example.org").unwrap()
    }

    #[test]
    fn default_policy_accepts_anything() {
        let policy = JustificationPolicy::default();
        assert!(policy.validate("", &user()).is_ok());
        assert!(policy.validate("BUG-1234", &user()).is_ok());
    }

    #[test]
    fn custom_pattern_rejects_non_matching_text() {
        let policy = JustificationPolicy::new(r"^BUG-\d+$", "Bug number required").unwrap();
        assert!(policy.validate("BUG-42", &user()).is_ok());
        let err = policy.validate("not a bug id", &user()).unwrap_err();
        assert_eq!(err, NotifyError::InvalidArgument("Bug number required".to_string()));
    }
}
