//! Top-level recognizer combining eligibility markers and temporary-access
//! windows into the three outcomes a caller needs (spec §4.1).

use crate::activation_type::ActivationType;
use crate::error::ConditionError;
use crate::markers::recognize_marker;
use crate::window::parse_window;
use jit_kernel::TimeSpan;

/// Exact literal a post-activation condition's title must equal (spec §4.1).
pub const ACTIVATED_CONDITION_TITLE: &str = "JIT access activation";

/// What an IAM condition (title, expression) pair was recognized as.
#[derive(Debug, Clone, PartialEq)]
pub enum RecognizedCondition {
    /// An eligibility marker: the binding grants a requestable privilege.
    Eligibility {
        activation_type: ActivationType,
        resource_condition: Option<String>,
    },
    /// A previously-activated temporary binding.
    Activated(TimeSpan),
    /// Neither form; the caller should leave the binding alone.
    Unrecognized,
}

/// Recognize a single IAM condition. Eligibility markers are checked first
/// and are independent of the title; the activated form additionally
/// requires the title to equal [`ACTIVATED_CONDITION_TITLE`] exactly.
pub fn recognize(title: &str, expression: &str) -> Result<RecognizedCondition, ConditionError> {
    if let Some(marker) = recognize_marker(expression)? {
        return Ok(RecognizedCondition::Eligibility {
            activation_type: marker.activation_type,
            resource_condition: marker.resource_condition,
        });
    }

    if title == ACTIVATED_CONDITION_TITLE {
        if let Some(window) = parse_window(expression)? {
            return Ok(RecognizedCondition::Activated(window.span));
        }
    }

    Ok(RecognizedCondition::Unrecognized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_eligibility_regardless_of_title() {
        let r = recognize("anything", "has({}.jitAccessConstraint)").unwrap();
        assert_eq!(
            r,
            RecognizedCondition::Eligibility {
                activation_type: ActivationType::SelfApproval,
                resource_condition: None,
            }
        );
    }

    #[test]
    fn recognizes_activated_window_under_exact_title() {
        let expr = r#"request.time >= timestamp("2026-01-01T00:00:00Z") && request.time < timestamp("2026-01-01T01:00:00Z")"#;
        let r = recognize(ACTIVATED_CONDITION_TITLE, expr).unwrap();
        assert!(matches!(r, RecognizedCondition::Activated(_)));
    }

    #[test]
    fn wrong_title_with_window_expression_is_unrecognized() {
        let expr = r#"request.time >= timestamp("2026-01-01T00:00:00Z") && request.time < timestamp("2026-01-01T01:00:00Z")"#;
        let r = recognize("some other title", expr).unwrap();
        assert_eq!(r, RecognizedCondition::Unrecognized);
    }

    #[test]
    fn unrelated_condition_is_unrecognized() {
        let r = recognize("x", "resource.name == \"thing\"").unwrap();
        assert_eq!(r, RecognizedCondition::Unrecognized);
    }
}
