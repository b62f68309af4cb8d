//! Recognizers for the eligibility-marker forms of spec §4.1.
//!
//! Matching is case-insensitive and whitespace-insensitive: every literal
//! token in the patterns below is separated by `\s*` so stray spacing in a
//! hand-edited IAM condition does not break recognition.

use crate::activation_type::{ActivationType, MAX_TOPIC_LEN};
use crate::error::ConditionError;
use regex::RegexBuilder;
use std::sync::LazyLock;

/// `\.[A-Za-z][A-Za-z0-9\-_]*` — topic suffix on a constraint name (spec §4.1).
const TOPIC_FRAGMENT: &str = r"(?:\.([A-Za-z][A-Za-z0-9\-_]*))?";

fn marker_regex(constraint: &str) -> regex::Regex {
    let pattern = format!(
        r#"has\s*\(\s*\{{\s*\}}\s*\.\s*{constraint}{TOPIC_FRAGMENT}\s*\)(?:\s*&&\s*(.+))?"#
    );
    RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .dot_matches_new_line(true)
        .build()
        .expect("static marker regex is valid")
}

static JIT_RE: LazyLock<regex::Regex> = LazyLock::new(|| marker_regex("jitAccessConstraint"));
static MPA_RE: LazyLock<regex::Regex> =
    LazyLock::new(|| marker_regex("multiPartyApprovalConstraint"));
static EXTERNAL_RE: LazyLock<regex::Regex> =
    LazyLock::new(|| marker_regex("externalApprovalConstraint"));
static REVIEWER_RE: LazyLock<regex::Regex> = LazyLock::new(|| marker_regex("reviewerPrivilege"));

/// A recognized eligibility marker, its activation type, and any preserved
/// `&&`-joined resource sub-expression that followed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognizedMarker {
    pub activation_type: ActivationType,
    pub resource_condition: Option<String>,
}

fn extract_topic(m: &regex::Captures<'_>) -> Result<Option<String>, ConditionError> {
    match m.get(1) {
        None => Ok(None),
        Some(topic) => {
            let topic = topic.as_str();
            if topic.len() > MAX_TOPIC_LEN {
                return Err(ConditionError::TopicTooLong {
                    max: MAX_TOPIC_LEN,
                    actual: topic.len(),
                });
            }
            Ok(Some(topic.to_string()))
        }
    }
}

fn trailing(m: &regex::Captures<'_>) -> Option<String> {
    m.get(2).map(|g| g.as_str().trim().to_string())
}

/// `has({}.reviewerPrivilege[.TOPIC]?)` is matched separately from the
/// requester-side markers because it never produces an `ActivationType`
/// by itself — it is paired with `externalApprovalConstraint` on the
/// reviewer's own binding. Callers that need reviewer capability should use
/// [`recognize_reviewer_marker`] instead of [`recognize_marker`].
pub fn recognize_marker(expression: &str) -> Result<Option<RecognizedMarker>, ConditionError> {
    if let Some(m) = JIT_RE.captures(expression) {
        return Ok(Some(RecognizedMarker {
            activation_type: ActivationType::SelfApproval,
            resource_condition: trailing(&m),
        }));
    }
    if let Some(m) = MPA_RE.captures(expression) {
        let topic = extract_topic(&m)?;
        return Ok(Some(RecognizedMarker {
            activation_type: ActivationType::PeerApproval(topic),
            resource_condition: trailing(&m),
        }));
    }
    if let Some(m) = EXTERNAL_RE.captures(expression) {
        let topic = extract_topic(&m)?;
        return Ok(Some(RecognizedMarker {
            activation_type: ActivationType::ExternalApproval(topic),
            resource_condition: trailing(&m),
        }));
    }
    Ok(None)
}

/// Topic carried by a `has({}.reviewerPrivilege[.TOPIC]?)` marker, if present
/// on the expression at all.
pub fn recognize_reviewer_marker(
    expression: &str,
) -> Result<Option<(Option<String>, Option<String>)>, ConditionError> {
    match REVIEWER_RE.captures(expression) {
        None => Ok(None),
        Some(m) => Ok(Some((extract_topic(&m)?, trailing(&m)))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_jit_marker() {
        let r = recognize_marker("has({}.jitAccessConstraint)").unwrap().unwrap();
        assert_eq!(r.activation_type, ActivationType::SelfApproval);
        assert_eq!(r.resource_condition, None);
    }

    #[test]
    fn recognizes_mpa_marker_with_topic() {
        let r = recognize_marker("has({}.multiPartyApprovalConstraint.prod)")
            .unwrap()
            .unwrap();
        assert_eq!(
            r.activation_type,
            ActivationType::PeerApproval(Some("prod".to_string()))
        );
    }

    #[test]
    fn recognizes_mpa_marker_without_topic() {
        let r = recognize_marker("has({}.multiPartyApprovalConstraint)")
            .unwrap()
            .unwrap();
        assert_eq!(r.activation_type, ActivationType::PeerApproval(None));
    }

    #[test]
    fn is_case_and_whitespace_insensitive() {
        let r = recognize_marker("HAS( {  } . JITACCESSCONSTRAINT )")
            .unwrap()
            .unwrap();
        assert_eq!(r.activation_type, ActivationType::SelfApproval);
    }

    #[test]
    fn preserves_trailing_resource_condition() {
        let r = recognize_marker(r#"has({}.jitAccessConstraint) && resource.region == "us""#)
            .unwrap()
            .unwrap();
        assert_eq!(
            r.resource_condition,
            Some(r#"resource.region == "us""#.to_string())
        );
    }

    #[test]
    fn reviewer_marker_is_recognized_independently() {
        let (topic, _) = recognize_reviewer_marker("has({}.reviewerPrivilege.prod)")
            .unwrap()
            .unwrap();
        assert_eq!(topic, Some("prod".to_string()));
        assert!(recognize_marker("has({}.reviewerPrivilege.prod)")
            .unwrap()
            .is_none());
    }

    #[test]
    fn unrelated_expression_is_not_a_marker() {
        assert!(recognize_marker("resource.name == \"x\"").unwrap().is_none());
    }
}
