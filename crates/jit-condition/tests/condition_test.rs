use jit_condition::{recognize, ActivationType, RecognizedCondition, ACTIVATED_CONDITION_TITLE};

#[test]
fn end_to_end_self_approval_eligibility() {
    let r = recognize("Allow JIT", "has({}.jitAccessConstraint)").unwrap();
    assert_eq!(
        r,
        RecognizedCondition::Eligibility {
            activation_type: ActivationType::SelfApproval,
            resource_condition: None,
        }
    );
}

#[test]
fn end_to_end_peer_approval_with_topic_and_resource_condition() {
    let r = recognize(
        "Allow MPA prod",
        r#"has({}.multiPartyApprovalConstraint.prod) && resource.name.startsWith("projects/demo")"#,
    )
    .unwrap();
    assert_eq!(
        r,
        RecognizedCondition::Eligibility {
            activation_type: ActivationType::PeerApproval(Some("prod".to_string())),
            resource_condition: Some(r#"resource.name.startsWith("projects/demo")"#.to_string()),
        }
    );
}

#[test]
fn end_to_end_activated_binding_round_trip() {
    let expr = r#"request.time >= timestamp("2026-03-01T09:00:00Z") && request.time < timestamp("2026-03-01T10:00:00Z")"#;
    let r = recognize(ACTIVATED_CONDITION_TITLE, expr).unwrap();
    match r {
        RecognizedCondition::Activated(span) => {
            assert!(span.start() < span.end());
        }
        other => panic!("expected Activated, got {other:?}"),
    }
}

#[test]
fn end_to_end_activated_binding_preserves_resource_condition_as_unrecognized_marker_path() {
    // The stored post-activation expression can carry a trailing resource
    // condition; recognize() surfaces only the window here — callers that
    // need the trailing text use parse_window directly.
    let expr = r#"request.time >= timestamp("2026-03-01T09:00:00Z") && request.time < timestamp("2026-03-01T10:00:00Z") && resource.region == "eu""#;
    let r = recognize(ACTIVATED_CONDITION_TITLE, expr).unwrap();
    assert!(matches!(r, RecognizedCondition::Activated(_)));
}

#[test]
fn unrelated_condition_is_unrecognized() {
    let r = recognize("Deny all", "1 == 2").unwrap();
    assert_eq!(r, RecognizedCondition::Unrecognized);
}
