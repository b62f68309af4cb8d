use super::ids::*;
use std::str::FromStr;

#[test]
fn project_id_round_trips() {
    let id = ProjectId::new("my-project-1").unwrap();
    let formatted = id.to_string();
    assert_eq!(formatted, "projects/my-project-1");
    let parsed = ProjectId::from_str(&formatted).unwrap();
    assert_eq!(parsed, id);
}

#[test]
fn project_id_rejects_empty() {
    assert!(ProjectId::new("").is_err());
}

#[test]
fn user_email_normalizes_case() {
    let a = UserEmail::new("Alice@Example.ORG").unwrap();
    let b = UserEmail::new("alice@example.org").unwrap();
    assert_eq!(a, b);
    assert_eq!(a.as_str(), "alice@example.org");
}

#[test]
fn user_email_rejects_missing_at() {
    assert!(UserEmail::new("not-an-email").is_err());
}

#[test]
fn role_binding_orders_lexicographically() {
    let a = RoleBinding::new("projects/a", "roles/viewer");
    let b = RoleBinding::new("projects/b", "roles/viewer");
    assert!(a < b);
}

#[test]
fn project_role_round_trips() {
    let pr = ProjectRole::new(ProjectId::new("p1").unwrap(), "roles/compute.viewer");
    let formatted = pr.to_string();
    assert_eq!(formatted, "projects/p1:roles/compute.viewer");
    let parsed = ProjectRole::from_str(&formatted).unwrap();
    assert_eq!(parsed, pr);
}

#[test]
fn activation_id_prefix_distinguishes_kind() {
    let jit = ActivationId::new(ActivationIdKind::SelfApproval);
    let mpa = ActivationId::new(ActivationIdKind::MultiParty);
    assert!(jit.as_str().starts_with("jit-"));
    assert!(mpa.as_str().starts_with("mpa-"));
    assert_eq!(jit.kind(), Some(ActivationIdKind::SelfApproval));
    assert_eq!(mpa.kind(), Some(ActivationIdKind::MultiParty));
}

#[test]
fn activation_id_parse_rejects_unknown_prefix() {
    assert!(ActivationId::from_str("xyz-123").is_err());
}
