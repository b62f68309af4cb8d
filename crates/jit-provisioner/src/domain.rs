//! IAM policy and binding types (spec §4.2).

use jit_kernel::UserEmail;
use jit_condition::parse_window;
use std::collections::BTreeSet;

/// A condition attached to a policy binding, carried verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    pub title: String,
    pub description: String,
    pub expression: String,
}

/// The binding requested by `addProjectBinding`: one principal, one role,
/// an optional condition.
#[derive(Debug, Clone)]
pub struct Binding {
    pub principal: UserEmail,
    pub role: String,
    pub condition: Option<Condition>,
}

/// A binding as stored in a project's IAM policy: GCP-style bindings key on
/// `(role, condition)` and carry a member set, not a single principal.
#[derive(Debug, Clone)]
pub struct PolicyBinding {
    pub members: BTreeSet<UserEmail>,
    pub role: String,
    pub condition: Option<Condition>,
}

impl PolicyBinding {
    pub fn singleton(binding: Binding) -> Self {
        let mut members = BTreeSet::new();
        members.insert(binding.principal);
        Self {
            members,
            role: binding.role,
            condition: binding.condition,
        }
    }

    /// Binding equality per spec §4.2: same role, same member set
    /// (order-insensitive — hence the `BTreeSet`), and conditions either
    /// both absent or both present with an exact string match.
    pub fn equals_requested(&self, requested: &Binding) -> bool {
        if self.role != requested.role {
            return false;
        }
        if self.members.len() != 1 || !self.members.contains(&requested.principal) {
            return false;
        }
        self.condition == requested.condition
    }

    pub fn same_role_and_members(&self, role: &str, principal: &UserEmail) -> bool {
        self.role == role && self.members.len() == 1 && self.members.contains(principal)
    }

    /// A binding is "temporary" iff its condition's expression parses as a
    /// temporary-access window (spec §4.1, §4.2 purge rule).
    pub fn is_temporary(&self) -> bool {
        match &self.condition {
            None => false,
            Some(condition) => matches!(parse_window(&condition.expression), Ok(Some(_))),
        }
    }
}

/// A project's IAM policy at a specific version, used as the optimistic
/// concurrency token on write-back.
#[derive(Debug, Clone)]
pub struct VersionedPolicy {
    pub version: u64,
    pub bindings: Vec<PolicyBinding>,
}

impl VersionedPolicy {
    pub fn new(version: u64, bindings: Vec<PolicyBinding>) -> Self {
        Self { version, bindings }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn email(s: &str) -> UserEmail {
        UserEmail::from_str(s).unwrap()
    }

    #[test]
    fn equals_requested_requires_exact_condition_match() {
        let pb = PolicyBinding::singleton(Binding {
            principal: email("alice@example.org"),
            role: "roles/viewer".to_string(),
            condition: Some(Condition {
                title: "t".into(),
                description: "d".into(),
                expression: "e".into(),
            }),
        });
        let same = Binding {
            principal: email("alice@example.org"),
            role: "roles/viewer".to_string(),
            condition: Some(Condition {
                title: "t".into(),
                description: "d".into(),
                expression: "e".into(),
            }),
        };
        assert!(pb.equals_requested(&same));

        let different = Binding {
            principal: email("alice@example.org"),
            role: "roles/viewer".to_string(),
            condition: Some(Condition {
                title: "t".into(),
                description: "d".into(),
                expression: "different".into(),
            }),
        };
        assert!(!pb.equals_requested(&different));
    }

    #[test]
    fn detects_temporary_window_binding() {
        let pb = PolicyBinding::singleton(Binding {
            principal: email("alice@example.org"),
            role: "roles/viewer".to_string(),
            condition: Some(Condition {
                title: "JIT access activation".into(),
                description: "d".into(),
                expression: r#"request.time >= timestamp("2026-01-01T00:00:00Z") && request.time < timestamp("2026-01-01T01:00:00Z")"#.into(),
            }),
        });
        assert!(pb.is_temporary());
    }

    #[test]
    fn non_window_condition_is_not_temporary() {
        let pb = PolicyBinding::singleton(Binding {
            principal: email("alice@example.org"),
            role: "roles/viewer".to_string(),
            condition: Some(Condition {
                title: "Eligibility".into(),
                description: "d".into(),
                expression: "has({}.jitAccessConstraint)".into(),
            }),
        });
        assert!(!pb.is_temporary());
    }
}
