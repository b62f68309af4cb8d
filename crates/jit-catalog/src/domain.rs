//! Catalog read-side value types (spec §3, §4.3, §4.4).

use jit_condition::ActivationType;
use jit_kernel::{ProjectRole, TimeSpan, UserEmail};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum PrivilegeStatus {
    Inactive,
    Active,
    Expired,
}

/// A privilege the requesting user may activate (or has activated).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequesterPrivilege {
    pub id: ProjectRole,
    pub name: String,
    pub activation_type: ActivationType,
    pub status: PrivilegeStatus,
    /// `&&`-joined resource sub-expression preserved verbatim from the
    /// eligibility condition (spec §4.1), carried forward onto the
    /// provisioned temporary binding on activation (spec §4.5).
    pub resource_condition: Option<String>,
}

/// A privilege that lets its holder review others' requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewerPrivilege {
    pub id: ProjectRole,
    pub reviewable_types: HashSet<ActivationType>,
}

/// A currently or formerly active grant, carrying the window it was
/// provisioned with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Activation {
    pub time_span: TimeSpan,
}

/// The result of `findPrivileges`/`listPrivileges`.
#[derive(Debug, Clone, Default)]
pub struct PrivilegeSet {
    pub available: Vec<RequesterPrivilege>,
    pub active: HashMap<ProjectRole, Activation>,
    pub expired: HashMap<ProjectRole, Activation>,
    pub warnings: Vec<String>,
}

impl PrivilegeSet {
    pub fn new() -> Self {
        Self::default()
    }
}

/// The authenticated caller, threaded through catalog and activator calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserContext {
    pub user: UserEmail,
}

impl UserContext {
    pub fn new(user: UserEmail) -> Self {
        Self { user }
    }
}

/// Preference order used to dedup privileges sharing an `id` (spec §3 tie-break:
/// self-approval wins over peer-approval; any later-seen duplicate otherwise
/// keeps the first one encountered).
fn tie_break_rank(activation_type: &ActivationType) -> u8 {
    match activation_type {
        ActivationType::SelfApproval => 0,
        ActivationType::PeerApproval(_) => 1,
        ActivationType::ExternalApproval(_) => 2,
        ActivationType::NoActivation => 3,
    }
}

/// Collapse a raw list of discovered privileges to the "each id appears at
/// most once, self-approval wins ties" invariant (spec §3, §8), and sort by
/// `id`.
pub fn dedup_and_sort_privileges(mut items: Vec<RequesterPrivilege>) -> Vec<RequesterPrivilege> {
    let mut by_id: HashMap<ProjectRole, RequesterPrivilege> = HashMap::new();
    for item in items.drain(..) {
        match by_id.get(&item.id) {
            None => {
                by_id.insert(item.id.clone(), item);
            }
            Some(existing) => {
                if tie_break_rank(&item.activation_type) < tie_break_rank(&existing.activation_type)
                {
                    by_id.insert(item.id.clone(), item);
                }
            }
        }
    }
    let mut out: Vec<RequesterPrivilege> = by_id.into_values().collect();
    out.sort_by(|a, b| a.id.cmp(&b.id));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use jit_kernel::ProjectId;

    fn role(id: &str) -> ProjectRole {
        ProjectRole::new(ProjectId::new("p1").unwrap(), id)
    }

    #[test]
    fn self_approval_wins_over_peer_approval_tie() {
        let items = vec![
            RequesterPrivilege {
                id: role("roles/viewer"),
                name: "viewer".into(),
                activation_type: ActivationType::PeerApproval(None),
                status: PrivilegeStatus::Inactive,
                resource_condition: None,
            },
            RequesterPrivilege {
                id: role("roles/viewer"),
                name: "viewer".into(),
                activation_type: ActivationType::SelfApproval,
                status: PrivilegeStatus::Inactive,
                resource_condition: None,
            },
        ];
        let deduped = dedup_and_sort_privileges(items);
        assert_eq!(deduped.len(), 1);
        assert_eq!(deduped[0].activation_type, ActivationType::SelfApproval);
    }

    #[test]
    fn distinct_ids_both_kept_and_sorted() {
        let items = vec![
            RequesterPrivilege {
                id: role("roles/viewer"),
                name: "viewer".into(),
                activation_type: ActivationType::SelfApproval,
                status: PrivilegeStatus::Inactive,
                resource_condition: None,
            },
            RequesterPrivilege {
                id: role("roles/admin"),
                name: "admin".into(),
                activation_type: ActivationType::SelfApproval,
                status: PrivilegeStatus::Inactive,
                resource_condition: None,
            },
        ];
        let deduped = dedup_and_sort_privileges(items);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].id, role("roles/admin"));
    }
}
