use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use jit_catalog::{
    Catalog, CatalogError, CatalogLimits, EffectiveBinding, EffectivePolicyClient,
    EffectivePolicyRepository, GroupDirectory, ScopeDiscovery, UserContext,
};
use jit_condition::ActivationType;
use jit_kernel::{Clock, ProjectId, ProjectRole, UserEmail};
use std::collections::HashSet;
use std::str::FromStr;
use std::sync::Arc;

struct FixedClock(DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

struct FakeEffectivePolicyClient {
    bindings: Vec<EffectiveBinding>,
}

#[async_trait]
impl EffectivePolicyClient for FakeEffectivePolicyClient {
    async fn effective_bindings(
        &self,
        _project: &ProjectId,
    ) -> Result<Vec<EffectiveBinding>, CatalogError> {
        Ok(self.bindings.clone())
    }
}

struct FakeGroupDirectory;

#[async_trait]
impl GroupDirectory for FakeGroupDirectory {
    async fn direct_memberships(&self, _user: &UserEmail) -> Result<Vec<String>, CatalogError> {
        Ok(Vec::new())
    }
}

fn email(s: &str) -> UserEmail {
    UserEmail::from_str(s).unwrap()
}

fn project() -> ProjectId {
    ProjectId::new("p1").unwrap()
}

fn build_catalog(bindings: Vec<EffectiveBinding>, now: DateTime<Utc>) -> Catalog {
    let repo = Arc::new(EffectivePolicyRepository::new(
        Arc::new(FakeEffectivePolicyClient { bindings }),
        Arc::new(FakeGroupDirectory),
        Arc::new(FixedClock(now)),
    ));
    Catalog::new(repo, ScopeDiscovery::RoleRepository, CatalogLimits::default())
}

#[tokio::test]
async fn lists_eligibility_for_direct_member() {
    let now = Utc::now();
    let catalog = build_catalog(
        vec![EffectiveBinding {
            role: "roles/compute.viewer".to_string(),
            members: vec!["user:alice@example.org".to_string()],
            condition_title: Some("Eligible".to_string()),
            condition_expression: Some("has({}.jitAccessConstraint)".to_string()),
        }],
        now,
    );

    let ctx = UserContext::new(email("alice@example.org"));
    let privileges = catalog.list_privileges(&ctx, &project()).await.unwrap();
    assert_eq!(privileges.available.len(), 1);
    assert_eq!(privileges.available[0].activation_type, ActivationType::SelfApproval);
}

#[tokio::test]
async fn classifies_active_and_expired_windows() {
    let now = Utc::now();
    let active_expr = format!(
        r#"request.time >= timestamp("{}") && request.time < timestamp("{}")"#,
        (now - Duration::minutes(5)).to_rfc3339(),
        (now + Duration::minutes(55)).to_rfc3339(),
    );
    let expired_expr = format!(
        r#"request.time >= timestamp("{}") && request.time < timestamp("{}")"#,
        (now - Duration::hours(3)).to_rfc3339(),
        (now - Duration::hours(2)).to_rfc3339(),
    );

    let catalog = build_catalog(
        vec![
            EffectiveBinding {
                role: "roles/compute.viewer".to_string(),
                members: vec!["user:alice@example.org".to_string()],
                condition_title: Some("JIT access activation".to_string()),
                condition_expression: Some(active_expr),
            },
            EffectiveBinding {
                role: "roles/compute.admin".to_string(),
                members: vec!["user:alice@example.org".to_string()],
                condition_title: Some("JIT access activation".to_string()),
                condition_expression: Some(expired_expr),
            },
        ],
        now,
    );

    let ctx = UserContext::new(email("alice@example.org"));
    let privileges = catalog.list_privileges(&ctx, &project()).await.unwrap();
    assert_eq!(privileges.active.len(), 1);
    assert_eq!(privileges.expired.len(), 1);
}

#[tokio::test]
async fn verify_user_can_request_rejects_duration_below_minimum() {
    let catalog = build_catalog(vec![], Utc::now());
    let ctx = UserContext::new(email("alice@example.org"));
    let role = ProjectRole::new(project(), "roles/compute.viewer");

    let err = catalog
        .verify_user_can_request(
            &ctx,
            &project(),
            &[role],
            &ActivationType::SelfApproval,
            Duration::seconds(299),
            &HashSet::new(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, CatalogError::InvalidArgument(_)));
}

#[tokio::test]
async fn verify_user_can_request_rejects_requester_as_own_reviewer() {
    let catalog = build_catalog(
        vec![EffectiveBinding {
            role: "roles/compute.admin".to_string(),
            members: vec!["user:alice@example.org".to_string()],
            condition_title: Some("Eligible".to_string()),
            condition_expression: Some("has({}.multiPartyApprovalConstraint)".to_string()),
        }],
        Utc::now(),
    );
    let ctx = UserContext::new(email("alice@example.org"));
    let role = ProjectRole::new(project(), "roles/compute.admin");
    let mut reviewers = HashSet::new();
    reviewers.insert(email("alice@example.org"));

    let err = catalog
        .verify_user_can_request(
            &ctx,
            &project(),
            &[role],
            &ActivationType::PeerApproval(None),
            Duration::minutes(30),
            &reviewers,
        )
        .await
        .unwrap_err();

    assert!(matches!(err, CatalogError::InvalidArgument(_)));
}

#[tokio::test]
async fn verify_user_can_approve_self_requires_same_user() {
    let catalog = build_catalog(vec![], Utc::now());
    let project = project();
    let role = ProjectRole::new(project.clone(), "roles/compute.viewer");

    let ok = catalog
        .verify_user_can_approve(
            &email("alice@example.org"),
            &email("alice@example.org"),
            &project,
            &role,
            &ActivationType::SelfApproval,
        )
        .await;
    assert!(ok.is_ok());

    let rejected = catalog
        .verify_user_can_approve(
            &email("bob@example.org"),
            &email("alice@example.org"),
            &project,
            &role,
            &ActivationType::SelfApproval,
        )
        .await;
    assert!(matches!(rejected, Err(CatalogError::AccessDenied(_))));
}

#[tokio::test]
async fn list_reviewers_excludes_requesting_user() {
    let catalog = build_catalog(
        vec![
            EffectiveBinding {
                role: "roles/compute.admin".to_string(),
                members: vec!["user:alice@example.org".to_string()],
                condition_title: Some("Eligible".to_string()),
                condition_expression: Some("has({}.multiPartyApprovalConstraint)".to_string()),
            },
            EffectiveBinding {
                role: "roles/compute.admin".to_string(),
                members: vec!["user:bob@example.org".to_string()],
                condition_title: Some("Eligible".to_string()),
                condition_expression: Some("has({}.multiPartyApprovalConstraint)".to_string()),
            },
        ],
        Utc::now(),
    );
    let ctx = UserContext::new(email("alice@example.org"));
    let role = ProjectRole::new(project(), "roles/compute.admin");

    let reviewers = catalog
        .list_reviewers(&ctx, &project(), &role, &ActivationType::PeerApproval(None))
        .await
        .unwrap();

    assert_eq!(reviewers, vec![email("bob@example.org")]);
}

#[tokio::test]
async fn verify_user_can_approve_rejects_requester_as_own_approver() {
    let catalog = build_catalog(
        vec![
            EffectiveBinding {
                role: "roles/compute.admin".to_string(),
                members: vec!["user:alice@example.org".to_string()],
                condition_title: Some("Eligible".to_string()),
                condition_expression: Some("has({}.multiPartyApprovalConstraint)".to_string()),
            },
            EffectiveBinding {
                role: "roles/compute.admin".to_string(),
                members: vec!["user:bob@example.org".to_string()],
                condition_title: Some("Eligible".to_string()),
                condition_expression: Some("has({}.multiPartyApprovalConstraint)".to_string()),
            },
        ],
        Utc::now(),
    );
    let role = ProjectRole::new(project(), "roles/compute.admin");

    // Alice holds the reviewer-qualifying privilege herself, but she is
    // also the requester: self-approval of an MPA request must be denied
    // even though she is technically among the holders.
    let rejected = catalog
        .verify_user_can_approve(
            &email("alice@example.org"),
            &email("alice@example.org"),
            &project(),
            &role,
            &ActivationType::PeerApproval(None),
        )
        .await;
    assert!(matches!(rejected, Err(CatalogError::AccessDenied(_))));

    let ok = catalog
        .verify_user_can_approve(
            &email("bob@example.org"),
            &email("alice@example.org"),
            &project(),
            &role,
            &ActivationType::PeerApproval(None),
        )
        .await;
    assert!(ok.is_ok());
}
