use jit_condition::ACTIVATED_CONDITION_TITLE;
use jit_kernel::ProjectId;
use jit_provisioner::{
    Binding, Condition, InMemoryPolicyClient, ProvisionOptions, ProvisioningEngine,
    VersionedPolicy,
};
use std::str::FromStr;
use std::sync::Arc;

fn project() -> ProjectId {
    ProjectId::new("demo").unwrap()
}

fn alice() -> jit_kernel::UserEmail {
    jit_kernel::UserEmail::from_str("alice@example.org").unwrap()
}

fn window_condition() -> Condition {
    Condition {
        title: ACTIVATED_CONDITION_TITLE.to_string(),
        description: "Self-approved, justification: BUG-1".to_string(),
        expression: r#"request.time >= timestamp("2026-01-01T00:00:00Z") && request.time < timestamp("2026-01-01T01:00:00Z")"#.to_string(),
    }
}

#[tokio::test]
async fn appends_binding_to_empty_policy() {
    let client = Arc::new(InMemoryPolicyClient::new());
    let engine = ProvisioningEngine::new(client.clone());
    let project = project();

    let binding = Binding {
        principal: alice(),
        role: "roles/compute.viewer".to_string(),
        condition: Some(window_condition()),
    };

    engine
        .add_project_binding(&project, binding, ProvisionOptions::none(), "BUG-1")
        .await
        .unwrap();

    let policy = client.current_policy(&project).unwrap();
    assert_eq!(policy.bindings.len(), 1);
}

#[tokio::test]
async fn fail_if_binding_exists_rejects_duplicate() {
    let client = Arc::new(InMemoryPolicyClient::new());
    let project = project();
    let binding = Binding {
        principal: alice(),
        role: "roles/compute.viewer".to_string(),
        condition: Some(window_condition()),
    };

    client.seed(
        &project,
        VersionedPolicy::new(
            0,
            vec![jit_provisioner::PolicyBinding::singleton(binding.clone())],
        ),
    );

    let engine = ProvisioningEngine::new(client);
    let err = engine
        .add_project_binding(
            &project,
            binding,
            ProvisionOptions::fail_if_binding_exists(),
            "BUG-1",
        )
        .await
        .unwrap_err();

    assert!(matches!(err, jit_provisioner::ProvisionerError::AlreadyExists(_)));
}

#[tokio::test]
async fn purge_removes_superseded_temporary_bindings_for_same_principal_and_role() {
    let client = Arc::new(InMemoryPolicyClient::new());
    let project = project();
    let stale = Binding {
        principal: alice(),
        role: "roles/compute.viewer".to_string(),
        condition: Some(window_condition()),
    };
    client.seed(
        &project,
        VersionedPolicy::new(
            0,
            vec![jit_provisioner::PolicyBinding::singleton(stale)],
        ),
    );

    let engine = ProvisioningEngine::new(client.clone());
    let fresh = Binding {
        principal: alice(),
        role: "roles/compute.viewer".to_string(),
        condition: Some(window_condition()),
    };
    engine
        .add_project_binding(
            &project,
            fresh,
            ProvisionOptions::purge_existing_temporary_bindings(),
            "BUG-2",
        )
        .await
        .unwrap();

    let policy = client.current_policy(&project).unwrap();
    assert_eq!(policy.bindings.len(), 1, "stale temporary binding must be purged, not accreted");
}

#[tokio::test(start_paused = true)]
async fn retries_on_conflict_then_succeeds() {
    let client = Arc::new(InMemoryPolicyClient::new());
    let project = project();
    client.inject_conflicts(&project, 2);

    let engine = ProvisioningEngine::new(client.clone());
    let binding = Binding {
        principal: alice(),
        role: "roles/compute.viewer".to_string(),
        condition: Some(window_condition()),
    };

    engine
        .add_project_binding(&project, binding, ProvisionOptions::none(), "BUG-3")
        .await
        .unwrap();

    let policy = client.current_policy(&project).unwrap();
    assert_eq!(policy.bindings.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn exhausting_retry_budget_fails_with_already_exists() {
    let client = Arc::new(InMemoryPolicyClient::new());
    let project = project();
    client.inject_conflicts(&project, 10);

    let engine = ProvisioningEngine::new(client);
    let binding = Binding {
        principal: alice(),
        role: "roles/compute.viewer".to_string(),
        condition: Some(window_condition()),
    };

    let err = engine
        .add_project_binding(&project, binding, ProvisionOptions::none(), "BUG-4")
        .await
        .unwrap_err();

    assert!(matches!(err, jit_provisioner::ProvisionerError::AlreadyExists(_)));
}
