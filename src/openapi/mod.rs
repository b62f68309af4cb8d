//! OpenAPI documentation for the JIT access API.

use utoipa::OpenApi;

/// Aggregates all API endpoints, schemas, and metadata into a complete
/// OpenAPI 3.0 specification.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "JIT Access API",
        version = "1.0.0",
        description = "Just-in-time privileged cloud access management: request, approve, and time-box short-lived project role bindings instead of granting standing access.\n\n## Features\n- **Self-approval activation**: grant yourself a role immediately when the privilege allows it\n- **Multi-party approval**: request a role, have a peer approve it via a signed link\n- **Privilege catalog**: discover which roles you are eligible to activate per project\n\n## Architecture\n- Vertical-slice bounded-context crates (kernel, condition, provisioner, catalog, notify, tokens, activator)\n- Stateless activation state machine: self-approval is one-shot, MPA state travels in a signed token\n- The cloud IAM policy of each managed project is the only persistent state",
        contact(name = "JIT Access Team")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server"),
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "metadata", description = "Deployment metadata for client UIs"),
        (name = "catalog", description = "Project and privilege discovery"),
        (name = "activation", description = "Self-approval and multi-party activation requests"),
    ),
    paths(
        crate::handlers::health::alive,
        crate::handlers::health::ready,
        crate::handlers::metadata::metadata,
        crate::handlers::projects::list_projects,
        crate::handlers::projects::list_roles,
        crate::handlers::projects::list_peers,
        crate::handlers::activation::self_activate,
        crate::handlers::activation::request_activation,
        crate::handlers::activation::decode_activation_request,
        crate::handlers::activation::approve_activation_request,
    ),
    components(
        schemas(
            crate::handlers::health::HealthResponse,
            crate::handlers::metadata::MetadataResponse,
            crate::handlers::projects::ProjectsResponse,
            crate::handlers::projects::PrivilegeDto,
            crate::handlers::projects::PrivilegesResponse,
            crate::handlers::projects::PeersResponse,
            crate::handlers::activation::SelfActivateRequest,
            crate::handlers::activation::ActivationResponse,
            crate::handlers::activation::RequestActivationRequest,
            crate::handlers::activation::IssuedRequestResponse,
            crate::handlers::activation::DecodedRequestResponse,
            crate::handlers::activation::ApproveRequest,
        )
    )
)]
pub struct ApiDoc;

/// Helper to create the OpenAPI documentation.
pub fn create_api_doc() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_generation_succeeds() {
        let openapi = create_api_doc();
        assert_eq!(openapi.info.title, "JIT Access API");
        assert!(openapi.tags.as_ref().unwrap().iter().any(|t| t.name == "activation"));
    }

    #[test]
    fn openapi_serializes_to_json() {
        let openapi = create_api_doc();
        let json = serde_json::to_string(&openapi).expect("serializable");
        assert!(json.contains("JIT Access API"));
        assert!(json.contains("paths"));
    }
}
