//! Reference `ProjectSearch`: resolves `AVAILABLE_PROJECTS_QUERY` to the
//! single configured `RESOURCE_SCOPE` project rather than a real
//! resource-manager query (spec §4.4). Sufficient for a single-project
//! deployment; a multi-project deployment wires a real resource-manager
//! search client implementing the same port.

use async_trait::async_trait;
use jit_catalog::ports::ProjectSearch;
use jit_catalog::CatalogError;
use jit_kernel::ProjectId;

pub struct StaticProjectSearch {
    project: ProjectId,
}

impl StaticProjectSearch {
    pub fn new(project: ProjectId) -> Self {
        Self { project }
    }
}

#[async_trait]
impl ProjectSearch for StaticProjectSearch {
    async fn search(&self, _query: &str) -> Result<Vec<ProjectId>, CatalogError> {
        Ok(vec![self.project.clone()])
    }
}
