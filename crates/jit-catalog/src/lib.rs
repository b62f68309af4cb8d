//! Eligibility catalog: discovers and classifies role bindings across the
//! resource hierarchy (spec C4/C5).

pub mod catalog;
pub mod domain;
pub mod error;
pub mod limits;
pub mod ports;
pub mod repository;

pub use catalog::{Catalog, ScopeDiscovery};
pub use domain::{
    dedup_and_sort_privileges, Activation, PrivilegeSet, PrivilegeStatus, RequesterPrivilege,
    ReviewerPrivilege, UserContext,
};
pub use error::CatalogError;
pub use limits::CatalogLimits;
pub use ports::{
    AnalyzedBinding, ConditionVerdict, EffectiveBinding, EffectivePolicyClient, GroupDirectory,
    PolicyAnalyzerClient, ProjectSearch,
};
pub use repository::{EffectivePolicyRepository, PolicyAnalyzerRepository, RoleRepository};
