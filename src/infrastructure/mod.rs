//! In-memory reference collaborators for the catalog's cloud-API ports
//! (spec §6: "Persisted state... None. The sole persistent state is the
//! cloud IAM policy"). A production deployment replaces these with real
//! policy-analyzer/effective-policy/group-directory clients; this module
//! gives the composition root something runnable out of the box, backed by
//! the same in-memory policy store the provisioner writes to — the
//! catalog reads eligibility and activation markers from exactly the
//! policy the provisioner maintains, as the real cloud IAM API would.

pub mod effective_policy;
pub mod group_directory;
pub mod project_search;

pub use effective_policy::SharedPolicyEffectiveClient;
pub use group_directory::NoGroupsDirectory;
pub use project_search::StaticProjectSearch;
