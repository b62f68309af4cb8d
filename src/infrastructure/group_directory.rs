//! Reference `GroupDirectory`: no group directory is wired up, so every
//! lookup returns no memberships. `EffectivePolicyRepository` treats this
//! the same way it treats a denied lookup upstream — as an empty set with
//! a warning surfaced on `listPrivileges`, never a hard failure (spec
//! §4.3.2) — but since this adapter never errors, callers only ever see the
//! plain empty-set case (group-held privileges are simply invisible until
//! a real directory is wired in).

use async_trait::async_trait;
use jit_catalog::ports::GroupDirectory;
use jit_catalog::CatalogError;
use jit_kernel::UserEmail;

#[derive(Debug, Default)]
pub struct NoGroupsDirectory;

#[async_trait]
impl GroupDirectory for NoGroupsDirectory {
    async fn direct_memberships(&self, _user: &UserEmail) -> Result<Vec<String>, CatalogError> {
        Ok(Vec::new())
    }
}
