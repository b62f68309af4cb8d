//! `addProjectBinding` options (spec §4.2): a set drawn from
//! `{ PURGE_EXISTING_TEMPORARY_BINDINGS, FAIL_IF_BINDING_EXISTS }`.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProvisionOptions {
    pub purge_existing_temporary_bindings: bool,
    pub fail_if_binding_exists: bool,
}

impl ProvisionOptions {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn purge_existing_temporary_bindings() -> Self {
        Self {
            purge_existing_temporary_bindings: true,
            ..Self::default()
        }
    }

    pub fn fail_if_binding_exists() -> Self {
        Self {
            fail_if_binding_exists: true,
            ..Self::default()
        }
    }

    pub fn with_purge(mut self) -> Self {
        self.purge_existing_temporary_bindings = true;
        self
    }

    pub fn with_fail_if_exists(mut self) -> Self {
        self.fail_if_binding_exists = true;
        self
    }
}
