//! Typed resource identifiers (spec §3, component C1).
//!
//! # Design
//!
//! - **Validation in construction**: constructors reject malformed input.
//! - **Immutability**: once built, these values never change.
//! - **Round-trip**: every identifier's `Display` output reparses via
//!   `FromStr` to an equal value (spec §8 round-trip law).

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised when constructing or parsing a domain identifier.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("value cannot be empty")]
    EmptyValue,

    #[error("invalid format: {0}")]
    InvalidFormat(String),

    #[error("value too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

// ============================================================================
// ProjectId
// ============================================================================

/// Opaque identifier of a project in the managed resource hierarchy.
///
/// Formats losslessly to the canonical resource path
/// `projects/<id>` and back.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(String);

impl ProjectId {
    pub const MAX_LENGTH: usize = 255;

    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ValidationError::EmptyValue);
        }
        if id.len() > Self::MAX_LENGTH {
            return Err(ValidationError::TooLong {
                max: Self::MAX_LENGTH,
                actual: id.len(),
            });
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Canonical resource-manager path, e.g. `projects/my-project`.
    pub fn to_resource_path(&self) -> String {
        format!("projects/{}", self.0)
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_resource_path())
    }
}

impl FromStr for ProjectId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s
            .strip_prefix("projects/")
            .ok_or_else(|| ValidationError::InvalidFormat(s.to_string()))?;
        Self::new(id)
    }
}

impl PartialOrd for ProjectId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ProjectId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

// ============================================================================
// UserEmail
// ============================================================================

/// A user's email address, normalized to lowercase for equality and hashing.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserEmail(String);

impl UserEmail {
    pub fn new(email: impl Into<String>) -> Result<Self, ValidationError> {
        let email = email.into();
        if email.is_empty() {
            return Err(ValidationError::EmptyValue);
        }
        if !email.contains('@') {
            return Err(ValidationError::InvalidFormat(email));
        }
        Ok(Self(email.to_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserEmail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserEmail {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl PartialEq for UserEmail {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl std::hash::Hash for UserEmail {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl PartialOrd for UserEmail {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for UserEmail {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

// ============================================================================
// RoleBinding / ProjectRole
// ============================================================================

/// The pair identifying *what access on which resource*: a full resource
/// name (e.g. `//cloudresourcemanager.googleapis.com/projects/my-project`)
/// and an IAM role id (e.g. `roles/compute.viewer`).
///
/// Total order by `(full_resource_name, role)` (spec §3).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoleBinding {
    pub full_resource_name: String,
    pub role: String,
}

impl RoleBinding {
    pub fn new(full_resource_name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            full_resource_name: full_resource_name.into(),
            role: role.into(),
        }
    }
}

impl fmt::Display for RoleBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.full_resource_name, self.role)
    }
}

/// A `RoleBinding` narrowed to a project; used as the catalog key and as a
/// hash-map key (`PrivilegeSet::active`/`expired`).
///
/// Identifier form: `projects/<id>:<role>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectRole {
    pub project_id: ProjectId,
    pub role: String,
}

impl ProjectRole {
    pub fn new(project_id: ProjectId, role: impl Into<String>) -> Self {
        Self {
            project_id,
            role: role.into(),
        }
    }

    pub fn to_role_binding(&self) -> RoleBinding {
        RoleBinding::new(self.project_id.to_resource_path(), self.role.clone())
    }
}

impl fmt::Display for ProjectRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.project_id, self.role)
    }
}

impl FromStr for ProjectRole {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (project_part, role) = s
            .split_once(':')
            .ok_or_else(|| ValidationError::InvalidFormat(s.to_string()))?;
        let project_id = ProjectId::from_str(project_part)
            .map_err(|_| ValidationError::InvalidFormat(s.to_string()))?;
        if role.is_empty() {
            return Err(ValidationError::InvalidFormat(s.to_string()));
        }
        Ok(Self::new(project_id, role))
    }
}

impl PartialOrd for ProjectRole {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ProjectRole {
    fn cmp(&self, other: &Self) -> Ordering {
        (&self.project_id, &self.role).cmp(&(&other.project_id, &other.role))
    }
}

// ============================================================================
// ActivationId
// ============================================================================

/// Which activation flow minted an `ActivationId`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivationIdKind {
    /// Self-approval, prefix `jit-`.
    SelfApproval,
    /// Multi-party approval, prefix `mpa-`.
    MultiParty,
}

impl ActivationIdKind {
    fn prefix(self) -> &'static str {
        match self {
            ActivationIdKind::SelfApproval => "jit",
            ActivationIdKind::MultiParty => "mpa",
        }
    }
}

/// Opaque, globally unique identifier for one activation request.
///
/// Prefixed `jit-` for self-approval, `mpa-` for multi-party approval
/// (spec §3).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivationId(String);

impl ActivationId {
    /// Mint a new id of the given kind using a random UUIDv4 suffix.
    pub fn new(kind: ActivationIdKind) -> Self {
        Self(format!("{}-{}", kind.prefix(), uuid::Uuid::new_v4()))
    }

    pub fn kind(&self) -> Option<ActivationIdKind> {
        if self.0.starts_with("jit-") {
            Some(ActivationIdKind::SelfApproval)
        } else if self.0.starts_with("mpa-") {
            Some(ActivationIdKind::MultiParty)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActivationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ActivationId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !(s.starts_with("jit-") || s.starts_with("mpa-")) {
            return Err(ValidationError::InvalidFormat(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }
}
