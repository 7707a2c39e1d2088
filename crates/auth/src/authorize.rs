use serde::Serialize;
use thiserror::Error;

use couchguard_core::{DocumentWrite, WriteKind};

use crate::{Role, SecurityObject, UserContext};

/// Message carried by every rejected write.
pub const UNAUTHORIZED_MESSAGE: &str = "You are not authorized to change this document!";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    /// An existing document was written by someone who is not an administrator.
    #[error("{}", UNAUTHORIZED_MESSAGE)]
    Unauthorized,
}

impl AuthzError {
    pub fn message(&self) -> &'static str {
        match self {
            AuthzError::Unauthorized => UNAUTHORIZED_MESSAGE,
        }
    }
}

/// Outcome of a write check, as a value instead of an error path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Allow,
    Reject(AuthzError),
}

impl Verdict {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Verdict::Allow)
    }

    pub fn into_result(self) -> Result<(), AuthzError> {
        self.into()
    }
}

impl From<Result<(), AuthzError>> for Verdict {
    fn from(value: Result<(), AuthzError>) -> Self {
        match value {
            Ok(()) => Verdict::Allow,
            Err(e) => Verdict::Reject(e),
        }
    }
}

impl From<Verdict> for Result<(), AuthzError> {
    fn from(value: Verdict) -> Self {
        match value {
            Verdict::Allow => Ok(()),
            Verdict::Reject(e) => Err(e),
        }
    }
}

/// Which rule made a user an administrator of the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "source", content = "role", rename_all = "snake_case")]
pub enum AdminGrant {
    /// The user carries the built-in `_admin` role.
    AdminMarker,
    /// The user's name is listed in `admins.names`.
    AdminName,
    /// One of the user's roles is listed in `admins.roles`.
    AdminRole(Role),
}

impl core::fmt::Display for AdminGrant {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            AdminGrant::AdminMarker => write!(f, "role '{}'", Role::ADMIN),
            AdminGrant::AdminName => f.write_str("name listed in admins.names"),
            AdminGrant::AdminRole(role) => write!(f, "role '{role}' listed in admins.roles"),
        }
    }
}

/// Find the first rule that makes `user` an administrator, if any.
///
/// Rules are checked in order: admin marker, listed name, listed role. A
/// missing name never matches.
pub fn admin_grant(user: &UserContext, security: &SecurityObject) -> Option<AdminGrant> {
    if user.has_admin_marker() {
        return Some(AdminGrant::AdminMarker);
    }

    if user.name().is_some_and(|name| security.is_admin_name(name)) {
        return Some(AdminGrant::AdminName);
    }

    user.roles()
        .iter()
        .find(|role| security.is_admin_role(role))
        .cloned()
        .map(AdminGrant::AdminRole)
}

/// Authorize a write: creations always pass, changes to an existing document
/// need an administrator.
///
/// - No IO
/// - No panics
/// - Never mutates `security`
pub fn authorize(
    write: &DocumentWrite<'_>,
    user: &UserContext,
    security: &SecurityObject,
) -> Result<(), AuthzError> {
    if write.is_creation() {
        return Ok(());
    }

    match admin_grant(user, security) {
        Some(_) => Ok(()),
        None => Err(AuthzError::Unauthorized),
    }
}

/// [`authorize`], returning a [`Verdict`].
pub fn decide(write: &DocumentWrite<'_>, user: &UserContext, security: &SecurityObject) -> Verdict {
    authorize(write, user, security).into()
}

// ─────────────────────────────────────────────────────────────────────────────
// Authorization Explanation (Audit Trail)
// ─────────────────────────────────────────────────────────────────────────────

/// Detailed explanation of a write decision.
#[derive(Debug, Clone, Serialize)]
pub struct AuthorizationExplanation {
    pub write_kind: WriteKind,

    pub doc_id: Option<String>,

    /// Whether the write was permitted.
    pub granted: bool,

    /// Human-readable reason for the decision.
    pub reason: String,

    /// Rule that made the user an administrator (updates only).
    pub grant: Option<AdminGrant>,

    pub user: UserState,

    /// If denied, this explains what was missing.
    pub denial_reason: Option<DenialReason>,
}

/// The acting user, as seen by the check.
#[derive(Debug, Clone, Serialize)]
pub struct UserState {
    pub name: Option<String>,
    pub roles: Vec<String>,
    pub has_admin_marker: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct DenialReason {
    pub message: String,
    pub suggestions: Vec<String>,
}

/// Explain why a write was (or would be) allowed or rejected.
///
/// `granted` always agrees with [`authorize`] for the same inputs.
pub fn explain_authorization(
    write: &DocumentWrite<'_>,
    user: &UserContext,
    security: &SecurityObject,
) -> AuthorizationExplanation {
    let write_kind = write.kind();
    let user_state = UserState {
        name: user.name.clone(),
        roles: user.roles().iter().map(|r| r.as_str().to_string()).collect(),
        has_admin_marker: user.has_admin_marker(),
    };
    let doc_id = write.doc_id().map(str::to_string);

    if write.is_creation() {
        return AuthorizationExplanation {
            write_kind,
            doc_id,
            granted: true,
            reason: "No stored revision exists; creating documents is always permitted".to_string(),
            grant: None,
            user: user_state,
            denial_reason: None,
        };
    }

    match admin_grant(user, security) {
        Some(grant) => AuthorizationExplanation {
            write_kind,
            doc_id,
            granted: true,
            reason: format!("User is a database administrator ({grant})"),
            grant: Some(grant),
            user: user_state,
            denial_reason: None,
        },
        None => {
            let who = user.name().unwrap_or("anonymous user");
            let mut suggestions = vec![
                format!("Add '{who}' to admins.names in the database security object"),
                "Grant the user a role listed in admins.roles".to_string(),
            ];
            if user.name().is_none() {
                suggestions.insert(0, "Authenticate before modifying existing documents".to_string());
            }

            AuthorizationExplanation {
                write_kind,
                doc_id,
                granted: false,
                reason: format!(
                    "Only administrators may {write_kind} existing documents. Roles: {:?}, admin roles: {:?}",
                    user_state.roles,
                    security.admin_roles().iter().map(Role::as_str).collect::<Vec<_>>()
                ),
                grant: None,
                user: user_state,
                denial_reason: Some(DenialReason {
                    message: UNAUTHORIZED_MESSAGE.to_string(),
                    suggestions,
                }),
            }
        }
    }
}
