//! Host-facing validation hooks.
//!
//! A hook is installed in a database under `_design/<name>` and invoked by the
//! host for every write. The host passes raw JSON; a rejection goes back as
//! `{"unauthorized": "<message>"}`, which the host turns into a 401.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use couchguard_core::DocumentWrite;

use crate::{AuthzError, SecurityObject, UserContext, authorize};

/// Rejection payload returned to the host.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{unauthorized}")]
pub struct Rejection {
    pub unauthorized: String,
}

impl Rejection {
    pub fn message(&self) -> &str {
        &self.unauthorized
    }

    /// Status the host answers the client with.
    pub fn http_status(&self) -> u16 {
        401
    }
}

impl From<AuthzError> for Rejection {
    fn from(value: AuthzError) -> Self {
        Self {
            unauthorized: value.message().to_string(),
        }
    }
}

/// A `validate_doc_update` hook.
pub trait ValidateDocUpdate: Send + Sync {
    /// Design document name the hook is installed under.
    fn name(&self) -> &str;

    fn validate(
        &self,
        write: &DocumentWrite<'_>,
        user: &UserContext,
        security: &SecurityObject,
    ) -> Result<(), AuthzError>;

    fn design_doc_id(&self) -> String {
        format!("_design/{}", self.name())
    }

    /// Run the hook on the raw values the host passes in.
    ///
    /// `null` documents are absent. The user context and security object are
    /// read leniently, so malformed optional fields never cause a failure.
    fn validate_json(
        &self,
        new_doc: &Value,
        old_doc: &Value,
        user_ctx: &Value,
        sec_obj: &Value,
    ) -> Result<(), Rejection> {
        let write = DocumentWrite::from_json(new_doc, old_doc);
        let user = UserContext::from_json(user_ctx);
        let security = SecurityObject::from_json(sec_obj);

        self.validate(&write, &user, &security).map_err(Rejection::from)
    }
}

/// Anyone may upload new documents; only database administrators may change
/// or delete existing ones.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UploadOnly;

impl UploadOnly {
    pub const NAME: &'static str = "upload_only";
}

impl ValidateDocUpdate for UploadOnly {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn validate(
        &self,
        write: &DocumentWrite<'_>,
        user: &UserContext,
        security: &SecurityObject,
    ) -> Result<(), AuthzError> {
        let result = authorize(write, user, security);

        match &result {
            Ok(()) => tracing::debug!(
                hook = Self::NAME,
                kind = %write.kind(),
                doc_id = write.doc_id().unwrap_or("<none>"),
                "write permitted"
            ),
            Err(e) => tracing::warn!(
                hook = Self::NAME,
                kind = %write.kind(),
                doc_id = write.doc_id().unwrap_or("<none>"),
                user = user.name().unwrap_or("<anonymous>"),
                "write rejected: {e}"
            ),
        }

        result
    }
}

/// Run the [`UploadOnly`] hook against raw host input.
pub fn validate_doc_update_json(
    new_doc: &Value,
    old_doc: &Value,
    user_ctx: &Value,
    sec_obj: &Value,
) -> Result<(), Rejection> {
    UploadOnly.validate_json(new_doc, old_doc, user_ctx, sec_obj)
}
