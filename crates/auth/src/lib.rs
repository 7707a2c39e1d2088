//! `couchguard-auth` — write authorization for document updates.
//!
//! This crate is intentionally decoupled from storage and transport: the host
//! database hands over the write, the acting user and its security object, and
//! gets back a verdict.

pub mod authorize;
pub mod hook;
pub mod roles;
pub mod security;
pub mod user_ctx;

pub use authorize::{
    AdminGrant, AuthorizationExplanation, AuthzError, UNAUTHORIZED_MESSAGE, Verdict, admin_grant,
    authorize, decide, explain_authorization,
};
pub use hook::{Rejection, UploadOnly, ValidateDocUpdate, validate_doc_update_json};
pub use roles::Role;
pub use security::{SecurityGroup, SecurityObject};
pub use user_ctx::UserContext;
