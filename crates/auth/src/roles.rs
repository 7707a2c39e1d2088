use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Role identifier carried in a user context or listed in a security object.
///
/// Roles are opaque strings compared by exact equality (no case folding).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(Cow<'static, str>);

impl Role {
    /// Built-in server administrator marker.
    pub const ADMIN: Role = Role(Cow::Borrowed("_admin"));

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_admin_marker(&self) -> bool {
        *self == Self::ADMIN
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for Role {
    fn from(value: &'static str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_marker_is_exact() {
        assert!(Role::new("_admin").is_admin_marker());
        assert!(Role::new(String::from("_admin")).is_admin_marker());
        assert!(!Role::new("_Admin").is_admin_marker());
        assert!(!Role::new("admin").is_admin_marker());
        assert!(!Role::new(" _admin").is_admin_marker());
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&Role::new("uploader")).unwrap();
        assert_eq!(json, r#""uploader""#);
        let role: Role = serde_json::from_str(r#""_admin""#).unwrap();
        assert_eq!(role, Role::ADMIN);
    }
}
