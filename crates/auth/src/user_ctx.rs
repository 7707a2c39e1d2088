use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Role;
use crate::security::string_list;

/// The authenticated actor of a write, as reported by the host.
///
/// `name` is `None` for anonymous requests. Roles keep the order the host
/// supplied them in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserContext {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub roles: Vec<Role>,
}

impl UserContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn named(name: impl Into<String>, roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            name: Some(name.into()),
            roles: roles.into_iter().collect(),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn has_admin_marker(&self) -> bool {
        self.roles.iter().any(Role::is_admin_marker)
    }

    /// Read a user context from an untyped value.
    ///
    /// A non-string `name` reads as anonymous; a missing or non-array `roles`
    /// reads as no roles.
    pub fn from_json(value: &Value) -> Self {
        Self {
            name: value.get("name").and_then(Value::as_str).map(str::to_owned),
            roles: value
                .get("roles")
                .and_then(Value::as_array)
                .map(|items| string_list(items).into_iter().map(Role::from).collect())
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_host_shape() {
        let user: UserContext =
            serde_json::from_value(json!({"db": "solarthing", "name": "bob", "roles": ["uploader"]}))
                .unwrap();
        assert_eq!(user.name(), Some("bob"));
        assert_eq!(user.roles(), [Role::new("uploader")]);
    }

    #[test]
    fn null_name_is_anonymous() {
        let user: UserContext = serde_json::from_value(json!({"name": null, "roles": []})).unwrap();
        assert_eq!(user, UserContext::anonymous());
    }

    #[test]
    fn lenient_reader_keeps_role_order_and_drops_junk() {
        let user = UserContext::from_json(&json!({"name": 42, "roles": ["b", 1, "a", "_admin"]}));
        assert_eq!(user.name(), None);
        assert_eq!(user.roles(), [Role::new("b"), Role::new("a"), Role::ADMIN]);
        assert!(user.has_admin_marker());

        assert!(UserContext::from_json(&json!({"name": "x"})).roles().is_empty());
        assert_eq!(UserContext::from_json(&Value::Null), UserContext::anonymous());
    }
}
