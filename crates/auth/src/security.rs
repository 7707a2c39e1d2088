//! Per-database security object.
//!
//! The host owns this configuration and passes it in on every write. Every
//! level is optional; absent lists read as empty through the accessors, and
//! nothing here ever fills defaults back into the value.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Role;

/// A `{names, roles}` pair as found under `admins` and `members`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityGroup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub names: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<Role>>,
}

impl SecurityGroup {
    pub fn new(names: Vec<String>, roles: Vec<Role>) -> Self {
        Self {
            names: Some(names),
            roles: Some(roles),
        }
    }

    pub fn names(&self) -> &[String] {
        self.names.as_deref().unwrap_or_default()
    }

    pub fn roles(&self) -> &[Role] {
        self.roles.as_deref().unwrap_or_default()
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.names().iter().any(|n| n == name)
    }

    pub fn contains_role(&self, role: &Role) -> bool {
        self.roles().contains(role)
    }

    /// Read a group from an untyped value, skipping anything malformed.
    pub fn from_json(value: &Value) -> Self {
        Self {
            names: value.get("names").and_then(Value::as_array).map(|items| string_list(items)),
            roles: value
                .get("roles")
                .and_then(Value::as_array)
                .map(|items| string_list(items).into_iter().map(Role::from).collect()),
        }
    }
}

/// The security object of a database.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityObject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admins: Option<SecurityGroup>,

    /// Read access list. Carried for completeness; write checks ignore it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub members: Option<SecurityGroup>,
}

impl SecurityObject {
    pub fn with_admins(admins: SecurityGroup) -> Self {
        Self {
            admins: Some(admins),
            members: None,
        }
    }

    pub fn admin_names(&self) -> &[String] {
        self.admins.as_ref().map(SecurityGroup::names).unwrap_or_default()
    }

    pub fn admin_roles(&self) -> &[Role] {
        self.admins.as_ref().map(SecurityGroup::roles).unwrap_or_default()
    }

    pub fn is_admin_name(&self, name: &str) -> bool {
        self.admins.as_ref().is_some_and(|a| a.contains_name(name))
    }

    pub fn is_admin_role(&self, role: &Role) -> bool {
        self.admins.as_ref().is_some_and(|a| a.contains_role(role))
    }

    /// Read a security object from an untyped value.
    ///
    /// Never fails: a non-object input, a non-object group, a non-array list
    /// or a non-string entry is treated as absent.
    pub fn from_json(value: &Value) -> Self {
        let group = |key: &str| {
            value
                .get(key)
                .filter(|v| v.is_object())
                .map(SecurityGroup::from_json)
        };

        Self {
            admins: group("admins"),
            members: group("members"),
        }
    }
}

pub(crate) fn string_list(items: &[Value]) -> Vec<String> {
    items
        .iter()
        .filter_map(Value::as_str)
        .map(str::to_owned)
        .collect()
}
