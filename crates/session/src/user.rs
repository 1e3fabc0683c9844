//! Authenticated user identity.

use serde::{Deserialize, Serialize};

/// Role assigned to an account by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular shopper.
    #[default]
    Customer,
    /// Back-office administrator.
    Admin,
}

/// The authenticated shopper, as returned by the auth backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Backend-assigned user ID.
    pub id: String,

    /// Account email.
    pub email: String,

    /// Display name.
    pub name: String,

    /// Optional phone number.
    #[serde(default)]
    pub phone: Option<String>,

    /// Accumulated loyalty points.
    #[serde(default, rename = "loyaltyPoints")]
    pub loyalty_points: u64,

    /// Account role.
    #[serde(default)]
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_deserializes_backend_shape() {
        let json = r#"{
            "id": "u1",
            "email": "awa@example.sn",
            "name": "Awa Diop",
            "phone": "771234567",
            "loyaltyPoints": 120,
            "role": "customer"
        }"#;

        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.name, "Awa Diop");
        assert_eq!(user.loyalty_points, 120);
        assert_eq!(user.role, Role::Customer);
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let json = r#"{"id": "u2", "email": "m@example.sn", "name": "Moussa"}"#;
        let user: User = serde_json::from_str(json).unwrap();

        assert_eq!(user.phone, None);
        assert_eq!(user.loyalty_points, 0);
        assert_eq!(user.role, Role::Customer);
    }
}
