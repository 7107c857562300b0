use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account that owns assistants and conversations
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_active: bool,
    pub is_verified: bool,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `GET /users/default`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DefaultUserResponse {
    pub id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_is_not_serialized() {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            username: "local_user".to_string(),
            email: "local@example.com".to_string(),
            password_hash: "secret-hash".to_string(),
            first_name: None,
            last_name: None,
            is_active: true,
            is_verified: true,
            last_login_at: None,
            created_at: now,
            updated_at: now,
        };
        let value = serde_json::to_value(&user).unwrap();
        assert!(value.get("password_hash").is_none());
        assert_eq!(value["username"], "local_user");
    }

    #[test]
    fn test_default_user_response_serialization() {
        let id = Uuid::new_v4();
        let value = serde_json::to_value(DefaultUserResponse { id }).unwrap();
        assert_eq!(value["id"], id.to_string());
    }
}
