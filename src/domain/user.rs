//! User and role domain entities and related types.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// User domain entity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub address: String,
    pub phone_number: String,
    pub post_code: String,
    pub role_id: i64,
    pub is_email_verified: bool,
    pub created_by: Option<i64>,
    pub created_date: DateTime<Utc>,
    pub modified_by: Option<i64>,
    pub modified_date: Option<DateTime<Utc>>,
}

/// Data needed to persist a freshly registered user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub address: String,
    pub phone_number: String,
    pub post_code: String,
    pub role_id: i64,
}

/// User response (safe to return to client)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Jane Doe")]
    pub name: String,
    #[schema(example = "jane@example.com")]
    pub email: String,
    pub address: String,
    #[schema(example = "081234567890")]
    pub phone_number: String,
    #[schema(example = "12345")]
    pub post_code: String,
    #[schema(example = 1)]
    pub role_id: i64,
    pub is_email_verified: bool,
    pub created_by: Option<i64>,
    pub created_date: DateTime<Utc>,
    pub modified_by: Option<i64>,
    pub modified_date: Option<DateTime<Utc>>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            address: user.address,
            phone_number: user.phone_number,
            post_code: user.post_code,
            role_id: user.role_id,
            is_email_verified: user.is_email_verified,
            created_by: user.created_by,
            created_date: user.created_date,
            modified_by: user.modified_by,
            modified_date: user.modified_date,
        }
    }
}

/// Role lookup entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Role {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Project Manager")]
    pub label: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: 3,
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            address: "Main Street 1".to_string(),
            phone_number: "0812345".to_string(),
            post_code: "12345".to_string(),
            role_id: 2,
            is_email_verified: false,
            created_by: None,
            created_date: Utc::now(),
            modified_by: None,
            modified_date: None,
        }
    }

    #[test]
    fn test_password_hash_never_serialized() {
        let user = sample_user();

        let entity_json = serde_json::to_string(&user).unwrap();
        assert!(!entity_json.contains("password"));
        assert!(!entity_json.contains("argon2"));

        let response_json = serde_json::to_string(&UserResponse::from(user)).unwrap();
        assert!(!response_json.contains("argon2"));
    }

    #[test]
    fn test_response_keeps_profile_fields() {
        let response = UserResponse::from(sample_user());
        assert_eq!(response.id, 3);
        assert_eq!(response.role_id, 2);
        assert_eq!(response.post_code, "12345");
        assert!(!response.is_email_verified);
    }
}
