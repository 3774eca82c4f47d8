//! Authentication service - registration, login and token verification.
//!
//! Password hashing lives in the domain `Password` value object; token
//! signing lives in [`TokenSigner`].

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use utoipa::ToSchema;

use super::token::{Claims, TokenSigner};
use crate::domain::{NewUser, Password, User, UserResponse};
use crate::errors::{AppError, AppResult};
use crate::infra::{RoleRepository, UserRepository};

/// Fields supplied at registration
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub address: String,
    pub phone_number: String,
    pub post_code: String,
    pub role_id: i64,
}

/// Returned after successful authentication
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    /// JWT access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub token: String,
    /// Token lifetime in seconds
    #[schema(example = 86400)]
    pub expires_in: i64,
    pub user: UserResponse,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new user
    async fn register(&self, registration: Registration) -> AppResult<User>;

    /// Check credentials and issue a token
    async fn login(&self, email: String, password: String) -> AppResult<LoginResponse>;

    /// Verify a bearer token and extract its claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

/// Concrete implementation of AuthService
pub struct Authenticator {
    users: Arc<dyn UserRepository>,
    roles: Arc<dyn RoleRepository>,
    signer: TokenSigner,
}

impl Authenticator {
    pub fn new(
        users: Arc<dyn UserRepository>,
        roles: Arc<dyn RoleRepository>,
        signer: TokenSigner,
    ) -> Self {
        Self {
            users,
            roles,
            signer,
        }
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn register(&self, registration: Registration) -> AppResult<User> {
        if self.roles.find_by_id(registration.role_id).await?.is_none() {
            return Err(AppError::validation(format!(
                "Role {} does not exist",
                registration.role_id
            )));
        }

        if self
            .users
            .find_by_email(&registration.email)
            .await?
            .is_some()
        {
            return Err(AppError::DuplicateEmail);
        }

        let password_hash = Password::new(&registration.password)?.into_string();

        // A concurrent registration can still lose the race at the unique index
        let user = self
            .users
            .create(NewUser {
                name: registration.name,
                email: registration.email,
                password_hash,
                address: registration.address,
                phone_number: registration.phone_number,
                post_code: registration.post_code,
                role_id: registration.role_id,
            })
            .await?;

        tracing::info!(user_id = user.id, role_id = user.role_id, "User registered");
        Ok(user)
    }

    async fn login(&self, email: String, password: String) -> AppResult<LoginResponse> {
        let user = self.users.find_by_email(&email).await?;

        // Verify even for unknown emails so both failures take the same time
        let stored = match &user {
            Some(user) => Password::from_hash(user.password_hash.clone()),
            None => Password::dummy(),
        };
        let password_valid = stored.verify(&password);

        let user = match user {
            Some(user) if password_valid => user,
            _ => {
                tracing::debug!("Login rejected");
                return Err(AppError::InvalidCredentials);
            }
        };

        let token = self.signer.issue(user.id, user.role_id)?;
        tracing::info!(user_id = user.id, "User logged in");

        Ok(LoginResponse {
            token,
            expires_in: self.signer.expires_in(),
            user: UserResponse::from(user),
        })
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        self.signer.verify(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use mockall::predicate::eq;

    use crate::domain::Role;
    use crate::infra::{MockRoleRepository, MockUserRepository};

    const SECRET: &[u8] = b"test-secret-key-for-testing-only-32chars";

    fn user_with_password(id: i64, email: &str, password: &str) -> User {
        User {
            id,
            name: "Test User".to_string(),
            email: email.to_string(),
            password_hash: Password::new(password).unwrap().into_string(),
            address: "1 Main Street".to_string(),
            phone_number: "0800123".to_string(),
            post_code: "12345".to_string(),
            role_id: 2,
            is_email_verified: false,
            created_by: None,
            created_date: Utc::now(),
            modified_by: None,
            modified_date: None,
        }
    }

    fn registration(email: &str) -> Registration {
        Registration {
            name: "Test User".to_string(),
            email: email.to_string(),
            password: "SecurePass123".to_string(),
            address: "1 Main Street".to_string(),
            phone_number: "0800123".to_string(),
            post_code: "12345".to_string(),
            role_id: 2,
        }
    }

    fn roles_with_existing(id: i64) -> MockRoleRepository {
        let mut roles = MockRoleRepository::new();
        roles.expect_find_by_id().returning(move |requested| {
            Ok((requested == id).then(|| Role {
                id,
                label: "Financial".to_string(),
            }))
        });
        roles
    }

    fn service(users: MockUserRepository, roles: MockRoleRepository) -> Authenticator {
        Authenticator::new(
            Arc::new(users),
            Arc::new(roles),
            TokenSigner::new(SECRET, Duration::hours(24)),
        )
    }

    #[tokio::test]
    async fn test_register_hashes_password() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().returning(|_| Ok(None));
        users.expect_create().returning(|new_user| {
            assert_ne!(new_user.password_hash, "SecurePass123");
            assert!(Password::from_hash(new_user.password_hash.clone()).verify("SecurePass123"));

            let mut user = user_with_password(1, &new_user.email, "placeholder1");
            user.password_hash = new_user.password_hash;
            Ok(user)
        });

        let user = service(users, roles_with_existing(2))
            .register(registration("new@example.com"))
            .await
            .unwrap();

        assert_eq!(user.email, "new@example.com");
        assert!(!user.is_email_verified);
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .with(eq("taken@example.com"))
            .returning(|email| Ok(Some(user_with_password(1, email, "Password123"))));
        users.expect_create().never();

        let result = service(users, roles_with_existing(2))
            .register(registration("taken@example.com"))
            .await;

        assert!(matches!(result, Err(AppError::DuplicateEmail)));
    }

    #[tokio::test]
    async fn test_register_unknown_role() {
        let mut users = MockUserRepository::new();
        users.expect_create().never();

        let mut request = registration("new@example.com");
        request.role_id = 99;

        let result = service(users, roles_with_existing(2)).register(request).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_login_success_issues_verifiable_token() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .returning(|email| Ok(Some(user_with_password(5, email, "Password123"))));

        let auth = service(users, MockRoleRepository::new());
        let response = auth
            .login("user@example.com".to_string(), "Password123".to_string())
            .await
            .unwrap();

        assert_eq!(response.user.id, 5);
        assert_eq!(response.expires_in, 86_400);

        let claims = auth.verify_token(&response.token).unwrap();
        assert_eq!(claims.user_id, 5);
        assert_eq!(claims.role_id, 2);
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .returning(|email| {
                if email == "known@example.com" {
                    Ok(Some(user_with_password(5, email, "Password123")))
                } else {
                    Ok(None)
                }
            });

        let auth = service(users, MockRoleRepository::new());

        let wrong_password = auth
            .login("known@example.com".to_string(), "WrongPassword".to_string())
            .await
            .unwrap_err();
        let unknown_email = auth
            .login("ghost@example.com".to_string(), "Password123".to_string())
            .await
            .unwrap_err();

        assert!(matches!(wrong_password, AppError::InvalidCredentials));
        assert!(matches!(unknown_email, AppError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
        assert_eq!(wrong_password.code(), unknown_email.code());
    }
}
