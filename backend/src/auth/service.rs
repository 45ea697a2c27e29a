//! Core business logic for the authentication system.
//!
//! This service handles account creation, password hashing, and token issuance
//! and validation. It orchestrates interactions between handlers and the
//! users collection.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use super::errors::AuthError;
use super::models::{AuthResponse, Claims, SigninRequest, SignupRequest, UserProfile};
use adapters::StoreError;

use crate::database::models::{Role, User};
use crate::database::Document;
use crate::database::Database;
use crate::errors::AppResult;
use crate::utils::{keyed_id, slugify};

pub struct AuthService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_ttl: Duration,
}

impl AuthService {
    pub fn new(secret: &str, ttl_hours: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            token_ttl: Duration::try_hours(ttl_hours).unwrap_or(Duration::hours(24)),
        }
    }

    pub fn issue_token(&self, user: &User) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id,
            role: user.role,
            iat: now.timestamp(),
            exp: now
                .checked_add_signed(self.token_ttl)
                .ok_or_else(|| AuthError::Signing("token expiry out of range".into()))?
                .timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }

    pub fn verify_token(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|_| AuthError::InvalidToken)
    }

    /// Registers a new account with the given role.
    pub async fn signup(&self, db: &Database, request: SignupRequest, role: Role) -> AppResult<User> {
        request.validate()?;
        let email = request.email.trim().to_lowercase();

        if db.users.find_one(json!({ "email": email })).await?.is_some() {
            return Err(AuthError::UserExists.into());
        }

        // One id per address: concurrent signups for the same email collide on insert.
        let id = keyed_id(User::COLLECTION, &email);
        let password = request.password;
        let hash = run_blocking(move || hash_password(&password)).await??;
        let now = Utc::now();
        let user = User {
            id,
            username: format!(
                "{}-{}",
                slugify(&request.first_name),
                &id.simple().to_string()[..6]
            ),
            first_name: request.first_name.trim().to_string(),
            last_name: request.last_name.trim().to_string(),
            email,
            hash_password: hash,
            role,
            contact_number: request.contact_number,
            profile_picture: None,
            created_at: now,
            updated_at: now,
        };
        match db.users.insert(&user).await {
            Ok(()) => {}
            Err(StoreError::Duplicate { .. }) => return Err(AuthError::UserExists.into()),
            Err(e) => return Err(e.into()),
        }
        info!("Registered {:?} account {}", role, user.id);
        Ok(user)
    }

    /// Checks credentials and issues a token. With `required` set, accounts of
    /// any other role are refused.
    pub async fn signin(
        &self,
        db: &Database,
        request: SigninRequest,
        required: Option<Role>,
    ) -> AppResult<AuthResponse> {
        request.validate()?;
        let email = request.email.trim().to_lowercase();

        let user = db
            .users
            .find_one(json!({ "email": email }))
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let password = request.password;
        let hash = user.hash_password.clone();
        if !run_blocking(move || verify_password(&password, &hash)).await? {
            warn!("Failed signin for {}", user.id);
            return Err(AuthError::InvalidCredentials.into());
        }
        if required.is_some_and(|role| role != user.role) {
            return Err(AuthError::AdminOnly.into());
        }

        Ok(AuthResponse {
            success: true,
            token: self.issue_token(&user)?,
            user: UserProfile::from(&user),
        })
    }
}

/// Hashes a password with Argon2 and a random salt. CPU bound; async callers go
/// through `run_blocking`.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::encode_b64(Uuid::new_v4().as_bytes())
        .map_err(|e| AuthError::Hashing(e.to_string()))?;
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Hashing(e.to_string()))
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    PasswordHash::new(hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

/// Moves Argon2 work off the async workers.
async fn run_blocking<T, F>(work: F) -> Result<T, AuthError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| AuthError::Hashing(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use adapters::MemoryStore;
    use std::sync::Arc;

    fn service() -> AuthService {
        AuthService::new("test-secret", 24)
    }

    fn signup_request(email: &str) -> SignupRequest {
        SignupRequest {
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            email: email.into(),
            password: "secret1".into(),
            contact_number: None,
        }
    }

    #[test]
    fn test_password_hash_verifies() {
        let hash = hash_password("secret1").unwrap();
        assert_ne!(hash, "secret1");
        assert!(verify_password("secret1", &hash));
        assert!(!verify_password("secret2", &hash));
        assert!(!verify_password("secret1", "not-a-hash"));
    }

    #[tokio::test]
    async fn test_token_round_trip_and_foreign_secret() {
        let auth = service();
        let db = Database::new(Arc::new(MemoryStore::new()));
        let user = auth
            .signup(&db, signup_request("jane@shop.io"), Role::Admin)
            .await
            .unwrap();

        let token = auth.issue_token(&user).unwrap();
        let claims = auth.verify_token(&token).unwrap();
        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.role, Role::Admin);

        let other = AuthService::new("other-secret", 24);
        assert!(matches!(other.verify_token(&token), Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn test_expired_token_is_rejected() {
        let auth = AuthService::new("test-secret", -2);
        let db = Database::new(Arc::new(MemoryStore::new()));
        let user = auth
            .signup(&db, signup_request("old@shop.io"), Role::User)
            .await
            .unwrap();

        let token = auth.issue_token(&user).unwrap();
        assert!(auth.verify_token(&token).is_err());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected() {
        let auth = service();
        let db = Database::new(Arc::new(MemoryStore::new()));
        auth.signup(&db, signup_request("jane@shop.io"), Role::User)
            .await
            .unwrap();

        let err = auth
            .signup(&db, signup_request("JANE@shop.io"), Role::User)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "User already registered");
    }

    #[tokio::test]
    async fn test_admin_signin_refuses_plain_users() {
        let auth = service();
        let db = Database::new(Arc::new(MemoryStore::new()));
        auth.signup(&db, signup_request("jane@shop.io"), Role::User)
            .await
            .unwrap();

        let signin = || SigninRequest {
            email: "jane@shop.io".into(),
            password: "secret1".into(),
        };
        assert!(auth.signin(&db, signin(), None).await.is_ok());

        let err = auth.signin(&db, signin(), Some(Role::Admin)).await.unwrap_err();
        assert_eq!(err.to_string(), "Admin access denied");
    }

    #[tokio::test]
    async fn test_wrong_password_is_rejected() {
        let auth = service();
        let db = Database::new(Arc::new(MemoryStore::new()));
        auth.signup(&db, signup_request("jane@shop.io"), Role::User)
            .await
            .unwrap();

        let err = auth
            .signin(
                &db,
                SigninRequest {
                    email: "jane@shop.io".into(),
                    password: "wrong-one".into(),
                },
                None,
            )
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid credentials");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_concurrent_signups_create_one_account() {
        let auth = Arc::new(service());
        let db = Database::new(Arc::new(MemoryStore::new()));

        let attempts: Vec<_> = (0..8)
            .map(|_| {
                let (auth, db) = (auth.clone(), db.clone());
                tokio::spawn(async move {
                    auth.signup(&db, signup_request("race@shop.io"), Role::User)
                        .await
                })
            })
            .collect();

        let mut created = 0;
        for attempt in attempts {
            match attempt.await.unwrap() {
                Ok(_) => created += 1,
                Err(err) => assert_eq!(err.to_string(), "User already registered"),
            }
        }
        assert_eq!(created, 1);
        assert_eq!(
            db.users.find(json!({ "email": "race@shop.io" })).await.unwrap().len(),
            1
        );
    }

    #[tokio::test]
    async fn test_out_of_range_ttl_does_not_panic() {
        let auth = AuthService::new("test-secret", i64::MAX);
        let db = Database::new(Arc::new(MemoryStore::new()));
        let user = auth
            .signup(&db, signup_request("far@shop.io"), Role::User)
            .await
            .unwrap();

        let claims = auth.verify_token(&auth.issue_token(&user).unwrap()).unwrap();
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
    }
}
