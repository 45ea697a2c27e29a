//! Data structures for authentication-related entities.
//!
//! This module defines the signup and signin payloads, the JWT claims and the
//! public view of a user account returned by the API.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::database::models::{Role, User};
use crate::errors::AppError;
use crate::utils::is_email;

pub const MIN_PASSWORD_LENGTH: usize = 6;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "_id")]
    pub sub: Uuid,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    pub contact_number: Option<String>,
}

impl SignupRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.first_name.trim().is_empty() {
            return Err(AppError::Validation("firstName is required".into()));
        }
        if self.last_name.trim().is_empty() {
            return Err(AppError::Validation("lastName is required".into()));
        }
        if !is_email(self.email.trim()) {
            return Err(AppError::Validation("Valid Email is required".into()));
        }
        if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AppError::Validation(format!(
                "Password must be at least {MIN_PASSWORD_LENGTH} character long"
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct SigninRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl SigninRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.email.trim().is_empty() {
            return Err(AppError::Validation("Email is required".into()));
        }
        if self.password.is_empty() {
            return Err(AppError::Validation("Password is required".into()));
        }
        Ok(())
    }
}

/// A user account as the API shows it, without credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub username: String,
    pub email: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            full_name: user.full_name(),
            username: user.username.clone(),
            email: user.email.clone(),
            role: user.role,
            contact_number: user.contact_number.clone(),
            profile_picture: user.profile_picture.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub success: bool,
    pub token: String,
    pub user: UserProfile,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup(first: &str, last: &str, email: &str, password: &str) -> SignupRequest {
        SignupRequest {
            first_name: first.into(),
            last_name: last.into(),
            email: email.into(),
            password: password.into(),
            contact_number: None,
        }
    }

    #[test]
    fn test_signup_validation_reports_first_problem() {
        assert!(signup("Jane", "Doe", "jane@shop.io", "secret1").validate().is_ok());

        let err = signup("", "", "bad", "x").validate().unwrap_err();
        assert_eq!(err.to_string(), "firstName is required");

        let err = signup("Jane", "Doe", "jane@shop.io", "12345").validate().unwrap_err();
        assert_eq!(err.to_string(), "Password must be at least 6 character long");
    }

    #[test]
    fn test_signin_validation() {
        let ok = SigninRequest {
            email: "jane@shop.io".into(),
            password: "pw".into(),
        };
        assert!(ok.validate().is_ok());

        let missing = SigninRequest {
            email: "jane@shop.io".into(),
            password: String::new(),
        };
        assert_eq!(missing.validate().unwrap_err().to_string(), "Password is required");

        // Accounts are looked up by whatever address they were stored under.
        let loose = SigninRequest {
            email: "legacy-account".into(),
            password: "pw".into(),
        };
        assert!(loose.validate().is_ok());

        let blank = SigninRequest {
            email: "  ".into(),
            password: "pw".into(),
        };
        assert_eq!(blank.validate().unwrap_err().to_string(), "Email is required");
    }
}
