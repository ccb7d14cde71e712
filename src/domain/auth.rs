use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_one_of, Validate};
use serde::{Deserialize, Serialize};

pub const ALLOWED_ROLES: [&str; 3] = ["HR Administrator", "Department Manager", "Employee"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
}

impl Validate for LoginCredentials {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("email", &self.email)?;
        validate_non_empty_string("password", &self.password)
    }
}

impl Validate for SignupRequest {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("email", &self.email)?;
        validate_non_empty_string("password", &self.password)?;
        validate_one_of("role", &self.role, &ALLOWED_ROLES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup(role: &str, password: &str) -> SignupRequest {
        SignupRequest {
            email: "hr@example.com".into(),
            password: password.into(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            role: role.into(),
        }
    }

    #[test]
    fn test_signup_validation() {
        assert!(signup("Employee", "secret").validate().is_ok());
        assert!(signup("Department Manager", "secret").validate().is_ok());
        assert!(signup("Root", "secret").validate().is_err());
        assert!(signup("Employee", "").validate().is_err());
    }

    #[test]
    fn test_auth_response_accepts_user_id_only() {
        let response: AuthResponse =
            serde_json::from_str(r#"{"token":"abc","userId":12}"#).unwrap();
        assert_eq!(response.token, "abc");
        assert_eq!(response.user_id, Some(12));
        assert!(response.user.is_none());
    }
}
