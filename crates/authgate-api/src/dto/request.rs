//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use authgate_entity::Credentials;

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Email address.
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Login request body; same shape as registration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address.
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl From<RegisterRequest> for Credentials {
    fn from(req: RegisterRequest) -> Self {
        Credentials::new(req.email, req.password)
    }
}

impl From<LoginRequest> for Credentials {
    fn from(req: LoginRequest) -> Self {
        Credentials::new(req.email, req.password)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_fields_fail_validation() {
        let req = RegisterRequest {
            email: String::new(),
            password: "p1".to_string(),
        };
        assert!(req.validate().is_err());

        let req = LoginRequest {
            email: "a@x.com".to_string(),
            password: String::new(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_present_fields_pass_validation() {
        let req = RegisterRequest {
            email: "a@x.com".to_string(),
            password: "p1".to_string(),
        };
        assert!(req.validate().is_ok());
    }
}
