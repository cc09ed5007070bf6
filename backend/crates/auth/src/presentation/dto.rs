//! API DTOs (Data Transfer Objects)

use platform::password::ClearTextPassword;
use serde::{Deserialize, Serialize};

use crate::domain::value_object::credentials::{LoginCredentials, SignupProfile};

// ============================================================================
// Login
// ============================================================================

/// Login form body
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: ClearTextPassword,
}

impl LoginForm {
    pub fn into_credentials(self) -> LoginCredentials {
        LoginCredentials::new(self.email, self.password)
    }
}

// ============================================================================
// Signup
// ============================================================================

/// Signup form body
#[derive(Debug, Deserialize)]
pub struct SignupForm {
    pub email: String,
    pub password: ClearTextPassword,
    pub display_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<String>,
}

impl SignupForm {
    /// Blank optional fields are treated as not given
    pub fn into_profile(self) -> SignupProfile {
        SignupProfile::new(self.email, self.password, self.display_name)
            .with_last_name(non_blank(self.last_name))
            .with_date_of_birth(non_blank(self.date_of_birth))
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// ============================================================================
// Views
// ============================================================================

/// What a form page shows
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FormView {
    /// `login` or `signup`
    pub form: &'static str,
    pub message: Option<String>,
    pub not_logged: bool,
}

impl FormView {
    pub fn login(message: Option<&str>) -> Self {
        Self {
            form: "login",
            message: message.map(str::to_string),
            not_logged: true,
        }
    }

    pub fn signup(message: Option<&str>) -> Self {
        Self {
            form: "signup",
            message: message.map(str::to_string),
            not_logged: true,
        }
    }
}

/// Admin view of the session store
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveSessionsResponse {
    pub active_sessions: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_optional_fields_are_dropped() {
        let form = SignupForm {
            email: "ann@example.com".into(),
            password: "pw".into(),
            display_name: "Ann".into(),
            last_name: Some("  ".into()),
            date_of_birth: Some("1990-01-01".into()),
        };
        let profile = form.into_profile();
        assert_eq!(profile.last_name, None);
        assert_eq!(profile.date_of_birth.as_deref(), Some("1990-01-01"));
    }

    #[test]
    fn test_form_debug_hides_password() {
        let form = LoginForm {
            email: "ann@example.com".into(),
            password: "hunter2".into(),
        };
        let debug = format!("{:?}", form);
        assert!(debug.contains("ann@example.com"));
        assert!(!debug.contains("hunter2"));
        assert_eq!(form.into_credentials().password(), "hunter2");
    }

    #[test]
    fn test_form_view_uses_not_logged_key() {
        let json = serde_json::to_value(FormView::login(Some("nope"))).unwrap();
        assert_eq!(json["form"], "login");
        assert_eq!(json["message"], "nope");
        assert_eq!(json["notLogged"], true);
    }
}
