//! Credentials forwarded to the auth backend
//!
//! The gateway never hashes or stores passwords; it only carries them to
//! the backend inside a [`ClearTextPassword`], which is wiped on drop and
//! redacted in `Debug` output.

use platform::password::ClearTextPassword;

/// Login form contents
#[derive(Debug)]
pub struct LoginCredentials {
    pub email: String,
    password: ClearTextPassword,
}

impl LoginCredentials {
    pub fn new(email: impl Into<String>, password: impl Into<ClearTextPassword>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn password(&self) -> &str {
        self.password.expose()
    }
}

/// Signup form contents
#[derive(Debug)]
pub struct SignupProfile {
    pub email: String,
    password: ClearTextPassword,
    pub display_name: String,
    pub last_name: Option<String>,
    pub date_of_birth: Option<String>,
}

impl SignupProfile {
    pub fn new(
        email: impl Into<String>,
        password: impl Into<ClearTextPassword>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            display_name: display_name.into(),
            last_name: None,
            date_of_birth: None,
        }
    }

    pub fn with_last_name(mut self, last_name: Option<String>) -> Self {
        self.last_name = last_name;
        self
    }

    pub fn with_date_of_birth(mut self, date_of_birth: Option<String>) -> Self {
        self.date_of_birth = date_of_birth;
        self
    }

    pub fn password(&self) -> &str {
        self.password.expose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_password() {
        let creds = LoginCredentials::new("ann@example.com", "hunter2");
        let debug = format!("{:?}", creds);
        assert!(debug.contains("ann@example.com"));
        assert!(!debug.contains("hunter2"));

        let profile = SignupProfile::new("ann@example.com", "hunter2", "Ann");
        assert!(!format!("{:?}", profile).contains("hunter2"));
    }
}
