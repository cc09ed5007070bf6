//! Clear Text Password
//!
//! Passwords only pass through the gateway on their way to the auth
//! backend. While they do, they live in a type that:
//! - is wiped from memory when dropped
//! - cannot be cloned
//! - never shows up in `Debug` output

use std::fmt;

use serde::{Deserialize, Deserializer};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Clear text password, zeroized on drop
///
/// ## Examples
/// ```rust
/// use platform::password::ClearTextPassword;
///
/// let password = ClearTextPassword::from("hunter2");
/// assert_eq!(password.expose(), "hunter2");
/// assert!(!format!("{:?}", password).contains("hunter2"));
/// ```
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    pub fn new(raw: String) -> Self {
        Self(raw)
    }

    /// The password itself, for the request body sent to the backend
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl From<String> for ClearTextPassword {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl From<&str> for ClearTextPassword {
    fn from(raw: &str) -> Self {
        Self::new(raw.to_string())
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

impl<'de> Deserialize<'de> for ClearTextPassword {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(Self::new)
    }
}
