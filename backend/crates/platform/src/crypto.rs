//! Cryptographic Utilities
//!
//! Signed tokens are `<base64url(payload)>.<base64url(HMAC-SHA256(secret, encoded payload))>`.
//!
//! Encoding the payload keeps tokens within the cookie-value alphabet
//! whatever bytes the payload holds.

use base64::{Engine, engine::general_purpose};
use hmac::{Hmac, Mac};
use rand::{RngCore, rngs::OsRng};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Error when loading a signing secret
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SecretError {
    #[error("Secret is not valid base64")]
    InvalidEncoding,
    #[error("Secret must be 32 bytes, got {0}")]
    InvalidLength(usize),
}

/// Generate a random 32-byte signing secret
pub fn random_secret() -> [u8; 32] {
    let mut secret = [0u8; 32];
    OsRng.fill_bytes(&mut secret);
    secret
}

/// Decode a standard base64 secret into exactly 32 bytes
pub fn secret_from_base64(encoded: &str) -> Result<[u8; 32], SecretError> {
    let bytes = general_purpose::STANDARD
        .decode(encoded.trim())
        .map_err(|_| SecretError::InvalidEncoding)?;
    <[u8; 32]>::try_from(bytes.as_slice()).map_err(|_| SecretError::InvalidLength(bytes.len()))
}

fn mac_for(secret: &[u8; 32], payload: &str) -> HmacSha256 {
    // HMAC accepts keys of any length, a 32-byte key cannot fail
    let mut mac = <HmacSha256 as Mac>::new_from_slice(secret)
        .unwrap_or_else(|_| unreachable!("HMAC key length is fixed"));
    mac.update(payload.as_bytes());
    mac
}

/// Sign a payload
pub fn sign_token(secret: &[u8; 32], payload: &str) -> String {
    let encoded = general_purpose::URL_SAFE_NO_PAD.encode(payload);
    let signature = mac_for(secret, &encoded).finalize().into_bytes();
    format!(
        "{}.{}",
        encoded,
        general_purpose::URL_SAFE_NO_PAD.encode(signature)
    )
}

/// Verify a signed token and return its payload
///
/// Comparison is constant-time. The payload is only decoded once the
/// signature checks out.
pub fn verify_token(secret: &[u8; 32], token: &str) -> Option<String> {
    let (encoded, signature_b64) = token.split_once('.')?;
    let signature = general_purpose::URL_SAFE_NO_PAD
        .decode(signature_b64)
        .ok()?;
    mac_for(secret, encoded).verify_slice(&signature).ok()?;
    let payload = general_purpose::URL_SAFE_NO_PAD.decode(encoded).ok()?;
    String::from_utf8(payload).ok()
}
