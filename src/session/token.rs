//! Session token generation
//!
//! Tokens use the `ag_` prefix followed by 32 bytes of OS CSPRNG output
//! encoded in URL-safe Base64 (256 bits of entropy, well above the 128-bit
//! floor). A token is an opaque bearer credential: it is never derived from
//! a password, a hash, or any per-user value.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use rand::rngs::OsRng;
use rand::RngCore;

/// Token prefix for authgate session tokens
pub const TOKEN_PREFIX: &str = "ag_";

/// Length of the random part of the token in bytes
const TOKEN_RANDOM_BYTES: usize = 32;

/// Generate a new session token
///
/// The token is shown to the client once and stored server-side as the
/// session key.
pub fn generate_token() -> String {
    let mut random_bytes = [0u8; TOKEN_RANDOM_BYTES];
    OsRng.fill_bytes(&mut random_bytes);

    format!("{}{}", TOKEN_PREFIX, URL_SAFE_NO_PAD.encode(random_bytes))
}

/// Check if a token has the correct format
///
/// Valid tokens start with `ag_` and have a non-empty URL-safe Base64 body.
/// A failed format check lets validation reject garbage without touching
/// the session map.
pub fn is_valid_token_format(token: &str) -> bool {
    let Some(body) = token.strip_prefix(TOKEN_PREFIX) else {
        return false;
    };
    if body.is_empty() {
        return false;
    }

    URL_SAFE_NO_PAD.decode(body).is_ok()
}
