//! Opaque session token generation.

use rand::Rng;

/// Number of random bytes in a session token.
const TOKEN_BYTES: usize = 32;

/// Generate a cryptographically random hex token for the session cookie.
///
/// The cookie's presence is the whole authentication state; nothing else
/// is encoded in the token.
pub fn generate_token() -> String {
    let mut rng = rand::thread_rng();
    let mut out = String::with_capacity(TOKEN_BYTES * 2);
    for _ in 0..TOKEN_BYTES {
        let byte: u8 = rng.gen();
        out.push_str(&format!("{byte:02x}"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_are_unique_and_hex() {
        let a = generate_token();
        let b = generate_token();
        assert_ne!(a, b);
        assert_eq!(a.len(), TOKEN_BYTES * 2);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
