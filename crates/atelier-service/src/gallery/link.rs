//! Share hash generation for client galleries.

use rand::Rng;

/// Generates the opaque share hashes that act as gallery access keys.
#[derive(Debug, Clone)]
pub struct LinkService;

impl LinkService {
    /// Creates a new link service.
    pub fn new() -> Self {
        Self
    }

    /// Generates a cryptographically secure random share hash.
    ///
    /// 16 random bytes, hex-encoded — unguessable, and short enough to
    /// keep gallery URLs manageable.
    pub fn generate_share_hash(&self) -> String {
        let mut rng = rand::thread_rng();
        let bytes: Vec<u8> = (0..16).map(|_| rng.gen()).collect();
        hex::encode(bytes)
    }
}

impl Default for LinkService {
    fn default() -> Self {
        Self::new()
    }
}

/// Simple hex encoding without external dependency.
mod hex {
    /// Encode bytes to hex string.
    pub fn encode(bytes: Vec<u8>) -> String {
        bytes.iter().map(|b| format!("{:02x}", b)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_hashes_are_32_hex_chars() {
        let hash = LinkService::new().generate_share_hash();
        assert_eq!(hash.len(), 32);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_share_hashes_do_not_repeat() {
        let link = LinkService::new();
        assert_ne!(link.generate_share_hash(), link.generate_share_hash());
    }
}
