//! Opaque snapshot keys.
//!
//! Keys are 8 lowercase base36 characters, short enough for a share URL.
//! 36^8 ≈ 2.8e12 keys; the residual collision probability is handled by
//! the stores, which check a fresh key against existing entries and retry.

use uuid::Uuid;

pub const KEY_LEN: usize = 8;

const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Draws a fresh key from a v4 UUID's 128 random bits.
pub fn generate_key() -> String {
    let mut bits = Uuid::new_v4().as_u128();
    let mut out = String::with_capacity(KEY_LEN);
    for _ in 0..KEY_LEN {
        out.push(ALPHABET[(bits % 36) as usize] as char);
        bits /= 36;
    }
    out
}

/// Keys are used as storage addresses (file names, URL parameters), so
/// anything outside the generated alphabet is rejected up front.
pub fn is_well_formed(key: &str) -> bool {
    key.len() == KEY_LEN && key.bytes().all(|b| ALPHABET.contains(&b))
}

#[cfg(test)]
mod tests {
    use super::{KEY_LEN, generate_key, is_well_formed};

    #[test]
    fn generated_keys_are_well_formed() {
        for _ in 0..64 {
            let key = generate_key();
            assert_eq!(key.len(), KEY_LEN);
            assert!(is_well_formed(&key), "bad key: {key}");
        }
    }

    #[test]
    fn consecutive_keys_differ() {
        let a = generate_key();
        let b = generate_key();
        assert_ne!(a, b);
    }

    #[test]
    fn malformed_keys_are_rejected() {
        assert!(!is_well_formed(""));
        assert!(!is_well_formed("ABCD1234"));
        assert!(!is_well_formed("../../x"));
        assert!(!is_well_formed("abcd123"));
        assert!(is_well_formed("abcd1234"));
    }
}
