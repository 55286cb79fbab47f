use hmac::{Hmac, Mac};
use rand::Rng;
use sha1::Sha1;
use time::OffsetDateTime;
use tracing::warn;

type HmacSha1 = Hmac<Sha1>;

fn keyed(salt: &str) -> HmacSha1 {
    // InvalidLength is only returned by fixed-key MACs. Hmac pads or hashes
    // any key to the block size, so this cannot fail, not even for "".
    HmacSha1::new_from_slice(salt.as_bytes()).expect("hmac accepts any key length")
}

/// Hex-encoded HMAC-SHA1 of `plain` keyed with `salt`.
pub fn encrypt_password(plain: &str, salt: &str) -> String {
    let mut mac = keyed(salt);
    mac.update(plain.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Recomputes the keyed hash and compares it against `expected_hex` in constant time.
///
/// Only the lowercase hex that [`encrypt_password`] produces can match.
pub fn verify_password(plain: &str, salt: &str, expected_hex: &str) -> bool {
    if expected_hex.bytes().any(|b| b.is_ascii_uppercase()) {
        warn!("stored password hash is not lowercase hex");
        return false;
    }
    let expected = match hex::decode(expected_hex) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(error = %e, "stored password hash is not valid hex");
            return false;
        }
    };
    let mut mac = keyed(salt);
    mac.update(plain.as_bytes());
    mac.verify_slice(&expected).is_ok()
}

/// Numeric salt: current time in milliseconds scaled by a random fraction.
///
/// Not a cryptographic salt; two calls only differ with high probability.
pub fn make_salt() -> String {
    let now_ms = (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as f64;
    let fraction: f64 = rand::thread_rng().gen();
    ((now_ms * fraction).round() as u64).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encrypt_matches_known_hmac_sha1_vector() {
        let digest = encrypt_password("The quick brown fox jumps over the lazy dog", "key");
        assert_eq!(digest, "de7c9b85b8b78aa6bc8a7a36f70a90701c9db4d9");
    }

    #[test]
    fn encrypt_is_deterministic() {
        let a = encrypt_password("hunter2", "1234567");
        let b = encrypt_password("hunter2", "1234567");
        assert_eq!(a, b);
        assert_ne!(a, encrypt_password("hunter2", "7654321"));
    }

    #[test]
    fn encrypt_with_empty_salt_still_hashes() {
        let digest = encrypt_password("", "");
        assert_eq!(digest, "fbdb1d1b18aa6c08324b7d64b71fb76370690e1d");
    }

    #[test]
    fn verify_accepts_matching_and_rejects_wrong_password() {
        let hash = encrypt_password("correct-horse-battery-staple", "42");
        assert!(verify_password("correct-horse-battery-staple", "42", &hash));
        assert!(!verify_password("wrong-password", "42", &hash));
        assert!(!verify_password("correct-horse-battery-staple", "43", &hash));
    }

    #[test]
    fn verify_rejects_uppercase_hash() {
        let hash = encrypt_password("hunter2", "42");
        assert!(verify_password("hunter2", "42", &hash));
        assert!(!verify_password("hunter2", "42", &hash.to_uppercase()));
    }

    #[test]
    fn verify_rejects_malformed_hash() {
        assert!(!verify_password("anything", "42", "not-a-valid-hash"));
        assert!(!verify_password("anything", "42", ""));
    }

    #[test]
    fn salt_is_a_decimal_string() {
        let salt = make_salt();
        assert!(!salt.is_empty());
        assert!(salt.chars().all(|c| c.is_ascii_digit()), "salt = {salt}");
    }

    #[test]
    fn salts_usually_differ() {
        // Collisions are possible, so only require one distinct pair out of several draws.
        let salts: Vec<String> = (0..8).map(|_| make_salt()).collect();
        assert!(salts.windows(2).any(|w| w[0] != w[1]));
    }
}
