//! Random object key generation.

use uuid::Builder;

/// Number of random bytes behind every key.
const KEY_BYTES: usize = 16;

/// Generates a random UUID v4 key for a stored object.
///
/// Uses `getrandom` for entropy; the version and variant bits are set by
/// [`uuid::Builder::from_random_bytes`], leaving 122 random bits. The result
/// is the lowercase hyphenated form, e.g. `1c6c5e0e-7a3f-4d7b-9a53-3f6b2b0c9e11`.
///
/// # Panics
///
/// Panics if the system random number generator fails (extremely rare).
pub fn generate_key() -> String {
    let mut buffer = [0u8; KEY_BYTES];

    getrandom::fill(&mut buffer).expect("Failed to generate random bytes");

    Builder::from_random_bytes(buffer).into_uuid().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use uuid::Uuid;

    #[test]
    fn test_generate_key_is_uuid_v4() {
        let key = generate_key();
        assert_eq!(key.len(), 36);
        assert_eq!(Uuid::parse_str(&key).unwrap().get_version_num(), 4);
    }

    #[test]
    fn test_generate_key_is_lowercase_hyphenated() {
        let key = generate_key();
        assert!(
            key.chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c) || c == '-')
        );
        assert_eq!(key.matches('-').count(), 4);
    }

    #[test]
    fn test_generate_key_uniqueness() {
        let keys: HashSet<String> = (0..1000).map(|_| generate_key()).collect();
        assert_eq!(keys.len(), 1000);
    }
}
