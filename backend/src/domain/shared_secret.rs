//! Shared admin password guarding deletions.
//!
//! Only the SHA-256 digest is kept. Candidates are hashed the same way and the
//! digests compared with [`subtle::ConstantTimeEq`], so the comparison time
//! depends on neither the content nor the length of either password.

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Raised when the configured secret is blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("admin password must not be empty")]
pub struct EmptySecret;

/// Digest of the single server-side admin password.
#[derive(Clone)]
pub struct SharedSecret {
    digest: [u8; 32],
}

impl SharedSecret {
    /// Hash `secret` for later comparison.
    ///
    /// # Examples
    /// ```
    /// use user_registry::domain::SharedSecret;
    ///
    /// let secret = SharedSecret::new("hunter2").expect("non-empty secret");
    /// assert!(secret.matches("hunter2"));
    /// assert!(!secret.matches("hunter3"));
    /// ```
    pub fn new(secret: &str) -> Result<Self, EmptySecret> {
        if secret.is_empty() {
            return Err(EmptySecret);
        }
        Ok(Self {
            digest: Self::hash(secret),
        })
    }

    pub fn matches(&self, candidate: &str) -> bool {
        self.digest[..].ct_eq(&Self::hash(candidate)[..]).into()
    }

    fn hash(value: &str) -> [u8; 32] {
        Sha256::digest(value.as_bytes()).into()
    }
}

impl std::fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SharedSecret(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", false)]
    #[case("s3cre", false)]
    #[case("s3cret ", false)]
    #[case("S3CRET", false)]
    #[case("s3cret", true)]
    fn only_the_exact_secret_matches(#[case] candidate: &str, #[case] expected: bool) {
        let secret = SharedSecret::new("s3cret").expect("secret");
        assert_eq!(secret.matches(candidate), expected);
    }

    #[rstest]
    fn blank_secrets_are_refused() {
        assert_eq!(SharedSecret::new("").err(), Some(EmptySecret));
    }

    #[rstest]
    fn debug_output_hides_the_digest() {
        let secret = SharedSecret::new("s3cret").expect("secret");
        assert_eq!(format!("{secret:?}"), "SharedSecret(<redacted>)");
    }
}
