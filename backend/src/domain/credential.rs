//! Stored credentials and the salted password digest.
//!
//! A [`PasswordHash`] is a 16-byte random salt, the 32-byte PBKDF2-HMAC-SHA256
//! output and the round count that produced it. Verification always replays
//! the stored round count, so raising the configured cost only affects new
//! hashes. Plaintext passwords never leave the request that carried them.

use rand::RngCore;
use rand::rngs::OsRng;
use sha2::Sha256;

use super::Username;

/// Salt length in bytes.
pub const SALT_LEN: usize = 16;

/// SHA-256 digest length in bytes.
pub const DIGEST_LEN: usize = 32;

/// Default number of PBKDF2 rounds applied to new hashes.
pub const DEFAULT_HASH_ITERATIONS: u32 = 100_000;

const STORED_LEN: usize = SALT_LEN + DIGEST_LEN;

/// Error raised when a stored hash cannot be rebuilt.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordHashFormatError {
    /// The `salt || digest` bytes have the wrong length.
    #[error("stored password hash must be {STORED_LEN} bytes, got {length}")]
    Length { length: usize },
    /// The stored round count is zero.
    #[error("stored password hash must record at least one iteration")]
    ZeroIterations,
}

/// Salted password digest as persisted by the credential store.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash {
    iterations: u32,
    salt: [u8; SALT_LEN],
    digest: [u8; DIGEST_LEN],
}

impl PasswordHash {
    /// Rebuild a hash from its round count and stored `salt || digest` form.
    pub fn from_parts(iterations: u32, bytes: &[u8]) -> Result<Self, PasswordHashFormatError> {
        if iterations == 0 {
            return Err(PasswordHashFormatError::ZeroIterations);
        }
        let length = bytes.len();
        let (salt, digest) = bytes
            .split_first_chunk::<SALT_LEN>()
            .ok_or(PasswordHashFormatError::Length { length })?;
        let digest: [u8; DIGEST_LEN] = digest
            .try_into()
            .map_err(|_| PasswordHashFormatError::Length { length })?;
        Ok(Self {
            iterations,
            salt: *salt,
            digest,
        })
    }

    /// PBKDF2 rounds this digest was derived with.
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Encode as `salt || digest` for storage.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(STORED_LEN);
        bytes.extend_from_slice(&self.salt);
        bytes.extend_from_slice(&self.digest);
        bytes
    }
}

impl std::fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordHash")
            .field("iterations", &self.iterations)
            .field("salt", &hex::encode(self.salt))
            .finish_non_exhaustive()
    }
}

/// Salted PBKDF2-HMAC-SHA256 password hasher.
///
/// The configured round count applies to new hashes only; [`verify`] uses
/// the count recorded in the stored hash.
///
/// [`verify`]: PasswordHasher::verify
///
/// # Examples
/// ```
/// use vitals_backend::domain::PasswordHasher;
///
/// let hash = PasswordHasher::new(1_000).hash("secret1");
/// let hasher = PasswordHasher::new(2_000);
/// assert!(hasher.verify("secret1", &hash));
/// assert!(!hasher.verify("secret2", &hash));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordHasher {
    iterations: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(DEFAULT_HASH_ITERATIONS)
    }
}

impl PasswordHasher {
    /// Build a hasher applying `iterations` rounds; zero is treated as one.
    pub fn new(iterations: u32) -> Self {
        Self {
            iterations: iterations.max(1),
        }
    }

    /// Number of rounds applied to new hashes.
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Hash `password` under a fresh random salt.
    pub fn hash(&self, password: &str) -> PasswordHash {
        let mut salt = [0_u8; SALT_LEN];
        OsRng.fill_bytes(&mut salt);
        PasswordHash {
            iterations: self.iterations,
            salt,
            digest: derive(password, &salt, self.iterations),
        }
    }

    /// Check `password` against `stored` in constant time.
    pub fn verify(&self, password: &str, stored: &PasswordHash) -> bool {
        let attempt = derive(password, &stored.salt, stored.iterations);
        constant_time_eq(&attempt, &stored.digest)
    }

    /// Spend the same work as [`PasswordHasher::verify`] without a stored
    /// hash, so an unknown username costs as much as a wrong password.
    pub fn verify_against_nothing(&self, password: &str) -> bool {
        std::hint::black_box(derive(password, &[0_u8; SALT_LEN], self.iterations));
        false
    }
}

fn derive(password: &str, salt: &[u8], iterations: u32) -> [u8; DIGEST_LEN] {
    let mut digest = [0_u8; DIGEST_LEN];
    pbkdf2::pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, iterations, &mut digest);
    digest
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter()
        .zip(b)
        .fold(0_u8, |diff, (x, y)| diff | (x ^ y))
        == 0
}

/// A registered account: username plus salted password digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    username: Username,
    password_hash: PasswordHash,
}

impl Credential {
    /// Pair a username with its password digest.
    pub fn new(username: Username, password_hash: PasswordHash) -> Self {
        Self {
            username,
            password_hash,
        }
    }

    /// Account name.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Stored digest.
    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }
}
