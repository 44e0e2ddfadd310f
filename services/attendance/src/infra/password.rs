use anyhow::Context as _;
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use tokio::task;

use crate::domain::repository::PasswordPort;
use crate::error::AttendanceServiceError;

/// Argon2id digest with the default cost parameters and a random output.
const DECOY_DIGEST: &str = "$argon2id$v=19$m=19456,t=2,p=1$kTAtRJyOJNMKGhsXZAX6aw$OJix4JYaDOsPfjRi4PtChTbvmZ33eQOiiS3GWyaY7ig";

/// Argon2id with default parameters. Hashing runs on the blocking pool.
#[derive(Clone, Copy, Default)]
pub struct Argon2Passwords;

impl PasswordPort for Argon2Passwords {
    async fn hash(&self, plain: &str) -> Result<String, AttendanceServiceError> {
        let plain = plain.to_owned();
        let digest = task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            Argon2::default()
                .hash_password(plain.as_bytes(), &salt)
                .map(|hash| hash.to_string())
                .map_err(|e| anyhow::anyhow!("failed to hash password: {e}"))
        })
        .await
        .context("password hashing task panicked")??;
        Ok(digest)
    }

    async fn verify(&self, plain: &str, digest: &str) -> Result<bool, AttendanceServiceError> {
        let plain = plain.to_owned();
        let digest = digest.to_owned();
        let is_valid = task::spawn_blocking(move || {
            let parsed = PasswordHash::new(&digest)
                .map_err(|e| anyhow::anyhow!("invalid password hash format: {e}"))?;
            Ok::<bool, anyhow::Error>(
                Argon2::default()
                    .verify_password(plain.as_bytes(), &parsed)
                    .is_ok(),
            )
        })
        .await
        .context("password verification task panicked")??;
        Ok(is_valid)
    }

    fn decoy_digest(&self) -> &'static str {
        DECOY_DIGEST
    }
}
