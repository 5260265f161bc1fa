use pbkdf2::password_hash::{
    Error as PasswordHashError, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
};
use pbkdf2::{Algorithm, Params, Pbkdf2};
use rand::rngs::OsRng;
use rand::RngCore;

use crate::error::{AppError, AppResult};

const SALT_LEN: usize = 16;
const PBKDF2_ROUNDS: u32 = 120_000;
const OUTPUT_LEN: usize = 32;

fn current_params() -> Params {
    Params {
        rounds: PBKDF2_ROUNDS,
        output_length: OUTPUT_LEN,
    }
}

/// Hashes `password` with a fresh random salt into a PHC string
/// (`$pbkdf2-sha256$i=...,l=...$<salt>$<hash>`).
pub fn hash_password(password: &str) -> AppResult<String> {
    hash_with_params(password, current_params())
}

pub fn verify_password(password: &str, encoded: &str) -> AppResult<bool> {
    let parsed = PasswordHash::new(encoded)
        .map_err(|err| AppError::other(format!("stored password hash is unreadable: {err}")))?;

    match Pbkdf2.verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(PasswordHashError::Password) => Ok(false),
        Err(err) => Err(AppError::other(format!(
            "stored password hash cannot be verified: {err}"
        ))),
    }
}

/// True when `encoded` was produced with another algorithm or weaker
/// parameters than the current ones.
pub fn needs_rehash(encoded: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(encoded) else {
        return true;
    };
    if parsed.algorithm.as_str() != Algorithm::Pbkdf2Sha256.as_str() {
        return true;
    }
    match Params::try_from(&parsed) {
        Ok(params) => params.rounds < PBKDF2_ROUNDS || params.output_length < OUTPUT_LEN,
        Err(_) => true,
    }
}

pub(crate) fn hash_with_params(password: &str, params: Params) -> AppResult<String> {
    let mut salt_bytes = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt_bytes);
    let salt = SaltString::encode_b64(&salt_bytes)
        .map_err(|err| AppError::other(format!("failed to encode password salt: {err}")))?;

    let hash = Pbkdf2
        .hash_password_customized(
            password.as_bytes(),
            Some(Algorithm::Pbkdf2Sha256.ident()),
            None,
            params,
            &salt,
        )
        .map_err(|err| AppError::other(format!("failed to hash password: {err}")))?;

    Ok(hash.to_string())
}
