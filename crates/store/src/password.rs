use argon2::{
    Argon2, Params,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use mealweek_shared::{Error, Result};

/// Decides whether a password opens the planner.
pub trait Authenticator {
    fn verify(&self, password: &str) -> Result<bool>;
}

/// Checks passwords against an Argon2 PHC string.
#[derive(Debug, Clone)]
pub struct Argon2Authenticator {
    hash: String,
}

impl Argon2Authenticator {
    pub fn new(hash: impl Into<String>) -> Result<Self> {
        let hash = hash.into();
        PasswordHash::new(&hash).map_err(|e| Error::Server(format!("password hash: {e}")))?;

        Ok(Self { hash })
    }
}

impl Authenticator for Argon2Authenticator {
    fn verify(&self, password: &str) -> Result<bool> {
        verify_password(password, &self.hash)
    }
}

/// Argon2id with 64 MiB memory, 3 iterations and 4 lanes.
pub fn hash_password(password: &str) -> Result<String> {
    let params = Params::new(65536, 3, 4, None).map_err(|e| Error::Server(e.to_string()))?;
    let argon2 = Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params);
    let salt = SaltString::generate(&mut OsRng);

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| Error::Server(e.to_string()))?
        .to_string();

    Ok(hash)
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| Error::Server(e.to_string()))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
