use argon2::Argon2;
use argon2::password_hash::{self, PasswordHasher, SaltString};
use uuid::Uuid;

/// Argon2id hash of a password in PHC string format (`$argon2id$v=19$...`).
///
/// Plain passwords never reach the repo layer. CPU bound: call it from
/// `spawn_blocking`.
pub fn hash_password(password: &str) -> Result<String, password_hash::Error> {
    let salt = SaltString::encode_b64(Uuid::new_v4().as_bytes())?;
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}
