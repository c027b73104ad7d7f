use bcrypt::{DEFAULT_COST, hash, verify};

pub mod jwt;

pub use jwt::{Claims, JwtUtils, TokenStatus};

pub fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
    hash(password.as_bytes(), DEFAULT_COST)
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, bcrypt::BcryptError> {
    verify(password.as_bytes(), hash)
}
