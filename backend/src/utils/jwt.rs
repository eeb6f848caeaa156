use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{RefreshTokenId, UserId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user_id
    pub username: String,
    pub role: String,
    pub exp: i64,    // expiration time
    pub iat: i64,    // issued at
    pub jti: String, // JWT ID
}

impl Claims {
    pub fn new(user_id: String, username: String, role: String, expiration_hours: u64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(expiration_hours as i64);

        Self {
            sub: user_id,
            username,
            role,
            exp: exp.timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
        }
    }
}

pub fn create_access_token(
    user_id: String,
    username: String,
    role: String,
    secret: &str,
    expiration_hours: u64,
) -> anyhow::Result<String> {
    let claims = Claims::new(user_id, username, role, expiration_hours);
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )?;

    Ok(token)
}

pub fn verify_access_token(token: &str, secret: &str) -> anyhow::Result<Claims> {
    let validation = Validation::default();
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &validation,
    )?;

    Ok(token_data.claims)
}

/// A freshly issued refresh token. The raw secret leaves the server exactly
/// once, in `encoded()` form; only the argon2 hash is persisted.
#[derive(Debug)]
pub struct RefreshTokenData {
    pub id: RefreshTokenId,
    pub user_id: UserId,
    pub secret: String,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
}

impl RefreshTokenData {
    /// Client-facing representation: `<id>.<secret>`.
    pub fn encoded(&self) -> String {
        format!("{}.{}", self.id, self.secret)
    }
}

pub fn create_refresh_token(
    user_id: UserId,
    expiration_days: u64,
) -> anyhow::Result<RefreshTokenData> {
    let secret = Uuid::new_v4().to_string();
    let token_hash = hash_refresh_secret(&secret)?;
    let expires_at = Utc::now() + Duration::days(expiration_days as i64);

    Ok(RefreshTokenData {
        id: RefreshTokenId::new(),
        user_id,
        secret,
        token_hash,
        expires_at,
    })
}

/// Splits a client-supplied refresh token back into its id and secret parts.
pub fn decode_refresh_token(raw: &str) -> anyhow::Result<(RefreshTokenId, String)> {
    let (id_part, secret_part) = raw
        .split_once('.')
        .ok_or_else(|| anyhow::anyhow!("Malformed refresh token"))?;
    let id: RefreshTokenId = id_part
        .parse()
        .map_err(|_| anyhow::anyhow!("Malformed refresh token id"))?;
    if secret_part.is_empty() {
        return Err(anyhow::anyhow!("Malformed refresh token secret"));
    }
    Ok((id, secret_part.to_string()))
}

pub fn hash_refresh_secret(secret: &str) -> anyhow::Result<String> {
    use argon2::password_hash::{rand_core::OsRng, SaltString};
    use argon2::{Argon2, PasswordHasher};

    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let token_hash = argon2
        .hash_password(secret.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash refresh token: {}", e))?;

    Ok(token_hash.to_string())
}

pub fn verify_refresh_secret(secret: &str, hash: &str) -> anyhow::Result<bool> {
    use argon2::password_hash::PasswordHash;
    use argon2::{Argon2, PasswordVerifier};

    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| anyhow::anyhow!("Invalid refresh token hash: {}", e))?;

    let argon2 = Argon2::default();
    let result = argon2.verify_password(secret.as_bytes(), &parsed_hash);

    match result {
        Ok(_) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(anyhow::anyhow!("Refresh token verification error: {}", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_and_verify_access_token() {
        let token =
            create_access_token("user-123".into(), "bob".into(), "attendant".into(), "secret", 1)
                .expect("create token");
        let claims = verify_access_token(&token, "secret").expect("verify token");
        assert_eq!(claims.sub, "user-123");
        assert_eq!(claims.username, "bob");
        assert_eq!(claims.role, "attendant");
    }

    #[test]
    fn refresh_token_round_trips_through_encoding() {
        let data = create_refresh_token(UserId::new(), 7).expect("create refresh token");
        let (id, secret) = decode_refresh_token(&data.encoded()).expect("decode");
        assert_eq!(id, data.id);
        assert!(verify_refresh_secret(&secret, &data.token_hash).unwrap());
        assert!(!verify_refresh_secret("wrong", &data.token_hash).unwrap());
    }

    #[test]
    fn decode_rejects_malformed_tokens() {
        assert!(decode_refresh_token("no-separator").is_err());
        assert!(decode_refresh_token("not-a-uuid.secret").is_err());
    }
}
