use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Claims carried by a bearer token. `sub` is the owning user's id.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: usize,
    pub exp: usize,
}

/// Issues and verifies the HS256 bearer tokens handed out at signup/login.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validity: Duration,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("encoding_key", &"[REDACTED]")
            .field("decoding_key", &"[REDACTED]")
            .field("validity", &self.validity)
            .finish()
    }
}

impl TokenService {
    pub fn new(secret: &str) -> Self {
        Self::with_validity(secret, Duration::days(3))
    }

    pub fn with_validity(secret: &str, validity: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validity,
        }
    }

    /// Issue a token for the given user id.
    pub fn issue(&self, user_id: &str) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp() as usize,
            exp: (now + self.validity).timestamp() as usize,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("token signing failed: {}", e)))
    }

    /// Verify a token and return the user id it was issued for.
    ///
    /// Expired, malformed and wrongly signed tokens are all unauthorized;
    /// callers never learn which.
    pub fn verify(&self, token: &str) -> Result<String> {
        let validation = Validation::new(Algorithm::HS256);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims.sub)
            .map_err(|_| AppError::Unauthorized)
    }
}
