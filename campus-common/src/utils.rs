use std::str::FromStr;

use actix_web::{http::header, HttpRequest};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Cookie carrying the signed token after a browser sign-in.
pub const TOKEN_COOKIE: &str = "token";

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    User,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    pub exp: usize,
}

impl Claims {
    pub fn role(&self) -> Option<Role> {
        Role::from_str(&self.role).ok()
    }
}

pub fn create_token(
    sub: String,
    role: Role,
    secret: &str,
    ttl: Duration,
) -> jsonwebtoken::errors::Result<String> {
    let claims = Claims {
        sub,
        role: role.to_string(),
        exp: (Utc::now() + ttl).timestamp().max(0) as usize,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Returns `None` for a bad signature as well as an expired token.
pub fn decode_token(token: &str, secret: &str) -> Option<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .ok()
}

/// Reads the token from an `Authorization: Bearer` header, falling back to the
/// sign-in cookie.
pub fn get_claims(req: &HttpRequest, secret: &str) -> Option<Claims> {
    bearer_token(req)
        .or_else(|| req.cookie(TOKEN_COOKIE).map(|c| c.value().to_owned()))
        .and_then(|token| decode_token(&token, secret))
}

fn bearer_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_owned)
}
