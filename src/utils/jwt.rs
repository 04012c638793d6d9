use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::JWT_ISSUER;
use crate::entities::user;
use crate::error::{AppError, AppResult};

/// Session principal carried in every bearer token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// User id
    pub sub: String,
    pub name: String,
    pub is_admin: bool,
    pub is_supervisor: bool,
    pub scholar_id: Option<Uuid>,
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

impl TokenClaims {
    /// Replaces the identity and role fields with the account's current
    /// values, so role changes apply to sessions issued before them.
    pub fn sync_with(&mut self, user: &user::Model) {
        self.name = user.full_name();
        self.is_admin = user.is_admin;
        self.is_supervisor = user.is_supervisor;
        self.scholar_id = user.scholar_id;
    }

    pub fn user_id(&self) -> AppResult<Uuid> {
        Uuid::parse_str(&self.sub).map_err(|_| AppError::unauthenticated("Malformed session subject"))
    }

    pub fn owns_scholar(&self, scholar_id: Uuid) -> bool {
        self.scholar_id == Some(scholar_id)
    }

    pub fn require_admin(&self) -> AppResult<()> {
        if self.is_admin {
            Ok(())
        } else {
            Err(AppError::forbidden("Administrator access required"))
        }
    }

    pub fn require_admin_or_supervisor(&self) -> AppResult<()> {
        if self.is_admin || self.is_supervisor {
            Ok(())
        } else {
            Err(AppError::forbidden("Administrator or supervisor access required"))
        }
    }

    /// Owner of the scholar record or an administrator.
    pub fn require_scholar_owner(&self, scholar_id: Uuid) -> AppResult<()> {
        if self.is_admin || self.owns_scholar(scholar_id) {
            Ok(())
        } else {
            Err(AppError::forbidden("Only the scholar or an administrator may do this"))
        }
    }
}

#[derive(Clone)]
pub struct JwtManager {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_seconds: i64,
}

impl JwtManager {
    pub fn new(secret: &str, ttl_seconds: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl_seconds,
        }
    }

    pub fn ttl_seconds(&self) -> i64 {
        self.ttl_seconds
    }

    pub fn create_jwt(
        &self,
        user: &user::Model,
    ) -> Result<(String, TokenClaims), jsonwebtoken::errors::Error> {
        let now = Utc::now().timestamp();
        let claims = TokenClaims {
            sub: user.user_id.to_string(),
            name: user.full_name(),
            is_admin: user.is_admin,
            is_supervisor: user.is_supervisor,
            scholar_id: user.scholar_id,
            iss: JWT_ISSUER.to_string(),
            iat: now,
            exp: now + self.ttl_seconds,
            jti: Uuid::new_v4().to_string(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?;
        Ok((token, claims))
    }

    pub fn verify(&self, token: &str) -> Result<TokenClaims, jsonwebtoken::errors::Error> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[JWT_ISSUER]);
        validation.leeway = 5;
        let data = decode::<TokenClaims>(token, &self.decoding, &validation)?;
        Ok(data.claims)
    }
}
