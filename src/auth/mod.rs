use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

pub mod password;

/// The two kinds of identity a note can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OwnerType {
    User,
    Drawer,
}

impl OwnerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OwnerType::User => "user",
            OwnerType::Drawer => "drawer",
        }
    }
}

impl fmt::Display for OwnerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OwnerType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(OwnerType::User),
            "drawer" => Ok(OwnerType::Drawer),
            other => Err(format!("unknown owner type '{}'", other)),
        }
    }
}

/// Authenticated identity decoded from a verified token.
///
/// Serializes as `{"type": "user", "id": "..."}` or `{"type": "drawer", "id": "..."}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Principal {
    User { id: Uuid },
    Drawer { id: Uuid },
}

impl Principal {
    pub fn new(owner_type: OwnerType, id: Uuid) -> Self {
        match owner_type {
            OwnerType::User => Principal::User { id },
            OwnerType::Drawer => Principal::Drawer { id },
        }
    }

    pub fn id(&self) -> Uuid {
        match self {
            Principal::User { id } | Principal::Drawer { id } => *id,
        }
    }

    pub fn owner_type(&self) -> OwnerType {
        match self {
            Principal::User { .. } => OwnerType::User,
            Principal::Drawer { .. } => OwnerType::Drawer,
        }
    }

    /// True when this principal is the (ownerType, ownerId) pair given.
    pub fn owns(&self, owner_type: OwnerType, owner_id: Uuid) -> bool {
        self.owner_type() == owner_type && self.id() == owner_id
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub owner_type: OwnerType,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    /// `None` when `now + ttl` falls outside the representable date range.
    pub fn new(principal: &Principal, ttl: Duration) -> Option<Self> {
        let now = Utc::now();
        let exp = now.checked_add_signed(ttl)?;
        Some(Self {
            id: principal.id(),
            owner_type: principal.owner_type(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        })
    }

    pub fn principal(&self) -> Principal {
        Principal::new(self.owner_type, self.id)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("JWT generation error: {0}")]
    Generation(String),

    #[error("Invalid token: {0}")]
    Invalid(String),
}

/// Issues and verifies HS256-signed identity tokens.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiry_hours: u64,
}

impl TokenService {
    pub fn new(secret: &str, expiry_hours: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expiry_hours,
        }
    }

    pub fn issue(&self, principal: &Principal) -> Result<String, TokenError> {
        let claims = i64::try_from(self.expiry_hours)
            .ok()
            .and_then(Duration::try_hours)
            .and_then(|ttl| Claims::new(principal, ttl))
            .ok_or_else(|| {
                TokenError::Generation(format!("token lifetime of {} hours is out of range", self.expiry_hours))
            })?;
        self.sign(&claims)
    }

    pub fn verify(&self, token: &str) -> Result<Principal, TokenError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map_err(|e| TokenError::Invalid(e.to_string()))?;
        Ok(token_data.claims.principal())
    }

    fn sign(&self, claims: &Claims) -> Result<String, TokenError> {
        encode(&Header::default(), claims, &self.encoding_key)
            .map_err(|e| TokenError::Generation(e.to_string()))
    }
}
