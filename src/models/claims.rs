//! Bearer token claims issued by the external identity provider

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::{config::AuthConfig, error::AppError};

/// Realm-level roles (Keycloak `realm_access` claim)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RealmAccess {
    #[serde(default)]
    pub roles: Vec<String>,
}

/// Claims this API reads from an access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: i64,
    #[serde(default)]
    pub preferred_username: Option<String>,
    /// Space-separated OAuth2 scopes
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub realm_access: Option<RealmAccess>,
}

impl Claims {
    pub fn roles(&self) -> impl Iterator<Item = &str> {
        self.realm_access
            .iter()
            .flat_map(|access| access.roles.iter().map(String::as_str))
    }

    pub fn scopes(&self) -> impl Iterator<Item = &str> {
        self.scope.iter().flat_map(|s| s.split_whitespace())
    }

    /// `ROLE_<role>` for every realm role followed by `SCOPE_<scope>` for every scope
    pub fn authorities(&self) -> Vec<String> {
        self.roles()
            .map(|role| format!("ROLE_{}", role))
            .chain(self.scopes().map(|scope| format!("SCOPE_{}", scope)))
            .collect()
    }

    pub fn has_authority(&self, authority: &str) -> bool {
        self.authorities().iter().any(|a| a == authority)
    }

    pub fn require_write(&self) -> Result<(), AppError> {
        if self.has_authority("SCOPE_write") {
            Ok(())
        } else {
            Err(AppError::Authorization("Scope 'write' required".to_string()))
        }
    }
}

/// Validates bearer tokens against the identity provider's key
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(config: &AuthConfig) -> Result<Self, AppError> {
        let (key, algorithm) = match (&config.public_key_pem, &config.jwt_secret) {
            (Some(pem), _) => {
                let key = DecodingKey::from_rsa_pem(pem.as_bytes())
                    .map_err(|e| AppError::Internal(format!("Invalid public key: {}", e)))?;
                (key, Algorithm::RS256)
            }
            (None, Some(secret)) => (DecodingKey::from_secret(secret.as_bytes()), Algorithm::HS256),
            (None, None) => {
                return Err(AppError::Internal(
                    "Either auth.public_key_pem or auth.jwt_secret must be configured".to_string(),
                ))
            }
        };

        let mut validation = Validation::new(algorithm);
        if let Some(ref issuer) = config.issuer {
            validation.set_issuer(&[issuer]);
        }
        match config.audience {
            Some(ref audience) => validation.set_audience(&[audience]),
            None => validation.validate_aud = false,
        }

        Ok(Self { key, validation })
    }

    /// Parse and validate a token (signature, expiry, issuer, audience)
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| AppError::Authentication(e.to_string()))
    }
}
