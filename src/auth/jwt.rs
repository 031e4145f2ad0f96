use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use uuid::Uuid;

use crate::auth::{AuthError, AuthUser, Claims};

pub const DEFAULT_AUDIENCE: &str = "authenticated";

const BEARER_PREFIX: &str = "Bearer ";

/// Verifies HS256 tokens issued by the identity provider with a shared secret.
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("decoding_key", &"[REDACTED]")
            .field("audience", &self.validation.aud)
            .finish()
    }
}

impl TokenVerifier {
    pub fn new(secret: &str, audience: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[audience]);
        validation.set_required_spec_claims(&["exp", "aud"]);

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Verify a credential (with or without the `Bearer ` prefix) and return
    /// the user it was issued to.
    pub fn verify(&self, credential: &str) -> Result<AuthUser, AuthError> {
        let token = strip_bearer_prefix(credential);
        if token.is_empty() {
            return Err(AuthError::InvalidToken("empty token".to_string()));
        }

        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)?.claims;

        let subject = claims
            .sub
            .filter(|sub| !sub.is_empty())
            .ok_or(AuthError::MissingSubject)?;
        let user_id = Uuid::parse_str(&subject).map_err(|_| AuthError::InvalidSubject)?;

        Ok(AuthUser {
            user_id,
            email: claims.email,
        })
    }
}

/// Remove a leading `Bearer ` scheme; a bare token passes through unchanged.
pub fn strip_bearer_prefix(credential: &str) -> &str {
    let credential = credential.trim_start();
    credential
        .strip_prefix(BEARER_PREFIX)
        .unwrap_or(credential)
        .trim()
}
