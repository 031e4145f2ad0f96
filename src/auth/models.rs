use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims read from identity provider tokens. `aud` and `exp` are checked by
/// the decoder itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Option<String>, // Subject (user ID)
    pub email: Option<String>,
    pub exp: usize,
}

/// The caller behind a verified token.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub email: Option<String>,
}
