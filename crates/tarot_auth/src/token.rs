use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::Deserialize;
use serde_json::Value;

use crate::error::AuthError;
use crate::role::Role;

/// Claims the backend puts in its access tokens.
#[derive(Debug, Deserialize)]
struct Claims {
    #[serde(rename = "Id")]
    id: Option<Value>,
    #[serde(rename = "Role")]
    role: Option<Value>,
    exp: Option<i64>,
}

/// Identity extracted from a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    pub user_id: String,
    pub role: Role,
    /// Unix seconds, when the token carries `exp`.
    pub expires_at: Option<i64>,
}

fn claim_to_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Reads `Id`, `Role` and `exp` from a JWT.
///
/// The signature is not checked: the client cannot hold the signing key, and
/// the server validates the token on every authenticated call.
pub fn decode_claims(token: &str) -> Result<TokenClaims, AuthError> {
    let mut validation = Validation::default();
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.required_spec_claims.clear();

    let data = decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation)?;
    let claims = data.claims;

    let user_id = claims
        .id
        .and_then(claim_to_string)
        .ok_or(AuthError::MissingClaim("Id"))?;
    let role_code = claims
        .role
        .and_then(claim_to_string)
        .ok_or(AuthError::MissingClaim("Role"))?;

    Ok(TokenClaims {
        user_id,
        role: role_code.parse()?,
        expires_at: claims.exp,
    })
}
