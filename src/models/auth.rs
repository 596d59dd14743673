use serde::{Deserialize, Serialize};

/// Service-account credential, the subset of the Google JSON blob the
/// exchange needs. Unknown fields in the blob are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
}

/// Claims of the RFC 7523 bearer assertion. `aud` is the token endpoint
/// itself; `exp` sits one hour past `iat`.
#[derive(Debug, Serialize, Deserialize)]
pub struct AssertionClaims {
    pub iss: String,
    pub sub: String,
    pub scope: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
}
