use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use reqwest::Client;
use tracing::debug;

use crate::{
    config::Config,
    error::DispatchError,
    models::auth::{AssertionClaims, ServiceAccountKey, TokenResponse},
};

pub const MESSAGING_SCOPE: &str = "https://www.googleapis.com/auth/firebase.messaging";
pub const TOKEN_VALIDITY_SECS: i64 = 3600;
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// OAuth2 client for the provider's token endpoint.
pub struct AuthClient {
    http_client: Client,
    token_url: String,
}

impl AuthClient {
    pub fn new(config: &Config) -> Self {
        Self {
            http_client: Client::new(),
            token_url: config.oauth_token_url.clone(),
        }
    }

    /// One fresh exchange per call. Neither the assertion nor the resulting
    /// bearer token is cached or reused across requests.
    pub async fn fetch_access_token(
        &self,
        service_account: &ServiceAccountKey,
    ) -> Result<String, DispatchError> {
        let now = Utc::now().timestamp();
        let assertion = build_assertion(service_account, &self.token_url, now)?;

        debug!(
            client_email = %service_account.client_email,
            "Exchanging bearer assertion for access token"
        );

        let params = [
            ("grant_type", JWT_BEARER_GRANT),
            ("assertion", assertion.as_str()),
        ];

        let response = self
            .http_client
            .post(&self.token_url)
            .form(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            let text = response.text().await?;
            return Err(DispatchError::Upstream(format!(
                "OAuth token error: {}",
                text
            )));
        }

        let token: TokenResponse = response.json().await?;
        Ok(token.access_token)
    }
}

/// Builds the signed bearer assertion: an RS256 JWT whose audience is the
/// token endpoint itself, valid for one hour from `now`.
pub fn build_assertion(
    service_account: &ServiceAccountKey,
    token_url: &str,
    now: i64,
) -> Result<String, DispatchError> {
    let claims = AssertionClaims {
        iss: service_account.client_email.clone(),
        sub: service_account.client_email.clone(),
        scope: MESSAGING_SCOPE.to_string(),
        aud: token_url.to_string(),
        iat: now,
        exp: now + TOKEN_VALIDITY_SECS,
    };

    let key = EncodingKey::from_rsa_pem(service_account.private_key.as_bytes())
        .map_err(|e| DispatchError::Internal(format!("Invalid service account key: {}", e)))?;

    encode(&Header::new(Algorithm::RS256), &claims, &key)
        .map_err(|e| DispatchError::Internal(format!("Failed to sign assertion: {}", e)))
}
