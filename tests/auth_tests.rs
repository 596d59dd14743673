use anyhow::Result;
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use push_dispatcher::{
    clients::auth::{AuthClient, MESSAGING_SCOPE, build_assertion},
    models::auth::{AssertionClaims, ServiceAccountKey},
};
use serde_json::{Value, json};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_string_contains, header, method, path},
};

use crate::helpers;

fn test_service_account() -> ServiceAccountKey {
    ServiceAccountKey {
        client_email: helpers::TEST_CLIENT_EMAIL.to_string(),
        private_key: helpers::TEST_PRIVATE_KEY.to_string(),
    }
}

/// Test: the signed assertion verifies against the public half of the key
/// and round-trips the exact claims that were encoded
#[test]
fn test_assertion_round_trip() -> Result<()> {
    let service_account = test_service_account();
    let token_url = "https://oauth2.googleapis.com/token";
    let now = Utc::now().timestamp();

    let assertion = build_assertion(&service_account, token_url, now)?;

    let mut validation = Validation::new(Algorithm::RS256);
    validation.set_audience(&[token_url]);

    let decoded = decode::<AssertionClaims>(
        &assertion,
        &DecodingKey::from_rsa_pem(helpers::TEST_PUBLIC_KEY.as_bytes())?,
        &validation,
    )?;

    assert_eq!(decoded.claims.iss, service_account.client_email);
    assert_eq!(decoded.claims.sub, service_account.client_email);
    assert_eq!(decoded.claims.scope, MESSAGING_SCOPE);
    assert_eq!(decoded.claims.aud, token_url);
    assert_eq!(decoded.claims.iat, now);
    assert_eq!(decoded.claims.exp, now + 3600);

    Ok(())
}

/// Test: the assertion is three unpadded url-safe base64 JSON segments
#[test]
fn test_assertion_segment_structure() -> Result<()> {
    let assertion = build_assertion(
        &test_service_account(),
        "https://oauth2.googleapis.com/token",
        1_700_000_000,
    )?;

    assert!(!assertion.contains('='));

    let segments: Vec<&str> = assertion.split('.').collect();
    assert_eq!(segments.len(), 3);

    let header_segment: Value = serde_json::from_slice(&URL_SAFE_NO_PAD.decode(segments[0])?)?;
    assert_eq!(header_segment, json!({"alg": "RS256", "typ": "JWT"}));

    let claims: Value = serde_json::from_slice(&URL_SAFE_NO_PAD.decode(segments[1])?)?;
    assert_eq!(claims["iss"], json!(helpers::TEST_CLIENT_EMAIL));
    assert_eq!(claims["scope"], json!(MESSAGING_SCOPE));
    assert_eq!(claims["iat"], json!(1_700_000_000));
    assert_eq!(claims["exp"], json!(1_700_003_600));

    Ok(())
}

/// Test: a garbage private key fails the signing step, not the exchange
#[test]
fn test_invalid_private_key_is_rejected() {
    let service_account = ServiceAccountKey {
        client_email: helpers::TEST_CLIENT_EMAIL.to_string(),
        private_key: "not a pem".to_string(),
    };

    let err = build_assertion(&service_account, "https://oauth2.googleapis.com/token", 0)
        .unwrap_err();

    assert_eq!(err.status_code(), 500);
    assert!(err.to_string().contains("Invalid service account key"));
}

/// Test: the exchange posts the jwt-bearer grant and returns the token
#[tokio::test]
async fn test_token_exchange_returns_access_token() -> Result<()> {
    let oauth = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("grant_type=urn"))
        .and(body_string_contains("jwt-bearer"))
        .and(body_string_contains("assertion="))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "ya29.abc",
            "expires_in": 3599,
            "token_type": "Bearer"
        })))
        .expect(1)
        .mount(&oauth)
        .await;

    let config = helpers::test_config(
        "http://store.invalid",
        &format!("{}/token", oauth.uri()),
        "http://fcm.invalid",
    );
    let client = AuthClient::new(&config);

    let token = client.fetch_access_token(&test_service_account()).await?;
    assert_eq!(token, "ya29.abc");

    Ok(())
}

/// Test: a non-success token response surfaces the upstream body
#[tokio::test]
async fn test_token_exchange_error_carries_upstream_body() -> Result<()> {
    let oauth = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(400).set_body_string(r#"{"error":"invalid_grant"}"#))
        .mount(&oauth)
        .await;

    let config = helpers::test_config(
        "http://store.invalid",
        &format!("{}/token", oauth.uri()),
        "http://fcm.invalid",
    );
    let client = AuthClient::new(&config);

    let err = client
        .fetch_access_token(&test_service_account())
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), 500);
    assert_eq!(
        err.to_string(),
        r#"OAuth token error: {"error":"invalid_grant"}"#
    );

    Ok(())
}
