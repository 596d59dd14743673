use push_dispatcher::config::Config;
use serde_json::json;

// Throwaway RSA-2048 keypair, committed for test use only.
pub const TEST_PRIVATE_KEY: &str = include_str!("fixtures/test_key.pem");
pub const TEST_PUBLIC_KEY: &str = include_str!("fixtures/test_key.pub.pem");

pub const TEST_CLIENT_EMAIL: &str = "pusher@test-project.iam.gserviceaccount.com";
pub const TEST_SERVICE_ROLE_KEY: &str = "service-role-key";

pub fn service_account_json() -> String {
    json!({
        "type": "service_account",
        "project_id": "test-project",
        "private_key_id": "key-id",
        "private_key": TEST_PRIVATE_KEY,
        "client_email": TEST_CLIENT_EMAIL,
        "client_id": "123456",
        "token_uri": "https://oauth2.googleapis.com/token"
    })
    .to_string()
}

pub fn test_config(store_url: &str, oauth_token_url: &str, fcm_base_url: &str) -> Config {
    Config {
        supabase_url: store_url.trim_end_matches('/').to_string(),
        supabase_service_role_key: TEST_SERVICE_ROLE_KEY.to_string(),
        firebase_project_id: "test-project".to_string(),
        google_service_account_json: service_account_json(),
        oauth_token_url: oauth_token_url.to_string(),
        fcm_base_url: fcm_base_url.trim_end_matches('/').to_string(),
        server_port: 0,
    }
}
