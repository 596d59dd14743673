use anyhow::{Error, Result, anyhow};
use dotenvy::dotenv;
use serde::Deserialize;

use crate::models::auth::ServiceAccountKey;

fn default_oauth_token_url() -> String {
    "https://oauth2.googleapis.com/token".to_string()
}

fn default_fcm_base_url() -> String {
    "https://fcm.googleapis.com".to_string()
}

fn default_server_port() -> u16 {
    8080
}

#[derive(Clone, Deserialize, Debug)]
pub struct Config {
    pub supabase_url: String,
    pub supabase_service_role_key: String,
    pub firebase_project_id: String,
    pub google_service_account_json: String,

    #[serde(default = "default_oauth_token_url")]
    pub oauth_token_url: String,

    #[serde(default = "default_fcm_base_url")]
    pub fcm_base_url: String,

    #[serde(default = "default_server_port")]
    pub server_port: u16,
}

impl Config {
    pub fn load() -> Result<Self, Error> {
        dotenv().ok();

        let config = envy::from_env::<Self>()
            .map_err(|_| anyhow!("Invalid or missing environmental variable"))?;
        Ok(config)
    }

    /// The service-account blob is kept as the raw environment string and
    /// parsed on use, so a malformed blob surfaces as a request error
    /// rather than preventing startup.
    pub fn service_account(&self) -> Result<ServiceAccountKey, serde_json::Error> {
        serde_json::from_str(&self.google_service_account_json)
    }
}
