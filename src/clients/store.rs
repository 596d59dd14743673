use reqwest::Client;
use tracing::debug;

use crate::{
    config::Config,
    error::DispatchError,
    models::store::{DeviceToken, NotifikasiRow},
};

// All dispatcher tables live in this schema.
const SCHEMA_PROFILE: &str = "rpl";
const NOTIFIKASI_COLUMNS: &str = "id,user_id,log,iswarning,timestamp";

/// REST client for the user-keyed data store. Service-role credentials,
/// read-only usage: the dispatcher performs no writes.
pub struct StoreClient {
    http_client: Client,
    base_url: String,
    service_role_key: String,
}

impl StoreClient {
    pub fn new(config: &Config) -> Self {
        Self {
            http_client: Client::new(),
            base_url: config.supabase_url.clone(),
            service_role_key: config.supabase_service_role_key.clone(),
        }
    }

    /// Fetches a single notifikasi row by id, or `None` when no row exists.
    pub async fn fetch_notifikasi(
        &self,
        id: i64,
    ) -> Result<Option<NotifikasiRow>, DispatchError> {
        let url = format!(
            "{}/rest/v1/notifikasi?id=eq.{}&select={}&limit=1",
            self.base_url, id, NOTIFIKASI_COLUMNS
        );

        debug!(notifikasi_id = id, "Fetching notifikasi row");

        let response = self.get(&url).await?;

        if !response.status().is_success() {
            let text = response.text().await?;
            return Err(DispatchError::Upstream(format!(
                "Fetch notifikasi failed: {}",
                text
            )));
        }

        let rows: Vec<NotifikasiRow> = response.json().await?;
        Ok(rows.into_iter().next())
    }

    /// Fetches every registered device token for a user, in store order.
    pub async fn fetch_device_tokens(
        &self,
        user_id: i64,
    ) -> Result<Vec<DeviceToken>, DispatchError> {
        let url = format!(
            "{}/rest/v1/device_tokens?user_id=eq.{}&select=token",
            self.base_url, user_id
        );

        debug!(user_id, "Fetching device tokens");

        let response = self.get(&url).await?;

        if !response.status().is_success() {
            let text = response.text().await?;
            return Err(DispatchError::Upstream(format!(
                "Fetch tokens failed: {}",
                text
            )));
        }

        Ok(response.json().await?)
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response, DispatchError> {
        Ok(self
            .http_client
            .get(url)
            .header("apikey", &self.service_role_key)
            .bearer_auth(&self.service_role_key)
            .header("Accept-Profile", SCHEMA_PROFILE)
            .header("Content-Type", "application/json")
            .send()
            .await?)
    }
}
