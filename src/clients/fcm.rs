use reqwest::Client;
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::{
    config::Config,
    error::DispatchError,
    models::fcm::{DeliveryResult, FcmMessage, FcmNotification, FcmRequest, ResponseBody},
};

/// Client for the provider's project-scoped send endpoint.
pub struct FcmClient {
    http_client: Client,
    send_url: String,
}

impl FcmClient {
    pub fn new(config: &Config) -> Self {
        info!(project_id = %config.firebase_project_id, "FCM client initialized");

        Self {
            http_client: Client::new(),
            send_url: format!(
                "{}/v1/projects/{}/messages:send",
                config.fcm_base_url, config.firebase_project_id
            ),
        }
    }

    /// One message to one device. An HTTP-level failure is captured in the
    /// result; only a transport failure bubbles up.
    pub async fn send(
        &self,
        access_token: &str,
        device_token: &str,
        title: &str,
        body: &str,
        data: &Map<String, Value>,
    ) -> Result<DeliveryResult, DispatchError> {
        let request = FcmRequest {
            message: FcmMessage {
                token: device_token.to_string(),
                notification: FcmNotification {
                    title: title.to_string(),
                    body: body.to_string(),
                },
                data: data.clone(),
            },
        };

        let response = self
            .http_client
            .post(&self.send_url)
            .bearer_auth(access_token)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        debug!(device_token, status = status.as_u16(), "FCM send attempted");

        Ok(DeliveryResult {
            token: device_token.to_string(),
            ok: status.is_success(),
            status: status.as_u16(),
            body: ResponseBody::parse(text),
        })
    }
}
