use serde::Serialize;
use serde_json::{Map, Value};

/// FCM HTTP v1 request envelope.
#[derive(Debug, Clone, Serialize)]
pub struct FcmRequest {
    pub message: FcmMessage,
}

#[derive(Debug, Clone, Serialize)]
pub struct FcmMessage {
    pub token: String,
    pub notification: FcmNotification,
    pub data: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FcmNotification {
    pub title: String,
    pub body: String,
}

/// Provider response body, retained as structured JSON when it parses and
/// as raw text otherwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseBody {
    Json(Value),
    Text(String),
}

impl ResponseBody {
    pub fn parse(text: String) -> Self {
        match serde_json::from_str(&text) {
            Ok(value) => ResponseBody::Json(value),
            Err(_) => ResponseBody::Text(text),
        }
    }
}

/// Outcome of one send attempt. Failed sends are recorded here, never
/// raised; one bad token must not abort the batch.
#[derive(Debug, Clone, Serialize)]
pub struct DeliveryResult {
    pub token: String,
    pub ok: bool,
    pub status: u16,
    pub body: ResponseBody,
}
