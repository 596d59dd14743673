use serde::Deserialize;
use serde_json::{Map, Value};

use crate::{error::DispatchError, models::store::NotifikasiRow};

pub const DEFAULT_TITLE: &str = "Pemberitahuan";
pub const FALLBACK_MESSAGE: &str = "Anda memiliki notifikasi baru.";

/// Raw request body. The three accepted shapes share one pool of optional
/// fields, so a single deserialization feeds the classifier.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRequest {
    pub user_id: Option<i64>,
    pub title: Option<String>,
    pub body: Option<String>,
    pub data: Option<Map<String, Value>>,
    pub notifikasi_id: Option<i64>,
    pub record: Option<WebhookRecord>,

    // Webhook envelope metadata, logged but never acted on.
    #[serde(rename = "type")]
    pub event_type: Option<String>,
    pub table: Option<String>,
    pub schema: Option<String>,
}

/// Row-change payload as delivered by the database webhook. Field types are
/// loose on purpose: webhook senders serialize columns inconsistently.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookRecord {
    pub id: Option<i64>,
    pub user_id: Option<Value>,
    pub log: Option<Value>,
    pub iswarning: Option<Value>,
    pub timestamp: Option<String>,
}

impl WebhookRecord {
    /// Strict gate: only boolean `true` or the exact string `"true"` count.
    /// `false`, `"false"`, `1`, `null` and absence all skip the push.
    pub fn is_warning(&self) -> bool {
        match &self.iswarning {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => s == "true",
            _ => false,
        }
    }

    /// Accepts a number or a numeric string; anything else is treated as
    /// absent and caught by the final required-field check.
    pub fn user_id(&self) -> Option<i64> {
        match &self.user_id {
            Some(Value::Number(n)) => n.as_i64(),
            Some(Value::String(s)) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn log_message(&self) -> Option<&str> {
        match &self.log {
            Some(Value::String(s)) => Some(s),
            _ => None,
        }
    }
}

/// The three accepted request shapes, made explicit so precedence is one
/// decision up front instead of scattered field probing.
#[derive(Debug, Clone)]
pub enum PushRequest {
    /// All content supplied inline.
    Direct { draft: Draft },
    /// Database change event; only dispatched when the record is flagged.
    Webhook {
        record: WebhookRecord,
        notifikasi_id: Option<i64>,
        draft: Draft,
    },
    /// Reference to a notifikasi row; inline fields act as overrides.
    Lookup { notifikasi_id: i64, draft: Draft },
}

impl RawRequest {
    pub fn classify(self) -> PushRequest {
        let draft = Draft {
            user_id: self.user_id,
            title: self.title,
            message: self.body,
            data: self.data.unwrap_or_default(),
        };

        match (self.record, self.user_id, self.notifikasi_id) {
            (Some(record), None, notifikasi_id) => PushRequest::Webhook {
                record,
                notifikasi_id,
                draft,
            },
            (_, _, Some(notifikasi_id)) => PushRequest::Lookup {
                notifikasi_id,
                draft,
            },
            _ => PushRequest::Direct { draft },
        }
    }
}

/// Partially resolved notification. Resolution steps fill the gaps until
/// `finish` either yields a dispatchable notification or rejects.
#[derive(Debug, Clone, Default)]
pub struct Draft {
    pub user_id: Option<i64>,
    pub title: Option<String>,
    pub message: Option<String>,
    pub data: Map<String, Value>,
}

impl Draft {
    /// Fills gaps from a flagged webhook record. Inline fields always win.
    pub fn fill_from_record(&mut self, record: &WebhookRecord) {
        if self.user_id.is_none() {
            self.user_id = record.user_id();
        }
        if self.title.is_none() {
            self.title = Some(DEFAULT_TITLE.to_string());
        }
        if self.message.is_none() {
            self.message = Some(
                record
                    .log_message()
                    .map(str::to_string)
                    .unwrap_or_else(|| FALLBACK_MESSAGE.to_string()),
            );
        }
    }

    /// Fills gaps from a fetched notifikasi row, same precedence as above.
    pub fn fill_from_row(&mut self, row: &NotifikasiRow) {
        if self.user_id.is_none() {
            self.user_id = Some(row.user_id);
        }
        if self.title.is_none() {
            self.title = Some(DEFAULT_TITLE.to_string());
        }
        if self.message.is_none() {
            self.message = Some(
                row.log
                    .clone()
                    .unwrap_or_else(|| FALLBACK_MESSAGE.to_string()),
            );
        }
    }

    pub fn finish(self) -> Result<Dispatch, DispatchError> {
        match (self.user_id, self.title, self.message) {
            (Some(user_id), Some(title), Some(message)) => Ok(Dispatch {
                user_id,
                title,
                message,
                data: self.data,
            }),
            _ => Err(DispatchError::MissingFields),
        }
    }
}

/// Fully resolved notification: exactly what the fan-out needs.
#[derive(Debug, Clone)]
pub struct Dispatch {
    pub user_id: i64,
    pub title: String,
    pub message: String,
    pub data: Map<String, Value>,
}
