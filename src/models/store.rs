use serde::Deserialize;
use serde_json::Value;

/// Row of the `notifikasi` table, as returned by the REST data store for
/// the columns the dispatcher selects.
#[derive(Debug, Clone, Deserialize)]
pub struct NotifikasiRow {
    pub id: i64,
    pub user_id: i64,
    pub log: Option<String>,
    pub iswarning: Option<Value>,
    pub timestamp: Option<String>,
}

/// One registered device for a user. Read-only here: the dispatcher never
/// registers or cleans up tokens.
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceToken {
    pub token: String,
}
