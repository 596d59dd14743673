use serde::Serialize;

use crate::models::fcm::DeliveryResult;

/// The two non-error terminal responses, both HTTP 200.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum PushOutcome {
    Skipped {
        skipped: bool,
        reason: String,
    },
    Delivered {
        sent: usize,
        results: Vec<DeliveryResult>,
    },
}

impl PushOutcome {
    pub fn skipped(reason: &str) -> Self {
        PushOutcome::Skipped {
            skipped: true,
            reason: reason.to_string(),
        }
    }
}
