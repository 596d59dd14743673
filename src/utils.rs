use tracing::{info, warn};

use crate::{
    clients::{auth::AuthClient, fcm::FcmClient, store::StoreClient},
    config::Config,
    error::DispatchError,
    models::{
        request::{Draft, PushRequest, RawRequest},
        response::PushOutcome,
    },
};

/// Runs one push dispatch end to end: parse and classify the body, resolve
/// the notification, fetch the user's tokens, exchange credentials for a
/// bearer token, then send to every token in order. Each stage feeds the
/// next; a stage error short-circuits the rest.
pub async fn dispatch_push(
    raw_body: &str,
    config: &Config,
    store: &StoreClient,
    auth: &AuthClient,
    fcm: &FcmClient,
) -> Result<PushOutcome, DispatchError> {
    let raw: RawRequest = serde_json::from_str(raw_body)?;

    info!(
        has_record = raw.record.is_some(),
        user_id = raw.user_id,
        notifikasi_id = raw.notifikasi_id,
        event_type = raw.event_type.as_deref(),
        table = raw.table.as_deref(),
        schema = raw.schema.as_deref(),
        "Push dispatch invoked"
    );

    let dispatch = match raw.classify() {
        PushRequest::Direct { draft } => draft.finish()?,
        PushRequest::Webhook {
            record,
            notifikasi_id,
            mut draft,
        } => {
            if !record.is_warning() {
                info!("Record received but iswarning is not true; skipping push");
                return Ok(PushOutcome::skipped("iswarning not true"));
            }
            draft.fill_from_record(&record);
            if let Some(id) = notifikasi_id {
                lookup_fill(&mut draft, id, store).await?;
            }
            draft.finish()?
        }
        PushRequest::Lookup {
            notifikasi_id,
            mut draft,
        } => {
            lookup_fill(&mut draft, notifikasi_id, store).await?;
            draft.finish()?
        }
    };

    let tokens = store.fetch_device_tokens(dispatch.user_id).await?;

    if tokens.is_empty() {
        info!(user_id = dispatch.user_id, "No device tokens registered");
        return Ok(PushOutcome::Delivered {
            sent: 0,
            results: Vec::new(),
        });
    }

    let service_account = config.service_account()?;
    let access_token = auth.fetch_access_token(&service_account).await?;

    // Deliberately serial: one provider call completes before the next
    // begins, and results keep token fetch order.
    let mut results = Vec::with_capacity(tokens.len());
    for device in &tokens {
        let result = fcm
            .send(
                &access_token,
                &device.token,
                &dispatch.title,
                &dispatch.message,
                &dispatch.data,
            )
            .await?;

        if !result.ok {
            warn!(status = result.status, "FCM send failed for token");
        }
        results.push(result);
    }

    info!(
        user_id = dispatch.user_id,
        title = %dispatch.title,
        sent = results.len(),
        "Push summary"
    );

    Ok(PushOutcome::Delivered {
        sent: results.len(),
        results,
    })
}

async fn lookup_fill(
    draft: &mut Draft,
    id: i64,
    store: &StoreClient,
) -> Result<(), DispatchError> {
    let row = store
        .fetch_notifikasi(id)
        .await?
        .ok_or(DispatchError::NotifikasiNotFound)?;
    draft.fill_from_row(&row);
    Ok(())
}
