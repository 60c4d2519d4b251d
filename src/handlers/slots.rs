//! Slot suggestion handler

use std::sync::Arc;

use anyhow::Result;
use async_nats::{Client, Subscriber};
use chrono::{DateTime, Duration, Utc};
use futures::StreamExt;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::db::store::SchedulingStore;
use crate::services::suggestion::{SlotSuggestionEngine, SuggestError};
use crate::types::{
    ErrorResponse, Request, SuccessResponse, SuggestSlotsRequest, SuggestSlotsResponse,
    SuggestionMetadata,
};

/// Helper macro for error responses
macro_rules! error_response {
    ($request_id:expr, $code:expr, $msg:expr) => {
        ErrorResponse::new($request_id, $code, $msg)
    };
}

/// Analysis window for a request received at `now`: opens at midnight UTC
/// of the following day and spans the configured number of weeks.
fn analysis_window(now: DateTime<Utc>, weeks: i64) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = (now.date_naive() + Duration::days(1))
        .and_hms_opt(0, 0, 0)
        .expect("midnight is valid")
        .and_utc();
    (start, start + Duration::weeks(weeks))
}

/// Assemble a full response for one request. Store failures degrade rather
/// than fail: missing events mean an empty calendar, a missing line means
/// basic scoring.
async fn build_response(
    store: &dyn SchedulingStore,
    analysis_window_weeks: i64,
    request: &SuggestSlotsRequest,
) -> Result<SuggestSlotsResponse, SuggestError> {
    let (window_start, window_end) = analysis_window(Utc::now(), analysis_window_weeks);

    let events = match store.fetch_events(window_start, window_end).await {
        Ok(events) => events,
        Err(e) => {
            warn!("Failed to load events, assuming empty calendar: {}", e);
            vec![]
        }
    };

    let sector = match store.resolve_line_sector(request.line_id).await {
        Ok(sector) => sector,
        Err(e) => {
            warn!(
                "Failed to resolve line {}, falling back to basic scoring: {}",
                request.line_id, e
            );
            None
        }
    };

    let degraded_mode = sector.is_none();
    let engine = SlotSuggestionEngine::new(window_start, window_end, events, sector);
    let suggestions = engine.suggest(request)?;

    Ok(SuggestSlotsResponse {
        suggestions,
        metadata: SuggestionMetadata {
            analysis_window_start: window_start,
            analysis_window_end: window_end,
            business_hours: "07:00-15:00 UTC (09:00-17:00 heure locale)".to_string(),
            holiday_policy: "Jours fériés français exclus (fixes et mobiles basés sur Pâques)"
                .to_string(),
            day_weights: "Début de semaine favorisé, vendredi pénalisé".to_string(),
            degraded_mode,
        },
    })
}

/// Handle slot suggestion requests
pub async fn handle_suggest(
    client: Client,
    mut subscriber: Subscriber,
    store: Arc<dyn SchedulingStore>,
    analysis_window_weeks: i64,
) -> Result<()> {
    while let Some(msg) = subscriber.next().await {
        debug!("Received slots.suggest message");

        let reply = match msg.reply {
            Some(ref reply) => reply.clone(),
            None => {
                warn!("Message without reply subject");
                continue;
            }
        };

        // Parse request
        let request: Request<SuggestSlotsRequest> = match serde_json::from_slice(&msg.payload) {
            Ok(req) => req,
            Err(e) => {
                error!("Failed to parse request: {}", e);
                let response = error_response!(Uuid::nil(), "INVALID_REQUEST", e.to_string());
                let _ = client
                    .publish(reply, serde_json::to_vec(&response)?.into())
                    .await;
                continue;
            }
        };

        match build_response(store.as_ref(), analysis_window_weeks, &request.payload).await {
            Ok(response) => {
                info!(
                    "slots.suggest: line {} -> {} suggestions (degraded: {})",
                    request.payload.line_id,
                    response.suggestions.len(),
                    response.metadata.degraded_mode,
                );
                let success = SuccessResponse::new(request.id, response);
                let _ = client
                    .publish(reply, serde_json::to_vec(&success)?.into())
                    .await;
            }
            Err(e @ SuggestError::InvalidDuration(_)) => {
                let response = error_response!(request.id, "INVALID_REQUEST", e.to_string());
                let _ = client
                    .publish(reply, serde_json::to_vec(&response)?.into())
                    .await;
            }
        }
    }

    Ok(())
}
