//! Call history handlers
//!
//! Paged history rows, the per-call detail card, and snapshot refresh.

use crate::dto::{
    ApiResponse, CallCard, CallListResponse, CallRow, PageMeta, PaginationParams, SnapshotMeta,
};
use crate::state::AppState;
use actix_web::web::{self, Data, Json, Path, Query};
use callboard_analytics::paginate;
use callboard_core::AppError;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

/// List one page of calls
///
/// A page past the end is not an error; it comes back with no rows.
///
/// # Examples
///
/// ```text
/// GET /api/v1/calls?page=2&per_page=50
/// ```
#[instrument(skip(state, query))]
pub async fn list_calls(
    query: Query<PaginationParams>,
    state: Data<AppState>,
) -> Result<Json<CallListResponse>, AppError> {
    state.ensure_access()?;

    query.validate().map_err(|e| {
        warn!("Invalid query parameters: {}", e);
        AppError::Validation(e.to_string())
    })?;

    let snapshot = state.store.current().await?;
    let per_page = query.per_page_or(state.analytics.page_size);
    let page = paginate(
        snapshot.records(),
        per_page,
        query.page(),
        state.analytics.max_page_buttons,
    );

    if page.is_out_of_range() {
        debug!(
            "Page {} requested, only {} available",
            page.page, page.total_pages
        );
    }

    let zone = state.zone();
    let data = page.items.iter().map(|c| CallRow::new(c, &zone)).collect();

    Ok(Json(CallListResponse {
        data,
        pagination: PageMeta::from(&page),
        snapshot: SnapshotMeta::from(&snapshot),
    }))
}

/// Get the detail card for one call
///
/// # Examples
///
/// ```text
/// GET /api/v1/calls/call_8f2e
/// ```
#[instrument(skip(state))]
pub async fn get_call(
    path: Path<String>,
    state: Data<AppState>,
) -> Result<Json<ApiResponse<CallCard>>, AppError> {
    state.ensure_access()?;

    let call_id = path.into_inner();
    let snapshot = state.store.current().await?;

    let call = snapshot
        .find(&call_id)
        .ok_or_else(|| AppError::NotFound(format!("Call {} not found", call_id)))?;

    Ok(Json(ApiResponse::success(CallCard::new(call, &state.zone()))))
}

/// Replace the snapshot with a fresh fetch
///
/// POST /api/v1/calls/refresh
#[instrument(skip(state))]
pub async fn refresh_calls(
    state: Data<AppState>,
) -> Result<Json<ApiResponse<SnapshotMeta>>, AppError> {
    state.ensure_access()?;

    let snapshot = state.store.refresh().await?;
    state.dashboard.invalidate();

    info!("Refreshed calls: {} records", snapshot.len());

    Ok(Json(ApiResponse::with_message(
        SnapshotMeta::from(&snapshot),
        "Calls refreshed",
    )))
}

/// Configure call history routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/calls")
            .route("", web::get().to(list_calls))
            .route("/refresh", web::post().to(refresh_calls))
            .route("/{call_id}", web::get().to(get_call)),
    );
}
