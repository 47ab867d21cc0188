//! Dashboard handlers
//!
//! Summary cards, charts, and diagnostics derived from the current snapshot.

use crate::dto::DashboardResponse;
use crate::state::AppState;
use actix_web::web::{self, Data, Json};
use callboard_core::AppError;
use chrono::Utc;
use tracing::{debug, instrument};

/// Get the dashboard
///
/// GET /api/v1/dashboard
#[instrument(skip(state))]
pub async fn get_dashboard(state: Data<AppState>) -> Result<Json<DashboardResponse>, AppError> {
    state.ensure_access()?;

    let snapshot = state.store.current().await?;
    let summary = state.dashboard.summary(&snapshot, Utc::now());

    debug!(
        "Dashboard for snapshot {}: {} calls this month",
        snapshot.id(),
        summary.current_month_totals.calls
    );

    Ok(Json(DashboardResponse::new(
        &summary,
        &snapshot,
        state.analytics.cost_sample_display,
    )))
}

/// Configure dashboard routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/dashboard", web::get().to(get_dashboard));
}
