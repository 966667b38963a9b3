use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use axum_extra::extract::WithRejection;
use mtr_db::{models::MentorStatsRow, repositories::mentor as mentor_repo};
use mtr_domain::{MentorStats, TierProgress, tiers::tier_progress};
use serde::Serialize;
use uuid::Uuid;

use crate::{ApiState, error::ApiError, middleware::rate_limit};

pub fn routes() -> Router<ApiState> {
    use crate::make_rate_limit_layer;

    Router::new()
        .route("/mentors/{id}/rewards", get(mentor_rewards))
        .layer(make_rate_limit_layer!(
            rate_limit::GENERAL_REPLENISH_MS,
            rate_limit::GENERAL_BURST_SIZE
        ))
}

#[derive(Debug, Serialize)]
pub struct RewardsResponse {
    pub success: bool,
    pub rewards: TierProgress,
}

/// Clamp a stored count into `0..=u32::MAX`
fn saturating_count(value: impl Into<i64>) -> u32 {
    u32::try_from(value.into().max(0)).unwrap_or(u32::MAX)
}

fn stats_from_row(row: MentorStatsRow) -> MentorStats {
    MentorStats {
        sessions_completed: saturating_count(row.sessions_completed),
        average_rating: row.average_rating,
        programs_created: saturating_count(row.programs_created),
    }
}

/// Current tier, progress toward the next one and the commission rate
async fn mentor_rewards(
    State(state): State<ApiState>,
    WithRejection(Path(mentor_id), _): WithRejection<Path<Uuid>, ApiError>,
) -> Result<Json<RewardsResponse>, ApiError> {
    let row = mentor_repo::find_stats(&state.pool, mentor_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Mentor not found".to_string()))?;

    Ok(Json(RewardsResponse {
        success: true,
        rewards: tier_progress(&stats_from_row(row)),
    }))
}
