use axum::Router;

use crate::{auth, mentee, mentor, program, rewards, state::ApiState};

/// V1 API routes
pub fn routes() -> Router<ApiState> {
    Router::new()
        .merge(mentee::routes())
        .merge(mentor::routes())
        .merge(auth::routes())
        .merge(program::routes())
        .merge(rewards::routes())
}
