//! Identity endpoint

use crate::state::AppState;
use crate::{ApiResult, AuthUser, MeResponse, ProfileDto};

use blog_db::ProfileRepository;

use axum::{Json, extract::State};

/// GET /api/v1/me
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> ApiResult<Json<MeResponse>> {
    let profile = ProfileRepository::new(state.pool.clone())
        .find_by_user(user.id)
        .await?;

    Ok(Json(MeResponse {
        user: user.into(),
        profile: profile.map(ProfileDto::from),
    }))
}
