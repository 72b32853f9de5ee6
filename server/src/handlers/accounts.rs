use crate::error::ApiError;
use crate::extract::{AuthUser, Json};
use crate::state::AppState;
use airport_booking::accounts::{obtain_token_impl, register_impl, update_user_impl, user_to_dto};
use airport_booking::dto::{CredentialsDto, TokenDto, UserDto, UserPatchDto};
use axum::{extract::State, http::StatusCode};

pub async fn register(
    State(state): State<AppState>,
    Json(form): Json<CredentialsDto>,
) -> Result<(StatusCode, Json<UserDto>), ApiError> {
    let user = register_impl(&state.db, form).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn obtain_token(
    State(state): State<AppState>,
    Json(form): Json<CredentialsDto>,
) -> Result<Json<TokenDto>, ApiError> {
    Ok(Json(obtain_token_impl(&state.db, form).await?))
}

pub async fn me(AuthUser(user): AuthUser) -> Json<UserDto> {
    Json(user_to_dto(user))
}

pub async fn update_me(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(form): Json<UserPatchDto>,
) -> Result<Json<UserDto>, ApiError> {
    Ok(Json(update_user_impl(&state.db, user, form).await?))
}
