use crate::error::ApiError;
use crate::extract::{AdminUser, AuthUser, Json, Path, Query};
use crate::state::AppState;
use airport_booking::dto::{FlightDetailDto, FlightDto, FlightFormDto, FlightListDto, FlightPatchDto};
use airport_booking::flights::{
    FlightQuery, create_flight_impl, delete_flight_impl, get_flight_impl, list_flights_impl,
    update_flight_impl,
};
use axum::{extract::State, http::StatusCode};

pub async fn list_flights(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<FlightQuery>,
) -> Result<Json<Vec<FlightListDto>>, ApiError> {
    let filter = query.parse()?;
    Ok(Json(list_flights_impl(&state.db, filter).await?))
}

pub async fn get_flight(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<FlightDetailDto>, ApiError> {
    Ok(Json(get_flight_impl(&state.db, id).await?))
}

pub async fn create_flight(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(form): Json<FlightFormDto>,
) -> Result<(StatusCode, Json<FlightDto>), ApiError> {
    let flight = create_flight_impl(&state.db, form).await?;
    Ok((StatusCode::CREATED, Json(flight)))
}

/// `PUT`: every field is required and `crew` is replaced.
pub async fn replace_flight(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<i32>,
    Json(form): Json<FlightFormDto>,
) -> Result<Json<FlightDto>, ApiError> {
    Ok(Json(update_flight_impl(&state.db, id, form.into()).await?))
}

pub async fn patch_flight(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<i32>,
    Json(patch): Json<FlightPatchDto>,
) -> Result<Json<FlightDto>, ApiError> {
    Ok(Json(update_flight_impl(&state.db, id, patch).await?))
}

pub async fn delete_flight(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    delete_flight_impl(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
