use crate::error::ApiError;
use crate::extract::{AdminUser, AuthUser, Json, Path, Query};
use crate::state::AppState;
use airport_booking::dto::{RouteDetailDto, RouteDto, RouteFormDto, RouteListDto};
use airport_booking::routes::{RouteQuery, create_route_impl, get_route_impl, list_routes_impl};
use axum::{extract::State, http::StatusCode};

pub async fn list_routes(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<RouteQuery>,
) -> Result<Json<Vec<RouteListDto>>, ApiError> {
    Ok(Json(list_routes_impl(&state.db, query).await?))
}

pub async fn get_route(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<RouteDetailDto>, ApiError> {
    Ok(Json(get_route_impl(&state.db, id).await?))
}

pub async fn create_route(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(form): Json<RouteFormDto>,
) -> Result<(StatusCode, Json<RouteDto>), ApiError> {
    let route = create_route_impl(&state.db, form).await?;
    Ok((StatusCode::CREATED, Json(route)))
}
