//! Orders are visible to and created by their owner only; no admin rule applies.

use crate::error::ApiError;
use crate::extract::{AuthUser, Json, Query};
use crate::state::AppState;
use airport_booking::dto::{OrderDto, OrderFormDto, OrderListDto};
use airport_booking::orders::{create_order_impl, list_orders_impl};
use airport_booking::pagination::{Page, PageQuery, PageRequest};
use axum::{extract::State, http::StatusCode};

pub const ORDERS_PATH: &str = "/api/airport/orders/";

pub async fn list_orders(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Query(query): Query<PageQuery>,
) -> Result<Json<Page<OrderListDto>>, ApiError> {
    let request = PageRequest::from_query(&query, state.order_page_size)?;
    let page = list_orders_impl(&state.db, user.id, request, ORDERS_PATH).await?;
    Ok(Json(page))
}

pub async fn create_order(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(form): Json<OrderFormDto>,
) -> Result<(StatusCode, Json<OrderDto>), ApiError> {
    let order = create_order_impl(&state.db, user.id, form).await?;
    Ok((StatusCode::CREATED, Json(order)))
}
