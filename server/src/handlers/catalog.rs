//! Airports, airplane types, airplanes and crew.

use crate::error::ApiError;
use crate::extract::{AdminUser, AuthUser, Json, Multipart, Path};
use crate::state::AppState;
use airport_booking::catalog::{
    create_airplane_impl, create_airplane_type_impl, create_airport_impl, create_crew_impl,
    list_airplane_types_impl, list_airplanes_impl, list_airports_impl, list_crew_impl,
    upload_airplane_image_impl,
};
use airport_booking::dto::{
    AirplaneDto, AirplaneFormDto, AirplaneImageDto, AirplaneListDto, AirplaneTypeDto,
    AirplaneTypeFormDto, AirportDto, AirportFormDto, CrewDto, CrewFormDto,
};
use airport_booking::error::BookingError;
use axum::{
    extract::State,
    http::StatusCode,
};

const IMAGE_FIELD: &str = "image";

pub async fn list_airports(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<Json<Vec<AirportDto>>, ApiError> {
    Ok(Json(list_airports_impl(&state.db).await?))
}

pub async fn create_airport(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(form): Json<AirportFormDto>,
) -> Result<(StatusCode, Json<AirportDto>), ApiError> {
    let airport = create_airport_impl(&state.db, form).await?;
    Ok((StatusCode::CREATED, Json(airport)))
}

pub async fn list_airplane_types(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<Json<Vec<AirplaneTypeDto>>, ApiError> {
    Ok(Json(list_airplane_types_impl(&state.db).await?))
}

pub async fn create_airplane_type(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(form): Json<AirplaneTypeFormDto>,
) -> Result<(StatusCode, Json<AirplaneTypeDto>), ApiError> {
    let airplane_type = create_airplane_type_impl(&state.db, form).await?;
    Ok((StatusCode::CREATED, Json(airplane_type)))
}

pub async fn list_airplanes(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<Json<Vec<AirplaneListDto>>, ApiError> {
    Ok(Json(list_airplanes_impl(&state.db).await?))
}

pub async fn create_airplane(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(form): Json<AirplaneFormDto>,
) -> Result<(StatusCode, Json<AirplaneDto>), ApiError> {
    let airplane = create_airplane_impl(&state.db, form).await?;
    Ok((StatusCode::CREATED, Json(airplane)))
}

/// Multipart upload; the file must arrive in the `image` field.
pub async fn upload_airplane_image(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<i32>,
    Multipart(mut multipart): Multipart,
) -> Result<Json<AirplaneImageDto>, ApiError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await?;
        let image =
            upload_airplane_image_impl(&state.db, &state.media_root, id, &file_name, &bytes)
                .await?;
        return Ok(Json(image));
    }
    Err(BookingError::field(IMAGE_FIELD, "No file was submitted.").into())
}

pub async fn list_crew(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<Json<Vec<CrewDto>>, ApiError> {
    Ok(Json(list_crew_impl(&state.db).await?))
}

pub async fn create_crew(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(form): Json<CrewFormDto>,
) -> Result<(StatusCode, Json<CrewDto>), ApiError> {
    let crew = create_crew_impl(&state.db, form).await?;
    Ok((StatusCode::CREATED, Json(crew)))
}
