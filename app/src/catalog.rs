//! Airports, airplane types, airplanes and crew.
//!
//! These collections only support list and create; airplanes additionally
//! accept an image upload.

use crate::dto::{
    AirplaneDto, AirplaneFormDto, AirplaneImageDto, AirplaneListDto, AirplaneTypeDto,
    AirplaneTypeFormDto, AirportDto, AirportFormDto, CrewDto, CrewFormDto,
};
use crate::entities::{airplane_types, airplanes, airports, crews, prelude::*};
use crate::error::{BookingError, FieldErrors, Result};
use crate::media;
use crate::repositories::airplane_types_by_ids;
use crate::validation::{check_min, check_text, invalid_pk};
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, QueryOrder, Set};
use std::path::Path;
use tracing::info;

// === DTO Conversions ===

pub fn airport_to_dto(airport: airports::Model) -> AirportDto {
    AirportDto {
        id: airport.id,
        name: airport.name,
        closest_big_city: airport.closest_big_city,
    }
}

pub fn airplane_type_to_dto(airplane_type: airplane_types::Model) -> AirplaneTypeDto {
    AirplaneTypeDto {
        id: airplane_type.id,
        name: airplane_type.name,
    }
}

pub fn airplane_to_dto(airplane: airplanes::Model) -> AirplaneDto {
    AirplaneDto {
        id: airplane.id,
        name: airplane.name,
        rows: airplane.rows,
        seats_in_row: airplane.seats_in_row,
        airplane_type: airplane.airplane_type_id,
    }
}

pub fn airplane_to_list_dto(airplane: airplanes::Model, type_name: String) -> AirplaneListDto {
    AirplaneListDto {
        id: airplane.id,
        capacity: airplane.capacity(),
        name: airplane.name,
        rows: airplane.rows,
        seats_in_row: airplane.seats_in_row,
        airplane_type: type_name,
        image: airplane.image.as_deref().map(media::media_url),
    }
}

pub fn crew_to_dto(crew: crews::Model) -> CrewDto {
    CrewDto {
        id: crew.id,
        first_name: crew.first_name,
        last_name: crew.last_name,
    }
}

// === Airports ===

pub async fn list_airports_impl<C: ConnectionTrait>(db: &C) -> Result<Vec<AirportDto>> {
    let airports = Airports::find()
        .order_by_asc(airports::Column::Id)
        .all(db)
        .await?;
    Ok(airports.into_iter().map(airport_to_dto).collect())
}

pub async fn create_airport_impl<C: ConnectionTrait>(
    db: &C,
    form: AirportFormDto,
) -> Result<AirportDto> {
    let mut errors = FieldErrors::new();
    check_text(&mut errors, "name", &form.name);
    check_text(&mut errors, "closest_big_city", &form.closest_big_city);
    errors.into_result()?;

    let airport = airports::ActiveModel {
        name: Set(form.name.trim().to_string()),
        closest_big_city: Set(form.closest_big_city.trim().to_string()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(airport_id = airport.id, "Created airport");
    Ok(airport_to_dto(airport))
}

// === Airplane types ===

pub async fn list_airplane_types_impl<C: ConnectionTrait>(
    db: &C,
) -> Result<Vec<AirplaneTypeDto>> {
    let types = AirplaneTypes::find()
        .order_by_asc(airplane_types::Column::Id)
        .all(db)
        .await?;
    Ok(types.into_iter().map(airplane_type_to_dto).collect())
}

pub async fn create_airplane_type_impl<C: ConnectionTrait>(
    db: &C,
    form: AirplaneTypeFormDto,
) -> Result<AirplaneTypeDto> {
    let mut errors = FieldErrors::new();
    check_text(&mut errors, "name", &form.name);
    errors.into_result()?;

    let airplane_type = airplane_types::ActiveModel {
        name: Set(form.name.trim().to_string()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    Ok(airplane_type_to_dto(airplane_type))
}

// === Airplanes ===

pub async fn list_airplanes_impl<C: ConnectionTrait>(db: &C) -> Result<Vec<AirplaneListDto>> {
    let airplanes = Airplanes::find()
        .order_by_asc(airplanes::Column::Name)
        .order_by_asc(airplanes::Column::Id)
        .all(db)
        .await?;
    let types = airplane_types_by_ids(db, airplanes.iter().map(|a| a.airplane_type_id)).await?;

    airplanes
        .into_iter()
        .map(|airplane| {
            let type_name = types
                .get(&airplane.airplane_type_id)
                .map(|t| t.name.clone())
                .ok_or_else(|| {
                    BookingError::not_found("Airplane type", airplane.airplane_type_id)
                })?;
            Ok(airplane_to_list_dto(airplane, type_name))
        })
        .collect()
}

pub async fn create_airplane_impl<C: ConnectionTrait>(
    db: &C,
    form: AirplaneFormDto,
) -> Result<AirplaneDto> {
    let mut errors = FieldErrors::new();
    check_text(&mut errors, "name", &form.name);
    check_min(&mut errors, "rows", form.rows, 1);
    check_min(&mut errors, "seats_in_row", form.seats_in_row, 1);
    if AirplaneTypes::find_by_id(form.airplane_type)
        .one(db)
        .await?
        .is_none()
    {
        errors.add("airplane_type", invalid_pk(form.airplane_type));
    }
    errors.into_result()?;

    let airplane = airplanes::ActiveModel {
        name: Set(form.name.trim().to_string()),
        rows: Set(form.rows),
        seats_in_row: Set(form.seats_in_row),
        airplane_type_id: Set(form.airplane_type),
        image: Set(None),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(airplane_id = airplane.id, capacity = airplane.capacity(), "Created airplane");
    Ok(airplane_to_dto(airplane))
}

/// Store an uploaded image and point the airplane at it.
pub async fn upload_airplane_image_impl<C: ConnectionTrait>(
    db: &C,
    media_root: &Path,
    airplane_id: i32,
    file_name: &str,
    bytes: &[u8],
) -> Result<AirplaneImageDto> {
    let airplane = Airplanes::find_by_id(airplane_id)
        .one(db)
        .await?
        .ok_or_else(|| BookingError::not_found("Airplane", airplane_id))?;

    if bytes.is_empty() {
        return Err(BookingError::field("image", "The submitted file is empty."));
    }

    let relative = media::airplane_image_path(&airplane.name, file_name);
    media::save(media_root, &relative, bytes).await?;

    let mut active: airplanes::ActiveModel = airplane.into();
    active.image = Set(Some(relative));
    let updated = active.update(db).await?;

    info!(airplane_id, "Stored airplane image");
    Ok(AirplaneImageDto {
        id: updated.id,
        image: updated.image.as_deref().map(media::media_url),
    })
}

// === Crew ===

pub async fn list_crew_impl<C: ConnectionTrait>(db: &C) -> Result<Vec<CrewDto>> {
    let crew = Crews::find()
        .order_by_asc(crews::Column::Id)
        .all(db)
        .await?;
    Ok(crew.into_iter().map(crew_to_dto).collect())
}

pub async fn create_crew_impl<C: ConnectionTrait>(db: &C, form: CrewFormDto) -> Result<CrewDto> {
    let mut errors = FieldErrors::new();
    check_text(&mut errors, "first_name", &form.first_name);
    check_text(&mut errors, "last_name", &form.last_name);
    errors.into_result()?;

    let crew = crews::ActiveModel {
        first_name: Set(form.first_name.trim().to_string()),
        last_name: Set(form.last_name.trim().to_string()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    Ok(crew_to_dto(crew))
}
