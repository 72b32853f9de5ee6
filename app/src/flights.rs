//! Flights: filtered listing, detail with seat availability, and admin writes.

use crate::catalog::{airplane_to_list_dto, crew_to_dto};
use crate::dto::{
    FlightDetailDto, FlightDto, FlightFormDto, FlightListDto, FlightPatchDto, TakenPlaceDto,
};
use crate::entities::{crews, flight_crews, flights, prelude::*};
use crate::error::{BookingError, FieldErrors, Result};
use crate::repositories::{
    airplane_types_by_ids, airplanes_by_ids, crew_by_flight, routes_by_ids, ticket_counts,
    tickets_for_flight,
};
use crate::routes::{find_route, route_to_detail_dto};
use crate::validation::invalid_pk;
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::Deserialize;
use std::collections::BTreeSet;
use tracing::info;

/// Raw query parameters of the flight list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FlightQuery {
    pub route: Option<String>,
    /// Calendar date, `YYYY-MM-DD`, interpreted in UTC.
    pub departure_time: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlightFilter {
    pub route: Option<i32>,
    /// Half-open `[start, end)` covering one UTC day.
    pub departure: Option<(DateTime<Utc>, DateTime<Utc>)>,
}

fn day_bounds(date: NaiveDate) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let start = date.and_hms_opt(0, 0, 0)?.and_utc();
    let end = date.succ_opt()?.and_hms_opt(0, 0, 0)?.and_utc();
    Some((start, end))
}

impl FlightQuery {
    /// Parse both parameters, reporting every malformed one.
    pub fn parse(&self) -> Result<FlightFilter> {
        let mut errors = FieldErrors::new();
        let mut filter = FlightFilter::default();

        if let Some(raw) = self.route.as_deref().filter(|r| !r.is_empty()) {
            match raw.trim().parse::<i32>() {
                Ok(id) => filter.route = Some(id),
                Err(_) => errors.add("route", "A valid integer is required."),
            }
        }

        if let Some(raw) = self.departure_time.as_deref().filter(|r| !r.is_empty()) {
            match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
                .ok()
                .and_then(day_bounds)
            {
                Some(bounds) => filter.departure = Some(bounds),
                None => errors.add(
                    "departure_time",
                    "Date has wrong format. Use one of these formats instead: YYYY-MM-DD.",
                ),
            }
        }

        errors.into_result()?;
        Ok(filter)
    }
}

/// Seats left on a flight: capacity minus tickets sold.
pub fn tickets_available(capacity: i64, sold: i64) -> i64 {
    capacity - sold
}

async fn crew_ids<C: ConnectionTrait>(db: &C, flight_id: i32) -> Result<Vec<i32>> {
    Ok(FlightCrews::find()
        .filter(flight_crews::Column::FlightId.eq(flight_id))
        .order_by_asc(flight_crews::Column::CrewId)
        .all(db)
        .await?
        .into_iter()
        .map(|link| link.crew_id)
        .collect())
}

fn flight_to_dto(flight: flights::Model, crew: Vec<i32>) -> FlightDto {
    FlightDto {
        id: flight.id,
        route: flight.route_id,
        airplane: flight.airplane_id,
        departure_time: flight.departure_time,
        arrival_time: flight.arrival_time,
        crew,
    }
}

// === Reads ===

pub async fn list_flights_impl<C: ConnectionTrait>(
    db: &C,
    filter: FlightFilter,
) -> Result<Vec<FlightListDto>> {
    let mut select = Flights::find()
        .order_by_desc(flights::Column::DepartureTime)
        .order_by_desc(flights::Column::Id);
    if let Some(route_id) = filter.route {
        select = select.filter(flights::Column::RouteId.eq(route_id));
    }
    if let Some((start, end)) = filter.departure {
        select = select
            .filter(flights::Column::DepartureTime.gte(start))
            .filter(flights::Column::DepartureTime.lt(end));
    }
    let flights = select.all(db).await?;

    let flight_ids: Vec<i32> = flights.iter().map(|f| f.id).collect();
    let routes = routes_by_ids(db, flights.iter().map(|f| f.route_id)).await?;
    let airplanes = airplanes_by_ids(db, flights.iter().map(|f| f.airplane_id)).await?;
    let mut crew = crew_by_flight(db, flight_ids.iter().copied()).await?;
    let sold = ticket_counts(db, flight_ids).await?;

    flights
        .into_iter()
        .map(|flight| {
            let route = routes
                .get(&flight.route_id)
                .ok_or_else(|| BookingError::not_found("Route", flight.route_id))?;
            let airplane = airplanes
                .get(&flight.airplane_id)
                .ok_or_else(|| BookingError::not_found("Airplane", flight.airplane_id))?;
            let capacity = airplane.capacity();
            Ok(FlightListDto {
                id: flight.id,
                route: route.display_name(),
                airplane_name: airplane.name.clone(),
                airplane_capacity: capacity,
                departure_time: flight.departure_time,
                arrival_time: flight.arrival_time,
                crew: crew
                    .remove(&flight.id)
                    .unwrap_or_default()
                    .iter()
                    .map(crews::Model::full_name)
                    .collect(),
                tickets_available: tickets_available(
                    capacity,
                    sold.get(&flight.id).copied().unwrap_or(0),
                ),
            })
        })
        .collect()
}

pub async fn get_flight_impl<C: ConnectionTrait>(db: &C, id: i32) -> Result<FlightDetailDto> {
    let flight = Flights::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| BookingError::not_found("Flight", id))?;

    let route = find_route(db, flight.route_id).await?;
    let airplane = airplanes_by_ids(db, [flight.airplane_id])
        .await?
        .remove(&flight.airplane_id)
        .ok_or_else(|| BookingError::not_found("Airplane", flight.airplane_id))?;
    let type_name = airplane_types_by_ids(db, [airplane.airplane_type_id])
        .await?
        .remove(&airplane.airplane_type_id)
        .map(|t| t.name)
        .ok_or_else(|| BookingError::not_found("Airplane type", airplane.airplane_type_id))?;
    let crew = crew_by_flight(db, [flight.id])
        .await?
        .remove(&flight.id)
        .unwrap_or_default();
    let taken = tickets_for_flight(db, flight.id).await?;

    let sold = i64::try_from(taken.len()).unwrap_or(i64::MAX);
    let capacity = airplane.capacity();

    Ok(FlightDetailDto {
        id: flight.id,
        route: route_to_detail_dto(route),
        airplane: airplane_to_list_dto(airplane, type_name),
        departure_time: flight.departure_time,
        arrival_time: flight.arrival_time,
        crew: crew.into_iter().map(crew_to_dto).collect(),
        taken_places: taken
            .into_iter()
            .map(|t| TakenPlaceDto {
                row: t.row,
                seat: t.seat,
            })
            .collect(),
        tickets_available: tickets_available(capacity, sold),
    })
}

// === Writes ===

/// A complete set of flight fields, after merging a patch onto stored values.
struct FlightFields {
    route: i32,
    airplane: i32,
    departure_time: DateTime<Utc>,
    arrival_time: DateTime<Utc>,
    crew: Option<Vec<i32>>,
}

async fn validate_flight<C: ConnectionTrait>(db: &C, fields: &FlightFields) -> Result<()> {
    let mut errors = FieldErrors::new();

    if Routes::find_by_id(fields.route).one(db).await?.is_none() {
        errors.add("route", invalid_pk(fields.route));
    }
    if Airplanes::find_by_id(fields.airplane)
        .one(db)
        .await?
        .is_none()
    {
        errors.add("airplane", invalid_pk(fields.airplane));
    }
    if fields.arrival_time <= fields.departure_time {
        errors.add("arrival_time", "Arrival time must be after departure time.");
    }
    if let Some(crew) = &fields.crew {
        let requested: BTreeSet<i32> = crew.iter().copied().collect();
        let known: BTreeSet<i32> = Crews::find()
            .filter(crews::Column::Id.is_in(requested.iter().copied()))
            .all(db)
            .await?
            .into_iter()
            .map(|c| c.id)
            .collect();
        for id in requested.difference(&known) {
            errors.add("crew", invalid_pk(*id));
        }
    }

    errors.into_result()
}

/// Replace the crew links of a flight with `crew`.
async fn set_crew<C: ConnectionTrait>(db: &C, flight_id: i32, crew: &[i32]) -> Result<()> {
    FlightCrews::delete_many()
        .filter(flight_crews::Column::FlightId.eq(flight_id))
        .exec(db)
        .await?;

    let unique: BTreeSet<i32> = crew.iter().copied().collect();
    if unique.is_empty() {
        return Ok(());
    }
    FlightCrews::insert_many(unique.into_iter().map(|crew_id| flight_crews::ActiveModel {
        flight_id: Set(flight_id),
        crew_id: Set(crew_id),
    }))
    .exec_without_returning(db)
    .await?;
    Ok(())
}

pub async fn create_flight_impl(db: &DatabaseConnection, form: FlightFormDto) -> Result<FlightDto> {
    let fields = FlightFields {
        route: form.route,
        airplane: form.airplane,
        departure_time: form.departure_time,
        arrival_time: form.arrival_time,
        crew: Some(form.crew),
    };
    validate_flight(db, &fields).await?;

    let txn = db.begin().await?;
    let flight = flights::ActiveModel {
        route_id: Set(fields.route),
        airplane_id: Set(fields.airplane),
        departure_time: Set(fields.departure_time),
        arrival_time: Set(fields.arrival_time),
        ..Default::default()
    }
    .insert(&txn)
    .await?;
    set_crew(&txn, flight.id, fields.crew.as_deref().unwrap_or_default()).await?;
    let crew = crew_ids(&txn, flight.id).await?;
    txn.commit().await?;

    info!(flight_id = flight.id, route_id = flight.route_id, "Created flight");
    Ok(flight_to_dto(flight, crew))
}

/// Full (`PUT`) and partial (`PATCH`) update. Absent fields keep their value;
/// a present `crew` replaces the whole crew list.
pub async fn update_flight_impl(
    db: &DatabaseConnection,
    id: i32,
    patch: FlightPatchDto,
) -> Result<FlightDto> {
    let existing = Flights::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| BookingError::not_found("Flight", id))?;

    let fields = FlightFields {
        route: patch.route.unwrap_or(existing.route_id),
        airplane: patch.airplane.unwrap_or(existing.airplane_id),
        departure_time: patch.departure_time.unwrap_or(existing.departure_time),
        arrival_time: patch.arrival_time.unwrap_or(existing.arrival_time),
        crew: patch.crew,
    };
    validate_flight(db, &fields).await?;

    let txn = db.begin().await?;
    let mut active: flights::ActiveModel = existing.into();
    active.route_id = Set(fields.route);
    active.airplane_id = Set(fields.airplane);
    active.departure_time = Set(fields.departure_time);
    active.arrival_time = Set(fields.arrival_time);
    let flight = active.update(&txn).await?;
    if let Some(crew) = &fields.crew {
        set_crew(&txn, flight.id, crew).await?;
    }
    let crew = crew_ids(&txn, flight.id).await?;
    txn.commit().await?;

    info!(flight_id = flight.id, "Updated flight");
    Ok(flight_to_dto(flight, crew))
}

/// Delete a flight; its tickets and crew links go with it.
pub async fn delete_flight_impl<C: ConnectionTrait>(db: &C, id: i32) -> Result<()> {
    let result = Flights::delete_by_id(id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(BookingError::not_found("Flight", id));
    }
    info!(flight_id = id, "Deleted flight");
    Ok(())
}
