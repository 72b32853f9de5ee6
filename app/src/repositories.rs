//! Batch loaders for related rows.
//!
//! List endpoints load one page of parent rows, then fetch each kind of
//! related row with a single `IN (...)` query and stitch them together here.

use crate::entities::{
    airplane_types, airplanes, airports, crews, flight_crews, flights, prelude::*, routes, tickets,
};
use crate::error::{BookingError, Result};
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect};
use std::collections::{BTreeSet, HashMap};

/// A route with both endpoints resolved.
#[derive(Debug, Clone)]
pub struct RouteWithAirports {
    pub route: routes::Model,
    pub source: airports::Model,
    pub destination: airports::Model,
}

impl RouteWithAirports {
    pub fn display_name(&self) -> String {
        format!(
            "From: {} to {}",
            self.source.display_name(),
            self.destination.display_name()
        )
    }
}

fn unique_ids(ids: impl IntoIterator<Item = i32>) -> Vec<i32> {
    ids.into_iter().collect::<BTreeSet<_>>().into_iter().collect()
}

fn missing(resource: &str, id: i32) -> BookingError {
    BookingError::NotFound(format!("{resource} with id {id} is missing"))
}

pub async fn airports_by_ids<C: ConnectionTrait>(
    db: &C,
    ids: impl IntoIterator<Item = i32>,
) -> Result<HashMap<i32, airports::Model>> {
    let rows = Airports::find()
        .filter(airports::Column::Id.is_in(unique_ids(ids)))
        .all(db)
        .await?;
    Ok(rows.into_iter().map(|a| (a.id, a)).collect())
}

pub async fn airplanes_by_ids<C: ConnectionTrait>(
    db: &C,
    ids: impl IntoIterator<Item = i32>,
) -> Result<HashMap<i32, airplanes::Model>> {
    let rows = Airplanes::find()
        .filter(airplanes::Column::Id.is_in(unique_ids(ids)))
        .all(db)
        .await?;
    Ok(rows.into_iter().map(|a| (a.id, a)).collect())
}

pub async fn airplane_types_by_ids<C: ConnectionTrait>(
    db: &C,
    ids: impl IntoIterator<Item = i32>,
) -> Result<HashMap<i32, airplane_types::Model>> {
    let rows = AirplaneTypes::find()
        .filter(airplane_types::Column::Id.is_in(unique_ids(ids)))
        .all(db)
        .await?;
    Ok(rows.into_iter().map(|t| (t.id, t)).collect())
}

pub async fn flights_by_ids<C: ConnectionTrait>(
    db: &C,
    ids: impl IntoIterator<Item = i32>,
) -> Result<HashMap<i32, flights::Model>> {
    let rows = Flights::find()
        .filter(flights::Column::Id.is_in(unique_ids(ids)))
        .all(db)
        .await?;
    Ok(rows.into_iter().map(|f| (f.id, f)).collect())
}

/// Resolve source and destination airports for each route.
pub async fn attach_airports<C: ConnectionTrait>(
    db: &C,
    routes: Vec<routes::Model>,
) -> Result<Vec<RouteWithAirports>> {
    let airports = airports_by_ids(
        db,
        routes
            .iter()
            .flat_map(|r| [r.source_id, r.destination_id]),
    )
    .await?;

    routes
        .into_iter()
        .map(|route| {
            let source = airports
                .get(&route.source_id)
                .cloned()
                .ok_or_else(|| missing("Airport", route.source_id))?;
            let destination = airports
                .get(&route.destination_id)
                .cloned()
                .ok_or_else(|| missing("Airport", route.destination_id))?;
            Ok(RouteWithAirports {
                route,
                source,
                destination,
            })
        })
        .collect()
}

pub async fn routes_by_ids<C: ConnectionTrait>(
    db: &C,
    ids: impl IntoIterator<Item = i32>,
) -> Result<HashMap<i32, RouteWithAirports>> {
    let rows = Routes::find()
        .filter(routes::Column::Id.is_in(unique_ids(ids)))
        .all(db)
        .await?;
    Ok(attach_airports(db, rows)
        .await?
        .into_iter()
        .map(|r| (r.route.id, r))
        .collect())
}

/// Crew members per flight, each list ordered by crew id.
pub async fn crew_by_flight<C: ConnectionTrait>(
    db: &C,
    flight_ids: impl IntoIterator<Item = i32>,
) -> Result<HashMap<i32, Vec<crews::Model>>> {
    let links = FlightCrews::find()
        .filter(flight_crews::Column::FlightId.is_in(unique_ids(flight_ids)))
        .order_by_asc(flight_crews::Column::CrewId)
        .all(db)
        .await?;

    let members: HashMap<i32, crews::Model> = Crews::find()
        .filter(crews::Column::Id.is_in(unique_ids(links.iter().map(|l| l.crew_id))))
        .all(db)
        .await?
        .into_iter()
        .map(|c| (c.id, c))
        .collect();

    let mut result: HashMap<i32, Vec<crews::Model>> = HashMap::new();
    for link in links {
        let member = members
            .get(&link.crew_id)
            .cloned()
            .ok_or_else(|| missing("Crew", link.crew_id))?;
        result.entry(link.flight_id).or_default().push(member);
    }
    Ok(result)
}

/// Number of tickets sold per flight. Flights with no tickets are absent.
pub async fn ticket_counts<C: ConnectionTrait>(
    db: &C,
    flight_ids: impl IntoIterator<Item = i32>,
) -> Result<HashMap<i32, i64>> {
    let rows: Vec<(i32, i64)> = Tickets::find()
        .select_only()
        .column(tickets::Column::FlightId)
        .column_as(Expr::col(tickets::Column::Id).count(), "sold")
        .filter(tickets::Column::FlightId.is_in(unique_ids(flight_ids)))
        .group_by(tickets::Column::FlightId)
        .into_tuple()
        .all(db)
        .await?;
    Ok(rows.into_iter().collect())
}

/// Sold tickets of one flight, ordered by row then seat.
pub async fn tickets_for_flight<C: ConnectionTrait>(
    db: &C,
    flight_id: i32,
) -> Result<Vec<tickets::Model>> {
    Ok(Tickets::find()
        .filter(tickets::Column::FlightId.eq(flight_id))
        .order_by_asc(tickets::Column::Row)
        .order_by_asc(tickets::Column::Seat)
        .all(db)
        .await?)
}
