//! Request and response shapes.
//!
//! Each entity has up to three shapes: a compact list shape with display
//! fields, a nested detail shape, and a write shape that refers to related
//! rows by id. `*FormDto` types are request bodies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// === Airports ===

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AirportDto {
    pub id: i32,
    pub name: String,
    pub closest_big_city: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AirportFormDto {
    pub name: String,
    pub closest_big_city: String,
}

// === Airplane types ===

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AirplaneTypeDto {
    pub id: i32,
    pub name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AirplaneTypeFormDto {
    pub name: String,
}

// === Airplanes ===

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AirplaneDto {
    pub id: i32,
    pub name: String,
    pub rows: i32,
    pub seats_in_row: i32,
    pub airplane_type: i32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AirplaneFormDto {
    pub name: String,
    pub rows: i32,
    pub seats_in_row: i32,
    pub airplane_type: i32,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AirplaneListDto {
    pub id: i32,
    pub name: String,
    pub rows: i32,
    pub seats_in_row: i32,
    pub capacity: i64,
    /// Type name rather than id.
    pub airplane_type: String,
    /// Public URL of the uploaded image.
    pub image: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AirplaneImageDto {
    pub id: i32,
    pub image: Option<String>,
}

// === Crew ===

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CrewDto {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CrewFormDto {
    pub first_name: String,
    pub last_name: String,
}

// === Routes ===

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RouteDto {
    pub id: i32,
    pub source: i32,
    pub destination: i32,
    pub distance: i32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RouteFormDto {
    pub source: i32,
    pub destination: i32,
    pub distance: i32,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RouteListDto {
    pub id: i32,
    pub source: String,
    pub destination: String,
    pub distance: i32,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RouteDetailDto {
    pub id: i32,
    pub source: AirportDto,
    pub destination: AirportDto,
    pub distance: i32,
}

// === Flights ===

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FlightDto {
    pub id: i32,
    pub route: i32,
    pub airplane: i32,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
    pub crew: Vec<i32>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FlightFormDto {
    pub route: i32,
    pub airplane: i32,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
    #[serde(default)]
    pub crew: Vec<i32>,
}

/// Partial update: absent fields keep their stored value.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct FlightPatchDto {
    pub route: Option<i32>,
    pub airplane: Option<i32>,
    pub departure_time: Option<DateTime<Utc>>,
    pub arrival_time: Option<DateTime<Utc>>,
    pub crew: Option<Vec<i32>>,
}

impl From<FlightFormDto> for FlightPatchDto {
    fn from(form: FlightFormDto) -> Self {
        Self {
            route: Some(form.route),
            airplane: Some(form.airplane),
            departure_time: Some(form.departure_time),
            arrival_time: Some(form.arrival_time),
            crew: Some(form.crew),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FlightListDto {
    pub id: i32,
    /// Route display string, e.g. `"From: A in X to B in Y"`.
    pub route: String,
    pub airplane_name: String,
    pub airplane_capacity: i64,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
    /// Crew full names.
    pub crew: Vec<String>,
    pub tickets_available: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TakenPlaceDto {
    pub row: i32,
    pub seat: i32,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FlightDetailDto {
    pub id: i32,
    pub route: RouteDetailDto,
    pub airplane: AirplaneListDto,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
    pub crew: Vec<CrewDto>,
    pub taken_places: Vec<TakenPlaceDto>,
    pub tickets_available: i64,
}

// === Orders and tickets ===

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TicketDto {
    pub id: i32,
    pub row: i32,
    pub seat: i32,
    pub flight: i32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TicketFormDto {
    pub row: i32,
    pub seat: i32,
    pub flight: i32,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderDto {
    pub id: i32,
    pub tickets: Vec<TicketDto>,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OrderFormDto {
    pub tickets: Vec<TicketFormDto>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FlightSummaryDto {
    pub id: i32,
    pub route: String,
    pub airplane_name: String,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TicketListDto {
    pub id: i32,
    pub row: i32,
    pub seat: i32,
    pub flight: FlightSummaryDto,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderListDto {
    pub id: i32,
    pub tickets: Vec<TicketListDto>,
    pub created_at: DateTime<Utc>,
}

// === Accounts ===

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserDto {
    pub id: i32,
    pub email: String,
    pub is_staff: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CredentialsDto {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct UserPatchDto {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenDto {
    pub token: String,
}
