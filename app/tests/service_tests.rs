#![allow(clippy::unwrap_used)]

//! Flight and order services against an in-memory database.

use airport_booking::catalog::{
    create_airplane_impl, create_airplane_type_impl, create_airport_impl, create_crew_impl,
};
use airport_booking::db::connect_and_migrate;
use airport_booking::dto::{
    AirplaneFormDto, AirplaneTypeFormDto, AirportFormDto, CrewFormDto, FlightFormDto,
    FlightPatchDto, OrderFormDto, RouteFormDto, TicketFormDto,
};
use airport_booking::error::BookingError;
use airport_booking::flights::{
    FlightQuery, create_flight_impl, get_flight_impl, list_flights_impl, update_flight_impl,
};
use airport_booking::orders::{create_order_impl, list_orders_impl};
use airport_booking::pagination::PageRequest;
use airport_booking::routes::create_route_impl;
use airport_booking::accounts::create_user;
use airport_booking::dto::CredentialsDto;
use chrono::{TimeZone, Utc};
use sea_orm::DatabaseConnection;

struct Ids {
    route: i32,
    airplane: i32,
    crew: i32,
    flight: i32,
    user: i32,
}

async fn setup() -> (DatabaseConnection, Ids) {
    let db = connect_and_migrate("sqlite::memory:").await.unwrap();
    let mut airport_ids = Vec::new();
    for (name, city) in [("Boryspil", "Kyiv"), ("Chopin", "Warsaw")] {
        let airport = create_airport_impl(
            &db,
            AirportFormDto {
                name: name.to_string(),
                closest_big_city: city.to_string(),
            },
        )
        .await
        .unwrap();
        airport_ids.push(airport.id);
    }
    let route = create_route_impl(
        &db,
        RouteFormDto {
            source: airport_ids[0],
            destination: airport_ids[1],
            distance: 690,
        },
    )
    .await
    .unwrap();
    let airplane_type = create_airplane_type_impl(
        &db,
        AirplaneTypeFormDto {
            name: "Narrow-body".to_string(),
        },
    )
    .await
    .unwrap();
    let airplane = create_airplane_impl(
        &db,
        AirplaneFormDto {
            name: "A320".to_string(),
            rows: 3,
            seats_in_row: 2,
            airplane_type: airplane_type.id,
        },
    )
    .await
    .unwrap();
    let crew = create_crew_impl(
        &db,
        CrewFormDto {
            first_name: "Amelia".to_string(),
            last_name: "Earhart".to_string(),
        },
    )
    .await
    .unwrap();
    let flight = create_flight_impl(
        &db,
        FlightFormDto {
            route: route.id,
            airplane: airplane.id,
            departure_time: Utc.with_ymd_and_hms(2024, 1, 4, 10, 0, 0).unwrap(),
            arrival_time: Utc.with_ymd_and_hms(2024, 1, 4, 12, 0, 0).unwrap(),
            crew: vec![crew.id, crew.id],
        },
    )
    .await
    .unwrap();
    let user = create_user(
        &db,
        CredentialsDto {
            email: "user@example.com".to_string(),
            password: "secret1".to_string(),
        },
        false,
    )
    .await
    .unwrap();

    let ids = Ids {
        route: route.id,
        airplane: airplane.id,
        crew: crew.id,
        flight: flight.id,
        user: user.id,
    };
    (db, ids)
}

fn order(tickets: &[(i32, i32, i32)]) -> OrderFormDto {
    OrderFormDto {
        tickets: tickets
            .iter()
            .map(|&(row, seat, flight)| TicketFormDto { row, seat, flight })
            .collect(),
    }
}

#[tokio::test]
async fn test_duplicate_crew_ids_collapse() {
    let (db, ids) = setup().await;
    let detail = get_flight_impl(&db, ids.flight).await.unwrap();
    assert_eq!(detail.crew.len(), 1);
    assert_eq!(detail.crew[0].id, ids.crew);
}

#[tokio::test]
async fn test_availability_after_orders() {
    let (db, ids) = setup().await;
    create_order_impl(&db, ids.user, order(&[(1, 1, ids.flight), (3, 2, ids.flight)]))
        .await
        .unwrap();

    let detail = get_flight_impl(&db, ids.flight).await.unwrap();
    assert_eq!(detail.tickets_available, 3 * 2 - 2);

    let filter = FlightQuery::default().parse().unwrap();
    let list = list_flights_impl(&db, filter).await.unwrap();
    assert_eq!(list[0].tickets_available, 4);
    assert_eq!(list[0].airplane_capacity, 6);
}

#[tokio::test]
async fn test_failed_order_leaves_no_rows() {
    let (db, ids) = setup().await;
    create_order_impl(&db, ids.user, order(&[(2, 2, ids.flight)]))
        .await
        .unwrap();

    let err = create_order_impl(&db, ids.user, order(&[(1, 1, ids.flight), (2, 2, ids.flight)]))
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::Conflict(_)));

    let page = list_orders_impl(
        &db,
        ids.user,
        PageRequest {
            page: 1,
            page_size: 10,
        },
        "/orders/",
    )
    .await
    .unwrap();
    assert_eq!(page.count, 1);
    let detail = get_flight_impl(&db, ids.flight).await.unwrap();
    assert_eq!(detail.taken_places.len(), 1);
}

#[tokio::test]
async fn test_patch_keeps_unspecified_fields() {
    let (db, ids) = setup().await;
    let updated = update_flight_impl(
        &db,
        ids.flight,
        FlightPatchDto {
            arrival_time: Some(Utc.with_ymd_and_hms(2024, 1, 4, 14, 0, 0).unwrap()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.route, ids.route);
    assert_eq!(updated.airplane, ids.airplane);
    assert_eq!(updated.crew, vec![ids.crew]);
    assert_eq!(
        updated.arrival_time,
        Utc.with_ymd_and_hms(2024, 1, 4, 14, 0, 0).unwrap()
    );
}

#[tokio::test]
async fn test_patch_rejects_arrival_before_departure() {
    let (db, ids) = setup().await;
    let err = update_flight_impl(
        &db,
        ids.flight,
        FlightPatchDto {
            departure_time: Some(Utc.with_ymd_and_hms(2024, 1, 4, 13, 0, 0).unwrap()),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    let BookingError::Validation(fields) = err else {
        unreachable!("expected validation error");
    };
    assert!(fields.get("arrival_time").is_some());
}

#[tokio::test]
async fn test_update_unknown_flight() {
    let (db, _) = setup().await;
    let err = update_flight_impl(&db, 999, FlightPatchDto::default())
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::NotFound(_)));
}
