use crate::catalog::airport_to_dto;
use crate::dto::{RouteDetailDto, RouteDto, RouteFormDto, RouteListDto};
use crate::entities::{airports, prelude::*, routes};
use crate::error::{BookingError, FieldErrors, Result};
use crate::repositories::{airports_by_ids, attach_airports, RouteWithAirports};
use crate::validation::{check_min, invalid_pk};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::Deserialize;
use tracing::info;

/// Filters for the route list. Both match the airport name exactly.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RouteQuery {
    pub source: Option<String>,
    pub destination: Option<String>,
}

pub fn route_to_dto(route: routes::Model) -> RouteDto {
    RouteDto {
        id: route.id,
        source: route.source_id,
        destination: route.destination_id,
        distance: route.distance,
    }
}

pub fn route_to_list_dto(route: RouteWithAirports) -> RouteListDto {
    RouteListDto {
        id: route.route.id,
        source: route.source.name,
        destination: route.destination.name,
        distance: route.route.distance,
    }
}

pub fn route_to_detail_dto(route: RouteWithAirports) -> RouteDetailDto {
    RouteDetailDto {
        id: route.route.id,
        source: airport_to_dto(route.source),
        destination: airport_to_dto(route.destination),
        distance: route.route.distance,
    }
}

async fn airport_ids_named<C: ConnectionTrait>(db: &C, name: &str) -> Result<Vec<i32>> {
    Ok(Airports::find()
        .filter(airports::Column::Name.eq(name))
        .all(db)
        .await?
        .into_iter()
        .map(|a| a.id)
        .collect())
}

pub async fn list_routes_impl<C: ConnectionTrait>(
    db: &C,
    query: RouteQuery,
) -> Result<Vec<RouteListDto>> {
    let mut select = Routes::find().order_by_asc(routes::Column::Id);

    if let Some(source) = query.source.as_deref() {
        let ids = airport_ids_named(db, source).await?;
        select = select.filter(routes::Column::SourceId.is_in(ids));
    }
    if let Some(destination) = query.destination.as_deref() {
        let ids = airport_ids_named(db, destination).await?;
        select = select.filter(routes::Column::DestinationId.is_in(ids));
    }

    let routes = attach_airports(db, select.all(db).await?).await?;
    Ok(routes.into_iter().map(route_to_list_dto).collect())
}

/// Load one route with both airports resolved.
pub async fn find_route<C: ConnectionTrait>(db: &C, id: i32) -> Result<RouteWithAirports> {
    let route = Routes::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| BookingError::not_found("Route", id))?;
    attach_airports(db, vec![route])
        .await?
        .pop()
        .ok_or_else(|| BookingError::not_found("Route", id))
}

pub async fn get_route_impl<C: ConnectionTrait>(db: &C, id: i32) -> Result<RouteDetailDto> {
    find_route(db, id).await.map(route_to_detail_dto)
}

pub async fn create_route_impl<C: ConnectionTrait>(
    db: &C,
    form: RouteFormDto,
) -> Result<RouteDto> {
    let mut errors = FieldErrors::new();
    check_min(&mut errors, "distance", form.distance, 0);

    let known = airports_by_ids(db, [form.source, form.destination]).await?;
    for (field, id) in [("source", form.source), ("destination", form.destination)] {
        if !known.contains_key(&id) {
            errors.add(field, invalid_pk(id));
        }
    }
    errors.into_result()?;

    let route = routes::ActiveModel {
        source_id: Set(form.source),
        destination_id: Set(form.destination),
        distance: Set(form.distance),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(route_id = route.id, "Created route");
    Ok(route_to_dto(route))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::create_airport_impl;
    use crate::db::connect_and_migrate;
    use crate::dto::AirportFormDto;
    use sea_orm::DatabaseConnection;

    async fn setup_test_db() -> DatabaseConnection {
        connect_and_migrate("sqlite::memory:").await.unwrap()
    }

    async fn airport(db: &DatabaseConnection, name: &str, city: &str) -> i32 {
        create_airport_impl(
            db,
            AirportFormDto {
                name: name.to_string(),
                closest_big_city: city.to_string(),
            },
        )
        .await
        .unwrap()
        .id
    }

    async fn route(db: &DatabaseConnection, source: i32, destination: i32) -> RouteDto {
        create_route_impl(
            db,
            RouteFormDto {
                source,
                destination,
                distance: 700,
            },
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_filters_by_airport_name() {
        let db = setup_test_db().await;
        let kbp = airport(&db, "Boryspil", "Kyiv").await;
        let waw = airport(&db, "Chopin", "Warsaw").await;
        let lwo = airport(&db, "Danylo Halytskyi", "Lviv").await;
        route(&db, kbp, waw).await;
        route(&db, waw, kbp).await;
        route(&db, lwo, waw).await;

        let from_kbp = list_routes_impl(
            &db,
            RouteQuery {
                source: Some("Boryspil".to_string()),
                destination: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(from_kbp.len(), 1);
        assert_eq!(from_kbp[0].source, "Boryspil");

        let to_waw = list_routes_impl(
            &db,
            RouteQuery {
                source: None,
                destination: Some("Chopin".to_string()),
            },
        )
        .await
        .unwrap();
        assert_eq!(to_waw.len(), 2);
        assert!(to_waw.iter().all(|r| r.destination == "Chopin"));

        let unknown = list_routes_impl(
            &db,
            RouteQuery {
                source: Some("Nowhere".to_string()),
                destination: None,
            },
        )
        .await
        .unwrap();
        assert!(unknown.is_empty());
    }

    #[tokio::test]
    async fn test_detail_nests_airports() {
        let db = setup_test_db().await;
        let kbp = airport(&db, "Boryspil", "Kyiv").await;
        let waw = airport(&db, "Chopin", "Warsaw").await;
        let created = route(&db, kbp, waw).await;

        let detail = get_route_impl(&db, created.id).await.unwrap();
        assert_eq!(detail.source.closest_big_city, "Kyiv");
        assert_eq!(detail.destination.name, "Chopin");
        assert_eq!(detail.distance, 700);

        assert!(matches!(
            get_route_impl(&db, 999).await,
            Err(BookingError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_airport_and_negative_distance() {
        let db = setup_test_db().await;
        let kbp = airport(&db, "Boryspil", "Kyiv").await;

        let err = create_route_impl(
            &db,
            RouteFormDto {
                source: kbp,
                destination: 42,
                distance: -5,
            },
        )
        .await
        .unwrap_err();
        let BookingError::Validation(fields) = err else {
            unreachable!("expected validation error");
        };
        assert!(fields.get("destination").is_some());
        assert!(fields.get("distance").is_some());
        assert!(fields.get("source").is_none());
    }
}
