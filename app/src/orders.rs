//! Ticket orders. Every order belongs to the user that placed it.

use crate::dto::{
    FlightSummaryDto, OrderDto, OrderFormDto, OrderListDto, TicketDto, TicketFormDto,
    TicketListDto,
};
use crate::entities::{orders, prelude::*, tickets};
use crate::error::{BookingError, FieldErrors, Result};
use crate::pagination::{Page, PageRequest};
use crate::repositories::{airplanes_by_ids, flights_by_ids, routes_by_ids};
use crate::validation::{invalid_pk, validate_ticket};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use std::collections::{HashMap, HashSet};
use tracing::{info, warn};

fn ticket_to_dto(ticket: tickets::Model) -> TicketDto {
    TicketDto {
        id: ticket.id,
        row: ticket.row,
        seat: ticket.seat,
        flight: ticket.flight_id,
    }
}

/// Flight summaries for the tickets' flights, keyed by flight id.
async fn flight_summaries<C: ConnectionTrait>(
    db: &C,
    tickets: &[tickets::Model],
) -> Result<HashMap<i32, FlightSummaryDto>> {
    let flights = flights_by_ids(db, tickets.iter().map(|t| t.flight_id)).await?;
    let routes = routes_by_ids(db, flights.values().map(|f| f.route_id)).await?;
    let airplanes = airplanes_by_ids(db, flights.values().map(|f| f.airplane_id)).await?;

    flights
        .into_values()
        .map(|flight| {
            let route = routes
                .get(&flight.route_id)
                .ok_or_else(|| BookingError::not_found("Route", flight.route_id))?;
            let airplane = airplanes
                .get(&flight.airplane_id)
                .ok_or_else(|| BookingError::not_found("Airplane", flight.airplane_id))?;
            Ok((
                flight.id,
                FlightSummaryDto {
                    id: flight.id,
                    route: route.display_name(),
                    airplane_name: airplane.name.clone(),
                    departure_time: flight.departure_time,
                    arrival_time: flight.arrival_time,
                },
            ))
        })
        .collect()
}

/// One page of the user's orders, newest first.
pub async fn list_orders_impl<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
    request: PageRequest,
    base_path: &str,
) -> Result<Page<OrderListDto>> {
    let scoped = Orders::find().filter(orders::Column::UserId.eq(user_id));
    let count = scoped.clone().count(db).await?;
    let offset = request.offset(count)?;

    let orders = scoped
        .order_by_desc(orders::Column::CreatedAt)
        .order_by_desc(orders::Column::Id)
        .offset(offset)
        .limit(request.page_size)
        .all(db)
        .await?;

    let tickets = Tickets::find()
        .filter(tickets::Column::OrderId.is_in(orders.iter().map(|o| o.id)))
        .order_by_asc(tickets::Column::Row)
        .order_by_asc(tickets::Column::Seat)
        .all(db)
        .await?;
    let flights = flight_summaries(db, &tickets).await?;

    let mut by_order: HashMap<i32, Vec<TicketListDto>> = HashMap::new();
    for ticket in tickets {
        let flight = flights
            .get(&ticket.flight_id)
            .cloned()
            .ok_or_else(|| BookingError::not_found("Flight", ticket.flight_id))?;
        by_order.entry(ticket.order_id).or_default().push(TicketListDto {
            id: ticket.id,
            row: ticket.row,
            seat: ticket.seat,
            flight,
        });
    }

    let results = orders
        .into_iter()
        .map(|order| OrderListDto {
            id: order.id,
            tickets: by_order.remove(&order.id).unwrap_or_default(),
            created_at: order.created_at,
        })
        .collect();

    Page::build(base_path, request, count, results)
}

/// Check every ticket against its flight's airplane before anything is written.
async fn validate_tickets<C: ConnectionTrait>(db: &C, tickets: &[TicketFormDto]) -> Result<()> {
    if tickets.is_empty() {
        return Err(BookingError::field("tickets", "This list may not be empty."));
    }

    let flights = flights_by_ids(db, tickets.iter().map(|t| t.flight)).await?;
    let airplanes = airplanes_by_ids(db, flights.values().map(|f| f.airplane_id)).await?;

    let mut errors = FieldErrors::new();
    for (index, ticket) in tickets.iter().enumerate() {
        let airplane = flights
            .get(&ticket.flight)
            .and_then(|flight| airplanes.get(&flight.airplane_id));
        let Some(airplane) = airplane else {
            errors.add(format!("tickets[{index}].flight"), invalid_pk(ticket.flight));
            continue;
        };
        if let Err(range) = validate_ticket(ticket.row, ticket.seat, airplane) {
            errors.add(format!("tickets[{index}].{}", range.field), range.message);
        }
    }
    errors.into_result()?;

    let mut seen = HashSet::new();
    for ticket in tickets {
        if !seen.insert((ticket.flight, ticket.row, ticket.seat)) {
            return Err(seat_taken(ticket));
        }
    }
    Ok(())
}

fn seat_taken(ticket: &TicketFormDto) -> BookingError {
    BookingError::Conflict(format!(
        "Seat {} in row {} on flight {} is already taken.",
        ticket.seat, ticket.row, ticket.flight
    ))
}

/// Create an order and all of its tickets in one transaction.
///
/// Any failing ticket rolls back the whole order.
pub async fn create_order_impl(
    db: &DatabaseConnection,
    user_id: i32,
    form: OrderFormDto,
) -> Result<OrderDto> {
    validate_tickets(db, &form.tickets).await?;

    let txn = db.begin().await?;
    let order = orders::ActiveModel {
        created_at: Set(Utc::now()),
        user_id: Set(user_id),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let mut created = Vec::with_capacity(form.tickets.len());
    for ticket in &form.tickets {
        let inserted = tickets::ActiveModel {
            row: Set(ticket.row),
            seat: Set(ticket.seat),
            flight_id: Set(ticket.flight),
            order_id: Set(order.id),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(BookingError::from)
        .map_err(|err| match err {
            BookingError::Conflict(_) => {
                warn!(user_id, flight_id = ticket.flight, "Seat already taken");
                seat_taken(ticket)
            }
            other => other,
        })?;
        created.push(ticket_to_dto(inserted));
    }
    txn.commit().await?;

    info!(
        order_id = order.id,
        user_id,
        tickets = created.len(),
        "Created order"
    );
    Ok(OrderDto {
        id: order.id,
        tickets: created,
        created_at: order.created_at,
    })
}
