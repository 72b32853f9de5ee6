pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_users;
mod m20240101_000002_create_airports_and_airplanes;
mod m20240101_000003_create_crews_and_routes;
mod m20240101_000004_create_flights;
mod m20240101_000005_create_orders_and_tickets;
mod m20240315_000001_add_airplane_image;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_users::Migration),
            Box::new(m20240101_000002_create_airports_and_airplanes::Migration),
            Box::new(m20240101_000003_create_crews_and_routes::Migration),
            Box::new(m20240101_000004_create_flights::Migration),
            Box::new(m20240101_000005_create_orders_and_tickets::Migration),
            Box::new(m20240315_000001_add_airplane_image::Migration),
        ]
    }
}
