use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Flights::Table)
                    .if_not_exists()
                    .col(pk_auto(Flights::Id))
                    .col(integer(Flights::RouteId))
                    .col(integer(Flights::AirplaneId))
                    .col(timestamp_with_time_zone(Flights::DepartureTime))
                    .col(timestamp_with_time_zone(Flights::ArrivalTime))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_flights_route_id")
                            .from(Flights::Table, Flights::RouteId)
                            .to(Routes::Table, Routes::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_flights_airplane_id")
                            .from(Flights::Table, Flights::AirplaneId)
                            .to(Airplanes::Table, Airplanes::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_flights_departure_time")
                    .table(Flights::Table)
                    .col(Flights::DepartureTime)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_flights_route_id")
                    .table(Flights::Table)
                    .col(Flights::RouteId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(FlightCrews::Table)
                    .if_not_exists()
                    .col(integer(FlightCrews::FlightId))
                    .col(integer(FlightCrews::CrewId))
                    .primary_key(
                        Index::create()
                            .col(FlightCrews::FlightId)
                            .col(FlightCrews::CrewId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_flight_crews_flight_id")
                            .from(FlightCrews::Table, FlightCrews::FlightId)
                            .to(Flights::Table, Flights::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_flight_crews_crew_id")
                            .from(FlightCrews::Table, FlightCrews::CrewId)
                            .to(Crews::Table, Crews::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FlightCrews::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Flights::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Flights {
    Table,
    Id,
    RouteId,
    AirplaneId,
    DepartureTime,
    ArrivalTime,
}

#[derive(DeriveIden)]
enum FlightCrews {
    Table,
    FlightId,
    CrewId,
}

#[derive(DeriveIden)]
enum Routes {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Airplanes {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Crews {
    Table,
    Id,
}
