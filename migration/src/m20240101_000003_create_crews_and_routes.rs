use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Crews::Table)
                    .if_not_exists()
                    .col(pk_auto(Crews::Id))
                    .col(string_len(Crews::FirstName, 255))
                    .col(string_len(Crews::LastName, 255))
                    .to_owned(),
            )
            .await?;

        // Source and destination may point at the same airport.
        manager
            .create_table(
                Table::create()
                    .table(Routes::Table)
                    .if_not_exists()
                    .col(pk_auto(Routes::Id))
                    .col(integer(Routes::SourceId))
                    .col(integer(Routes::DestinationId))
                    .col(integer(Routes::Distance))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_routes_source_id")
                            .from(Routes::Table, Routes::SourceId)
                            .to(Airports::Table, Airports::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_routes_destination_id")
                            .from(Routes::Table, Routes::DestinationId)
                            .to(Airports::Table, Airports::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_routes_source_id")
                    .table(Routes::Table)
                    .col(Routes::SourceId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_routes_destination_id")
                    .table(Routes::Table)
                    .col(Routes::DestinationId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Routes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Crews::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Crews {
    Table,
    Id,
    FirstName,
    LastName,
}

#[derive(DeriveIden)]
enum Routes {
    Table,
    Id,
    SourceId,
    DestinationId,
    Distance,
}

#[derive(DeriveIden)]
enum Airports {
    Table,
    Id,
}
