use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Airports::Table)
                    .if_not_exists()
                    .col(pk_auto(Airports::Id))
                    .col(string_len_uniq(Airports::Name, 255))
                    .col(string_len(Airports::ClosestBigCity, 255))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AirplaneTypes::Table)
                    .if_not_exists()
                    .col(pk_auto(AirplaneTypes::Id))
                    .col(string_len_uniq(AirplaneTypes::Name, 255))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Airplanes::Table)
                    .if_not_exists()
                    .col(pk_auto(Airplanes::Id))
                    .col(string_len(Airplanes::Name, 255))
                    .col(integer(Airplanes::Rows))
                    .col(integer(Airplanes::SeatsInRow))
                    .col(integer(Airplanes::AirplaneTypeId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_airplanes_airplane_type_id")
                            .from(Airplanes::Table, Airplanes::AirplaneTypeId)
                            .to(AirplaneTypes::Table, AirplaneTypes::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_airplanes_name")
                    .table(Airplanes::Table)
                    .col(Airplanes::Name)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Airplanes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AirplaneTypes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Airports::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Airports {
    Table,
    Id,
    Name,
    ClosestBigCity,
}

#[derive(DeriveIden)]
enum AirplaneTypes {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum Airplanes {
    Table,
    Id,
    Name,
    Rows,
    SeatsInRow,
    AirplaneTypeId,
}
