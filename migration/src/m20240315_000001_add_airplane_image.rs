use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Relative path under the media root, NULL until an image is uploaded
        manager
            .alter_table(
                Table::alter()
                    .table(Airplanes::Table)
                    .add_column(ColumnDef::new(Airplanes::Image).string().null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(Airplanes::Table)
                    .drop_column(Airplanes::Image)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum Airplanes {
    Table,
    Image,
}
