use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "airports")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub closest_big_city: String,
}

impl Model {
    /// Human-readable label, e.g. `"Boryspil in Kyiv"`.
    pub fn display_name(&self) -> String {
        format!("{} in {}", self.name, self.closest_big_city)
    }
}

// Routes point here twice (source and destination); see `routes::Relation`.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
