use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "flights")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub route_id: i32,
    pub airplane_id: i32,
    pub departure_time: DateTimeUtc,
    pub arrival_time: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::routes::Entity",
        from = "Column::RouteId",
        to = "super::routes::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Route,
    #[sea_orm(
        belongs_to = "super::airplanes::Entity",
        from = "Column::AirplaneId",
        to = "super::airplanes::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Airplane,
    #[sea_orm(has_many = "super::tickets::Entity")]
    Tickets,
    #[sea_orm(has_many = "super::flight_crews::Entity")]
    FlightCrews,
}

impl Related<super::routes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Route.def()
    }
}

impl Related<super::airplanes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Airplane.def()
    }
}

impl Related<super::tickets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tickets.def()
    }
}

impl Related<super::flight_crews::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FlightCrews.def()
    }
}

impl Related<super::crews::Entity> for Entity {
    fn to() -> RelationDef {
        super::flight_crews::Relation::Crew.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::flight_crews::Relation::Flight.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
