use crate::validation::{TicketRangeError, validate_ticket};
use sea_orm::ActiveValue;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "tickets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub row: i32,
    pub seat: i32,
    pub flight_id: i32,
    pub order_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::flights::Entity",
        from = "Column::FlightId",
        to = "super::flights::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Flight,
    #[sea_orm(
        belongs_to = "super::orders::Entity",
        from = "Column::OrderId",
        to = "super::orders::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Order,
}

impl Related<super::flights::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Flight.def()
    }
}

impl Related<super::orders::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

fn current<V: Clone + Into<Value>>(value: &ActiveValue<V>, field: &str) -> Result<V, DbErr> {
    match value {
        ActiveValue::Set(v) | ActiveValue::Unchanged(v) => Ok(v.clone()),
        ActiveValue::NotSet => Err(DbErr::Custom(format!("ticket {field} is required"))),
    }
}

/// Every save re-checks the seat against the flight's airplane, so rows
/// written outside the order service (seeding, tests) obey the same bounds.
#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(self, db: &C, _insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let flight_id = current(&self.flight_id, "flight")?;
        let row = current(&self.row, "row")?;
        let seat = current(&self.seat, "seat")?;

        let airplane = super::airplanes::Entity::find()
            .inner_join(super::flights::Entity)
            .filter(super::flights::Column::Id.eq(flight_id))
            .one(db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("Flight {flight_id} not found")))?;

        validate_ticket(row, seat, &airplane).map_err(TicketRangeError::into_db_err)?;

        Ok(self)
    }
}
