//! Payment event (order) entity for SeaORM.

use sea_orm::entity::prelude::*;
use serde_json::Value as JsonValue;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// External payment processor id; the join key for every other table
    #[sea_orm(unique)]
    pub payment_id: String,
    /// Amount in minor currency units
    pub amount: i64,
    pub currency: String,
    pub customer_email: Option<String>,
    /// Raw payment event as delivered by the processor
    #[sea_orm(column_type = "JsonBinary")]
    pub payload: JsonValue,
    pub model_run_id: Option<Uuid>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
