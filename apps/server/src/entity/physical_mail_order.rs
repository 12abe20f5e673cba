//! Physical mail order entity for SeaORM.

use sea_orm::entity::prelude::*;
use serde_json::Value as JsonValue;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "physical_mail_orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub payment_id: String,
    pub model_run_id: Option<Uuid>,
    /// pending, label_created, shipped, delivered, returned
    pub shipping_status: String,
    /// Structured address: {name, line1, line2, city, state, postal_code, country}
    #[sea_orm(column_type = "JsonBinary")]
    pub shipping_address: JsonValue,
    pub tracking_number: Option<String>,
    pub carrier: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
