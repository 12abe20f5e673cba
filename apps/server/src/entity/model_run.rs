//! Model run entity for SeaORM.

use sea_orm::entity::prelude::*;
use serde_json::Value as JsonValue;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "model_runs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub status: String,
    /// JSON array of output image URLs
    #[sea_orm(column_type = "JsonBinary")]
    pub output_image_urls: JsonValue,
    #[sea_orm(column_type = "Double", nullable)]
    pub cost: Option<f64>,
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub metadata: Option<JsonValue>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
