use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub pid: String,

    pub business_id: String,

    pub name: String,

    pub description: Option<String>,

    pub image_url: Option<String>,

    pub price: f64,

    pub quantity: f64,

    pub units: String,

    /// 0 = live; incremented to retire.
    pub flag: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
