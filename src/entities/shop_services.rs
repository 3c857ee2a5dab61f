use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "shop_services")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub sid: String,

    pub business_id: String,

    pub name: String,

    #[sea_orm(column_type = "Text")]
    pub description: String,

    pub cost: f64,

    pub image_url: Option<String>,

    /// 0 = live; incremented to retire.
    pub flag: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
