use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub oid: String,

    pub business_id: String,

    pub cust_id: String,

    /// RFC3339 UTC; lexicographic order matches chronological order.
    pub odate: String,

    /// JSON array of service line items ({name, cost, quantity})
    #[sea_orm(column_type = "Text")]
    pub services: String,

    /// JSON array of product line items ({name, cost, quantity})
    #[sea_orm(column_type = "Text")]
    pub products: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
