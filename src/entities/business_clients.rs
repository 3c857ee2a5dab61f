use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "business_clients")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub business_id: String,

    pub client_name: String,

    pub shop_name: String,

    pub domain_name: String,

    #[sea_orm(column_type = "Text")]
    pub shop_desc: String,

    /// JSON array of free-form location strings
    #[sea_orm(column_type = "Text")]
    pub shop_locations: String,

    /// JSON array of structured addresses (street/city/district/state/pincode)
    #[sea_orm(column_type = "Text")]
    pub addresses: String,

    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
