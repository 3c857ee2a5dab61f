use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub post_id: String,

    pub business_id: String,

    pub title: String,

    #[sea_orm(column_type = "Text")]
    pub content: String,

    pub image_url: Option<String>,

    pub likes: i64,

    /// JSON array of customer ids that liked the post
    #[sea_orm(column_type = "Text")]
    pub liked_by: String,

    /// JSON array of {customer_id, comment}
    #[sea_orm(column_type = "Text")]
    pub comments: String,

    /// 0 = visible; incremented to archive.
    pub flag: i32,

    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
