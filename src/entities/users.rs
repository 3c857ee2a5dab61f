use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: String,

    pub name: String,

    pub gmail: String,

    /// Argon2id password hash
    pub password_hash: String,

    pub dob: Option<String>,

    pub img_url: Option<String>,

    pub mobile_no: String,

    pub whatsapp_no: String,

    pub gender: Option<String>,

    pub address_door_no: Option<String>,

    pub address_street: Option<String>,

    pub address_city: String,

    pub address_state: String,

    pub address_pincode: Option<String>,

    /// Role discriminator; uniqueness of gmail/mobile is per user type.
    pub user_type: String,

    pub date_of_joining: String,

    pub fcm_token: Option<String>,

    /// Id (jti) of the currently valid refresh token, cleared on logout.
    pub refresh_token_id: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
