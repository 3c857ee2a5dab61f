use sea_orm::Set;
use serde::{Deserialize, Serialize};

use crate::config::SecurityConfig;
use crate::db::Store;
use crate::db::repositories::user::hash_password;
use crate::entities::users;
use crate::services::{ServiceError, require_id};

/// User shape exposed over the API; never carries the password hash or
/// refresh token state.
#[derive(Debug, Clone, Serialize)]
pub struct PublicUser {
    pub user_id: String,
    pub name: String,
    pub gmail: String,
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
    pub user_type: String,
    pub date_of_joining: String,
}

impl From<users::Model> for PublicUser {
    fn from(model: users::Model) -> Self {
        Self {
            user_id: model.user_id,
            name: model.name,
            gmail: model.gmail,
            dob: model.dob,
            img_url: model.img_url,
            mobile_no: model.mobile_no,
            whatsapp_no: model.whatsapp_no,
            gender: model.gender,
            address_door_no: model.address_door_no,
            address_street: model.address_street,
            address_city: model.address_city,
            address_state: model.address_state,
            address_pincode: model.address_pincode,
            user_type: model.user_type,
            date_of_joining: model.date_of_joining,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RegisterUserRequest {
    pub name: String,
    pub gmail: String,
    pub password: String,
    pub mobile_no: String,
    pub whatsapp_no: String,
    pub user_type: String,
    pub address_city: String,
    pub address_state: String,
    #[serde(default)]
    pub dob: Option<String>,
    #[serde(default)]
    pub img_url: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub address_door_no: Option<String>,
    #[serde(default)]
    pub address_street: Option<String>,
    #[serde(default)]
    pub address_pincode: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub img_url: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub dob: Option<String>,
    #[serde(default)]
    pub mobile_no: Option<String>,
    #[serde(default)]
    pub whatsapp_no: Option<String>,
    #[serde(default)]
    pub address_door_no: Option<String>,
    #[serde(default)]
    pub address_street: Option<String>,
    #[serde(default)]
    pub address_city: Option<String>,
    #[serde(default)]
    pub address_state: Option<String>,
    #[serde(default)]
    pub address_pincode: Option<String>,
}

pub struct UserService {
    store: Store,
    security: SecurityConfig,
}

impl UserService {
    #[must_use]
    pub const fn new(store: Store, security: SecurityConfig) -> Self {
        Self { store, security }
    }

    pub async fn register(&self, request: RegisterUserRequest) -> Result<PublicUser, ServiceError> {
        if request.gmail.trim().is_empty() || request.mobile_no.trim().is_empty() {
            return Err(ServiceError::validation(
                "Email and mobile number are required",
            ));
        }
        if request.password.len() < 8 {
            return Err(ServiceError::validation(
                "Password must be at least 8 characters",
            ));
        }

        let existing = self
            .store
            .users()
            .find_duplicate(&request.gmail, &request.mobile_no, &request.user_type)
            .await?;
        if existing.is_some() {
            return Err(ServiceError::conflict(
                "User with this email or mobile number already exists",
            ));
        }

        let password = request.password.clone();
        let security = self.security.clone();
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password, &security))
            .await
            .map_err(|e| anyhow::anyhow!("Password hashing task panicked: {e}"))
            .map_err(ServiceError::Internal)??;
        let now = chrono::Utc::now().to_rfc3339();

        let user = users::ActiveModel {
            user_id: Set(uuid::Uuid::new_v4().to_string()),
            name: Set(request.name),
            gmail: Set(request.gmail),
            password_hash: Set(password_hash),
            dob: Set(request.dob),
            img_url: Set(request.img_url),
            mobile_no: Set(request.mobile_no),
            whatsapp_no: Set(request.whatsapp_no),
            gender: Set(request.gender),
            address_door_no: Set(request.address_door_no),
            address_street: Set(request.address_street),
            address_city: Set(request.address_city),
            address_state: Set(request.address_state),
            address_pincode: Set(request.address_pincode),
            user_type: Set(request.user_type),
            date_of_joining: Set(now),
            fcm_token: Set(None),
            refresh_token_id: Set(None),
        };

        let model = self.store.users().insert(user).await?;
        Ok(model.into())
    }

    pub async fn list(&self) -> Result<Vec<PublicUser>, ServiceError> {
        let users = self.store.users().list().await?;
        Ok(users.into_iter().map(Into::into).collect())
    }

    pub async fn get(&self, user_id: &str) -> Result<PublicUser, ServiceError> {
        require_id(user_id, "User id")?;

        let user = self
            .store
            .users()
            .get_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User"))?;
        Ok(user.into())
    }

    pub async fn get_name(&self, user_id: &str) -> Result<String, ServiceError> {
        let user = self.get(user_id).await?;
        Ok(user.name)
    }

    pub async fn find_by_email(&self, gmail: &str) -> Result<PublicUser, ServiceError> {
        let user = self
            .store
            .users()
            .get_by_email(gmail)
            .await?
            .ok_or_else(|| ServiceError::not_found("User"))?;
        Ok(user.into())
    }

    pub async fn update(
        &self,
        user_id: &str,
        request: UpdateUserRequest,
    ) -> Result<PublicUser, ServiceError> {
        require_id(user_id, "User id")?;

        let user = self
            .store
            .users()
            .get_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User"))?;

        let mut active: users::ActiveModel = user.into();
        if let Some(name) = request.name {
            active.name = Set(name);
        }
        if let Some(img_url) = request.img_url {
            active.img_url = Set(Some(img_url));
        }
        if let Some(gender) = request.gender {
            active.gender = Set(Some(gender));
        }
        if let Some(dob) = request.dob {
            active.dob = Set(Some(dob));
        }
        if let Some(mobile_no) = request.mobile_no {
            active.mobile_no = Set(mobile_no);
        }
        if let Some(whatsapp_no) = request.whatsapp_no {
            active.whatsapp_no = Set(whatsapp_no);
        }
        if let Some(door_no) = request.address_door_no {
            active.address_door_no = Set(Some(door_no));
        }
        if let Some(street) = request.address_street {
            active.address_street = Set(Some(street));
        }
        if let Some(city) = request.address_city {
            active.address_city = Set(city);
        }
        if let Some(state) = request.address_state {
            active.address_state = Set(state);
        }
        if let Some(pincode) = request.address_pincode {
            active.address_pincode = Set(Some(pincode));
        }

        let model = self.store.users().update_profile(active).await?;
        Ok(model.into())
    }

    pub async fn update_password(
        &self,
        user_id: &str,
        new_password: &str,
    ) -> Result<(), ServiceError> {
        require_id(user_id, "User id")?;

        if new_password.len() < 8 {
            return Err(ServiceError::validation(
                "Password must be at least 8 characters",
            ));
        }

        self.store
            .users()
            .get_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User"))?;

        self.store
            .users()
            .update_password(user_id, new_password, &self.security)
            .await?;
        Ok(())
    }

    pub async fn update_fcm_token(&self, user_id: &str, fcm_token: &str) -> Result<(), ServiceError> {
        require_id(user_id, "User id")?;

        self.store
            .users()
            .get_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User"))?;

        self.store.users().set_fcm_token(user_id, fcm_token).await?;
        Ok(())
    }
}
