use anyhow::{Context, Result};
use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sea_orm::{ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait,
    QueryFilter, Set};
use tokio::task;

use crate::config::SecurityConfig;
use crate::entities::users;

pub struct UserRepository {
    conn: DatabaseConnection,
}

impl UserRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn insert(&self, user: users::ActiveModel) -> Result<users::Model> {
        let model = user
            .insert(&self.conn)
            .await
            .context("Failed to insert user")?;
        Ok(model)
    }

    /// Duplicate check used at registration: same gmail or mobile number
    /// within the same user type.
    pub async fn find_duplicate(
        &self,
        gmail: &str,
        mobile_no: &str,
        user_type: &str,
    ) -> Result<Option<users::Model>> {
        let user = users::Entity::find()
            .filter(
                Condition::all()
                    .add(users::Column::UserType.eq(user_type))
                    .add(
                        Condition::any()
                            .add(users::Column::Gmail.eq(gmail))
                            .add(users::Column::MobileNo.eq(mobile_no)),
                    ),
            )
            .one(&self.conn)
            .await
            .context("Failed to check for duplicate user")?;

        Ok(user)
    }

    pub async fn list(&self) -> Result<Vec<users::Model>> {
        let users = users::Entity::find()
            .all(&self.conn)
            .await
            .context("Failed to list users")?;
        Ok(users)
    }

    pub async fn get_by_id(&self, user_id: &str) -> Result<Option<users::Model>> {
        let user = users::Entity::find_by_id(user_id)
            .one(&self.conn)
            .await
            .context("Failed to query user by id")?;
        Ok(user)
    }

    pub async fn get_by_email(&self, gmail: &str) -> Result<Option<users::Model>> {
        let user = users::Entity::find()
            .filter(users::Column::Gmail.eq(gmail))
            .one(&self.conn)
            .await
            .context("Failed to query user by email")?;
        Ok(user)
    }

    /// Login identifier matches gmail, mobile number or whatsapp number.
    pub async fn get_by_login(&self, userid: &str) -> Result<Option<users::Model>> {
        let user = users::Entity::find()
            .filter(
                Condition::any()
                    .add(users::Column::Gmail.eq(userid))
                    .add(users::Column::MobileNo.eq(userid))
                    .add(users::Column::WhatsappNo.eq(userid)),
            )
            .one(&self.conn)
            .await
            .context("Failed to query user by login id")?;
        Ok(user)
    }

    /// Verify a password against the stored hash.
    /// Argon2 is CPU-intensive, so verification runs on a blocking task.
    pub async fn verify_password(&self, user: &users::Model, password: &str) -> Result<bool> {
        let password_hash = user.password_hash.clone();
        let password = password.to_string();

        let is_valid = task::spawn_blocking(move || {
            let parsed_hash = PasswordHash::new(&password_hash)
                .map_err(|e| anyhow::anyhow!("Invalid password hash format: {e}"))?;

            let argon2 = Argon2::default();
            Ok::<bool, anyhow::Error>(
                argon2
                    .verify_password(password.as_bytes(), &parsed_hash)
                    .is_ok(),
            )
        })
        .await
        .context("Password verification task panicked")??;

        Ok(is_valid)
    }

    pub async fn update_password(
        &self,
        user_id: &str,
        new_password: &str,
        config: &SecurityConfig,
    ) -> Result<()> {
        let user = users::Entity::find_by_id(user_id)
            .one(&self.conn)
            .await
            .context("Failed to query user for password update")?
            .ok_or_else(|| anyhow::anyhow!("User not found: {user_id}"))?;

        let password = new_password.to_string();
        let config = config.clone();
        let new_hash = task::spawn_blocking(move || hash_password(&password, &config))
            .await
            .context("Password hashing task panicked")??;

        let mut active: users::ActiveModel = user.into();
        active.password_hash = Set(new_hash);
        active.update(&self.conn).await?;

        Ok(())
    }

    pub async fn update_profile(&self, user: users::ActiveModel) -> Result<users::Model> {
        let model = user
            .update(&self.conn)
            .await
            .context("Failed to update user")?;
        Ok(model)
    }

    pub async fn set_fcm_token(&self, user_id: &str, fcm_token: &str) -> Result<()> {
        let user = users::Entity::find_by_id(user_id)
            .one(&self.conn)
            .await
            .context("Failed to query user for FCM update")?
            .ok_or_else(|| anyhow::anyhow!("User not found: {user_id}"))?;

        let mut active: users::ActiveModel = user.into();
        active.fcm_token = Set(Some(fcm_token.to_string()));
        active.update(&self.conn).await?;

        Ok(())
    }

    /// Stores (or clears) the id of the currently valid refresh token.
    pub async fn set_refresh_token_id(&self, user_id: &str, token_id: Option<String>) -> Result<()> {
        let user = users::Entity::find_by_id(user_id)
            .one(&self.conn)
            .await
            .context("Failed to query user for refresh token update")?
            .ok_or_else(|| anyhow::anyhow!("User not found: {user_id}"))?;

        let mut active: users::ActiveModel = user.into();
        active.refresh_token_id = Set(token_id);
        active.update(&self.conn).await?;

        Ok(())
    }
}

/// Hash a password using Argon2id with the configured parameters.
pub fn hash_password(password: &str, config: &SecurityConfig) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    let params = Params::new(
        config.argon2_memory_cost_kib,
        config.argon2_time_cost,
        config.argon2_parallelism,
        None,
    )
    .map_err(|e| anyhow::anyhow!("Invalid Argon2 params: {e}"))?;
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {e}"))?;

    Ok(hash.to_string())
}
