use std::collections::HashMap;
use std::sync::Arc;

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::warn;

use crate::config::SecurityConfig;
use crate::db::Store;
use crate::services::Mailer;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User not found")]
    UserNotFound,

    #[error("Invalid reset code")]
    InvalidResetCode,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Token claims. `token_use` separates access from refresh tokens so one
/// can never stand in for the other; `jti` ties a refresh token to the
/// single currently valid one stored per user.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
    pub token_use: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TokenPair {
    pub token: String,
    pub rtoken: String,
}

pub struct AuthService {
    store: Store,
    config: SecurityConfig,
    mailer: Arc<dyn Mailer>,
    /// Pending password-reset codes, keyed by email. In-memory only;
    /// codes do not survive a restart.
    reset_codes: Mutex<HashMap<String, String>>,
}

impl AuthService {
    #[must_use]
    pub fn new(store: Store, config: SecurityConfig, mailer: Arc<dyn Mailer>) -> Self {
        Self {
            store,
            config,
            mailer,
            reset_codes: Mutex::new(HashMap::new()),
        }
    }

    /// Login identifier may be the gmail address, mobile number or
    /// whatsapp number. Issues an access/refresh pair and records the
    /// refresh token id so earlier refresh tokens stop working.
    pub async fn login(&self, userid: &str, password: &str) -> Result<TokenPair, AuthError> {
        let user = self
            .store
            .users()
            .get_by_login(userid)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let is_valid = self.store.users().verify_password(&user, password).await?;
        if !is_valid {
            return Err(AuthError::InvalidCredentials);
        }

        let jti = uuid::Uuid::new_v4().to_string();
        let token = self.issue_token(&user.user_id, &user.gmail, TokenUse::Access, None)?;
        let rtoken =
            self.issue_token(&user.user_id, &user.gmail, TokenUse::Refresh, Some(jti.clone()))?;

        self.store
            .users()
            .set_refresh_token_id(&user.user_id, Some(jti))
            .await?;

        Ok(TokenPair { token, rtoken })
    }

    /// Trades a valid refresh token for a fresh access token.
    pub async fn refresh(&self, refresh_token: &str) -> Result<String, AuthError> {
        let claims = self.decode_token(refresh_token)?;
        if claims.token_use != "refresh" {
            return Err(AuthError::InvalidToken("Not a refresh token".to_string()));
        }

        let user = self
            .store
            .users()
            .get_by_id(&claims.sub)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if user.refresh_token_id.is_none() || user.refresh_token_id != claims.jti {
            return Err(AuthError::InvalidToken(
                "Refresh token has been revoked".to_string(),
            ));
        }

        let token = self.issue_token(&user.user_id, &user.gmail, TokenUse::Access, None)?;
        Ok(token)
    }

    pub async fn logout(&self, user_id: &str) -> Result<(), AuthError> {
        self.store
            .users()
            .set_refresh_token_id(user_id, None)
            .await?;
        Ok(())
    }

    /// Generates a 6-digit reset code, remembers it for the email and
    /// dispatches it through the mail seam.
    pub async fn forgot_password(&self, email: &str) -> Result<(), AuthError> {
        let user = self
            .store
            .users()
            .get_by_email(email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let code = generate_reset_code();
        self.reset_codes
            .lock()
            .await
            .insert(user.gmail.clone(), code.clone());

        if let Err(e) = self.mailer.send_reset_code(&user.gmail, &code).await {
            warn!(email = %user.gmail, error = %e, "Failed to send reset code");
            return Err(AuthError::Internal(e));
        }

        Ok(())
    }

    pub async fn verify_reset_code(&self, email: &str, code: &str) -> Result<(), AuthError> {
        let codes = self.reset_codes.lock().await;
        match codes.get(email) {
            Some(expected) if expected == code => Ok(()),
            _ => Err(AuthError::InvalidResetCode),
        }
    }

    /// Verifies the code, rotates the password, and drops the used code.
    pub async fn reset_password(
        &self,
        email: &str,
        code: &str,
        new_password: &str,
    ) -> Result<(), AuthError> {
        if new_password.len() < 8 {
            return Err(AuthError::Validation(
                "New password must be at least 8 characters".to_string(),
            ));
        }

        self.verify_reset_code(email, code).await?;

        let user = self
            .store
            .users()
            .get_by_email(email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        self.store
            .users()
            .update_password(&user.user_id, new_password, &self.config)
            .await?;

        self.reset_codes.lock().await.remove(email);
        Ok(())
    }

    /// Validates a bearer token for the request middleware.
    pub fn verify_access_token(&self, token: &str) -> Result<Claims, AuthError> {
        let claims = self.decode_token(token)?;
        if claims.token_use != "access" {
            return Err(AuthError::InvalidToken("Not an access token".to_string()));
        }
        Ok(claims)
    }

    fn issue_token(
        &self,
        user_id: &str,
        email: &str,
        token_use: TokenUse,
        jti: Option<String>,
    ) -> Result<String, AuthError> {
        let now = chrono::Utc::now();
        let ttl = match token_use {
            TokenUse::Access => self.config.access_token_ttl_seconds,
            TokenUse::Refresh => self.config.refresh_token_ttl_seconds,
        };

        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            iat: now.timestamp(),
            exp: (now + chrono::Duration::seconds(ttl)).timestamp(),
            token_use: token_use.as_str().to_string(),
            jti,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret.as_bytes()),
        )
        .map_err(|e| AuthError::Internal(anyhow::anyhow!("Failed to sign token: {e}")))
    }

    fn decode_token(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| AuthError::InvalidToken(e.to_string()))
    }
}

enum TokenUse {
    Access,
    Refresh,
}

impl TokenUse {
    const fn as_str(&self) -> &'static str {
        match self {
            Self::Access => "access",
            Self::Refresh => "refresh",
        }
    }
}

fn generate_reset_code() -> String {
    use rand::Rng;

    let code: u32 = rand::rng().random_range(100_000..=999_999);
    code.to_string()
}

#[cfg(test)]
mod tests {
    use super::generate_reset_code;

    #[test]
    fn reset_code_is_six_digits() {
        for _ in 0..32 {
            let code = generate_reset_code();
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }
}
