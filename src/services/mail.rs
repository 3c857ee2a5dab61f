use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

use crate::config::MailConfig;

/// Outbound mail seam. Delivery itself is an external concern; the
/// backend only composes messages and hands them over.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<()>;

    async fn send_reset_code(&self, to: &str, code: &str) -> Result<()> {
        self.send(
            to,
            "Password Reset Code",
            &format!("Your password reset code is: {code}"),
        )
        .await
    }
}

/// Default mailer: writes the message to the log. Used in development
/// and whenever mail delivery is disabled in config.
pub struct LogMailer {
    from_address: String,
}

impl LogMailer {
    #[must_use]
    pub fn new(config: &MailConfig) -> Self {
        Self {
            from_address: config.from_address.clone(),
        }
    }
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<()> {
        info!(
            from = %self.from_address,
            to = %to,
            subject = %subject,
            body = %body,
            "Mail dispatched to log sink"
        );
        Ok(())
    }
}
