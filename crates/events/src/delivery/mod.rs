//! Outbound notification channels.
//!
//! The notification router talks to a [`NotificationSender`]. SMTP delivery
//! is [`email::EmailDelivery`]; [`LogOnlySender`] stands in when no SMTP
//! server is configured.

use async_trait::async_trait;

pub mod email;

use email::{EmailError, EmailMessage};

/// Something that can deliver a composed email.
#[async_trait]
pub trait NotificationSender: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> Result<(), EmailError>;
}

/// Logs messages instead of sending them.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogOnlySender;

#[async_trait]
impl NotificationSender for LogOnlySender {
    async fn send(&self, message: &EmailMessage) -> Result<(), EmailError> {
        tracing::info!(
            to = %message.to,
            subject = %message.subject,
            "SMTP not configured, dropping notification email",
        );
        Ok(())
    }
}
