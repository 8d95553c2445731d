//! Port for notification delivery.
//!
//! Delivery is fire-and-forget: orchestrators log failures and never let
//! them affect the operation's result.

use async_trait::async_trait;

use crate::domain::account::Email;

use super::define_port_error;

define_port_error! {
    /// Errors raised by mailer adapters.
    pub enum MailerError {
        /// The message could not be handed to the delivery channel.
        Delivery {
            /// Adapter-provided description of the failure.
            message: String,
        } => "mail delivery failed: {message}",
    }
}

/// Port for outbound mail.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send one message to `to`.
    async fn send(&self, to: &Email, subject: &str, body: &str) -> Result<(), MailerError>;
}

/// Fixture implementation that discards every message.
///
/// Use it in tests where notification behaviour is not under test.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureMailer;

#[async_trait]
impl Mailer for FixtureMailer {
    async fn send(&self, _to: &Email, _subject: &str, _body: &str) -> Result<(), MailerError> {
        Ok(())
    }
}
