//! Tracing-backed mailer adapter.

use async_trait::async_trait;
use tracing::info;

use crate::domain::Email;
use crate::domain::ports::{Mailer, MailerError};

/// Mailer that records every message as a tracing event.
///
/// Stands in for a real delivery channel in development and tests; it never
/// fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingMailer;

#[async_trait]
impl Mailer for TracingMailer {
    async fn send(&self, to: &Email, subject: &str, body: &str) -> Result<(), MailerError> {
        info!(to = %to, subject, body, "sending mail");
        Ok(())
    }
}
