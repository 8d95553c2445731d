//! Outbound adapters implementing the domain ports.
//!
//! Adapters are thin translators between domain types and infrastructure
//! representations; they contain no business logic. Durable SQL adapters
//! live with the deployment that owns the database; this crate ships the
//! in-memory reference stores and a tracing mailer.

pub mod mailer;
pub mod memory;

pub use mailer::TracingMailer;
pub use memory::{InMemoryAccountStore, InMemoryRideStore};
