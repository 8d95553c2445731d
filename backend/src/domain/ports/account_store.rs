//! Port for account persistence.
//!
//! Adapters own the SQL dialect and connection lifecycle; the domain only
//! sees this trait and its typed errors. Email uniqueness is a storage
//! constraint: a conflicting `save` must fail with
//! [`AccountStoreError::DuplicateEmail`] even when two signups race past the
//! orchestrator's lookup.

use async_trait::async_trait;

use crate::domain::account::{Account, AccountId, Email};

use super::define_port_error;

define_port_error! {
    /// Errors raised by account store adapters.
    pub enum AccountStoreError {
        /// Store connection could not be established.
        Connection {
            /// Adapter-provided description of the failure.
            message: String,
        } => "account store connection failed: {message}",
        /// Query or mutation failed during execution.
        Query {
            /// Adapter-provided description of the failure.
            message: String,
        } => "account store query failed: {message}",
        /// A stored row could not be decoded into an account.
        Decode {
            /// Which field was malformed and how.
            message: String,
        } => "account row decode failed: {message}",
        /// Email uniqueness constraint rejected the write.
        DuplicateEmail {
            /// The email already held by another account.
            email: String,
        } => "an account with email {email} already exists",
    }
}

/// Port for account storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Persist a newly created account.
    ///
    /// Fails with [`AccountStoreError::DuplicateEmail`] when another account
    /// already holds the same email at commit time.
    async fn save(&self, account: &Account) -> Result<(), AccountStoreError>;

    /// Look up an account by its unique email.
    async fn find_by_email(&self, email: &Email) -> Result<Option<Account>, AccountStoreError>;

    /// Look up an account by id.
    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountStoreError>;
}
