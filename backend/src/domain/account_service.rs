//! Account use-cases: signup and the account read path.

use std::sync::Arc;

use tracing::warn;

use crate::domain::Error;
use crate::domain::account::{Account, AccountId};
use crate::domain::ports::{AccountStore, AccountStoreError, Mailer};

/// Input for [`AccountService::signup`].
#[derive(Debug, Clone)]
pub struct SignupRequest {
    /// Full name; at least two tokens.
    pub name: String,
    /// Email, unique across accounts.
    pub email: String,
    /// CPF, 11 digits with valid check digits.
    pub cpf: String,
    /// Register the passenger role.
    pub is_passenger: bool,
    /// Register the driver role.
    pub is_driver: bool,
    /// Licence plate; required and validated only when `is_driver` is set.
    pub car_plate: String,
}

/// Output of [`AccountService::signup`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignupResponse {
    /// Identifier of the newly registered account.
    pub account_id: AccountId,
}

/// Orchestrates account registration and lookup.
#[derive(Clone)]
pub struct AccountService<A, M> {
    accounts: Arc<A>,
    mailer: Arc<M>,
}

impl<A, M> AccountService<A, M> {
    /// Create a new service over an account store and a mailer.
    pub const fn new(accounts: Arc<A>, mailer: Arc<M>) -> Self {
        Self { accounts, mailer }
    }
}

impl<A, M> AccountService<A, M>
where
    A: AccountStore,
    M: Mailer,
{
    /// Validate and persist a new account, enforcing email uniqueness.
    ///
    /// Validation runs name, email, cpf, then plate (drivers only) and
    /// short-circuits on the first failure, before any store access. The
    /// welcome mail is fire-and-forget: delivery failures are logged and do
    /// not affect the result.
    pub async fn signup(&self, request: SignupRequest) -> Result<SignupResponse, Error> {
        let account = Account::create(
            &request.name,
            &request.email,
            &request.cpf,
            request.is_passenger,
            request.is_driver,
            &request.car_plate,
        )?;

        let existing = self
            .accounts
            .find_by_email(account.email())
            .await
            .map_err(map_account_store_error)?;
        if existing.is_some() {
            return Err(Error::AccountAlreadyExists);
        }

        self.accounts
            .save(&account)
            .await
            .map_err(map_account_store_error)?;

        if let Err(error) = self
            .mailer
            .send(account.email(), "Welcome", "Your account is ready.")
            .await
        {
            warn!(%error, account_id = %account.account_id(), "welcome mail delivery failed");
        }

        Ok(SignupResponse {
            account_id: account.account_id(),
        })
    }

    /// Load an account by id.
    pub async fn get_account(&self, id: &AccountId) -> Result<Account, Error> {
        self.accounts
            .find_by_id(id)
            .await
            .map_err(map_account_store_error)?
            .ok_or(Error::AccountNotFound)
    }
}

/// Translate store failures, folding the commit-time uniqueness violation
/// into the same error the eager lookup produces.
fn map_account_store_error(error: AccountStoreError) -> Error {
    match error {
        AccountStoreError::DuplicateEmail { .. } => Error::AccountAlreadyExists,
        other => Error::store(other.to_string()),
    }
}
