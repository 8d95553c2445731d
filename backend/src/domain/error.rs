//! Use-case error taxonomy.
//!
//! Transport agnostic: every orchestrator failure is one of these variants,
//! scoped to its own invocation. Messages follow the wording callers of the
//! original service relied on.

use super::account::AccountValidationError;
use super::ride::RideTransitionError;

/// Errors returned by the booking orchestrators.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Name does not contain at least two tokens.
    #[error("Invalid name")]
    InvalidName,
    /// Email does not match the `local@domain` shape.
    #[error("Invalid email")]
    InvalidEmail,
    /// CPF fails the modulo-11 checksum.
    #[error("Invalid cpf")]
    InvalidCpf,
    /// Car plate does not match `[A-Z]{3}[0-9]{4}`.
    #[error("Invalid plate")]
    InvalidPlate,
    /// An account with this email is already registered.
    #[error("Account already exists")]
    AccountAlreadyExists,
    /// The referenced account id does not resolve.
    #[error("Account not found")]
    AccountNotFound,
    /// The referenced ride id does not resolve.
    #[error("Ride not found")]
    RideNotFound,
    /// The account lacks the passenger role.
    #[error("Account is not from a passenger")]
    AccountNotPassenger,
    /// The account lacks the driver role.
    #[error("Account is not from a driver")]
    AccountNotDriver,
    /// The passenger already holds an active ride.
    #[error("This passenger already has an active ride")]
    PassengerHasActiveRide,
    /// The driver is already engaged in an active ride.
    #[error("Driver is already in another ride")]
    DriverAlreadyInRide,
    /// `accept` applied to a ride that is not `requested`.
    #[error("The ride is not requested")]
    RideNotRequested,
    /// `start` applied to a ride that is not `accepted`.
    #[error("The ride is not accepted")]
    RideNotAccepted,
    /// Underlying storage failure, surfaced as-is; retries belong to the
    /// caller or the storage collaborator.
    #[error("storage failure: {message}")]
    Store {
        /// Adapter-provided description of the failure.
        message: String,
    },
}

impl Error {
    /// Wrap a storage collaborator failure.
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
        }
    }
}

impl From<AccountValidationError> for Error {
    fn from(error: AccountValidationError) -> Self {
        match error {
            AccountValidationError::InvalidName => Self::InvalidName,
            AccountValidationError::InvalidEmail => Self::InvalidEmail,
            AccountValidationError::InvalidCpf => Self::InvalidCpf,
            AccountValidationError::InvalidPlate => Self::InvalidPlate,
        }
    }
}

impl From<RideTransitionError> for Error {
    fn from(error: RideTransitionError) -> Self {
        match error {
            RideTransitionError::NotRequested => Self::RideNotRequested,
            RideTransitionError::NotAccepted => Self::RideNotAccepted,
        }
    }
}
