//! Driven ports at the hexagonal boundary.
//!
//! Each port exposes strongly typed errors so adapters map their failures
//! into predictable variants instead of returning `anyhow::Result`.

mod macros;
pub(crate) use macros::define_port_error;

mod account_store;
mod mailer;
mod ride_store;

#[cfg(test)]
pub use account_store::MockAccountStore;
pub use account_store::{AccountStore, AccountStoreError};
#[cfg(test)]
pub use mailer::MockMailer;
pub use mailer::{FixtureMailer, Mailer, MailerError};
#[cfg(test)]
pub use ride_store::MockRideStore;
pub use ride_store::{RideStore, RideStoreError};

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(
        AccountStoreError::duplicate_email("john.doe@gmail.com"),
        "an account with email john.doe@gmail.com already exists"
    )]
    #[case(
        AccountStoreError::connection("refused"),
        "account store connection failed: refused"
    )]
    fn account_store_errors_format_their_messages(
        #[case] error: AccountStoreError,
        #[case] expected: &str,
    ) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    #[case(
        RideStoreError::status_conflict("r-1", "requested"),
        "ride r-1 is no longer requested"
    )]
    #[case(
        RideStoreError::active_driver_ride("d-1"),
        "driver d-1 is already engaged in an active ride"
    )]
    #[case(
        RideStoreError::active_passenger_ride("p-1"),
        "passenger p-1 already has an active ride"
    )]
    fn ride_store_errors_format_their_messages(
        #[case] error: RideStoreError,
        #[case] expected: &str,
    ) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    fn constructors_populate_named_fields() {
        let RideStoreError::StatusConflict { ride_id, expected } =
            RideStoreError::status_conflict("r-1", "requested")
        else {
            panic!("constructor must build StatusConflict");
        };
        assert_eq!(ride_id, "r-1");
        assert_eq!(expected, "requested");
    }
}
