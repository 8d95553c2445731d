//! Wire-shaped row types for the storage boundary.
//!
//! Rows mirror the storage schema: string identifiers, lowercase status
//! strings, and an empty-string `driver_id` sentinel for "no driver yet".
//! Decoding converts a row into a strongly typed entity exactly once, at
//! this boundary; the domain never sees the loose representation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::ports::{AccountStoreError, RideStoreError};
use crate::domain::{
    Account, AccountId, CarPlate, Coordinates, Cpf, Email, FullName, Ride, RideId, RideStatus,
};

/// One account row as persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRow {
    /// Account identifier, UUID in string form.
    pub account_id: String,
    /// Registered full name.
    pub name: String,
    /// Registered email.
    pub email: String,
    /// Normalised 11-digit CPF.
    pub cpf: String,
    /// Passenger role flag.
    pub is_passenger: bool,
    /// Driver role flag.
    pub is_driver: bool,
    /// Licence plate, empty when the driver flag is unset.
    pub car_plate: String,
}

impl AccountRow {
    /// Project an entity into its row representation.
    pub fn encode(account: &Account) -> Self {
        Self {
            account_id: account.account_id().to_string(),
            name: account.name().as_str().to_owned(),
            email: account.email().as_str().to_owned(),
            cpf: account.cpf().as_str().to_owned(),
            is_passenger: account.is_passenger(),
            is_driver: account.is_driver(),
            car_plate: account
                .car_plate()
                .map(|plate| plate.as_str().to_owned())
                .unwrap_or_default(),
        }
    }

    /// Decode this row into an [`Account`] via the `restore` path.
    pub fn decode(&self) -> Result<Account, AccountStoreError> {
        let account_id: AccountId = self
            .account_id
            .parse()
            .map_err(|_| AccountStoreError::decode(format!("bad account_id: {}", self.account_id)))?;
        let name = FullName::new(self.name.clone())
            .map_err(|error| AccountStoreError::decode(format!("bad name: {error}")))?;
        let email = Email::new(self.email.clone())
            .map_err(|error| AccountStoreError::decode(format!("bad email: {error}")))?;
        let cpf = Cpf::new(self.cpf.clone())
            .map_err(|error| AccountStoreError::decode(format!("bad cpf: {error}")))?;
        let car_plate = if self.is_driver {
            let plate = CarPlate::new(self.car_plate.clone())
                .map_err(|error| AccountStoreError::decode(format!("bad car_plate: {error}")))?;
            Some(plate)
        } else {
            None
        };
        Ok(Account::restore(
            account_id,
            name,
            email,
            cpf,
            self.is_passenger,
            self.is_driver,
            car_plate,
        ))
    }
}

/// One ride row as persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RideRow {
    /// Ride identifier, UUID in string form.
    pub ride_id: String,
    /// Requesting passenger's account id.
    pub passenger_id: String,
    /// Committed driver's account id, empty string until accepted.
    pub driver_id: String,
    /// Lowercase status wire string.
    pub status: String,
    /// Pickup latitude.
    pub from_lat: f64,
    /// Pickup longitude.
    pub from_long: f64,
    /// Drop-off latitude.
    pub to_lat: f64,
    /// Drop-off longitude.
    pub to_long: f64,
    /// Creation timestamp.
    pub date: DateTime<Utc>,
}

impl RideRow {
    /// Project an entity into its row representation.
    pub fn encode(ride: &Ride) -> Self {
        Self {
            ride_id: ride.ride_id().to_string(),
            passenger_id: ride.passenger_id().to_string(),
            driver_id: ride
                .driver_id()
                .map(|id| id.to_string())
                .unwrap_or_default(),
            status: ride.status().as_str().to_owned(),
            from_lat: ride.from().lat,
            from_long: ride.from().long,
            to_lat: ride.to().lat,
            to_long: ride.to().long,
            date: ride.requested_at(),
        }
    }

    /// Decode this row into a [`Ride`] via the `restore` path.
    ///
    /// The empty-string `driver_id` sentinel becomes `None`; it never leaks
    /// past this boundary.
    pub fn decode(&self) -> Result<Ride, RideStoreError> {
        let ride_id: RideId = self
            .ride_id
            .parse()
            .map_err(|_| RideStoreError::decode(format!("bad ride_id: {}", self.ride_id)))?;
        let passenger_id: AccountId = self.passenger_id.parse().map_err(|_| {
            RideStoreError::decode(format!("bad passenger_id: {}", self.passenger_id))
        })?;
        let driver_id = if self.driver_id.is_empty() {
            None
        } else {
            let id: AccountId = self
                .driver_id
                .parse()
                .map_err(|_| RideStoreError::decode(format!("bad driver_id: {}", self.driver_id)))?;
            Some(id)
        };
        let status: RideStatus = self
            .status
            .parse()
            .map_err(|error| RideStoreError::decode(format!("bad status: {error}")))?;
        Ok(Ride::restore(
            ride_id,
            passenger_id,
            driver_id,
            status,
            Coordinates {
                lat: self.from_lat,
                long: self.from_long,
            },
            Coordinates {
                lat: self.to_lat,
                long: self.to_long,
            },
            self.date,
        ))
    }
}
