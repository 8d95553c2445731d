//! In-memory storage adapters.
//!
//! Reference implementations of the store ports, used by the integration
//! tests and as the executable contract for durable adapters. Rows live in
//! their wire representation behind one mutex per store; every
//! check-then-write runs under a single lock hold, which provides the
//! compare-and-swap and uniqueness guarantees the [`RideStore`] contract
//! demands.

mod rows;

pub use rows::{AccountRow, RideRow};

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{AccountStore, AccountStoreError, RideStore, RideStoreError};
use crate::domain::{Account, AccountId, Email, Ride, RideId, RideStatus};

/// Account store backed by a mutex-guarded map of wire rows.
#[derive(Debug, Default)]
pub struct InMemoryAccountStore {
    rows: Mutex<HashMap<String, AccountRow>>,
}

impl InMemoryAccountStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, AccountRow>>, AccountStoreError> {
        self.rows
            .lock()
            .map_err(|_| AccountStoreError::connection("account store mutex poisoned"))
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn save(&self, account: &Account) -> Result<(), AccountStoreError> {
        let mut rows = self.lock()?;
        if rows
            .values()
            .any(|row| row.email == account.email().as_str())
        {
            return Err(AccountStoreError::duplicate_email(account.email().as_str()));
        }
        let row = AccountRow::encode(account);
        rows.insert(row.account_id.clone(), row);
        Ok(())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<Account>, AccountStoreError> {
        let rows = self.lock()?;
        rows.values()
            .find(|row| row.email == email.as_str())
            .map(AccountRow::decode)
            .transpose()
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountStoreError> {
        let rows = self.lock()?;
        rows.get(&id.to_string()).map(AccountRow::decode).transpose()
    }
}

/// Ride store backed by a mutex-guarded map of wire rows.
#[derive(Debug, Default)]
pub struct InMemoryRideStore {
    rows: Mutex<HashMap<String, RideRow>>,
}

impl InMemoryRideStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, RideRow>>, RideStoreError> {
        self.rows
            .lock()
            .map_err(|_| RideStoreError::connection("ride store mutex poisoned"))
    }
}

fn row_status_is_active(row: &RideRow) -> bool {
    row.status
        .parse::<RideStatus>()
        .is_ok_and(RideStatus::is_active)
}

fn row_status_engages_driver(row: &RideRow) -> bool {
    row.status
        .parse::<RideStatus>()
        .is_ok_and(RideStatus::engages_driver)
}

#[async_trait]
impl RideStore for InMemoryRideStore {
    async fn save(&self, ride: &Ride) -> Result<(), RideStoreError> {
        let mut rows = self.lock()?;
        let passenger_key = ride.passenger_id().to_string();
        if rows
            .values()
            .any(|row| row.passenger_id == passenger_key && row_status_is_active(row))
        {
            return Err(RideStoreError::active_passenger_ride(passenger_key));
        }
        let row = RideRow::encode(ride);
        rows.insert(row.ride_id.clone(), row);
        Ok(())
    }

    async fn update(&self, ride: &Ride, expected: RideStatus) -> Result<(), RideStoreError> {
        let mut rows = self.lock()?;
        let key = ride.ride_id().to_string();
        let current_status = rows
            .get(&key)
            .map(|row| row.status.clone())
            .ok_or_else(|| RideStoreError::query(format!("ride {key} does not exist")))?;
        if current_status != expected.as_str() {
            return Err(RideStoreError::status_conflict(key, expected.as_str()));
        }
        if let Some(driver_id) = ride.driver_id() {
            let driver_key = driver_id.to_string();
            let engaged = rows.values().any(|row| {
                row.ride_id != key
                    && row.driver_id == driver_key
                    && row_status_engages_driver(row)
            });
            if engaged {
                return Err(RideStoreError::active_driver_ride(driver_key));
            }
        }
        if let Some(row) = rows.get_mut(&key) {
            // Only status and driver assignment are mutable after creation.
            row.status = ride.status().as_str().to_owned();
            row.driver_id = ride
                .driver_id()
                .map(|id| id.to_string())
                .unwrap_or_default();
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &RideId) -> Result<Option<Ride>, RideStoreError> {
        let rows = self.lock()?;
        rows.get(&id.to_string()).map(RideRow::decode).transpose()
    }

    async fn find_active_by_passenger(
        &self,
        passenger_id: &AccountId,
    ) -> Result<Vec<Ride>, RideStoreError> {
        let rows = self.lock()?;
        let key = passenger_id.to_string();
        rows.values()
            .filter(|row| row.passenger_id == key && row_status_is_active(row))
            .map(RideRow::decode)
            .collect()
    }

    async fn find_active_by_driver(
        &self,
        driver_id: &AccountId,
    ) -> Result<Vec<Ride>, RideStoreError> {
        let rows = self.lock()?;
        let key = driver_id.to_string();
        rows.values()
            .filter(|row| row.driver_id == key && row_status_engages_driver(row))
            .map(RideRow::decode)
            .collect()
    }
}
