//! Port for ride persistence.
//!
//! The contract carries the atomicity discipline for the booking
//! invariants: `update` is a compare-and-swap on the ride's status, and the
//! store enforces "at most one active ride per passenger" on `save` and
//! "at most one active ride per driver" on `update`. Orchestrators still
//! run their eager checks for precise errors, but correctness rests on
//! these commit-time guarantees.

use async_trait::async_trait;

use crate::domain::account::AccountId;
use crate::domain::ride::{Ride, RideId, RideStatus};

use super::define_port_error;

define_port_error! {
    /// Errors raised by ride store adapters.
    pub enum RideStoreError {
        /// Store connection could not be established.
        Connection {
            /// Adapter-provided description of the failure.
            message: String,
        } => "ride store connection failed: {message}",
        /// Query or mutation failed during execution.
        Query {
            /// Adapter-provided description of the failure.
            message: String,
        } => "ride store query failed: {message}",
        /// A stored row could not be decoded into a ride.
        Decode {
            /// Which field was malformed and how.
            message: String,
        } => "ride row decode failed: {message}",
        /// Conditional update found a status other than the expected one.
        StatusConflict {
            /// Identifier of the contested ride.
            ride_id: String,
            /// Status the caller expected to find.
            expected: String,
        } => "ride {ride_id} is no longer {expected}",
        /// The passenger already holds a ride in an active status.
        ActivePassengerRide {
            /// Identifier of the occupied passenger.
            passenger_id: String,
        } => "passenger {passenger_id} already has an active ride",
        /// The driver is already engaged in an active ride.
        ActiveDriverRide {
            /// Identifier of the engaged driver.
            driver_id: String,
        } => "driver {driver_id} is already engaged in an active ride",
    }
}

/// Port for ride storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RideStore: Send + Sync {
    /// Insert a newly requested ride.
    ///
    /// Fails with [`RideStoreError::ActivePassengerRide`] when the passenger
    /// already holds a ride in `requested`, `accepted`, or `in_progress` at
    /// commit time.
    async fn save(&self, ride: &Ride) -> Result<(), RideStoreError>;

    /// Persist a status transition, writing only `status` and `driver_id`.
    ///
    /// The write succeeds only while the stored row still holds `expected`
    /// ([`RideStoreError::StatusConflict`] otherwise). When the transition
    /// engages a driver, the store also rejects it with
    /// [`RideStoreError::ActiveDriverRide`] if that driver is already
    /// committed elsewhere.
    async fn update(&self, ride: &Ride, expected: RideStatus) -> Result<(), RideStoreError>;

    /// Look up a ride by id.
    async fn find_by_id(&self, id: &RideId) -> Result<Option<Ride>, RideStoreError>;

    /// Rides occupying this passenger: status in
    /// `{requested, accepted, in_progress}`.
    async fn find_active_by_passenger(
        &self,
        passenger_id: &AccountId,
    ) -> Result<Vec<Ride>, RideStoreError>;

    /// Rides occupying this driver: status in `{accepted, in_progress}`.
    async fn find_active_by_driver(
        &self,
        driver_id: &AccountId,
    ) -> Result<Vec<Ride>, RideStoreError>;
}
