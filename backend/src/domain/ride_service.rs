//! Ride use-cases: request, accept, start, and the ride read path.
//!
//! Each operation loads state from the stores, applies a transition in
//! memory, and persists the result; entities are transient per-request
//! values, never shared across calls. Eager checks produce precise errors,
//! while the store's compare-and-swap and uniqueness guarantees keep the
//! invariants under races (two accepts on one ride, one passenger or driver
//! racing themselves).

use std::sync::Arc;

use mockable::Clock;

use crate::domain::Error;
use crate::domain::account::AccountId;
use crate::domain::ports::{AccountStore, RideStore, RideStoreError};
use crate::domain::ride::{Coordinates, Ride, RideId, RideStatus};

/// Input for [`RideService::request_ride`].
#[derive(Debug, Clone, Copy)]
pub struct RequestRideRequest {
    /// Account requesting the ride; must hold the passenger role.
    pub passenger_id: AccountId,
    /// Pickup location.
    pub from: Coordinates,
    /// Drop-off location.
    pub to: Coordinates,
}

/// Output of [`RideService::request_ride`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestRideResponse {
    /// Identifier of the newly created ride.
    pub ride_id: RideId,
}

/// Input for [`RideService::accept_ride`].
#[derive(Debug, Clone, Copy)]
pub struct AcceptRideRequest {
    /// Ride to accept; must be in `requested`.
    pub ride_id: RideId,
    /// Account accepting the ride; must hold the driver role.
    pub driver_id: AccountId,
}

/// Input for [`RideService::start_ride`].
#[derive(Debug, Clone, Copy)]
pub struct StartRideRequest {
    /// Ride to start; must be in `accepted`.
    pub ride_id: RideId,
}

/// Orchestrates the ride booking lifecycle.
#[derive(Clone)]
pub struct RideService<R, A> {
    rides: Arc<R>,
    accounts: Arc<A>,
    clock: Arc<dyn Clock>,
}

impl<R, A> RideService<R, A> {
    /// Create a new service over the ride and account stores.
    ///
    /// The clock stamps new rides; inject a mock to freeze time in tests.
    pub fn new(rides: Arc<R>, accounts: Arc<A>, clock: Arc<dyn Clock>) -> Self {
        Self {
            rides,
            accounts,
            clock,
        }
    }
}

impl<R, A> RideService<R, A>
where
    R: RideStore,
    A: AccountStore,
{
    /// Create a ride for an eligible passenger without an active ride.
    pub async fn request_ride(
        &self,
        request: RequestRideRequest,
    ) -> Result<RequestRideResponse, Error> {
        let passenger = self
            .accounts
            .find_by_id(&request.passenger_id)
            .await
            .map_err(|error| Error::store(error.to_string()))?
            .ok_or(Error::AccountNotFound)?;
        if !passenger.is_passenger() {
            return Err(Error::AccountNotPassenger);
        }

        let active = self
            .rides
            .find_active_by_passenger(&request.passenger_id)
            .await
            .map_err(map_ride_lookup_error)?;
        if !active.is_empty() {
            return Err(Error::PassengerHasActiveRide);
        }

        let ride = Ride::request(
            request.passenger_id,
            request.from,
            request.to,
            self.clock.utc(),
        );
        self.rides.save(&ride).await.map_err(|error| match error {
            RideStoreError::ActivePassengerRide { .. } => Error::PassengerHasActiveRide,
            other => Error::store(other.to_string()),
        })?;

        Ok(RequestRideResponse {
            ride_id: ride.ride_id(),
        })
    }

    /// Commit an eligible, unengaged driver to a requested ride.
    pub async fn accept_ride(&self, request: AcceptRideRequest) -> Result<(), Error> {
        let mut ride = self
            .rides
            .find_by_id(&request.ride_id)
            .await
            .map_err(map_ride_lookup_error)?
            .ok_or(Error::RideNotFound)?;

        let driver = self
            .accounts
            .find_by_id(&request.driver_id)
            .await
            .map_err(|error| Error::store(error.to_string()))?
            .ok_or(Error::AccountNotFound)?;
        if !driver.is_driver() {
            return Err(Error::AccountNotDriver);
        }

        let engaged = self
            .rides
            .find_active_by_driver(&request.driver_id)
            .await
            .map_err(map_ride_lookup_error)?;
        if !engaged.is_empty() {
            return Err(Error::DriverAlreadyInRide);
        }

        ride.accept(request.driver_id)?;
        self.rides
            .update(&ride, RideStatus::Requested)
            .await
            .map_err(|error| match error {
                RideStoreError::StatusConflict { .. } => Error::RideNotRequested,
                RideStoreError::ActiveDriverRide { .. } => Error::DriverAlreadyInRide,
                other => Error::store(other.to_string()),
            })
    }

    /// Move an accepted ride to `in_progress`.
    pub async fn start_ride(&self, request: StartRideRequest) -> Result<(), Error> {
        let mut ride = self
            .rides
            .find_by_id(&request.ride_id)
            .await
            .map_err(map_ride_lookup_error)?
            .ok_or(Error::RideNotFound)?;

        ride.start()?;
        self.rides
            .update(&ride, RideStatus::Accepted)
            .await
            .map_err(|error| match error {
                RideStoreError::StatusConflict { .. } => Error::RideNotAccepted,
                other => Error::store(other.to_string()),
            })
    }

    /// Load a ride by id.
    pub async fn get_ride(&self, id: &RideId) -> Result<Ride, Error> {
        self.rides
            .find_by_id(id)
            .await
            .map_err(map_ride_lookup_error)?
            .ok_or(Error::RideNotFound)
    }
}

/// Translate read-path store failures; invariant violations cannot occur on
/// lookups, so everything becomes a storage error.
fn map_ride_lookup_error(error: RideStoreError) -> Error {
    Error::store(error.to_string())
}
