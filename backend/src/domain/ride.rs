//! Ride aggregate and its status state machine.
//!
//! Status only moves forward along `requested → accepted → in_progress`.
//! The driver is assigned exactly once, on the `requested → accepted`
//! transition, and never reassigned.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::account::AccountId;

/// Stable ride identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RideId(Uuid);

impl RideId {
    /// Generate a fresh random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl FromStr for RideId {
    type Err = uuid::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(value).map(Self)
    }
}

impl fmt::Display for RideId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Lifecycle position of a ride.
///
/// Serialised to the lowercase-underscore wire strings used by storage and
/// callers (`requested`, `accepted`, `in_progress`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RideStatus {
    /// Created by a passenger, waiting for a driver.
    Requested,
    /// A driver committed to the ride.
    Accepted,
    /// The ride is underway.
    InProgress,
}

impl RideStatus {
    /// Wire representation of the status.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Requested => "requested",
            Self::Accepted => "accepted",
            Self::InProgress => "in_progress",
        }
    }

    /// Whether the ride still occupies its passenger.
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Requested | Self::Accepted | Self::InProgress)
    }

    /// Whether the ride occupies its driver.
    pub const fn engages_driver(self) -> bool {
        matches!(self, Self::Accepted | Self::InProgress)
    }
}

impl fmt::Display for RideStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown status string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown ride status: {0}")]
pub struct ParseRideStatusError(String);

impl FromStr for RideStatus {
    type Err = ParseRideStatusError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "requested" => Ok(Self::Requested),
            "accepted" => Ok(Self::Accepted),
            "in_progress" => Ok(Self::InProgress),
            other => Err(ParseRideStatusError(other.to_owned())),
        }
    }
}

/// Decimal latitude/longitude pair. No range validation is performed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub long: f64,
}

/// Errors raised by invalid status transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RideTransitionError {
    /// `accept` was called on a ride that is not `requested`.
    #[error("The ride is not requested")]
    NotRequested,
    /// `start` was called on a ride that is not `accepted`.
    #[error("The ride is not accepted")]
    NotAccepted,
}

/// One trip request, from creation through driver pickup.
#[derive(Debug, Clone, PartialEq)]
pub struct Ride {
    ride_id: RideId,
    passenger_id: AccountId,
    driver_id: Option<AccountId>,
    status: RideStatus,
    from: Coordinates,
    to: Coordinates,
    requested_at: DateTime<Utc>,
}

impl Ride {
    /// Create a new ride in `requested` with a fresh identifier.
    ///
    /// Always succeeds; `now` comes from the caller's clock so the timestamp
    /// stays testable.
    pub fn request(
        passenger_id: AccountId,
        from: Coordinates,
        to: Coordinates,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            ride_id: RideId::random(),
            passenger_id,
            driver_id: None,
            status: RideStatus::Requested,
            from,
            to,
            requested_at: now,
        }
    }

    /// Rebuild a ride from persisted fields.
    ///
    /// Store-boundary path: no identifier generation and no status
    /// defaulting.
    pub const fn restore(
        ride_id: RideId,
        passenger_id: AccountId,
        driver_id: Option<AccountId>,
        status: RideStatus,
        from: Coordinates,
        to: Coordinates,
        requested_at: DateTime<Utc>,
    ) -> Self {
        Self {
            ride_id,
            passenger_id,
            driver_id,
            status,
            from,
            to,
            requested_at,
        }
    }

    /// Commit a driver to this ride.
    ///
    /// Valid only from `requested`; assigns the driver and moves to
    /// `accepted`.
    pub fn accept(&mut self, driver_id: AccountId) -> Result<(), RideTransitionError> {
        if self.status != RideStatus::Requested {
            return Err(RideTransitionError::NotRequested);
        }
        self.driver_id = Some(driver_id);
        self.status = RideStatus::Accepted;
        Ok(())
    }

    /// Begin the trip.
    ///
    /// Valid only from `accepted`.
    pub fn start(&mut self) -> Result<(), RideTransitionError> {
        if self.status != RideStatus::Accepted {
            return Err(RideTransitionError::NotAccepted);
        }
        self.status = RideStatus::InProgress;
        Ok(())
    }

    /// Stable identifier of this ride.
    pub const fn ride_id(&self) -> RideId {
        self.ride_id
    }

    /// Passenger who requested the ride.
    pub const fn passenger_id(&self) -> AccountId {
        self.passenger_id
    }

    /// Driver committed to the ride, absent until accepted.
    pub const fn driver_id(&self) -> Option<AccountId> {
        self.driver_id
    }

    /// Current lifecycle position.
    pub const fn status(&self) -> RideStatus {
        self.status
    }

    /// Pickup location.
    pub const fn from(&self) -> Coordinates {
        self.from
    }

    /// Drop-off location.
    pub const fn to(&self) -> Coordinates {
        self.to
    }

    /// Creation timestamp.
    pub const fn requested_at(&self) -> DateTime<Utc> {
        self.requested_at
    }
}
