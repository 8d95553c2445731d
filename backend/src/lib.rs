//! Ride-hailing booking core.
//!
//! The crate models the booking workflow of a ride-hailing service: actors
//! sign up as passengers and/or drivers, passengers request rides, drivers
//! accept and start them. Business invariants (identity validation, the ride
//! status state machine, at-most-one-active-ride per passenger and per
//! driver) live in [`domain`]; storage and notification collaborators are
//! reached through driven ports implemented by the adapters in [`outbound`].

pub mod domain;
pub mod outbound;
pub mod telemetry;
