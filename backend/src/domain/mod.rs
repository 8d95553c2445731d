//! Booking domain: entities, validation, ports, and use-case services.
//!
//! Purpose: enforce the booking invariants — identity validation, the ride
//! status state machine, and the at-most-one-active-ride rules — behind
//! strongly typed entities and services. Everything here is transport
//! agnostic and reaches infrastructure only through [`ports`].
//!
//! Public surface:
//! - [`Account`] / [`Ride`] — aggregates with `create`/`request` and
//!   `restore` construction paths.
//! - [`AccountService`] / [`RideService`] — the orchestrators (signup,
//!   request, accept, start, and the read paths).
//! - [`Error`] — the use-case error taxonomy.

pub mod account;
mod account_service;
pub mod error;
pub mod ports;
pub mod ride;
mod ride_service;

pub use self::account::{
    Account, AccountId, AccountValidationError, CarPlate, Cpf, Email, FullName,
};
pub use self::account_service::{AccountService, SignupRequest, SignupResponse};
pub use self::error::Error;
pub use self::ride::{
    Coordinates, ParseRideStatusError, Ride, RideId, RideStatus, RideTransitionError,
};
pub use self::ride_service::{
    AcceptRideRequest, RequestRideRequest, RequestRideResponse, RideService, StartRideRequest,
};
