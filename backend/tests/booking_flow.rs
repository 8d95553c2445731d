//! End-to-end booking flow against the in-memory stores.

use std::sync::Arc;

use backend::domain::ports::FixtureMailer;
use backend::domain::{
    AcceptRideRequest, AccountService, Coordinates, Error, RequestRideRequest, RideId, RideStatus,
    SignupRequest, StartRideRequest,
};
use backend::outbound::{InMemoryAccountStore, InMemoryRideStore};
use chrono::Utc;
use mockable::{DefaultClock, MockClock};
use rstest::{fixture, rstest};
use uuid::Uuid;

type Accounts = AccountService<InMemoryAccountStore, FixtureMailer>;
type Rides = backend::domain::RideService<InMemoryRideStore, InMemoryAccountStore>;

struct Harness {
    accounts: Accounts,
    rides: Rides,
}

#[fixture]
fn harness() -> Harness {
    backend::telemetry::init();
    let account_store = Arc::new(InMemoryAccountStore::new());
    let ride_store = Arc::new(InMemoryRideStore::new());
    Harness {
        accounts: AccountService::new(Arc::clone(&account_store), Arc::new(FixtureMailer)),
        rides: backend::domain::RideService::new(
            ride_store,
            account_store,
            Arc::new(DefaultClock),
        ),
    }
}

fn unique_email() -> String {
    format!("john.doe.{}@gmail.com", Uuid::new_v4())
}

fn passenger_signup() -> SignupRequest {
    SignupRequest {
        name: "John Doe".to_owned(),
        email: unique_email(),
        cpf: "95818705552".to_owned(),
        is_passenger: true,
        is_driver: false,
        car_plate: String::new(),
    }
}

fn driver_signup() -> SignupRequest {
    SignupRequest {
        name: "Jane Doe".to_owned(),
        email: unique_email(),
        cpf: "95818705552".to_owned(),
        is_passenger: false,
        is_driver: true,
        car_plate: "AAA1234".to_owned(),
    }
}

fn downtown() -> Coordinates {
    Coordinates {
        lat: -27.584905,
        long: -48.545022,
    }
}

fn airport() -> Coordinates {
    Coordinates {
        lat: -27.496887,
        long: -48.522234,
    }
}

async fn request_a_ride(harness: &Harness) -> RideId {
    let passenger = harness
        .accounts
        .signup(passenger_signup())
        .await
        .expect("passenger signup");
    harness
        .rides
        .request_ride(RequestRideRequest {
            passenger_id: passenger.account_id,
            from: downtown(),
            to: airport(),
        })
        .await
        .expect("ride requested")
        .ride_id
}

#[rstest]
#[tokio::test]
async fn signup_creates_a_passenger(harness: Harness) {
    let request = passenger_signup();
    let response = harness
        .accounts
        .signup(request.clone())
        .await
        .expect("signup succeeds");

    let account = harness
        .accounts
        .get_account(&response.account_id)
        .await
        .expect("account found");
    assert_eq!(account.name().as_str(), request.name);
    assert_eq!(account.email().as_str(), request.email);
    assert_eq!(account.cpf().as_str(), request.cpf);
    assert!(account.is_passenger());
    assert!(!account.is_driver());
}

#[rstest]
#[case::bad_cpf(
    SignupRequest { cpf: "95818705500".to_owned(), ..passenger_signup() },
    Error::InvalidCpf
)]
#[case::bad_name(
    SignupRequest { name: "John".to_owned(), ..passenger_signup() },
    Error::InvalidName
)]
#[case::bad_email(
    SignupRequest { email: "john.doegmail.com".to_owned(), ..passenger_signup() },
    Error::InvalidEmail
)]
#[case::bad_plate(
    SignupRequest { car_plate: "AAA12".to_owned(), ..driver_signup() },
    Error::InvalidPlate
)]
#[tokio::test]
async fn signup_rejects_invalid_identities(
    harness: Harness,
    #[case] request: SignupRequest,
    #[case] expected: Error,
) {
    let error = harness
        .accounts
        .signup(request)
        .await
        .expect_err("signup rejected");
    assert_eq!(error, expected);
}

#[rstest]
#[tokio::test]
async fn signup_rejects_a_reused_email(harness: Harness) {
    let request = passenger_signup();
    harness
        .accounts
        .signup(request.clone())
        .await
        .expect("first signup");

    let error = harness
        .accounts
        .signup(request)
        .await
        .expect_err("second signup");
    assert_eq!(error, Error::AccountAlreadyExists);
}

#[rstest]
#[tokio::test]
async fn request_and_consult_a_ride(harness: Harness) {
    let passenger = harness
        .accounts
        .signup(passenger_signup())
        .await
        .expect("signup");
    let response = harness
        .rides
        .request_ride(RequestRideRequest {
            passenger_id: passenger.account_id,
            from: downtown(),
            to: airport(),
        })
        .await
        .expect("ride requested");

    let ride = harness
        .rides
        .get_ride(&response.ride_id)
        .await
        .expect("ride found");
    assert_eq!(ride.status(), RideStatus::Requested);
    assert_eq!(ride.passenger_id(), passenger.account_id);
    assert_eq!(ride.driver_id(), None);
    assert_eq!(ride.from(), downtown());
    assert_eq!(ride.to(), airport());
}

#[tokio::test]
async fn requested_rides_carry_the_clock_timestamp() {
    let now = Utc::now();
    let mut clock = MockClock::new();
    clock.expect_utc().returning(move || now);

    let account_store = Arc::new(InMemoryAccountStore::new());
    let accounts = AccountService::new(Arc::clone(&account_store), Arc::new(FixtureMailer));
    let rides = backend::domain::RideService::new(
        Arc::new(InMemoryRideStore::new()),
        account_store,
        Arc::new(clock),
    );

    let passenger = accounts.signup(passenger_signup()).await.expect("signup");
    let response = rides
        .request_ride(RequestRideRequest {
            passenger_id: passenger.account_id,
            from: downtown(),
            to: airport(),
        })
        .await
        .expect("ride requested");

    let ride = rides.get_ride(&response.ride_id).await.expect("ride found");
    assert_eq!(ride.requested_at(), now);
}

#[rstest]
#[tokio::test]
async fn request_rejects_a_driver_only_account(harness: Harness) {
    let driver = harness
        .accounts
        .signup(driver_signup())
        .await
        .expect("driver signup");

    let error = harness
        .rides
        .request_ride(RequestRideRequest {
            passenger_id: driver.account_id,
            from: downtown(),
            to: downtown(),
        })
        .await
        .expect_err("driver cannot request");
    assert_eq!(error, Error::AccountNotPassenger);
}

#[rstest]
#[tokio::test]
async fn request_rejects_a_passenger_with_an_active_ride(harness: Harness) {
    let passenger = harness
        .accounts
        .signup(passenger_signup())
        .await
        .expect("signup");
    let request = RequestRideRequest {
        passenger_id: passenger.account_id,
        from: downtown(),
        to: downtown(),
    };
    harness
        .rides
        .request_ride(request)
        .await
        .expect("first ride");

    let error = harness
        .rides
        .request_ride(request)
        .await
        .expect_err("second ride");
    assert_eq!(error, Error::PassengerHasActiveRide);
}

#[rstest]
#[tokio::test]
async fn accept_assigns_the_driver(harness: Harness) {
    let ride_id = request_a_ride(&harness).await;
    let driver = harness
        .accounts
        .signup(driver_signup())
        .await
        .expect("driver signup");

    harness
        .rides
        .accept_ride(AcceptRideRequest {
            ride_id,
            driver_id: driver.account_id,
        })
        .await
        .expect("ride accepted");

    let ride = harness.rides.get_ride(&ride_id).await.expect("ride found");
    assert_eq!(ride.status(), RideStatus::Accepted);
    assert_eq!(ride.driver_id(), Some(driver.account_id));
}

#[rstest]
#[tokio::test]
async fn accept_rejects_an_account_without_the_driver_role(harness: Harness) {
    let ride_id = request_a_ride(&harness).await;
    let not_a_driver = harness
        .accounts
        .signup(passenger_signup())
        .await
        .expect("signup");

    let error = harness
        .rides
        .accept_ride(AcceptRideRequest {
            ride_id,
            driver_id: not_a_driver.account_id,
        })
        .await
        .expect_err("passenger cannot accept");
    assert_eq!(error, Error::AccountNotDriver);
}

#[rstest]
#[tokio::test]
async fn accept_rejects_a_ride_that_was_already_accepted(harness: Harness) {
    let ride_id = request_a_ride(&harness).await;
    let first = harness
        .accounts
        .signup(driver_signup())
        .await
        .expect("first driver");
    let second = harness
        .accounts
        .signup(driver_signup())
        .await
        .expect("second driver");

    harness
        .rides
        .accept_ride(AcceptRideRequest {
            ride_id,
            driver_id: first.account_id,
        })
        .await
        .expect("first accept");

    let error = harness
        .rides
        .accept_ride(AcceptRideRequest {
            ride_id,
            driver_id: second.account_id,
        })
        .await
        .expect_err("second accept");
    assert_eq!(error, Error::RideNotRequested);

    // The winner keeps the ride.
    let ride = harness.rides.get_ride(&ride_id).await.expect("ride found");
    assert_eq!(ride.driver_id(), Some(first.account_id));
}

#[rstest]
#[tokio::test]
async fn accept_rejects_a_driver_who_already_holds_a_ride(harness: Harness) {
    let first_ride = request_a_ride(&harness).await;
    let second_ride = request_a_ride(&harness).await;
    let driver = harness
        .accounts
        .signup(driver_signup())
        .await
        .expect("driver signup");

    harness
        .rides
        .accept_ride(AcceptRideRequest {
            ride_id: first_ride,
            driver_id: driver.account_id,
        })
        .await
        .expect("first accept");

    let error = harness
        .rides
        .accept_ride(AcceptRideRequest {
            ride_id: second_ride,
            driver_id: driver.account_id,
        })
        .await
        .expect_err("driver is busy");
    assert_eq!(error, Error::DriverAlreadyInRide);
}

#[rstest]
#[tokio::test]
async fn accept_and_start_a_ride(harness: Harness) {
    let ride_id = request_a_ride(&harness).await;
    let driver = harness
        .accounts
        .signup(driver_signup())
        .await
        .expect("driver signup");

    harness
        .rides
        .accept_ride(AcceptRideRequest {
            ride_id,
            driver_id: driver.account_id,
        })
        .await
        .expect("accept");
    harness
        .rides
        .start_ride(StartRideRequest { ride_id })
        .await
        .expect("start");

    let ride = harness.rides.get_ride(&ride_id).await.expect("ride found");
    assert_eq!(ride.status(), RideStatus::InProgress);
    assert_eq!(ride.driver_id(), Some(driver.account_id));
}

#[rstest]
#[tokio::test]
async fn start_rejects_a_ride_that_was_not_accepted(harness: Harness) {
    let ride_id = request_a_ride(&harness).await;

    let error = harness
        .rides
        .start_ride(StartRideRequest { ride_id })
        .await
        .expect_err("still requested");
    assert_eq!(error, Error::RideNotAccepted);
}

#[rstest]
#[tokio::test]
async fn reads_report_missing_identifiers(harness: Harness) {
    let account_error = harness
        .accounts
        .get_account(&backend::domain::AccountId::random())
        .await
        .expect_err("missing account");
    assert_eq!(account_error, Error::AccountNotFound);

    let ride_error = harness
        .rides
        .get_ride(&RideId::random())
        .await
        .expect_err("missing ride");
    assert_eq!(ride_error, Error::RideNotFound);
}
