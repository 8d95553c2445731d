//! Account aggregate and its identity value objects.
//!
//! Construction is validation: every value object only exists in a valid
//! state, so the rest of the domain never re-checks shapes. `restore`
//! rebuilds an [`Account`] from already-validated parts when a row is
//! decoded at the store boundary.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Validation errors returned by the account value object constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountValidationError {
    /// Name does not contain at least a first and a last token.
    InvalidName,
    /// Email does not match the `local@domain` shape.
    InvalidEmail,
    /// CPF is too short, degenerate, or fails the checksum.
    InvalidCpf,
    /// Car plate is not three uppercase letters followed by four digits.
    InvalidPlate,
}

impl fmt::Display for AccountValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidName => write!(f, "name must contain a first and a last name"),
            Self::InvalidEmail => write!(f, "email must look like local@domain"),
            Self::InvalidCpf => write!(f, "cpf checksum is invalid"),
            Self::InvalidPlate => {
                write!(f, "car plate must be three letters followed by four digits")
            }
        }
    }
}

impl std::error::Error for AccountValidationError {}

/// Stable account identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(Uuid);

impl AccountId {
    /// Generate a fresh random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl FromStr for AccountId {
    type Err = uuid::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(value).map(Self)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Full name holding at least two whitespace-separated tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FullName(String);

impl FullName {
    /// Validate and construct a [`FullName`].
    pub fn new(name: impl Into<String>) -> Result<Self, AccountValidationError> {
        Self::from_owned(name.into())
    }

    fn from_owned(name: String) -> Result<Self, AccountValidationError> {
        if name.split_whitespace().count() < 2 {
            return Err(AccountValidationError::InvalidName);
        }
        Ok(Self(name))
    }

    /// Borrow the name as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Email address in `local@domain` shape.
///
/// Only the shape is validated; deliverability is the mailer's concern.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Non-empty local part, a single @, and a dotted domain without whitespace.
        let pattern = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

impl Email {
    /// Validate and construct an [`Email`].
    pub fn new(email: impl Into<String>) -> Result<Self, AccountValidationError> {
        Self::from_owned(email.into())
    }

    fn from_owned(email: String) -> Result<Self, AccountValidationError> {
        if !email_regex().is_match(&email) {
            return Err(AccountValidationError::InvalidEmail);
        }
        Ok(Self(email))
    }

    /// Borrow the address as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Brazilian individual taxpayer identifier, stored as its 11 digits.
///
/// Formatting characters are stripped on construction, so `111.444.777-35`
/// and `11144477735` normalise to the same value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Cpf(String);

const CPF_LEN: usize = 11;

impl Cpf {
    /// Validate and construct a [`Cpf`], verifying both check digits.
    pub fn new(cpf: impl Into<String>) -> Result<Self, AccountValidationError> {
        Self::from_owned(cpf.into())
    }

    fn from_owned(cpf: String) -> Result<Self, AccountValidationError> {
        let digits: Vec<u32> = cpf.chars().filter_map(|c| c.to_digit(10)).collect();
        if digits.len() != CPF_LEN {
            return Err(AccountValidationError::InvalidCpf);
        }
        if digits.iter().all(|d| Some(d) == digits.first()) {
            return Err(AccountValidationError::InvalidCpf);
        }
        let (body, check) = digits.split_at(CPF_LEN - 2);
        let mut verifier: Vec<u32> = body.to_vec();
        let first = check_digit(&verifier);
        verifier.push(first);
        let second = check_digit(&verifier);
        if check != &[first, second][..] {
            return Err(AccountValidationError::InvalidCpf);
        }
        Ok(Self(digits.iter().map(|d| d.to_string()).collect()))
    }

    /// Borrow the normalised digits as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Modulo-11 check digit over `digits` with descending weights.
///
/// Nine digits are weighted 10..2, ten digits 11..2; a remainder of 10
/// collapses to 0.
fn check_digit(digits: &[u32]) -> u32 {
    let top = u32::try_from(digits.len()).unwrap_or(u32::MAX) + 1;
    let sum: u32 = (2..=top).rev().zip(digits).map(|(w, d)| w * d).sum();
    let rest = (sum * 10) % 11;
    if rest == 10 { 0 } else { rest }
}

/// Driver licence plate: exactly `[A-Z]{3}[0-9]{4}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CarPlate(String);

static PLATE_RE: OnceLock<Regex> = OnceLock::new();

fn plate_regex() -> &'static Regex {
    PLATE_RE.get_or_init(|| {
        let pattern = "^[A-Z]{3}[0-9]{4}$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("plate regex failed to compile: {error}"))
    })
}

impl CarPlate {
    /// Validate and construct a [`CarPlate`].
    pub fn new(plate: impl Into<String>) -> Result<Self, AccountValidationError> {
        Self::from_owned(plate.into())
    }

    fn from_owned(plate: String) -> Result<Self, AccountValidationError> {
        if !plate_regex().is_match(&plate) {
            return Err(AccountValidationError::InvalidPlate);
        }
        Ok(Self(plate))
    }

    /// Borrow the plate as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

macro_rules! string_value_object_conversions {
    ($($name:ident),* $(,)?) => {
        $(
            impl TryFrom<String> for $name {
                type Error = AccountValidationError;

                fn try_from(value: String) -> Result<Self, Self::Error> {
                    Self::from_owned(value)
                }
            }

            impl From<$name> for String {
                fn from(value: $name) -> Self {
                    value.0
                }
            }

            impl AsRef<str> for $name {
                fn as_ref(&self) -> &str {
                    self.as_str()
                }
            }
        )*
    };
}

string_value_object_conversions!(FullName, Email, Cpf, CarPlate);

/// A registered actor: passenger, driver, or both.
///
/// Immutable after creation; no update operation exists. The car plate is
/// present exactly when the driver flag is set.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    account_id: AccountId,
    name: FullName,
    email: Email,
    cpf: Cpf,
    is_passenger: bool,
    is_driver: bool,
    car_plate: Option<CarPlate>,
}

impl Account {
    /// Validate input and create a new account with a fresh identifier.
    ///
    /// Validation order is name, email, cpf, then plate (drivers only),
    /// short-circuiting on the first failure. `car_plate` is ignored for
    /// non-drivers.
    pub fn create(
        name: &str,
        email: &str,
        cpf: &str,
        is_passenger: bool,
        is_driver: bool,
        car_plate: &str,
    ) -> Result<Self, AccountValidationError> {
        let name = FullName::new(name)?;
        let email = Email::new(email)?;
        let cpf = Cpf::new(cpf)?;
        let car_plate = if is_driver {
            Some(CarPlate::new(car_plate)?)
        } else {
            None
        };
        Ok(Self {
            account_id: AccountId::random(),
            name,
            email,
            cpf,
            is_passenger,
            is_driver,
            car_plate,
        })
    }

    /// Rebuild an account from already-validated parts.
    ///
    /// Store-boundary path: no identifier is generated and no business rule
    /// re-runs.
    pub const fn restore(
        account_id: AccountId,
        name: FullName,
        email: Email,
        cpf: Cpf,
        is_passenger: bool,
        is_driver: bool,
        car_plate: Option<CarPlate>,
    ) -> Self {
        Self {
            account_id,
            name,
            email,
            cpf,
            is_passenger,
            is_driver,
            car_plate,
        }
    }

    /// Stable identifier of this account.
    pub const fn account_id(&self) -> AccountId {
        self.account_id
    }

    /// Registered full name.
    pub const fn name(&self) -> &FullName {
        &self.name
    }

    /// Registered email address, unique across accounts.
    pub const fn email(&self) -> &Email {
        &self.email
    }

    /// Registered CPF.
    pub const fn cpf(&self) -> &Cpf {
        &self.cpf
    }

    /// Whether this account may request rides.
    pub const fn is_passenger(&self) -> bool {
        self.is_passenger
    }

    /// Whether this account may accept rides.
    pub const fn is_driver(&self) -> bool {
        self.is_driver
    }

    /// Licence plate, present iff [`Account::is_driver`].
    pub const fn car_plate(&self) -> Option<&CarPlate> {
        self.car_plate.as_ref()
    }
}
