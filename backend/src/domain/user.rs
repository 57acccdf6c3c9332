//! User entity: principal identity, names, balances, and rental state.

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use uuid::Uuid;

use crate::domain::car::CarId;

/// Validation errors returned by the user value constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// The principal string was empty.
    EmptyId,
    /// The principal string was not a valid UUID.
    InvalidId,
    /// The name was empty or whitespace-only.
    EmptyName,
    /// The name exceeded the maximum length.
    NameTooLong {
        /// Maximum number of characters accepted.
        max: usize,
    },
    /// The name contained characters outside the accepted set.
    NameInvalidCharacters,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "user id must not be empty"),
            Self::InvalidId => write!(f, "user id must be a valid UUID"),
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::NameTooLong { max } => {
                write!(f, "name must be at most {max} characters")
            }
            Self::NameInvalidCharacters => write!(
                f,
                "name may only contain letters, spaces, hyphens, or apostrophes",
            ),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Opaque caller principal resolved by the identity layer.
///
/// Stored as a UUID; the ledger never interprets it beyond equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(Uuid);

impl UserId {
    /// Validate and construct a [`UserId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let raw = id.as_ref();
        if raw.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if raw.trim() != raw {
            return Err(UserValidationError::InvalidId);
        }
        let parsed = Uuid::parse_str(raw).map_err(|_| UserValidationError::InvalidId)?;
        Ok(Self(parsed))
    }

    /// Generate a new random [`UserId`].
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for UserId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

/// Maximum allowed length for a person name.
pub const PERSON_NAME_MAX: usize = 64;

static PERSON_NAME_RE: OnceLock<Regex> = OnceLock::new();

fn person_name_regex() -> &'static Regex {
    PERSON_NAME_RE.get_or_init(|| {
        // Length is enforced separately; this regex constrains allowed characters.
        let pattern = r"^[\p{L}\p{M}' \-]+$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("person name regex failed to compile: {error}"))
    })
}

/// Validated given name or surname.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName(String);

impl PersonName {
    /// Validate and construct a [`PersonName`] from owned input.
    pub fn new(name: impl Into<String>) -> Result<Self, UserValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        if name.chars().count() > PERSON_NAME_MAX {
            return Err(UserValidationError::NameTooLong {
                max: PERSON_NAME_MAX,
            });
        }
        if !person_name_regex().is_match(&name) {
            return Err(UserValidationError::NameInvalidCharacters);
        }
        Ok(Self(name))
    }
}

impl AsRef<str> for PersonName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<PersonName> for String {
    fn from(value: PersonName) -> Self {
        value.0
    }
}

/// The car a user currently holds, together with the check-out instant.
///
/// Pairing both in one value keeps the "renting implies a start time"
/// invariant true by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveRental {
    car_id: CarId,
    started_at: DateTime<Utc>,
}

impl ActiveRental {
    /// Record a rental of `car_id` beginning at `started_at`.
    #[must_use]
    pub fn new(car_id: CarId, started_at: DateTime<Utc>) -> Self {
        Self { car_id, started_at }
    }

    /// The rented car.
    #[must_use]
    pub fn car_id(&self) -> CarId {
        self.car_id
    }

    /// Check-out instant.
    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Whole minutes elapsed since check-out; display-only.
    #[must_use]
    pub fn ride_minutes(&self, now: DateTime<Utc>) -> i64 {
        (now - self.started_at).num_minutes()
    }
}

/// State-transition failures raised by [`User`] mutators.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserStateError {
    /// The user already holds a rental.
    #[error("user already holds a rented car")]
    AlreadyRenting,
    /// The user holds no rental.
    #[error("user has no active rental")]
    NotRenting,
    /// A debit exceeded the available balance.
    #[error("insufficient balance: requested {requested}, available {available}")]
    InsufficientBalance {
        /// Amount the caller asked to move.
        requested: u64,
        /// Balance actually held.
        available: u64,
    },
    /// A credit or accrual overflowed the numeric range.
    #[error("amount out of range")]
    AmountOverflow,
}

/// Registered ledger user.
///
/// ## Invariants
/// - `balance` and `debt` are non-negative by type.
/// - `active_rental` is `Some` exactly while the user holds a car.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    name: PersonName,
    surname: PersonName,
    balance: u64,
    debt: u64,
    active_rental: Option<ActiveRental>,
}

impl User {
    /// Register a user with empty balances and no rental.
    #[must_use]
    pub fn new(id: UserId, name: PersonName, surname: PersonName) -> Self {
        Self {
            id,
            name,
            surname,
            balance: 0,
            debt: 0,
            active_rental: None,
        }
    }

    /// Stable principal identifier.
    #[must_use]
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Given name.
    #[must_use]
    pub fn name(&self) -> &PersonName {
        &self.name
    }

    /// Surname.
    #[must_use]
    pub fn surname(&self) -> &PersonName {
        &self.surname
    }

    /// Deposited balance in the smallest denomination.
    #[must_use]
    pub fn balance(&self) -> u64 {
        self.balance
    }

    /// Outstanding debt from completed rentals.
    #[must_use]
    pub fn debt(&self) -> u64 {
        self.debt
    }

    /// The rental currently held, if any.
    #[must_use]
    pub fn active_rental(&self) -> Option<&ActiveRental> {
        self.active_rental.as_ref()
    }

    /// Whether the user currently holds a car.
    #[must_use]
    pub fn is_renting(&self) -> bool {
        self.active_rental.is_some()
    }

    /// Begin a rental; fails if one is already held.
    pub fn start_rental(&mut self, rental: ActiveRental) -> Result<(), UserStateError> {
        if self.active_rental.is_some() {
            return Err(UserStateError::AlreadyRenting);
        }
        self.active_rental = Some(rental);
        Ok(())
    }

    /// End the held rental, returning it; fails if none is held.
    pub fn finish_rental(&mut self) -> Result<ActiveRental, UserStateError> {
        self.active_rental.take().ok_or(UserStateError::NotRenting)
    }

    /// Add `amount` to the balance.
    pub fn credit(&mut self, amount: u64) -> Result<(), UserStateError> {
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(UserStateError::AmountOverflow)?;
        Ok(())
    }

    /// Remove `amount` from the balance; fails rather than going negative.
    pub fn debit(&mut self, amount: u64) -> Result<(), UserStateError> {
        self.balance =
            self.balance
                .checked_sub(amount)
                .ok_or(UserStateError::InsufficientBalance {
                    requested: amount,
                    available: self.balance,
                })?;
        Ok(())
    }

    /// Add a completed rental's fee to the debt.
    pub fn accrue_debt(&mut self, fee: u64) -> Result<(), UserStateError> {
        self.debt = self
            .debt
            .checked_add(fee)
            .ok_or(UserStateError::AmountOverflow)?;
        Ok(())
    }

    /// Clear the debt, returning the amount that was owed.
    pub fn settle_debt(&mut self) -> u64 {
        std::mem::take(&mut self.debt)
    }
}

#[cfg(test)]
mod tests;
