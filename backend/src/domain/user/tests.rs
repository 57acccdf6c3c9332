//! Regression coverage for user values and state transitions.

use chrono::{TimeZone, Utc};
use rstest::rstest;

use super::{ActiveRental, PersonName, User, UserId, UserStateError, UserValidationError};
use crate::domain::car::CarId;

fn sample_user() -> User {
    User::new(
        UserId::random(),
        PersonName::new("Alice").expect("valid name"),
        PersonName::new("Smith").expect("valid name"),
    )
}

fn sample_rental() -> ActiveRental {
    let started_at = Utc
        .with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp");
    ActiveRental::new(CarId::new(1).expect("valid id"), started_at)
}

#[rstest]
#[case("Alice")]
#[case("Anne-Marie")]
#[case("O'Brien")]
fn person_name_accepts_real_names(#[case] input: &str) {
    assert!(PersonName::new(input).is_ok());
}

#[rstest]
#[case("", UserValidationError::EmptyName)]
#[case("   ", UserValidationError::EmptyName)]
#[case("Robert; DROP TABLE", UserValidationError::NameInvalidCharacters)]
fn person_name_rejects_bad_input(#[case] input: &str, #[case] expected: UserValidationError) {
    assert_eq!(PersonName::new(input).expect_err("rejected"), expected);
}

#[test]
fn user_id_rejects_non_uuid_input() {
    assert_eq!(
        UserId::new("not-a-uuid").expect_err("rejected"),
        UserValidationError::InvalidId
    );
}

#[test]
fn new_user_starts_idle_and_solvent() {
    let user = sample_user();
    assert_eq!(user.balance(), 0);
    assert_eq!(user.debt(), 0);
    assert!(!user.is_renting());
}

#[test]
fn start_rental_twice_is_rejected() {
    let mut user = sample_user();
    user.start_rental(sample_rental()).expect("first rental");
    assert_eq!(
        user.start_rental(sample_rental()).expect_err("rejected"),
        UserStateError::AlreadyRenting
    );
}

#[test]
fn finish_rental_returns_the_held_rental() {
    let mut user = sample_user();
    let rental = sample_rental();
    user.start_rental(rental).expect("start rental");

    let finished = user.finish_rental().expect("finish rental");
    assert_eq!(finished, rental);
    assert!(!user.is_renting());
}

#[test]
fn finish_rental_without_one_is_rejected() {
    let mut user = sample_user();
    assert_eq!(
        user.finish_rental().expect_err("rejected"),
        UserStateError::NotRenting
    );
}

#[test]
fn debit_beyond_balance_is_rejected_and_leaves_balance() {
    let mut user = sample_user();
    user.credit(40).expect("credit");

    let error = user.debit(100).expect_err("rejected");
    assert_eq!(
        error,
        UserStateError::InsufficientBalance {
            requested: 100,
            available: 40,
        }
    );
    assert_eq!(user.balance(), 40);
}

#[test]
fn settle_debt_clears_and_reports_the_owed_amount() {
    let mut user = sample_user();
    user.accrue_debt(10).expect("accrue");
    user.accrue_debt(5).expect("accrue");

    assert_eq!(user.settle_debt(), 15);
    assert_eq!(user.debt(), 0);
}

#[test]
fn credit_overflow_is_rejected() {
    let mut user = sample_user();
    user.credit(u64::MAX).expect("credit");
    assert_eq!(
        user.credit(1).expect_err("rejected"),
        UserStateError::AmountOverflow
    );
}

#[test]
fn ride_minutes_reports_whole_minutes() {
    let rental = sample_rental();
    let now = rental.started_at() + chrono::Duration::seconds(150);
    assert_eq!(rental.ride_minutes(now), 2);
}
