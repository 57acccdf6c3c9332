//! Regression coverage for car values and the status machine.

use rstest::rstest;

use super::{Car, CarId, CarName, CarStateError, CarStatus, CarStatusKind, CarValidationError};
use crate::domain::user::UserId;

fn sample_car() -> Car {
    Car::new(
        CarId::new(1).expect("valid id"),
        CarName::new("Audi A6").expect("valid name"),
        "https://example.test/audi-a6.png".to_owned(),
        10,
        50_000,
    )
}

#[test]
fn car_id_rejects_zero() {
    assert_eq!(
        CarId::new(0).expect_err("rejected"),
        CarValidationError::ZeroId
    );
}

#[test]
fn new_car_starts_available() {
    let car = sample_car();
    assert_eq!(car.status().kind(), CarStatusKind::Available);
    assert!(car.renter().is_none());
}

#[test]
fn rent_to_moves_the_car_to_rented_with_the_renter() {
    let mut car = sample_car();
    let renter = UserId::random();

    car.rent_to(renter).expect("check out");
    assert_eq!(car.status(), &CarStatus::Rented { renter });
    assert_eq!(car.renter(), Some(&renter));
}

#[test]
fn rent_to_on_a_rented_car_is_rejected() {
    let mut car = sample_car();
    car.rent_to(UserId::random()).expect("first check out");

    let error = car.rent_to(UserId::random()).expect_err("rejected");
    assert_eq!(
        error,
        CarStateError::NotAvailable {
            status: CarStatusKind::Rented,
        }
    );
}

#[test]
fn end_rental_returns_the_renter_and_frees_the_car() {
    let mut car = sample_car();
    let renter = UserId::random();
    car.rent_to(renter).expect("check out");

    assert_eq!(car.end_rental().expect("check in"), renter);
    assert_eq!(car.status().kind(), CarStatusKind::Available);
}

#[test]
fn end_rental_without_one_is_rejected() {
    let mut car = sample_car();
    assert_eq!(
        car.end_rental().expect_err("rejected"),
        CarStateError::NotRented
    );
}

#[rstest]
#[case(CarStatusKind::Unavailable)]
#[case(CarStatusKind::Available)]
fn set_listing_switches_between_listed_states(#[case] target: CarStatusKind) {
    let mut car = sample_car();
    car.set_listing(target).expect("legal edit");
    assert_eq!(car.status().kind(), target);
}

#[test]
fn set_listing_cannot_touch_a_rented_car() {
    let mut car = sample_car();
    car.rent_to(UserId::random()).expect("check out");

    let error = car
        .set_listing(CarStatusKind::Unavailable)
        .expect_err("rejected");
    assert_eq!(
        error,
        CarStateError::IllegalTransition {
            from: CarStatusKind::Rented,
            to: CarStatusKind::Unavailable,
        }
    );
    assert_eq!(car.status().kind(), CarStatusKind::Rented);
}

#[test]
fn set_listing_rejects_rented_as_a_target() {
    let mut car = sample_car();
    let error = car.set_listing(CarStatusKind::Rented).expect_err("rejected");
    assert_eq!(
        error,
        CarStateError::IllegalTransition {
            from: CarStatusKind::Available,
            to: CarStatusKind::Rented,
        }
    );
}

#[test]
fn update_metadata_replaces_all_editable_fields() {
    let mut car = sample_car();
    car.update_metadata(
        CarName::new("Audi A7").expect("valid name"),
        "https://example.test/audi-a7.png".to_owned(),
        20,
        100_000,
    );

    assert_eq!(car.name().as_ref(), "Audi A7");
    assert_eq!(car.img_url(), "https://example.test/audi-a7.png");
    assert_eq!(car.rent_fee(), 20);
    assert_eq!(car.sale_fee(), 100_000);
}

#[rstest]
#[case("available", CarStatusKind::Available)]
#[case("rented", CarStatusKind::Rented)]
#[case("unavailable", CarStatusKind::Unavailable)]
fn status_kind_parses_canonical_labels(#[case] input: &str, #[case] expected: CarStatusKind) {
    assert_eq!(input.parse::<CarStatusKind>().expect("parse"), expected);
}

#[test]
fn status_kind_rejects_unknown_labels() {
    assert!("scrapped".parse::<CarStatusKind>().is_err());
}
