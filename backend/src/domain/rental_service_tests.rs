//! Behaviour coverage for the rental state machine service.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use mockable::MockClock;

use super::RentalService;
use crate::domain::ErrorCode;
use crate::domain::car::{Car, CarId, CarName, CarStatusKind};
use crate::domain::ops_lock::OperationLock;
use crate::domain::ports::{MockLedgerStore, RentalCommand};
use crate::domain::user::{ActiveRental, PersonName, User, UserId};

fn checkout_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

fn frozen_clock() -> MockClock {
    let mut clock = MockClock::new();
    clock.expect_utc().returning(checkout_instant);
    clock
}

fn service(store: MockLedgerStore, clock: MockClock) -> RentalService<MockLedgerStore> {
    RentalService::new(Arc::new(store), Arc::new(clock), OperationLock::new())
}

fn registered_user(id: UserId) -> User {
    User::new(
        id,
        PersonName::new("Alice").expect("valid name"),
        PersonName::new("Smith").expect("valid name"),
    )
}

fn listed_car(id: u64, rent_fee: u64) -> Car {
    Car::new(
        CarId::new(id).expect("valid id"),
        CarName::new("Audi A6").expect("valid name"),
        "https://example.test/audi.png".to_owned(),
        rent_fee,
        50_000,
    )
}

#[tokio::test]
async fn check_out_marks_car_and_user_in_lockstep() {
    let caller = UserId::random();
    let mut store = MockLedgerStore::new();
    store
        .expect_find_user()
        .return_once(move |_| Ok(Some(registered_user(caller))));
    store
        .expect_find_car()
        .return_once(|_| Ok(Some(listed_car(1, 10))));
    store
        .expect_save_user_and_car()
        .withf(move |user, car| {
            let rental_matches = user
                .active_rental()
                .is_some_and(|rental| {
                    rental.car_id().get() == 1 && rental.started_at() == checkout_instant()
                });
            rental_matches
                && car.status().kind() == CarStatusKind::Rented
                && car.renter() == Some(&caller)
        })
        .return_once(|_, _| Ok(()));

    service(store, frozen_clock())
        .check_out(&caller, CarId::new(1).expect("valid id"))
        .await
        .expect("check-out succeeds");
}

#[tokio::test]
async fn check_out_with_outstanding_debt_is_rejected() {
    let caller = UserId::random();
    let mut debtor = registered_user(caller);
    debtor.accrue_debt(10).expect("accrue");
    let mut store = MockLedgerStore::new();
    store
        .expect_find_user()
        .return_once(move |_| Ok(Some(debtor)));
    store.expect_find_car().times(0);
    store.expect_save_user_and_car().times(0);

    let error = service(store, frozen_clock())
        .check_out(&caller, CarId::new(1).expect("valid id"))
        .await
        .expect_err("rejected");
    assert_eq!(error.code(), ErrorCode::OutstandingDebt);
}

#[tokio::test]
async fn check_out_while_renting_is_rejected() {
    let caller = UserId::random();
    let mut renter = registered_user(caller);
    renter
        .start_rental(ActiveRental::new(
            CarId::new(2).expect("valid id"),
            checkout_instant(),
        ))
        .expect("start rental");
    let mut store = MockLedgerStore::new();
    store
        .expect_find_user()
        .return_once(move |_| Ok(Some(renter)));
    store.expect_save_user_and_car().times(0);

    let error = service(store, frozen_clock())
        .check_out(&caller, CarId::new(1).expect("valid id"))
        .await
        .expect_err("rejected");
    assert_eq!(error.code(), ErrorCode::AlreadyRenting);
}

#[tokio::test]
async fn check_out_of_a_rented_car_is_not_available() {
    let caller = UserId::random();
    let mut taken = listed_car(1, 10);
    taken.rent_to(UserId::random()).expect("check out");
    let mut store = MockLedgerStore::new();
    store
        .expect_find_user()
        .return_once(move |_| Ok(Some(registered_user(caller))));
    store.expect_find_car().return_once(move |_| Ok(Some(taken)));
    store.expect_save_user_and_car().times(0);

    let error = service(store, frozen_clock())
        .check_out(&caller, CarId::new(1).expect("valid id"))
        .await
        .expect_err("rejected");
    assert_eq!(error.code(), ErrorCode::NotAvailable);
}

#[tokio::test]
async fn check_out_of_a_missing_car_is_not_found() {
    let caller = UserId::random();
    let mut store = MockLedgerStore::new();
    store
        .expect_find_user()
        .return_once(move |_| Ok(Some(registered_user(caller))));
    store.expect_find_car().return_once(|_| Ok(None));

    let error = service(store, frozen_clock())
        .check_out(&caller, CarId::new(7).expect("valid id"))
        .await
        .expect_err("rejected");
    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn check_in_accrues_the_flat_fee_and_frees_the_car() {
    let caller = UserId::random();
    let mut renter = registered_user(caller);
    renter
        .start_rental(ActiveRental::new(
            CarId::new(1).expect("valid id"),
            checkout_instant(),
        ))
        .expect("start rental");
    let mut rented = listed_car(1, 10);
    rented.rent_to(caller).expect("check out");

    let mut store = MockLedgerStore::new();
    store
        .expect_find_user()
        .return_once(move |_| Ok(Some(renter)));
    store.expect_find_car().return_once(move |_| Ok(Some(rented)));
    store
        .expect_save_user_and_car()
        .withf(|user, car| {
            user.debt() == 10
                && !user.is_renting()
                && car.status().kind() == CarStatusKind::Available
        })
        .return_once(|_, _| Ok(()));

    service(store, frozen_clock())
        .check_in(&caller)
        .await
        .expect("check-in succeeds");
}

#[tokio::test]
async fn check_in_without_a_rental_is_rejected() {
    let caller = UserId::random();
    let mut store = MockLedgerStore::new();
    store
        .expect_find_user()
        .return_once(move |_| Ok(Some(registered_user(caller))));
    store.expect_save_user_and_car().times(0);

    let error = service(store, frozen_clock())
        .check_in(&caller)
        .await
        .expect_err("rejected");
    assert_eq!(error.code(), ErrorCode::NotRenting);
}

#[tokio::test]
async fn check_in_for_an_unregistered_principal_is_not_found() {
    let mut store = MockLedgerStore::new();
    store.expect_find_user().return_once(|_| Ok(None));

    let error = service(store, frozen_clock())
        .check_in(&UserId::random())
        .await
        .expect_err("rejected");
    assert_eq!(error.code(), ErrorCode::NotFound);
}
