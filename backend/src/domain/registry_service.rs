//! Registry domain service: user registration and fleet administration.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::Error;
use crate::domain::authorization::ensure_owner;
use crate::domain::car::{Car, CarId, CarStateError};
use crate::domain::ops_lock::OperationLock;
use crate::domain::ports::{
    AddCarRequest, EditCarMetadataRequest, EditCarStatusRequest, LedgerStore, LedgerStoreError,
    RegisterUserRequest, RegistryCommand, RegistryQuery, TransferOwnershipRequest,
};
use crate::domain::user::{User, UserId};

fn map_store_error(error: LedgerStoreError) -> Error {
    match error {
        LedgerStoreError::Unavailable { message } => {
            Error::service_unavailable(format!("ledger store unavailable: {message}"))
        }
        LedgerStoreError::Storage { message } => {
            Error::internal(format!("ledger store error: {message}"))
        }
    }
}

fn map_car_state_error(error: CarStateError) -> Error {
    match error {
        CarStateError::NotAvailable { .. } | CarStateError::NotRented => {
            Error::internal(format!("unexpected car state: {error}"))
        }
        CarStateError::IllegalTransition { from, to } => {
            Error::invalid_transition(format!("cannot change car status from {from} to {to}"))
        }
    }
}

/// Registry service implementing the registry driving ports.
#[derive(Clone)]
pub struct RegistryService<S> {
    store: Arc<S>,
    lock: OperationLock,
}

impl<S> RegistryService<S> {
    /// Create a new registry service over the shared store and lock.
    pub fn new(store: Arc<S>, lock: OperationLock) -> Self {
        Self { store, lock }
    }
}

impl<S> RegistryService<S>
where
    S: LedgerStore,
{
    async fn load_car(&self, id: CarId) -> Result<Car, Error> {
        self.store
            .find_car(id)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| Error::not_found(format!("car {id} not found")))
    }
}

#[async_trait]
impl<S> RegistryCommand for RegistryService<S>
where
    S: LedgerStore,
{
    async fn register_user(&self, request: RegisterUserRequest) -> Result<User, Error> {
        let _guard = self.lock.acquire().await;

        if self
            .store
            .find_user(&request.caller)
            .await
            .map_err(map_store_error)?
            .is_some()
        {
            return Err(Error::already_registered(format!(
                "principal {} is already registered",
                request.caller
            )));
        }

        let user = User::new(request.caller, request.name, request.surname);
        self.store.save_user(&user).await.map_err(map_store_error)?;
        tracing::info!(user = %user.id(), "user registered");
        Ok(user)
    }

    async fn add_car(&self, request: AddCarRequest) -> Result<Car, Error> {
        let _guard = self.lock.acquire().await;
        ensure_owner(self.store.as_ref(), &request.caller).await?;

        let id = self
            .store
            .allocate_car_id()
            .await
            .map_err(map_store_error)?;
        let car = Car::new(
            id,
            request.name,
            request.img_url,
            request.rent_fee,
            request.sale_fee,
        );
        self.store.save_car(&car).await.map_err(map_store_error)?;
        tracing::info!(car = %car.id(), name = %car.name(), "car listed");
        Ok(car)
    }

    async fn edit_car_metadata(&self, request: EditCarMetadataRequest) -> Result<Car, Error> {
        let _guard = self.lock.acquire().await;
        ensure_owner(self.store.as_ref(), &request.caller).await?;

        let mut car = self.load_car(request.car_id).await?;
        car.update_metadata(
            request.name,
            request.img_url,
            request.rent_fee,
            request.sale_fee,
        );
        self.store.save_car(&car).await.map_err(map_store_error)?;
        Ok(car)
    }

    async fn edit_car_status(&self, request: EditCarStatusRequest) -> Result<Car, Error> {
        let _guard = self.lock.acquire().await;
        ensure_owner(self.store.as_ref(), &request.caller).await?;

        let mut car = self.load_car(request.car_id).await?;
        car.set_listing(request.status).map_err(map_car_state_error)?;
        self.store.save_car(&car).await.map_err(map_store_error)?;
        tracing::info!(car = %car.id(), status = %request.status, "car status edited");
        Ok(car)
    }

    async fn transfer_ownership(&self, request: TransferOwnershipRequest) -> Result<(), Error> {
        let _guard = self.lock.acquire().await;
        ensure_owner(self.store.as_ref(), &request.caller).await?;

        self.store
            .set_owner(&request.new_owner)
            .await
            .map_err(map_store_error)?;
        tracing::info!(new_owner = %request.new_owner, "ownership transferred");
        Ok(())
    }
}

#[async_trait]
impl<S> RegistryQuery for RegistryService<S>
where
    S: LedgerStore,
{
    async fn get_user(&self, id: &UserId) -> Result<User, Error> {
        let _guard = self.lock.acquire().await;
        self.store
            .find_user(id)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| Error::not_found(format!("principal {id} is not registered")))
    }

    async fn get_car(&self, id: CarId) -> Result<Car, Error> {
        let _guard = self.lock.acquire().await;
        self.load_car(id).await
    }

    async fn owner(&self) -> Result<UserId, Error> {
        let _guard = self.lock.acquire().await;
        self.store.owner().await.map_err(map_store_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::car::{CarName, CarStatusKind};
    use crate::domain::ports::MockLedgerStore;
    use crate::domain::user::PersonName;
    use crate::domain::ErrorCode;

    fn service(store: MockLedgerStore) -> RegistryService<MockLedgerStore> {
        RegistryService::new(Arc::new(store), OperationLock::new())
    }

    fn register_request(caller: UserId) -> RegisterUserRequest {
        RegisterUserRequest {
            caller,
            name: PersonName::new("Alice").expect("valid name"),
            surname: PersonName::new("Smith").expect("valid name"),
        }
    }

    fn sample_car(id: u64) -> Car {
        Car::new(
            CarId::new(id).expect("valid id"),
            CarName::new("Audi A6").expect("valid name"),
            "https://example.test/audi.png".to_owned(),
            10,
            50_000,
        )
    }

    #[tokio::test]
    async fn register_user_stores_a_fresh_record() {
        let caller = UserId::random();
        let mut store = MockLedgerStore::new();
        store.expect_find_user().return_once(|_| Ok(None));
        store
            .expect_save_user()
            .withf(move |user| *user.id() == caller && user.balance() == 0 && user.debt() == 0)
            .return_once(|_| Ok(()));

        let user = service(store)
            .register_user(register_request(caller))
            .await
            .expect("registration succeeds");
        assert_eq!(user.name().as_ref(), "Alice");
    }

    #[tokio::test]
    async fn register_user_rejects_a_second_registration() {
        let caller = UserId::random();
        let existing = User::new(
            caller,
            PersonName::new("Alice").expect("valid name"),
            PersonName::new("Smith").expect("valid name"),
        );
        let mut store = MockLedgerStore::new();
        store
            .expect_find_user()
            .return_once(move |_| Ok(Some(existing)));
        store.expect_save_user().times(0);

        let error = service(store)
            .register_user(register_request(caller))
            .await
            .expect_err("rejected");
        assert_eq!(error.code(), ErrorCode::AlreadyRegistered);
    }

    #[tokio::test]
    async fn add_car_allocates_the_next_id_for_the_owner() {
        let owner = UserId::random();
        let mut store = MockLedgerStore::new();
        store.expect_owner().return_once(move || Ok(owner));
        store
            .expect_allocate_car_id()
            .return_once(|| Ok(CarId::new(1).expect("valid id")));
        store
            .expect_save_car()
            .withf(|car| car.id().get() == 1 && car.status().kind() == CarStatusKind::Available)
            .return_once(|_| Ok(()));

        let car = service(store)
            .add_car(AddCarRequest {
                caller: owner,
                name: CarName::new("Audi A6").expect("valid name"),
                img_url: "https://example.test/audi.png".to_owned(),
                rent_fee: 10,
                sale_fee: 50_000,
            })
            .await
            .expect("listing succeeds");
        assert_eq!(car.rent_fee(), 10);
    }

    #[tokio::test]
    async fn add_car_by_non_owner_creates_nothing() {
        let owner = UserId::random();
        let mut store = MockLedgerStore::new();
        store.expect_owner().return_once(move || Ok(owner));
        store.expect_allocate_car_id().times(0);
        store.expect_save_car().times(0);

        let error = service(store)
            .add_car(AddCarRequest {
                caller: UserId::random(),
                name: CarName::new("Audi A6").expect("valid name"),
                img_url: String::new(),
                rent_fee: 10,
                sale_fee: 50_000,
            })
            .await
            .expect_err("rejected");
        assert_eq!(error.code(), ErrorCode::NotOwner);
    }

    #[tokio::test]
    async fn edit_car_metadata_round_trips_the_new_values() {
        let owner = UserId::random();
        let mut store = MockLedgerStore::new();
        store.expect_owner().return_once(move || Ok(owner));
        store
            .expect_find_car()
            .return_once(|_| Ok(Some(sample_car(1))));
        store
            .expect_save_car()
            .withf(|car| car.name().as_ref() == "Audi A7" && car.rent_fee() == 20)
            .return_once(|_| Ok(()));

        let car = service(store)
            .edit_car_metadata(EditCarMetadataRequest {
                caller: owner,
                car_id: CarId::new(1).expect("valid id"),
                name: CarName::new("Audi A7").expect("valid name"),
                img_url: "https://example.test/audi-a7.png".to_owned(),
                rent_fee: 20,
                sale_fee: 100_000,
            })
            .await
            .expect("edit succeeds");
        assert_eq!(car.sale_fee(), 100_000);
    }

    #[tokio::test]
    async fn edit_car_status_rejects_a_rented_car() {
        let owner = UserId::random();
        let mut rented = sample_car(1);
        rented.rent_to(UserId::random()).expect("check out");
        let mut store = MockLedgerStore::new();
        store.expect_owner().return_once(move || Ok(owner));
        store.expect_find_car().return_once(move |_| Ok(Some(rented)));
        store.expect_save_car().times(0);

        let error = service(store)
            .edit_car_status(EditCarStatusRequest {
                caller: owner,
                car_id: CarId::new(1).expect("valid id"),
                status: CarStatusKind::Unavailable,
            })
            .await
            .expect_err("rejected");
        assert_eq!(error.code(), ErrorCode::InvalidTransition);
    }

    #[tokio::test]
    async fn edit_car_status_on_missing_car_is_not_found() {
        let owner = UserId::random();
        let mut store = MockLedgerStore::new();
        store.expect_owner().return_once(move || Ok(owner));
        store.expect_find_car().return_once(|_| Ok(None));

        let error = service(store)
            .edit_car_status(EditCarStatusRequest {
                caller: owner,
                car_id: CarId::new(9).expect("valid id"),
                status: CarStatusKind::Available,
            })
            .await
            .expect_err("rejected");
        assert_eq!(error.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn transfer_ownership_updates_the_stored_owner() {
        let owner = UserId::random();
        let next = UserId::random();
        let mut store = MockLedgerStore::new();
        store.expect_owner().return_once(move || Ok(owner));
        store
            .expect_set_owner()
            .withf(move |candidate| *candidate == next)
            .return_once(|_| Ok(()));

        service(store)
            .transfer_ownership(TransferOwnershipRequest {
                caller: owner,
                new_owner: next,
            })
            .await
            .expect("transfer succeeds");
    }

    #[tokio::test]
    async fn get_user_for_unknown_principal_is_not_found() {
        let mut store = MockLedgerStore::new();
        store.expect_find_user().return_once(|_| Ok(None));

        let error = service(store)
            .get_user(&UserId::random())
            .await
            .expect_err("rejected");
        assert_eq!(error.code(), ErrorCode::NotFound);
    }
}
