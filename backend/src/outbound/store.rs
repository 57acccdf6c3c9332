//! In-memory ledger store adapter.
//!
//! Backs the store port with two maps and the ledger scalars behind one
//! async `RwLock`, so even direct store use cannot observe a torn write.
//! The car table is a `BTreeMap`, which keeps listings in ascending id
//! order for free.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{LedgerStore, LedgerStoreError};
use crate::domain::{Car, CarId, User, UserId};

#[derive(Debug)]
struct Tables {
    users: HashMap<UserId, User>,
    cars: BTreeMap<CarId, Car>,
    allocated_car_ids: u64,
    collected_payments: u64,
    owner: UserId,
}

/// Map-backed [`LedgerStore`] holding all state in process memory.
#[derive(Debug)]
pub struct InMemoryLedgerStore {
    tables: RwLock<Tables>,
}

impl InMemoryLedgerStore {
    /// Create an empty store with `owner` as the privileged principal.
    #[must_use]
    pub fn new(owner: UserId) -> Self {
        Self {
            tables: RwLock::new(Tables {
                users: HashMap::new(),
                cars: BTreeMap::new(),
                allocated_car_ids: 0,
                collected_payments: 0,
                owner,
            }),
        }
    }
}

#[async_trait]
impl LedgerStore for InMemoryLedgerStore {
    async fn find_user(&self, id: &UserId) -> Result<Option<User>, LedgerStoreError> {
        let tables = self.tables.read().await;
        Ok(tables.users.get(id).cloned())
    }

    async fn save_user(&self, user: &User) -> Result<(), LedgerStoreError> {
        let mut tables = self.tables.write().await;
        tables.users.insert(*user.id(), user.clone());
        Ok(())
    }

    async fn find_car(&self, id: CarId) -> Result<Option<Car>, LedgerStoreError> {
        let tables = self.tables.read().await;
        Ok(tables.cars.get(&id).cloned())
    }

    async fn save_car(&self, car: &Car) -> Result<(), LedgerStoreError> {
        let mut tables = self.tables.write().await;
        tables.cars.insert(car.id(), car.clone());
        Ok(())
    }

    async fn allocate_car_id(&self) -> Result<CarId, LedgerStoreError> {
        let mut tables = self.tables.write().await;
        let next = tables
            .allocated_car_ids
            .checked_add(1)
            .ok_or_else(|| LedgerStoreError::storage("car id space exhausted"))?;
        let id = CarId::new(next)
            .map_err(|error| LedgerStoreError::storage(format!("car id allocation: {error}")))?;
        tables.allocated_car_ids = next;
        Ok(id)
    }

    async fn list_cars(&self) -> Result<Vec<Car>, LedgerStoreError> {
        let tables = self.tables.read().await;
        Ok(tables.cars.values().cloned().collect())
    }

    async fn car_count(&self) -> Result<u64, LedgerStoreError> {
        let tables = self.tables.read().await;
        Ok(tables.allocated_car_ids)
    }

    async fn save_user_and_car(&self, user: &User, car: &Car) -> Result<(), LedgerStoreError> {
        let mut tables = self.tables.write().await;
        tables.users.insert(*user.id(), user.clone());
        tables.cars.insert(car.id(), car.clone());
        Ok(())
    }

    async fn save_user_and_pool(
        &self,
        user: &User,
        collected_payments: u64,
    ) -> Result<(), LedgerStoreError> {
        let mut tables = self.tables.write().await;
        tables.users.insert(*user.id(), user.clone());
        tables.collected_payments = collected_payments;
        Ok(())
    }

    async fn collected_payments(&self) -> Result<u64, LedgerStoreError> {
        let tables = self.tables.read().await;
        Ok(tables.collected_payments)
    }

    async fn set_collected_payments(&self, amount: u64) -> Result<(), LedgerStoreError> {
        let mut tables = self.tables.write().await;
        tables.collected_payments = amount;
        Ok(())
    }

    async fn owner(&self) -> Result<UserId, LedgerStoreError> {
        let tables = self.tables.read().await;
        Ok(tables.owner)
    }

    async fn set_owner(&self, owner: &UserId) -> Result<(), LedgerStoreError> {
        let mut tables = self.tables.write().await;
        tables.owner = *owner;
        Ok(())
    }

    async fn total_held(&self) -> Result<u64, LedgerStoreError> {
        let tables = self.tables.read().await;
        let mut total = tables.collected_payments;
        for user in tables.users.values() {
            total = total
                .checked_add(user.balance())
                .ok_or_else(|| LedgerStoreError::storage("held value overflow"))?;
        }
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CarName, PersonName};

    fn store() -> InMemoryLedgerStore {
        InMemoryLedgerStore::new(UserId::random())
    }

    fn registered_user(id: UserId) -> User {
        User::new(
            id,
            PersonName::new("Alice").expect("valid name"),
            PersonName::new("Smith").expect("valid name"),
        )
    }

    fn listed_car(id: CarId) -> Car {
        Car::new(
            id,
            CarName::new("Audi A6").expect("valid name"),
            "https://example.test/audi.png".to_owned(),
            10,
            50_000,
        )
    }

    #[tokio::test]
    async fn car_ids_are_sequential_from_one() {
        let store = store();
        let first = store.allocate_car_id().await.expect("allocate");
        let second = store.allocate_car_id().await.expect("allocate");

        assert_eq!(first.get(), 1);
        assert_eq!(second.get(), 2);
        assert_eq!(store.car_count().await.expect("count"), 2);
    }

    #[tokio::test]
    async fn saved_records_are_immediately_readable() {
        let store = store();
        let user = registered_user(UserId::random());
        store.save_user(&user).await.expect("save");

        let found = store.find_user(user.id()).await.expect("find");
        assert_eq!(found, Some(user));
    }

    #[tokio::test]
    async fn list_cars_is_ascending_by_id() {
        let store = store();
        for _ in 0..3 {
            let id = store.allocate_car_id().await.expect("allocate");
            store.save_car(&listed_car(id)).await.expect("save");
        }

        let cars = store.list_cars().await.expect("list");
        let ids: Vec<u64> = cars.iter().map(|car| car.id().get()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn total_held_sums_balances_and_pool() {
        let store = store();
        let mut first = registered_user(UserId::random());
        first.credit(100).expect("credit");
        let mut second = registered_user(UserId::random());
        second.credit(40).expect("credit");
        store.save_user(&first).await.expect("save");
        store.save_user(&second).await.expect("save");
        store.set_collected_payments(10).await.expect("set pool");

        assert_eq!(store.total_held().await.expect("total"), 150);
    }

    #[tokio::test]
    async fn owner_can_be_replaced() {
        let store = store();
        let next = UserId::random();
        store.set_owner(&next).await.expect("set owner");
        assert_eq!(store.owner().await.expect("owner"), next);
    }
}
