//! In-memory car store.
//!
//! Keeps all records in a `BTreeMap` keyed by id behind an `RwLock`, so the
//! full listing (and therefore paging) is deterministic in id order and every
//! single-record mutation is atomic. Ids are assigned monotonically and never
//! reused, mirroring how a sequence-backed table behaves.

use std::collections::BTreeMap;
use std::sync::RwLock;

use tracing::debug;

use super::CarStore;
use crate::model::{Car, CarPayload};

struct Inner {
    cars: BTreeMap<i64, Car>,
    next_id: i64,
}

pub struct MemoryCarStore {
    inner: RwLock<Inner>,
}

impl MemoryCarStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                cars: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    /// A store pre-populated with the demo fleet the binary serves out of the
    /// box. Exactly one record (Uno Mille) sits inside [9500, 110000].
    #[must_use]
    pub fn with_demo_fleet() -> Self {
        let store = Self::new();
        let fleet = [
            ("Diablo", "Lamborghini", 485_000.0, "V12 flagship"),
            ("Enzo", "Ferrari", 3_200_000.0, "Limited run halo car"),
            ("F50", "Ferrari", 2_900_000.0, "F1-derived V12"),
            ("Uno Mille", "Fiat", 9_500.0, "Economy hatchback"),
            ("x1", "BMW", 285_000.0, "Compact SUV"),
            ("x5", "BMW", 380_000.0, "Mid-size SUV"),
        ];
        for (name, brand, value, description) in fleet {
            store.create(CarPayload {
                name: name.to_string(),
                brand: brand.to_string(),
                manufacturing_value: value,
                description: description.to_string(),
            });
        }
        store
    }
}

impl Default for MemoryCarStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CarStore for MemoryCarStore {
    fn find_by_id(&self, id: i64) -> Option<Car> {
        self.inner.read().unwrap().cars.get(&id).cloned()
    }

    fn find_by_name(&self, name: &str) -> Vec<Car> {
        self.inner
            .read()
            .unwrap()
            .cars
            .values()
            .filter(|c| c.name == name)
            .cloned()
            .collect()
    }

    fn find_by_brand(&self, brand: &str) -> Vec<Car> {
        self.inner
            .read()
            .unwrap()
            .cars
            .values()
            .filter(|c| c.brand == brand)
            .cloned()
            .collect()
    }

    fn find_all(&self) -> Vec<Car> {
        self.inner.read().unwrap().cars.values().cloned().collect()
    }

    fn find_paged(&self, offset: usize, limit: usize) -> Vec<Car> {
        self.inner
            .read()
            .unwrap()
            .cars
            .values()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect()
    }

    fn find_by_price_range(&self, min: f64, max: f64) -> Vec<Car> {
        self.inner
            .read()
            .unwrap()
            .cars
            .values()
            .filter(|c| c.manufacturing_value >= min && c.manufacturing_value <= max)
            .cloned()
            .collect()
    }

    fn create(&self, payload: CarPayload) -> i64 {
        let mut inner = self.inner.write().unwrap();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.cars.insert(id, Car::from_payload(id, payload));
        debug!(id, "car created");
        id
    }

    fn replace(&self, id: i64, payload: CarPayload) -> bool {
        let mut inner = self.inner.write().unwrap();
        match inner.cars.get_mut(&id) {
            Some(slot) => {
                *slot = Car::from_payload(id, payload);
                true
            }
            None => false,
        }
    }

    fn delete(&self, id: i64) -> bool {
        self.inner.write().unwrap().cars.remove(&id).is_some()
    }
}
