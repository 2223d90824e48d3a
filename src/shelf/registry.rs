use crate::model::{ShelfItem, Temperature};
use crate::shelf::{Shelf, ShelfError};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Shelf sizes.
///
/// `hot`, `cold` and `frozen` bound the home shelves; `overflow` is the
/// aggregate cap shared by all overflow compartments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShelfCapacities {
    pub hot: usize,
    pub cold: usize,
    pub frozen: usize,
    pub overflow: usize,
}

impl Default for ShelfCapacities {
    fn default() -> Self {
        Self {
            hot: 10,
            cold: 10,
            frozen: 10,
            overflow: 15,
        }
    }
}

impl ShelfCapacities {
    pub fn home(&self, temperature: Temperature) -> usize {
        match temperature {
            Temperature::Hot => self.hot,
            Temperature::Cold => self.cold,
            Temperature::Frozen => self.frozen,
        }
    }
}

/// One home shelf and one overflow compartment per temperature.
///
/// Built once and shared behind an `Arc` by every storage and dispatch worker.
/// Each shelf is its own lock domain; nothing here locks more than one shelf
/// at a time, so [`ShelfRegistry::overflow_len`] is a best-effort snapshot
/// under concurrent mutation.
#[derive(Debug)]
pub struct ShelfRegistry {
    homes: [Shelf; 3],
    overflow: [Shelf; 3],
    overflow_capacity: usize,
}

impl ShelfRegistry {
    pub fn new(capacities: &ShelfCapacities) -> Self {
        Self {
            homes: Temperature::ALL.map(|t| Shelf::home(t, capacities.home(t))),
            overflow: Temperature::ALL.map(Shelf::overflow),
            overflow_capacity: capacities.overflow,
        }
    }

    /// The home shelf for a raw temperature string.
    pub fn resolve(&self, temperature: &str) -> Result<&Shelf, ShelfError> {
        Ok(self.home(temperature.parse()?))
    }

    /// The overflow compartment for a raw temperature string.
    pub fn resolve_overflow(&self, temperature: &str) -> Result<&Shelf, ShelfError> {
        Ok(self.overflow(temperature.parse()?))
    }

    pub fn home(&self, temperature: Temperature) -> &Shelf {
        &self.homes[slot(temperature)]
    }

    pub fn overflow(&self, temperature: Temperature) -> &Shelf {
        &self.overflow[slot(temperature)]
    }

    pub fn homes(&self) -> impl Iterator<Item = &Shelf> {
        self.homes.iter()
    }

    pub fn overflows(&self) -> impl Iterator<Item = &Shelf> {
        self.overflow.iter()
    }

    /// Residents across every overflow compartment.
    pub fn overflow_len(&self) -> usize {
        self.overflow.iter().map(Shelf::size).sum()
    }

    pub fn overflow_capacity(&self) -> usize {
        self.overflow_capacity
    }

    pub fn is_overflow_full(&self) -> bool {
        self.overflow_len() >= self.overflow_capacity
    }

    /// Picks an eviction victim from the whole overflow tier.
    ///
    /// Compartments are weighted by size so every resident is about equally
    /// likely. Sizes may shift between the count and the pick; a compartment
    /// that emptied meanwhile falls through to the next non-empty one.
    pub fn random_overflow_victim<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<ShelfItem, ShelfError> {
        let sizes = self.overflow.each_ref().map(Shelf::size);
        let total: usize = sizes.iter().sum();
        if total == 0 {
            return Err(ShelfError::EmptyShelf);
        }

        let mut ticket = rng.gen_range(0..total);
        let mut start = 0;
        for (i, size) in sizes.iter().enumerate() {
            if ticket < *size {
                start = i;
                break;
            }
            ticket -= size;
        }

        (0..self.overflow.len())
            .map(|offset| &self.overflow[(start + offset) % self.overflow.len()])
            .find_map(|shelf| shelf.random_item(rng).ok())
            .ok_or(ShelfError::EmptyShelf)
    }
}

fn slot(temperature: Temperature) -> usize {
    match temperature {
        Temperature::Hot => 0,
        Temperature::Cold => 1,
        Temperature::Frozen => 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Order;
    use crate::shelf::Tier;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tokio::time::Instant;

    fn item(id: &str, temp: &str) -> ShelfItem {
        ShelfItem::new(Order::new(id, "Item", temp, 60, 0.0), Instant::now(), 30)
    }

    #[test]
    fn test_resolve_known_temperatures() {
        let registry = ShelfRegistry::new(&ShelfCapacities::default());
        for t in Temperature::ALL {
            let shelf = registry.resolve(t.as_str()).unwrap();
            assert_eq!(shelf.temperature(), t);
            assert_eq!(shelf.tier(), Tier::Home);
            assert_eq!(shelf.capacity(), Some(10));

            let overflow = registry.resolve_overflow(&t.as_str().to_uppercase()).unwrap();
            assert_eq!(overflow.temperature(), t);
            assert_eq!(overflow.tier(), Tier::Overflow);
        }
    }

    #[test]
    fn test_resolve_rejects_unknown() {
        let registry = ShelfRegistry::new(&ShelfCapacities::default());
        assert_eq!(
            registry.resolve("any").err(),
            Some(ShelfError::UnknownTemperature("any".to_string()))
        );
    }

    #[test]
    fn test_capacities_deserialize_with_defaults() {
        let caps: ShelfCapacities = serde_json::from_str(r#"{"hot": 2, "overflow": 4}"#).unwrap();
        assert_eq!(caps.hot, 2);
        assert_eq!(caps.cold, 10);
        assert_eq!(caps.overflow, 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_overflow_len_is_aggregate() {
        let caps = ShelfCapacities {
            overflow: 3,
            ..ShelfCapacities::default()
        };
        let registry = ShelfRegistry::new(&caps);
        registry.overflow(Temperature::Hot).push(item("h1", "hot")).unwrap();
        registry.overflow(Temperature::Cold).push(item("c1", "cold")).unwrap();
        assert_eq!(registry.overflow_len(), 2);
        assert!(!registry.is_overflow_full());

        registry.overflow(Temperature::Frozen).push(item("f1", "frozen")).unwrap();
        assert!(registry.is_overflow_full());
        assert_eq!(registry.home(Temperature::Hot).size(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_random_overflow_victim_spans_compartments() {
        let registry = ShelfRegistry::new(&ShelfCapacities::default());
        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(
            registry.random_overflow_victim(&mut rng),
            Err(ShelfError::EmptyShelf)
        );

        registry.overflow(Temperature::Hot).push(item("h1", "hot")).unwrap();
        registry.overflow(Temperature::Frozen).push(item("f1", "frozen")).unwrap();

        let mut temps = std::collections::HashSet::new();
        for _ in 0..50 {
            let victim = registry.random_overflow_victim(&mut rng).unwrap();
            temps.insert(victim.order.temp.clone());
        }
        assert_eq!(temps.len(), 2);
        assert_eq!(registry.overflow_len(), 2);
    }
}
