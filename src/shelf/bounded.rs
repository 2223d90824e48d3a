use crate::model::{ShelfItem, Temperature};
use crate::shelf::{FreshnessQueue, ShelfError};
use parking_lot::Mutex;
use rand::Rng;
use std::fmt::Display;

/// The two storage levels an item can occupy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    Home,
    Overflow,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Home => "home",
            Tier::Overflow => "overflow",
        }
    }
}

impl Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A temperature-homogeneous store with its own lock.
///
/// Every operation takes the lock for its whole duration and never across an
/// `.await`, so the queue and its id index always change together. Home
/// shelves carry a capacity; overflow compartments don't and are bounded by
/// the registry's aggregate cap instead.
///
/// Capacity is not enforced here: admission checks [`Shelf::is_full`] before
/// pushing.
#[derive(Debug)]
pub struct Shelf {
    temperature: Temperature,
    tier: Tier,
    capacity: Option<usize>,
    queue: Mutex<FreshnessQueue>,
}

impl Shelf {
    pub fn home(temperature: Temperature, capacity: usize) -> Self {
        Self::with_capacity(temperature, Tier::Home, Some(capacity))
    }

    pub fn overflow(temperature: Temperature) -> Self {
        Self::with_capacity(temperature, Tier::Overflow, None)
    }

    fn with_capacity(temperature: Temperature, tier: Tier, capacity: Option<usize>) -> Self {
        Self {
            temperature,
            tier,
            capacity,
            queue: Mutex::new(FreshnessQueue::new()),
        }
    }

    pub fn temperature(&self) -> Temperature {
        self.temperature
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    pub fn push(&self, item: ShelfItem) -> Result<(), ShelfError> {
        self.queue.lock().push(item)
    }

    /// Removes the item closest to spoiling.
    pub fn pop(&self) -> Result<ShelfItem, ShelfError> {
        self.queue.lock().pop().ok_or(ShelfError::EmptyShelf)
    }

    pub fn peek(&self) -> Result<ShelfItem, ShelfError> {
        self.queue.lock().peek().cloned().ok_or(ShelfError::EmptyShelf)
    }

    /// Pops the head only if `predicate` holds for it, in one critical section.
    ///
    /// Returns `Ok(None)` when the head was kept.
    pub fn pop_if<F>(&self, predicate: F) -> Result<Option<ShelfItem>, ShelfError>
    where
        F: FnOnce(&ShelfItem) -> bool,
    {
        let mut queue = self.queue.lock();
        let head = queue.peek().ok_or(ShelfError::EmptyShelf)?;
        if predicate(head) {
            Ok(queue.pop())
        } else {
            Ok(None)
        }
    }

    pub fn is_present(&self, id: &str) -> bool {
        self.queue.lock().contains(id)
    }

    pub fn delete(&self, id: &str) -> Result<ShelfItem, ShelfError> {
        self.queue
            .lock()
            .remove(id)
            .ok_or_else(|| ShelfError::NotFound(id.to_string()))
    }

    /// A clone of some resident item, without removing it.
    pub fn random_item<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<ShelfItem, ShelfError> {
        let queue = self.queue.lock();
        if queue.is_empty() {
            return Err(ShelfError::EmptyShelf);
        }
        let pos = rng.gen_range(0..queue.len());
        queue.at(pos).cloned().ok_or(ShelfError::EmptyShelf)
    }

    pub fn size(&self) -> usize {
        self.queue.lock().len()
    }

    /// `None` for overflow compartments.
    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        match self.capacity {
            Some(capacity) => self.size() >= capacity,
            None => false,
        }
    }

    /// Residents in pop order.
    pub fn snapshot(&self) -> Vec<ShelfItem> {
        self.queue.lock().sorted()
    }
}
