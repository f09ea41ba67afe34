//! Weighted random pools used for dialogue and commentary.
//!
//! A pool is an append-only list of `(value, weight)` entries. Drawing picks
//! one value with probability `weight / total_weight`. Duplicate values are
//! independent entries, so their weights add up.

use rand::Rng;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum PoolError {
    /// Nothing drawable: the pool is empty or no entry has a positive weight.
    #[error("invalid state: cannot draw from a pool with {entries} entries and total weight {total_weight}")]
    InvalidState { entries: usize, total_weight: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeightedPool<T> {
    entries: Vec<(T, f64)>,
}

impl<T> Default for WeightedPool<T> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<T> WeightedPool<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, value: T, weight: f64) {
        self.entries.push((value, weight));
    }

    /// `add` with the default weight of 1.
    pub fn add_one(&mut self, value: T) {
        self.add(value, 1.0);
    }

    /// Append only when `condition` holds. Lets dialogue pools be built
    /// without an `if` around every line.
    pub fn add_conditionally(&mut self, value: T, condition: bool, weight: f64) {
        if condition {
            self.add(value, weight);
        }
    }

    /// Append every entry of `other`, keeping its weights. `other` is untouched.
    pub fn merge(&mut self, other: &WeightedPool<T>)
    where
        T: Clone,
    {
        self.entries.extend(other.entries.iter().cloned());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&T, f64)> {
        self.entries.iter().map(|(value, weight)| (value, *weight))
    }

    /// Sum of all drawable weights.
    pub fn total_weight(&self) -> f64 {
        self.drawable().map(|(_, weight)| weight).sum()
    }

    pub fn select_random<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<&T, PoolError> {
        let total = self.total_weight();
        if !(total > 0.0 && total.is_finite()) {
            return Err(self.invalid_state(total));
        }

        let mut roll = rng.gen::<f64>() * total;
        let mut last = None;
        for (value, weight) in self.drawable() {
            if roll < weight {
                return Ok(value);
            }
            roll -= weight;
            last = Some(value);
        }

        // Float rounding can leave `roll` a hair above the final weight.
        last.ok_or_else(|| self.invalid_state(total))
    }

    fn drawable(&self) -> impl Iterator<Item = (&T, f64)> {
        self.iter()
            .filter(|(_, weight)| *weight > 0.0 && weight.is_finite())
    }

    fn invalid_state(&self, total_weight: f64) -> PoolError {
        PoolError::InvalidState {
            entries: self.entries.len(),
            total_weight,
        }
    }
}

impl<T> FromIterator<(T, f64)> for WeightedPool<T> {
    fn from_iter<I: IntoIterator<Item = (T, f64)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
