//! Identifier generators.
//!
//! A provider never invents identifiers itself: it asks the injected
//! [`IdGenerator`] for one each time an entity is created.

use crate::{EntityId, Error, Result};
use std::sync::atomic::{AtomicU64, Ordering};

/// Produces fresh, unique identifiers for newly created entities.
pub trait IdGenerator: Send + Sync {
    /// Returns the next identifier in string form.
    fn next_id(&self) -> Result<String>;
}

/// Generates UUID v7 identifiers. This is the default generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidV7Generator;

impl IdGenerator for UuidV7Generator {
    fn next_id(&self) -> Result<String> {
        Ok(EntityId::new().to_string())
    }
}

/// Generates `{prefix}-{n}` identifiers from a monotonically increasing counter.
///
/// Useful where readable, deterministic ids matter more than global
/// uniqueness (fixtures, single-process tools).
#[derive(Debug)]
pub struct SequentialIdGenerator {
    prefix: String,
    next: AtomicU64,
}

impl SequentialIdGenerator {
    /// Creates a generator whose first id is `{prefix}-1`.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self::starting_at(prefix, 1)
    }

    /// Creates a generator whose first id is `{prefix}-{start}`.
    pub fn starting_at(prefix: impl Into<String>, start: u64) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(start),
        }
    }

    /// Returns the prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> Result<String> {
        let n = self
            .next
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_add(1))
            .map_err(|_| Error::IdExhausted(self.prefix.clone()))?;
        Ok(format!("{}-{}", self.prefix, n))
    }
}
