//! In-memory kat repository

use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::kat::{Kat, KatId, KatQuery, KatRepository, NewKat};
use crate::domain::DomainError;

/// Thread-safe in-memory kat repository
///
/// IDs are assigned from a counter starting at 1 and are never reused.
/// Data is lost when the process terminates.
#[derive(Debug)]
pub struct InMemoryKatRepository {
    kats: RwLock<BTreeMap<KatId, Kat>>,
    next_id: AtomicI64,
}

impl Default for InMemoryKatRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryKatRepository {
    /// Creates a new empty repository
    pub fn new() -> Self {
        Self {
            kats: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Creates a repository pre-populated with kats, assigning IDs in order
    pub fn with_kats(kats: Vec<NewKat>) -> Result<Self, DomainError> {
        let repository = Self::new();
        {
            let mut map = repository.write()?;

            for kat in kats {
                let kat = kat.into_kat(repository.allocate_id()?);
                map.insert(kat.id(), kat);
            }
        }
        Ok(repository)
    }

    fn allocate_id(&self) -> Result<KatId, DomainError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        KatId::new(id).map_err(|e| DomainError::internal(format!("Failed to allocate ID: {}", e)))
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, BTreeMap<KatId, Kat>>, DomainError> {
        self.kats
            .read()
            .map_err(|e| DomainError::storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, BTreeMap<KatId, Kat>>, DomainError> {
        self.kats
            .write()
            .map_err(|e| DomainError::storage(format!("Failed to acquire write lock: {}", e)))
    }
}

#[async_trait]
impl KatRepository for InMemoryKatRepository {
    async fn get(&self, id: KatId) -> Result<Option<Kat>, DomainError> {
        Ok(self.read()?.get(&id).cloned())
    }

    async fn create(&self, kat: NewKat) -> Result<Kat, DomainError> {
        let mut kats = self.write()?;
        let kat = kat.into_kat(self.allocate_id()?);

        kats.insert(kat.id(), kat.clone());
        Ok(kat)
    }

    async fn update(&self, kat: Kat) -> Result<Kat, DomainError> {
        let mut kats = self.write()?;

        match kats.get_mut(&kat.id()) {
            Some(existing) => {
                *existing = kat.clone();
                Ok(kat)
            }
            None => Err(DomainError::not_found(format!(
                "Kat '{}' not found",
                kat.id()
            ))),
        }
    }

    async fn delete(&self, id: KatId) -> Result<bool, DomainError> {
        Ok(self.write()?.remove(&id).is_some())
    }

    async fn list(&self, query: &KatQuery) -> Result<Vec<Kat>, DomainError> {
        let kats = self.read()?;
        Ok(query.apply(kats.values().cloned()))
    }

    async fn count(&self, query: &KatQuery) -> Result<usize, DomainError> {
        let kats = self.read()?;
        Ok(kats.values().filter(|kat| query.matches(kat)).count())
    }

    async fn distinct_ages(&self) -> Result<Vec<i32>, DomainError> {
        let kats = self.read()?;
        let ages: BTreeSet<i32> = kats.values().map(Kat::age).collect();
        Ok(ages.into_iter().collect())
    }

    async fn exists(&self, id: KatId) -> Result<bool, DomainError> {
        Ok(self.read()?.contains_key(&id))
    }
}
