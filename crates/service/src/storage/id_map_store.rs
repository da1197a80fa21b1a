use std::collections::HashMap;

use tokio::sync::RwLock;

/// Records keyed by id plus the last id handed out.
#[derive(Debug, Clone)]
pub struct IdTable<V> {
    items: HashMap<i64, V>,
    last_id: i64,
}

impl<V> IdTable<V> {
    pub fn items(&self) -> &HashMap<i64, V> { &self.items }

    pub fn get(&self, id: i64) -> Option<&V> { self.items.get(&id) }

    pub fn contains(&self, id: i64) -> bool { self.items.contains_key(&id) }

    pub fn last_id(&self) -> i64 { self.last_id }

    /// Advance the counter and return the new id. Ids are never reused,
    /// even after the record holding one is removed.
    pub fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    pub fn insert(&mut self, id: i64, value: V) {
        self.items.insert(id, value);
    }

    /// Replace an existing record; returns false if `id` is absent.
    pub fn replace(&mut self, id: i64, value: V) -> bool {
        match self.items.get_mut(&id) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: i64) -> Option<V> {
        self.items.remove(&id)
    }
}

/// In-memory id-keyed store.
///
/// All reads share the lock; every mutation runs inside `update_map` under
/// the write lock, so a check followed by a write is atomic with respect to
/// other callers.
#[derive(Debug)]
pub struct IdMapStore<V> {
    inner: RwLock<IdTable<V>>,
}

impl<V> Default for IdMapStore<V> {
    fn default() -> Self { Self::new() }
}

impl<V> IdMapStore<V> {
    pub fn new() -> Self {
        Self { inner: RwLock::new(IdTable { items: HashMap::new(), last_id: 0 }) }
    }

    /// Start from existing records. The counter is raised to the largest key
    /// if `last_id` lags behind it.
    pub fn with_entries(items: HashMap<i64, V>, last_id: i64) -> Self {
        let max_key = items.keys().copied().max().unwrap_or(0);
        let last_id = last_id.max(max_key);
        Self { inner: RwLock::new(IdTable { items, last_id }) }
    }

    pub async fn len(&self) -> usize { self.inner.read().await.items.len() }

    pub async fn is_empty(&self) -> bool { self.len().await == 0 }

    pub async fn last_id(&self) -> i64 { self.inner.read().await.last_id }

    /// Apply a mutation to the table while holding the write lock.
    pub async fn update_map<F, T, E>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut IdTable<V>) -> Result<T, E>,
    {
        let mut table = self.inner.write().await;
        f(&mut table)
    }
}

impl<V: Clone> IdMapStore<V> {
    /// All records, ascending by id.
    pub async fn list(&self) -> Vec<V> {
        let table = self.inner.read().await;
        let mut entries: Vec<(&i64, &V)> = table.items.iter().collect();
        entries.sort_by_key(|(id, _)| **id);
        entries.into_iter().map(|(_, v)| v.clone()).collect()
    }

    pub async fn get(&self, id: i64) -> Option<V> {
        self.inner.read().await.items.get(&id).cloned()
    }
}
