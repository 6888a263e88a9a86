//! In-memory keyed collection fed by realtime deltas and full reloads.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::Entity;

type Comparator<T> = Arc<dyn Fn(&T, &T) -> Ordering + Send + Sync>;

/// Presentation order of a cache's snapshots.
pub enum SortOrder<T> {
    /// First inserted first.
    Insertion,
    /// Most recently created first.
    NewestFirst,
    /// Caller-supplied comparator.
    By(Comparator<T>),
}

impl<T> SortOrder<T> {
    pub fn by(cmp: impl Fn(&T, &T) -> Ordering + Send + Sync + 'static) -> Self {
        SortOrder::By(Arc::new(cmp))
    }
}

impl<T> Clone for SortOrder<T> {
    fn clone(&self) -> Self {
        match self {
            SortOrder::Insertion => SortOrder::Insertion,
            SortOrder::NewestFirst => SortOrder::NewestFirst,
            SortOrder::By(cmp) => SortOrder::By(Arc::clone(cmp)),
        }
    }
}

impl<T> fmt::Debug for SortOrder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Insertion => f.write_str("Insertion"),
            SortOrder::NewestFirst => f.write_str("NewestFirst"),
            SortOrder::By(_) => f.write_str("By(<comparator>)"),
        }
    }
}

/// Latest known value of every entity in one collection.
///
/// # Invariants
///
/// - each id is stored at most once
/// - `order` holds exactly the ids in `entries`
/// - applying the same upsert twice leaves the cache unchanged
#[derive(Debug, Clone)]
pub struct LiveViewCache<T: Entity> {
    entries: HashMap<T::Id, T>,
    order: Vec<T::Id>,
    sort: SortOrder<T>,
    version: u64,
}

impl<T: Entity> Default for LiveViewCache<T> {
    fn default() -> Self {
        Self::new(SortOrder::Insertion)
    }
}

impl<T: Entity> LiveViewCache<T> {
    pub fn new(sort: SortOrder<T>) -> Self {
        Self {
            entries: HashMap::new(),
            order: Vec::new(),
            sort,
            version: 0,
        }
    }

    /// Inserts or replaces by id. Returns true if the id was new.
    ///
    /// Replacing keeps the entity's original insertion position.
    pub fn upsert(&mut self, entity: T) -> bool {
        let id = entity.entity_id();
        self.version += 1;
        if self.entries.insert(id.clone(), entity).is_some() {
            return false;
        }
        self.order.push(id);
        true
    }

    /// Removes by id; absent ids are ignored.
    pub fn remove(&mut self, id: &T::Id) -> Option<T> {
        let removed = self.entries.remove(id)?;
        self.order.retain(|existing| existing != id);
        self.version += 1;
        Some(removed)
    }

    /// Replaces the whole collection with an authoritative fetch.
    ///
    /// Later duplicates in `full_set` win, keeping the first position.
    pub fn reconcile(&mut self, full_set: Vec<T>) {
        self.entries.clear();
        self.order.clear();
        for entity in full_set {
            let id = entity.entity_id();
            if self.entries.insert(id.clone(), entity).is_none() {
                self.order.push(id);
            }
        }
        self.version += 1;
    }

    pub fn clear(&mut self) {
        self.reconcile(Vec::new());
    }

    pub fn get(&self, id: &T::Id) -> Option<&T> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &T::Id) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Bumped on every mutation. Lets readers detect change cheaply.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Ordered, read-only view of every entry.
    pub fn snapshot(&self) -> Snapshot<'_, T> {
        Snapshot {
            cache: self,
            filter: None,
        }
    }

    /// Ordered, read-only view of the entries accepted by `filter`.
    pub fn snapshot_where<'a>(
        &'a self,
        filter: impl Fn(&T) -> bool + 'a,
    ) -> Snapshot<'a, T> {
        Snapshot {
            cache: self,
            filter: Some(Box::new(filter)),
        }
    }

    fn ordered(&self) -> Vec<&T> {
        let in_insertion_order = self.order.iter().filter_map(|id| self.entries.get(id));
        match &self.sort {
            SortOrder::Insertion => in_insertion_order.collect(),
            SortOrder::NewestFirst => {
                let mut items: Vec<&T> = in_insertion_order.collect();
                // Stable sort: equal timestamps keep the later insertion first.
                items.reverse();
                items.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
                items
            }
            SortOrder::By(cmp) => {
                let mut items: Vec<&T> = in_insertion_order.collect();
                items.sort_by(|a, b| cmp(a, b));
                items
            }
        }
    }
}

/// Borrowed view over a cache.
///
/// Nothing is computed until [`iter`](Snapshot::iter) is called, and every
/// call starts over from the cache's current contents.
pub struct Snapshot<'a, T: Entity> {
    cache: &'a LiveViewCache<T>,
    filter: Option<Box<dyn Fn(&T) -> bool + 'a>>,
}

impl<'a, T: Entity> Snapshot<'a, T> {
    pub fn iter(&self) -> impl Iterator<Item = &'a T> + '_ {
        self.cache
            .ordered()
            .into_iter()
            .filter(move |item| self.filter.as_ref().map_or(true, |f| f(item)))
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }

    pub fn count(&self) -> usize {
        self.iter().count()
    }
}
