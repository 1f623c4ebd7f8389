//! # In-Memory Tables
//!
//! One `Table<T>` per record kind: an insertion-ordered collection plus a
//! monotonic id counter, behind an `Arc<RwLock<_>>`.
//!
//! ## Id Assignment
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  create(record)                                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  next_seq += 1  ──►  "PAY-007"  (never reused, even after deletes)     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  rows.push(record)                                                      │
//! │                                                                         │
//! │  Seeded ids bump the counter past the highest sequence seen, so a      │
//! │  table seeded with PAY-001..PAY-006 hands out PAY-007 next.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency
//! Every mutation replaces or removes one row under the write lock.
//! Concurrent writers to the same record are last-writer-wins; there is no
//! versioning.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use multiluz_core::{format_id, id_prefix, parse_id, Commission, Order, Payment, Salesperson, UserProfile};

use crate::error::{StoreError, StoreResult};

// =============================================================================
// Record Trait
// =============================================================================

/// A base record the store can hold.
pub trait Record: Clone + Send + Sync + 'static {
    /// Entity name used in errors and logs.
    const ENTITY: &'static str;
    /// Id prefix, e.g. `ORD`.
    const PREFIX: &'static str;

    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);
}

macro_rules! impl_record {
    ($ty:ty, $entity:literal, $prefix:expr) => {
        impl Record for $ty {
            const ENTITY: &'static str = $entity;
            const PREFIX: &'static str = $prefix;

            fn id(&self) -> &str {
                &self.id
            }

            fn set_id(&mut self, id: String) {
                self.id = id;
            }
        }
    };
}

impl_record!(Order, "Order", id_prefix::ORDER);
impl_record!(Payment, "Payment", id_prefix::PAYMENT);
impl_record!(Salesperson, "Salesperson", id_prefix::SALESPERSON);
impl_record!(UserProfile, "UserProfile", id_prefix::PROFILE);
impl_record!(Commission, "Commission", id_prefix::COMMISSION);

// =============================================================================
// Table
// =============================================================================

#[derive(Debug)]
struct TableState<T> {
    rows: Vec<T>,
    last_seq: u64,
}

/// Shared, insertion-ordered collection of one record kind.
#[derive(Debug)]
pub struct Table<T> {
    state: Arc<RwLock<TableState<T>>>,
}

impl<T> Clone for Table<T> {
    fn clone(&self) -> Self {
        Table {
            state: Arc::clone(&self.state),
        }
    }
}

impl<T: Record> Default for Table<T> {
    fn default() -> Self {
        Table::new()
    }
}

impl<T: Record> Table<T> {
    pub fn new() -> Self {
        Table {
            state: Arc::new(RwLock::new(TableState {
                rows: Vec::new(),
                last_seq: 0,
            })),
        }
    }

    // Rows are replaced whole, so a poisoned lock still holds consistent data.
    fn read(&self) -> RwLockReadGuard<'_, TableState<T>> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, TableState<T>> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// All rows, in insertion order.
    pub fn list(&self) -> Vec<T> {
        self.read().rows.clone()
    }

    pub fn len(&self) -> usize {
        self.read().rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn find(&self, id: &str) -> Option<T> {
        self.read().rows.iter().find(|r| r.id() == id).cloned()
    }

    pub fn get(&self, id: &str) -> StoreResult<T> {
        self.find(id).ok_or_else(|| StoreError::not_found(T::ENTITY, id))
    }

    pub fn exists(&self, id: &str) -> bool {
        self.read().rows.iter().any(|r| r.id() == id)
    }

    /// Appends a record under a freshly assigned id. Any id on the input is
    /// ignored.
    pub fn create(&self, mut record: T) -> T {
        let mut state = self.write();
        state.last_seq += 1;
        record.set_id(format_id(T::PREFIX, state.last_seq));
        state.rows.push(record.clone());
        record
    }

    /// Inserts a record that already has an id (seeding, imports).
    pub fn insert(&self, record: T) -> StoreResult<T> {
        let mut state = self.write();
        if state.rows.iter().any(|r| r.id() == record.id()) {
            return Err(StoreError::duplicate(T::ENTITY, record.id()));
        }
        if let Some(seq) = parse_id(T::PREFIX, record.id()) {
            state.last_seq = state.last_seq.max(seq);
        }
        state.rows.push(record.clone());
        Ok(record)
    }

    /// Like [`Table::create`], but first runs `check` against the current rows
    /// under the same write lock.
    pub fn create_checked<F>(&self, mut record: T, check: F) -> StoreResult<T>
    where
        F: FnOnce(&[T], &T) -> StoreResult<()>,
    {
        let mut state = self.write();
        check(&state.rows, &record)?;
        state.last_seq += 1;
        record.set_id(format_id(T::PREFIX, state.last_seq));
        state.rows.push(record.clone());
        Ok(record)
    }

    /// Like [`Table::update`], but first runs `check` under the write lock.
    pub fn update_checked<F>(&self, record: T, check: F) -> StoreResult<T>
    where
        F: FnOnce(&[T], &T) -> StoreResult<()>,
    {
        let mut state = self.write();
        check(&state.rows, &record)?;
        Self::replace(&mut state, record)
    }

    /// Replaces the row with the same id, keeping its position.
    pub fn update(&self, record: T) -> StoreResult<T> {
        let mut state = self.write();
        Self::replace(&mut state, record)
    }

    fn replace(state: &mut TableState<T>, record: T) -> StoreResult<T> {
        let slot = state
            .rows
            .iter_mut()
            .find(|r| r.id() == record.id())
            .ok_or_else(|| StoreError::not_found(T::ENTITY, record.id()))?;
        *slot = record.clone();
        Ok(record)
    }

    /// Removes a row and returns it.
    pub fn delete(&self, id: &str) -> StoreResult<T> {
        let mut state = self.write();
        let index = state
            .rows
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| StoreError::not_found(T::ENTITY, id))?;
        Ok(state.rows.remove(index))
    }

    /// Applies `change` to every row matching `pred`; returns how many changed.
    pub fn update_where<P, F>(&self, pred: P, mut change: F) -> usize
    where
        P: Fn(&T) -> bool,
        F: FnMut(&mut T),
    {
        let mut state = self.write();
        let mut touched = 0;
        for row in state.rows.iter_mut() {
            if pred(row) {
                change(row);
                touched += 1;
            }
        }
        touched
    }

    /// Runs `f` against the rows under the read lock.
    pub fn with_rows<R>(&self, f: impl FnOnce(&[T]) -> R) -> R {
        f(&self.read().rows)
    }
}
