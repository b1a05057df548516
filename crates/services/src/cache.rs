//! Load-once memoization for collections read from the table source.

use std::fmt;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

enum CacheState<T> {
    Unset,
    Pending,
    Loaded(Arc<T>),
}

struct Slot<T> {
    state: CacheState<T>,
    generation: u64,
}

/// Holds a value loaded at most once until [`LoadOnce::reset`].
///
/// A failed load leaves the cache unset so the next call retries. Callers
/// racing on an unset cache each run their loader; the first value stored
/// wins and later ones are discarded. A load that started before a reset
/// returns its value without caching it.
pub struct LoadOnce<T> {
    slot: Mutex<Slot<T>>,
}

impl<T> LoadOnce<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(Slot {
                state: CacheState::Unset,
                generation: 0,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Slot<T>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The cached value, if loaded.
    #[must_use]
    pub fn get(&self) -> Option<Arc<T>> {
        match &self.lock().state {
            CacheState::Loaded(value) => Some(Arc::clone(value)),
            CacheState::Unset | CacheState::Pending => None,
        }
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        matches!(&self.lock().state, CacheState::Loaded(_))
    }

    /// True while a load is in flight and nothing is cached yet.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(&self.lock().state, CacheState::Pending)
    }

    /// Return the cached value or run `load` and cache its result.
    ///
    /// # Errors
    ///
    /// Propagates the loader's error; nothing is cached in that case.
    pub async fn get_or_try_load<F, Fut, E>(&self, load: F) -> Result<Arc<T>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let generation = {
            let mut slot = self.lock();
            if let CacheState::Loaded(value) = &slot.state {
                return Ok(Arc::clone(value));
            }
            slot.state = CacheState::Pending;
            slot.generation
        };

        let result = load().await;

        let mut slot = self.lock();
        let current = slot.generation == generation;
        match result {
            Ok(value) => {
                if !current {
                    return Ok(Arc::new(value));
                }
                if let CacheState::Loaded(existing) = &slot.state {
                    return Ok(Arc::clone(existing));
                }
                let value = Arc::new(value);
                slot.state = CacheState::Loaded(Arc::clone(&value));
                Ok(value)
            }
            Err(err) => {
                if current && matches!(slot.state, CacheState::Pending) {
                    slot.state = CacheState::Unset;
                }
                Err(err)
            }
        }
    }

    /// Forget the cached value; the next access loads again.
    ///
    /// Loads already in flight finish for their callers but are not cached.
    pub fn reset(&self) {
        let mut slot = self.lock();
        slot.state = CacheState::Unset;
        slot.generation = slot.generation.wrapping_add(1);
    }
}

impl<T> Default for LoadOnce<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for LoadOnce<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match &self.lock().state {
            CacheState::Unset => "unset",
            CacheState::Pending => "pending",
            CacheState::Loaded(_) => "loaded",
        };
        f.debug_struct("LoadOnce").field("state", &state).finish()
    }
}
