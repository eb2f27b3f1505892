//!
//! Memoized grid computation.
//!
//! Grids only depend on the period of the reference date, the
//! view mode, the first weekday and the calendar system. The
//! cache keys on exactly that, so every date of a month hits the
//! same entry.
//!
//! Computation happens under the lock. Concurrent callers asking
//! for the same period wait for the first one and share its
//! result.
//!

use crate::config::CalendarConfig;
use crate::error::CalendarError;
use crate::grid::{compute_grid, GridResult};
use crate::mode::ViewMode;
use crate::system::Calendar;
use chrono::{NaiveDate, Weekday};
use log::debug;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct GridKey {
    period_start: NaiveDate,
    mode: ViewMode,
    first_weekday: Weekday,
    calendar: Calendar,
}

/// Cache for computed grids.
///
/// Is Send + Sync and can be shared between threads.
#[derive(Debug)]
pub struct GridCache {
    capacity: usize,
    grids: Mutex<HashMap<GridKey, Arc<GridResult>>>,
}

impl Default for GridCache {
    fn default() -> Self {
        Self::with_capacity(64)
    }
}

impl Clone for GridCache {
    /// The clone starts empty.
    fn clone(&self) -> Self {
        Self::with_capacity(self.capacity)
    }
}

impl GridCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache with at most capacity entries. When full, the cache
    /// is cleared. A capacity of 0 disables caching.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            grids: Mutex::new(HashMap::new()),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Return the cached grid or compute it.
    ///
    /// Errors are not cached.
    pub fn get_or_compute(
        &self,
        reference: NaiveDate,
        mode: ViewMode,
        config: &CalendarConfig,
    ) -> Result<Arc<GridResult>, CalendarError> {
        let period = mode.period(reference, config)?;
        let key = GridKey {
            period_start: period.start,
            mode,
            first_weekday: config.first_weekday(),
            calendar: config.calendar().clone(),
        };

        let mut grids = self.grids.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(grid) = grids.get(&key) {
            return Ok(grid.clone());
        }

        let grid = Arc::new(compute_grid(reference, mode, config)?);
        if self.capacity == 0 {
            return Ok(grid);
        }
        if grids.len() >= self.capacity {
            debug!("grid cache full, drop {} grids", grids.len());
            grids.clear();
        }
        debug!(
            "grid cache miss {:?} {} {}",
            mode,
            period.start,
            key.calendar.identifier()
        );
        grids.insert(key, grid.clone());

        Ok(grid)
    }

    /// Number of cached grids.
    pub fn len(&self) -> usize {
        self.grids
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove all cached grids.
    pub fn clear(&self) {
        self.grids
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}
