use chrono::{NaiveDate, Weekday};
use rat_calendar::{CalendarConfig, GridCache, ViewMode};
use std::sync::Arc;
use std::thread;

fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_same_period() {
    let cache = GridCache::new();
    let config = CalendarConfig::new();

    let a = cache.get_or_compute(d(2024, 2, 1), ViewMode::Month, &config).unwrap();
    let b = cache.get_or_compute(d(2024, 2, 29), ViewMode::Month, &config).unwrap();
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(cache.len(), 1);

    let c = cache.get_or_compute(d(2024, 3, 1), ViewMode::Month, &config).unwrap();
    assert!(!Arc::ptr_eq(&a, &c));
    assert_eq!(cache.len(), 2);

    // year and month of the same start are different entries
    let y = cache.get_or_compute(d(2024, 1, 1), ViewMode::Year, &config).unwrap();
    let m = cache.get_or_compute(d(2024, 1, 1), ViewMode::Month, &config).unwrap();
    assert_ne!(*y, *m);
    assert_eq!(cache.len(), 4);
}

#[test]
fn test_config_key() {
    let cache = GridCache::new();
    let sun = CalendarConfig::new();
    let mon = sun.to_builder().first_weekday(Weekday::Mon).build().unwrap();
    let hijri = sun.to_builder().calendar_id("islamic-civil").build().unwrap();

    let a = cache.get_or_compute(d(2024, 5, 5), ViewMode::Month, &sun).unwrap();
    let b = cache.get_or_compute(d(2024, 5, 5), ViewMode::Month, &mon).unwrap();
    let c = cache.get_or_compute(d(2024, 5, 5), ViewMode::Month, &hijri).unwrap();
    assert_ne!(a.as_period().unwrap().cells[0], b.as_period().unwrap().cells[0]);
    assert_ne!(a.period(), c.period());
    assert_eq!(cache.len(), 3);
}

#[test]
fn test_capacity() {
    let cache = GridCache::with_capacity(2);
    let config = CalendarConfig::new();
    assert_eq!(cache.capacity(), 2);

    for m in 1..=2 {
        cache.get_or_compute(d(2024, m, 1), ViewMode::Month, &config).unwrap();
    }
    assert_eq!(cache.len(), 2);
    cache.get_or_compute(d(2024, 3, 1), ViewMode::Month, &config).unwrap();
    assert_eq!(cache.len(), 1);

    let cache = GridCache::with_capacity(0);
    let grid = cache.get_or_compute(d(2024, 3, 1), ViewMode::Week, &config).unwrap();
    assert_eq!(grid.len(), 7);
    assert!(cache.is_empty());
}

#[test]
fn test_errors_not_cached() {
    let cache = GridCache::new();
    let config = CalendarConfig::new();
    assert!(cache
        .get_or_compute(NaiveDate::MAX, ViewMode::Month, &config)
        .is_err());
    assert!(cache.is_empty());
}

#[test]
fn test_clear_clone() {
    let cache = GridCache::with_capacity(10);
    let config = CalendarConfig::new();
    cache.get_or_compute(d(2024, 3, 1), ViewMode::Year, &config).unwrap();
    assert_eq!(cache.len(), 1);

    let clone = cache.clone();
    assert!(clone.is_empty());
    assert_eq!(clone.capacity(), 10);

    cache.clear();
    assert!(cache.is_empty());
}

#[test]
fn test_threads() {
    let cache = GridCache::new();
    let config = CalendarConfig::new();

    let grids = thread::scope(|s| {
        let handles = (1..=8)
            .map(|day| {
                let cache = &cache;
                let config = &config;
                s.spawn(move || {
                    cache
                        .get_or_compute(d(2024, 7, day), ViewMode::Year, config)
                        .unwrap()
                })
            })
            .collect::<Vec<_>>();
        handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .collect::<Vec<_>>()
    });

    assert_eq!(cache.len(), 1);
    for grid in &grids {
        assert!(Arc::ptr_eq(grid, &grids[0]));
    }
}
