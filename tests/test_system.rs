use chrono::{Datelike, NaiveDate, Weekday};
use rat_calendar::system::{Gregorian, HijriEpoch, IslamicTabular};
use rat_calendar::{
    compute_grid, Calendar, CalendarConfig, CalendarDate, CalendarSystem, ViewMode,
};

fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn cfg(id: &str) -> CalendarConfig {
    CalendarConfig::builder()
        .calendar_id(id)
        .first_weekday(Weekday::Sat)
        .build()
        .unwrap()
}

#[test]
fn test_identifiers() {
    assert_eq!(Calendar::from_identifier("gregory").unwrap(), Calendar::gregorian());
    assert_eq!(Calendar::from_identifier("ISO8601").unwrap(), Calendar::gregorian());
    assert_eq!(
        Calendar::from_identifier("islamicc").unwrap(),
        Calendar::islamic_civil()
    );
    assert_eq!(
        Calendar::from_identifier("islamic-tbla").unwrap().identifier(),
        "islamic-tbla"
    );
    assert_ne!(Calendar::islamic_civil(), Calendar::islamic_tbla());
    assert!(Calendar::from_identifier("hebrew").is_err());
    assert_eq!(Calendar::default(), Calendar::gregorian());
}

#[test]
fn test_hijri_year_civil() {
    // 1446 AH
    let grid = compute_grid(d(2024, 10, 10), ViewMode::Year, &cfg("islamic-civil")).unwrap();

    let starts = grid.months().unwrap().keys().copied().collect::<Vec<_>>();
    assert_eq!(
        starts,
        vec![
            d(2024, 7, 8),
            d(2024, 8, 7),
            d(2024, 9, 5),
            d(2024, 10, 5),
            d(2024, 11, 3),
            d(2024, 12, 3),
            d(2025, 1, 1),
            d(2025, 1, 31),
            d(2025, 3, 1),
            d(2025, 3, 31),
            d(2025, 4, 29),
            d(2025, 5, 29),
        ]
    );
    assert_eq!(grid.period().start, d(2024, 7, 8));
    assert_eq!(grid.period().end, d(2025, 6, 27));
    assert_eq!(grid.period().len_days(), 354);

    let all = grid.period().days().collect::<Vec<_>>();
    assert_eq!(grid.in_period_dates(), all);

    for month in grid.months().unwrap().values() {
        assert_eq!(month.cells.len() % 7, 0);
        assert_eq!(month.cells[0].date.weekday(), Weekday::Sat);
        let len = month.period.len_days();
        assert!(len == 29 || len == 30);
    }
}

#[test]
fn test_hijri_year_tbla() {
    let grid = compute_grid(d(2024, 10, 10), ViewMode::Year, &cfg("islamic-tbla")).unwrap();
    let months = grid.months().unwrap();
    assert_eq!(*months.keys().next().unwrap(), d(2024, 7, 7));
    assert_eq!(*months.keys().last().unwrap(), d(2025, 5, 28));
    assert_eq!(grid.period().end, d(2025, 6, 26));
}

#[test]
fn test_hijri_month() {
    // 1445-12, a leap year with 30 days in the last month
    let grid = compute_grid(d(2024, 6, 10), ViewMode::Month, &cfg("islamic-civil")).unwrap();
    let month = grid.as_period().unwrap();
    assert_eq!(month.period.start, d(2024, 6, 8));
    assert_eq!(month.period.end, d(2024, 7, 8));
    assert_eq!(month.in_period_dates().count(), 30);

    let grid = compute_grid(d(2024, 6, 10), ViewMode::Month, &cfg("islamic-tbla")).unwrap();
    assert_eq!(grid.period().start, d(2024, 6, 7));
    assert_eq!(grid.period().end, d(2024, 7, 7));
}

#[test]
fn test_hijri_conversion() {
    let civil = IslamicTabular::new(HijriEpoch::Civil);
    let tbla = IslamicTabular::new(HijriEpoch::Astronomical);

    assert_eq!(
        civil.to_ymd(d(2024, 6, 10)),
        Some(CalendarDate {
            year: 1445,
            month: 12,
            day: 3
        })
    );
    assert_eq!(tbla.to_ymd(d(2024, 6, 10)).unwrap().day, 4);
    assert_eq!(civil.from_ymd(1447, 1, 1), Some(d(2025, 6, 27)));
    assert_eq!(civil.from_ymd(1446, 12, 30), None);
    assert_eq!(civil.from_ymd(1446, 13, 1), None);
    assert_eq!(civil.days_in_month(1445, 12), Some(30));
    assert_eq!(civil.days_in_month(1446, 12), Some(29));
    assert_eq!(civil.months_in_year(1446), 12);

    for date in d(2000, 1, 1).iter_days().take(10_000) {
        let ymd = civil.to_ymd(date).unwrap();
        assert_eq!(civil.from_ymd(ymd.year, ymd.month, ymd.day), Some(date));
    }
}

#[test]
fn test_hijri_navigation() {
    let config = cfg("islamic-civil");
    assert_eq!(
        ViewMode::Month.step(d(2024, 7, 8), 1, &config).unwrap(),
        d(2024, 8, 7)
    );
    assert_eq!(
        ViewMode::Year.step(d(2024, 7, 8), 1, &config).unwrap(),
        d(2025, 6, 27)
    );
    // 1445-12-30 clamps to 1446-12-29
    let last = civil_date(1445, 12, 30);
    assert_eq!(
        ViewMode::Year.step(last, 1, &config).unwrap(),
        civil_date(1446, 12, 29)
    );
}

fn civil_date(y: i32, m: u32, day: u32) -> NaiveDate {
    IslamicTabular::new(HijriEpoch::Civil)
        .from_ymd(y, m, day)
        .unwrap()
}

/// Gregorian months with a different name.
#[derive(Debug)]
struct Renamed;

impl CalendarSystem for Renamed {
    fn identifier(&self) -> &str {
        "renamed"
    }

    fn to_ymd(&self, date: NaiveDate) -> Option<CalendarDate> {
        Gregorian.to_ymd(date)
    }

    fn from_ymd(&self, year: i32, month: u32, day: u32) -> Option<NaiveDate> {
        Gregorian.from_ymd(year, month, day)
    }

    fn months_in_year(&self, year: i32) -> u32 {
        Gregorian.months_in_year(year)
    }

    fn days_in_month(&self, year: i32, month: u32) -> Option<u32> {
        Gregorian.days_in_month(year, month)
    }
}

#[test]
fn test_custom() {
    let calendar = Calendar::custom(Renamed);
    assert_ne!(calendar, Calendar::gregorian());
    assert_eq!(calendar.identifier(), "renamed");

    let config = CalendarConfig::builder()
        .calendar(calendar)
        .build()
        .unwrap();
    let custom = compute_grid(d(2024, 3, 3), ViewMode::Year, &config).unwrap();
    let gregorian = compute_grid(d(2024, 3, 3), ViewMode::Year, &CalendarConfig::new()).unwrap();
    assert_eq!(custom, gregorian);
}
