use rat_calendar::calendar::{CalendarBackground, CalendarOptions};
use rat_calendar::system::HijriEpoch;
use rat_calendar::{Calendar, NavDirection, ViewMode};
use ratatui::style::Color;

#[test]
fn test_serde() {
    let options = CalendarOptions {
        show_header: false,
        show_date_out: true,
        show_divider: false,
        highlight_today: true,
        background: CalendarBackground::Visible(Color::Rgb(192, 172, 152)),
    };

    let s = serde_json::to_string_pretty(&options).unwrap();
    println!("{}", s);
    let v: CalendarOptions = serde_json::from_str(&s).unwrap();
    assert_eq!(v, options);

    // missing fields use the defaults
    let v: CalendarOptions = serde_json::from_str(r#"{ "show_header": false }"#).unwrap();
    assert!(!v.show_header);
    assert!(v.show_divider);
    assert_eq!(v.background, CalendarBackground::Hidden);
}

#[test]
fn test_serde_calendar() {
    let s = serde_json::to_string(&Calendar::islamic_civil()).unwrap();
    assert_eq!(s, r#""islamic-civil""#);
    let v: Calendar = serde_json::from_str(&s).unwrap();
    assert_eq!(v, Calendar::islamic_civil());

    let v: Calendar = serde_json::from_str(r#""gregory""#).unwrap();
    assert_eq!(v, Calendar::gregorian());
    assert!(serde_json::from_str::<Calendar>(r#""julian""#).is_err());
}

#[test]
fn test_serde_mode() {
    assert_eq!(serde_json::to_string(&ViewMode::Month).unwrap(), r#""Month""#);
    let v: ViewMode = serde_json::from_str(r#""Year""#).unwrap();
    assert_eq!(v, ViewMode::Year);
    let v: NavDirection = serde_json::from_str(r#""Backward""#).unwrap();
    assert_eq!(v, NavDirection::Backward);
    let v: HijriEpoch = serde_json::from_str(r#""Astronomical""#).unwrap();
    assert_eq!(v, HijriEpoch::Astronomical);
}
