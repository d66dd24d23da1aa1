use crate::fetch::Window;
use crate::fetch::tests::utils::date;
use chrono::NaiveDate;

#[test]
fn test_window_ends_today() {
    let window = Window::ending(date(12), 10);
    assert_eq!(10, window.len());
    assert_eq!(date(12), window.dates()[0]);
    assert_eq!(date(3), window.dates()[9]);
    assert!(window.dates().windows(2).all(|pair| pair[0] > pair[1]));
}

#[test]
fn test_window_crosses_month() {
    let window = Window::ending(NaiveDate::from_ymd_opt(2025, 3, 2).unwrap(), 3);
    let expected = vec![
        NaiveDate::from_ymd_opt(2025, 3, 2).unwrap(),
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
        NaiveDate::from_ymd_opt(2025, 2, 28).unwrap(),
    ];
    assert_eq!(expected, window.dates());
}

#[test]
fn test_single_day_window() {
    let window = Window::ending(date(12), 1);
    assert_eq!(vec![date(12)], window.dates());
}
