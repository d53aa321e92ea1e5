use chart_embed::vega::{DatePeriod, MAX_SPECIAL_CASE_TICKS, nice_date_ticks, timestamp_ticks};
use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};
use proptest::prelude::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn midnight(y: i32, m: u32, d: u32) -> NaiveDateTime {
    date(y, m, d).and_hms_opt(0, 0, 0).expect("valid time")
}

#[test]
fn long_year_ranges_are_thinned_and_end_on_the_max() {
    let ticks = nice_date_ticks(date(2020, 1, 1), 20, DatePeriod::Years).expect("ticks");

    assert_eq!(ticks.len(), 8);
    assert_eq!(ticks.first(), Some(&date(1999, 1, 1)));
    assert_eq!(ticks.last(), Some(&date(2020, 1, 1)));
    assert!(ticks.windows(2).all(|w| w[1].year() - w[0].year() == 3));
}

#[test]
fn short_month_ranges_tick_every_month() {
    let ticks = nice_date_ticks(date(2020, 4, 1), 3, DatePeriod::Months).expect("ticks");
    assert_eq!(
        ticks,
        vec![date(2020, 1, 1), date(2020, 2, 1), date(2020, 3, 1), date(2020, 4, 1)]
    );
}

#[test]
fn month_starts_use_month_labels() {
    let values = [midnight(2019, 11, 1), midnight(2020, 2, 1), midnight(2019, 12, 1)];
    let ticks = timestamp_ticks(&values).expect("special case");

    assert_eq!(ticks.format, "%b %Y");
    assert_eq!(ticks.ticks.first(), Some(&date(2019, 11, 1)));
    assert_eq!(ticks.ticks.last(), Some(&date(2020, 2, 1)));
}

#[test]
fn same_weekday_dates_use_day_labels() {
    // 2020-01-06 is a Monday.
    let values: Vec<NaiveDateTime> = (0..4).map(|w| midnight(2020, 1, 6 + w * 7)).collect();
    let ticks = timestamp_ticks(&values).expect("special case");

    assert_eq!(ticks.format, "%b %-d, %Y");
    assert_eq!(ticks.ticks.len(), 4);
    assert!(ticks.ticks.iter().all(|d| d.weekday() == Weekday::Mon));
}

#[test]
fn mixed_dates_and_times_use_renderer_defaults() {
    assert!(timestamp_ticks(&[]).is_none());
    assert!(timestamp_ticks(&[midnight(2020, 1, 6), midnight(2020, 1, 8)]).is_none());

    let with_time = date(2020, 1, 1).and_hms_opt(6, 0, 0).expect("valid time");
    assert!(timestamp_ticks(&[midnight(2019, 1, 1), with_time]).is_none());
}

#[test]
fn unrepresentable_period_counts_yield_no_ticks() {
    assert!(nice_date_ticks(date(2020, 1, 1), u32::MAX, DatePeriod::Years).is_none());
    assert!(nice_date_ticks(date(2020, 1, 1), u32::MAX, DatePeriod::Weeks).is_none());
}

proptest! {
    #[test]
    fn tick_count_stays_bounded(
        n_periods in 1u32..2_000,
        period in prop_oneof![
            Just(DatePeriod::Years),
            Just(DatePeriod::Months),
            Just(DatePeriod::Weeks),
        ]
    ) {
        let max = date(2024, 1, 1);
        let ticks = nice_date_ticks(max, n_periods, period).expect("in range");

        prop_assert!(ticks.len() >= 2);
        prop_assert!(ticks.len() <= MAX_SPECIAL_CASE_TICKS as usize);
        prop_assert_eq!(ticks.last().copied(), Some(max));
        prop_assert!(ticks.windows(2).all(|w| w[0] < w[1]));
    }
}
