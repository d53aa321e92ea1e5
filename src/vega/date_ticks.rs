use chrono::{Datelike, Days, Months, NaiveDate, NaiveDateTime, NaiveTime};

/// Upper bound on hand-picked ticks for whole-date series.
pub const MAX_SPECIAL_CASE_TICKS: u32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePeriod {
    Years,
    Months,
    Weeks,
}

impl DatePeriod {
    fn shift(self, date: NaiveDate, count: i64) -> Option<NaiveDate> {
        let magnitude = u32::try_from(count.unsigned_abs()).ok()?;
        match self {
            Self::Years | Self::Months => {
                let months = if self == Self::Years {
                    magnitude.checked_mul(12)?
                } else {
                    magnitude
                };
                if count >= 0 {
                    date.checked_add_months(Months::new(months))
                } else {
                    date.checked_sub_months(Months::new(months))
                }
            }
            Self::Weeks => {
                let days = Days::new(u64::from(magnitude) * 7);
                if count >= 0 {
                    date.checked_add_days(days)
                } else {
                    date.checked_sub_days(days)
                }
            }
        }
    }
}

/// Tick dates and the `utcFormat` pattern used to label them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampTicks {
    pub ticks: Vec<NaiveDate>,
    pub format: &'static str,
}

/// Evenly spaced ticks ending exactly on `max_date`.
///
/// Spacing is the smallest whole number of periods that keeps the tick count
/// under [`MAX_SPECIAL_CASE_TICKS`]. The first tick may precede the data.
#[must_use]
pub fn nice_date_ticks(
    max_date: NaiveDate,
    n_periods_in_domain: u32,
    period: DatePeriod,
) -> Option<Vec<NaiveDate>> {
    let n_domain_values = n_periods_in_domain.checked_add(1)?;
    let n_periods_between_ticks = n_domain_values.div_ceil(MAX_SPECIAL_CASE_TICKS - 1);
    let n_ticks = n_periods_in_domain.div_ceil(n_periods_between_ticks) + 1;
    let step = i64::from(n_periods_between_ticks);
    let tick0 = period.shift(max_date, -(i64::from(n_ticks) - 1) * step)?;
    (0..i64::from(n_ticks))
        .map(|i| period.shift(tick0, i * step))
        .collect()
}

/// Special-cased ticks for series of whole dates.
///
/// Returns `None` (use the renderer's defaults) unless every value is
/// midnight and the dates are all year starts, all month starts, or all on
/// the same weekday.
#[must_use]
pub fn timestamp_ticks(values: &[NaiveDateTime]) -> Option<TimestampTicks> {
    if values.is_empty() || values.iter().any(|value| value.time() != NaiveTime::MIN) {
        return None;
    }
    let dates: Vec<NaiveDate> = values.iter().map(NaiveDateTime::date).collect();
    let min = *dates.iter().min()?;
    let max = *dates.iter().max()?;

    if dates.iter().all(|d| d.month() == 1 && d.day() == 1) {
        let n = u32::try_from(max.year() - min.year()).ok()?;
        return Some(TimestampTicks {
            ticks: nice_date_ticks(max, n, DatePeriod::Years)?,
            format: "%Y",
        });
    }

    if dates.iter().all(|d| d.day() == 1) {
        let months = |d: NaiveDate| i64::from(d.year()) * 12 + i64::from(d.month0());
        let n = u32::try_from(months(max) - months(min)).ok()?;
        return Some(TimestampTicks {
            ticks: nice_date_ticks(max, n, DatePeriod::Months)?,
            format: "%b %Y",
        });
    }

    let weekday = min.weekday();
    if dates.iter().all(|d| d.weekday() == weekday) {
        let n = u32::try_from((max - min).num_days() / 7).ok()?;
        return Some(TimestampTicks {
            ticks: nice_date_ticks(max, n, DatePeriod::Weeks)?,
            format: "%b %-d, %Y",
        });
    }

    None
}
