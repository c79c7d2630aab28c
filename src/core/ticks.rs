//! Nice-number tick generation for linear and time domains.
//!
//! Linear ticks follow a 1-2-5 progression and are produced as integer
//! multiples (or fractions) of the step so that labels never accumulate
//! floating point drift. Time ticks walk a ladder of calendar intervals.

use chrono::{DateTime, Datelike, Months, NaiveDate, Utc};

const E10: f64 = 7.071_067_811_865_475_5;
const E5: f64 = 3.162_277_660_168_379_5;
const E2: f64 = 1.414_213_562_373_095_1;

const MAX_TICKS: usize = 10_000;
const NICE_MAX_ITERATIONS: usize = 10;

pub const MILLIS_PER_SECOND: f64 = 1_000.0;
pub const MILLIS_PER_MINUTE: f64 = 60.0 * MILLIS_PER_SECOND;
pub const MILLIS_PER_HOUR: f64 = 60.0 * MILLIS_PER_MINUTE;
pub const MILLIS_PER_DAY: f64 = 24.0 * MILLIS_PER_HOUR;
pub const MILLIS_PER_WEEK: f64 = 7.0 * MILLIS_PER_DAY;
pub const MILLIS_PER_MONTH: f64 = 30.0 * MILLIS_PER_DAY;
pub const MILLIS_PER_YEAR: f64 = 365.0 * MILLIS_PER_DAY;

/// `(first multiplier, last multiplier, increment)`; a negative increment
/// means ticks are `i / -increment`.
fn tick_spec(start: f64, stop: f64, count: f64) -> Option<(f64, f64, f64)> {
    let step = (stop - start) / count.max(0.0);
    if !step.is_finite() || step <= 0.0 {
        return None;
    }

    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };

    let (mut i1, mut i2, increment);
    if power < 0.0 {
        let inverse = 10f64.powf(-power) / factor;
        i1 = (start * inverse).round();
        i2 = (stop * inverse).round();
        if i1 / inverse < start {
            i1 += 1.0;
        }
        if i2 / inverse > stop {
            i2 -= 1.0;
        }
        increment = -inverse;
    } else {
        let direct = 10f64.powf(power) * factor;
        i1 = (start / direct).round();
        i2 = (stop / direct).round();
        if i1 * direct < start {
            i1 += 1.0;
        }
        if i2 * direct > stop {
            i2 -= 1.0;
        }
        increment = direct;
    }

    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    Some((i1, i2, increment))
}

/// Signed increment encoding used by [`nice_linear`]; `0.0` when the domain
/// cannot produce ticks.
#[must_use]
pub fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    tick_spec(start, stop, count as f64).map_or(0.0, |(_, _, inc)| inc)
}

/// Positive distance between adjacent ticks.
#[must_use]
pub fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let reverse = stop < start;
    let increment = if reverse {
        tick_increment(stop, start, count)
    } else {
        tick_increment(start, stop, count)
    };
    let step = if increment < 0.0 {
        1.0 / -increment
    } else {
        increment
    };
    if reverse { -step } else { step }
}

#[must_use]
pub fn linear_ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }

    let reverse = stop < start;
    let (lo, hi) = if reverse { (stop, start) } else { (start, stop) };
    let Some((i1, i2, increment)) = tick_spec(lo, hi, count as f64) else {
        return Vec::new();
    };
    if i2 < i1 {
        return Vec::new();
    }

    let n = ((i2 - i1) as usize + 1).min(MAX_TICKS);
    let mut ticks: Vec<f64> = (0..n)
        .map(|i| {
            let multiplier = i1 + i as f64;
            if increment < 0.0 {
                multiplier / -increment
            } else {
                multiplier * increment
            }
        })
        .collect();
    if reverse {
        ticks.reverse();
    }
    ticks
}

/// Expands `[start, stop]` outward onto round tick values. Returns the input
/// unchanged when no stable step exists.
#[must_use]
pub fn nice_linear(start: f64, stop: f64, count: usize) -> (f64, f64) {
    let reverse = stop < start;
    let (mut lo, mut hi) = if reverse { (stop, start) } else { (start, stop) };
    let mut previous_step: Option<f64> = None;

    for _ in 0..NICE_MAX_ITERATIONS {
        let step = tick_increment(lo, hi, count);
        if previous_step == Some(step) {
            return if reverse { (hi, lo) } else { (lo, hi) };
        }
        if step > 0.0 {
            lo = (lo / step).floor() * step;
            hi = (hi / step).ceil() * step;
        } else if step < 0.0 {
            lo = (lo * step).ceil() / step;
            hi = (hi * step).floor() / step;
        } else {
            break;
        }
        previous_step = Some(step);
    }

    (start, stop)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    Millisecond,
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl TimeUnit {
    #[must_use]
    pub const fn approx_millis(self) -> f64 {
        match self {
            Self::Millisecond => 1.0,
            Self::Second => MILLIS_PER_SECOND,
            Self::Minute => MILLIS_PER_MINUTE,
            Self::Hour => MILLIS_PER_HOUR,
            Self::Day => MILLIS_PER_DAY,
            Self::Week => MILLIS_PER_WEEK,
            Self::Month => MILLIS_PER_MONTH,
            Self::Year => MILLIS_PER_YEAR,
        }
    }
}

/// A calendar-aware UTC interval such as "every 15 minutes" or "every 3 months".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeInterval {
    pub unit: TimeUnit,
    pub step: u32,
}

const TIME_INTERVAL_LADDER: [TimeInterval; 18] = [
    TimeInterval::every(TimeUnit::Second, 1),
    TimeInterval::every(TimeUnit::Second, 5),
    TimeInterval::every(TimeUnit::Second, 15),
    TimeInterval::every(TimeUnit::Second, 30),
    TimeInterval::every(TimeUnit::Minute, 1),
    TimeInterval::every(TimeUnit::Minute, 5),
    TimeInterval::every(TimeUnit::Minute, 15),
    TimeInterval::every(TimeUnit::Minute, 30),
    TimeInterval::every(TimeUnit::Hour, 1),
    TimeInterval::every(TimeUnit::Hour, 3),
    TimeInterval::every(TimeUnit::Hour, 6),
    TimeInterval::every(TimeUnit::Hour, 12),
    TimeInterval::every(TimeUnit::Day, 1),
    TimeInterval::every(TimeUnit::Day, 2),
    TimeInterval::every(TimeUnit::Week, 1),
    TimeInterval::every(TimeUnit::Month, 1),
    TimeInterval::every(TimeUnit::Month, 3),
    TimeInterval::every(TimeUnit::Year, 1),
];

impl TimeInterval {
    #[must_use]
    pub const fn every(unit: TimeUnit, step: u32) -> Self {
        Self { unit, step }
    }

    #[must_use]
    pub fn approx_millis(self) -> f64 {
        self.unit.approx_millis() * f64::from(self.step)
    }

    /// Picks the ladder interval whose duration is closest (by ratio) to
    /// `span / count`.
    #[must_use]
    pub fn for_span(start: f64, stop: f64, count: usize) -> Option<Self> {
        if count == 0 || !start.is_finite() || !stop.is_finite() || start == stop {
            return None;
        }
        let (lo, hi) = if stop < start { (stop, start) } else { (start, stop) };
        let target = (hi - lo) / count as f64;
        let index =
            TIME_INTERVAL_LADDER.partition_point(|interval| interval.approx_millis() <= target);

        if index == TIME_INTERVAL_LADDER.len() {
            let years = tick_step(lo / MILLIS_PER_YEAR, hi / MILLIS_PER_YEAR, count)
                .round()
                .max(1.0);
            return Some(Self::every(TimeUnit::Year, years as u32));
        }
        if index == 0 {
            let millis = tick_step(lo, hi, count).round().max(1.0);
            return Some(Self::every(TimeUnit::Millisecond, millis as u32));
        }

        let below = TIME_INTERVAL_LADDER[index - 1];
        let above = TIME_INTERVAL_LADDER[index];
        if target / below.approx_millis() < above.approx_millis() / target {
            Some(below)
        } else {
            Some(above)
        }
    }

    /// Latest interval boundary at or before `millis`.
    #[must_use]
    pub fn floor(self, millis: f64) -> f64 {
        let step = f64::from(self.step.max(1));
        match self.unit {
            TimeUnit::Millisecond
            | TimeUnit::Second
            | TimeUnit::Minute
            | TimeUnit::Hour
            | TimeUnit::Day => {
                let width = self.unit.approx_millis() * step;
                (millis / width).floor() * width
            }
            TimeUnit::Week => {
                let days = (millis / MILLIS_PER_DAY).floor();
                // 1970-01-01 was a Thursday; weeks start on Sunday.
                let weekday = (days + 4.0).rem_euclid(7.0);
                let sunday = days - weekday;
                let width = 7.0 * step;
                let aligned = sunday - (sunday - 3.0).rem_euclid(width);
                aligned * MILLIS_PER_DAY
            }
            TimeUnit::Month => floor_calendar(millis, |date| {
                let month0 = date.month0() - date.month0() % self.step.max(1);
                NaiveDate::from_ymd_opt(date.year(), month0 + 1, 1)
            }),
            TimeUnit::Year => floor_calendar(millis, |date| {
                let year = date.year() - date.year().rem_euclid(self.step.max(1) as i32);
                NaiveDate::from_ymd_opt(year, 1, 1)
            }),
        }
    }

    /// Advances an already-floored boundary by one interval.
    #[must_use]
    pub fn offset(self, millis: f64) -> f64 {
        match self.unit {
            TimeUnit::Month => add_months(millis, self.step.max(1)),
            TimeUnit::Year => add_months(millis, self.step.max(1).saturating_mul(12)),
            _ => millis + self.approx_millis(),
        }
    }

    /// Earliest interval boundary at or after `millis`.
    #[must_use]
    pub fn ceil(self, millis: f64) -> f64 {
        let floored = self.floor(millis);
        if floored >= millis {
            floored
        } else {
            self.offset(floored)
        }
    }
}

fn to_datetime(millis: f64) -> Option<DateTime<Utc>> {
    if !millis.is_finite() {
        return None;
    }
    DateTime::<Utc>::from_timestamp_millis(millis.floor() as i64)
}

fn floor_calendar(millis: f64, align: impl Fn(NaiveDate) -> Option<NaiveDate>) -> f64 {
    to_datetime(millis)
        .and_then(|dt| align(dt.date_naive()))
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map_or(millis, |naive| naive.and_utc().timestamp_millis() as f64)
}

fn add_months(millis: f64, months: u32) -> f64 {
    to_datetime(millis)
        .and_then(|dt| dt.checked_add_months(Months::new(months)))
        .map_or(millis + f64::from(months) * MILLIS_PER_MONTH, |dt| {
            dt.timestamp_millis() as f64
        })
}

/// Boundaries of `interval` inside `[start, stop]`, ascending.
#[must_use]
pub fn time_ticks(start: f64, stop: f64, interval: TimeInterval) -> Vec<f64> {
    let (lo, hi) = if stop < start { (stop, start) } else { (start, stop) };
    let mut ticks = Vec::new();
    let mut current = interval.ceil(lo);
    while current <= hi && ticks.len() < MAX_TICKS {
        ticks.push(current);
        let next = interval.offset(current);
        if next <= current {
            break;
        }
        current = next;
    }
    ticks
}

/// Expands a time domain outward to boundaries of the interval chosen for
/// `count` ticks.
#[must_use]
pub fn nice_time(start: f64, stop: f64, count: usize) -> (f64, f64) {
    let Some(interval) = TimeInterval::for_span(start, stop, count) else {
        return (start, stop);
    };
    if stop < start {
        (interval.ceil(start), interval.floor(stop))
    } else {
        (interval.floor(start), interval.ceil(stop))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_ticks_follow_one_two_five_progression() {
        assert_eq!(linear_ticks(0.0, 10.0, 5), vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
        assert_eq!(linear_ticks(0.0, 1.0, 5), vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
    }

    #[test]
    fn nice_linear_expands_outward() {
        assert_eq!(nice_linear(0.0, 97.3, 5), (0.0, 100.0));
        assert_eq!(nice_linear(0.13, 0.87, 5), (0.0, 1.0));
        assert_eq!(nice_linear(100.0, 0.0, 5), (100.0, 0.0));
    }

    #[test]
    fn week_floor_lands_on_sunday() {
        // 2024-01-10 (Wednesday) 12:00 UTC.
        let wednesday = 1_704_888_000_000.0;
        let floored = TimeInterval::every(TimeUnit::Week, 1).floor(wednesday);
        let date = to_datetime(floored).expect("in range");
        assert_eq!(date.weekday(), chrono::Weekday::Sun);
        assert_eq!(date.day(), 7);
    }

    #[test]
    fn month_interval_floors_to_first_of_month() {
        // 2024-05-17 UTC.
        let may = 1_715_904_000_000.0;
        let quarter = TimeInterval::every(TimeUnit::Month, 3);
        let floored = to_datetime(quarter.floor(may)).expect("in range");
        assert_eq!((floored.month(), floored.day()), (4, 1));
        let next = to_datetime(quarter.offset(quarter.floor(may))).expect("in range");
        assert_eq!((next.month(), next.day()), (7, 1));
    }
}
