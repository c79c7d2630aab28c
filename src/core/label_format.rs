use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::ticks::{MILLIS_PER_DAY, MILLIS_PER_HOUR, MILLIS_PER_MONTH, MILLIS_PER_YEAR};

/// Time-axis label granularity chosen from the visible domain span.
///
/// Selection is a step function with inclusive lower bounds: a span of exactly
/// three days already formats as [`TimeLabelFormat::Day`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeLabelFormat {
    Year,
    Month,
    Day,
    HourMinute,
    MinuteSecond,
}

impl TimeLabelFormat {
    #[must_use]
    pub fn for_span_millis(span_millis: f64) -> Self {
        let span = span_millis.abs();
        if span >= 3.0 * MILLIS_PER_YEAR {
            Self::Year
        } else if span >= 3.0 * MILLIS_PER_MONTH {
            Self::Month
        } else if span >= 3.0 * MILLIS_PER_DAY {
            Self::Day
        } else if span >= 3.0 * MILLIS_PER_HOUR {
            Self::HourMinute
        } else {
            Self::MinuteSecond
        }
    }

    #[must_use]
    pub const fn pattern(self) -> &'static str {
        match self {
            Self::Year => "%Y",
            Self::Month => "%b %Y",
            Self::Day => "%b %d",
            Self::HourMinute => "%H:%M",
            Self::MinuteSecond => "%M:%S",
        }
    }

    /// Formats an epoch-millisecond instant in UTC.
    #[must_use]
    pub fn format(self, millis: f64) -> String {
        if !millis.is_finite() {
            return "nan".to_owned();
        }
        match DateTime::<Utc>::from_timestamp_millis(millis.round() as i64) {
            Some(dt) => dt.format(self.pattern()).to_string(),
            None => format_number(millis, 0),
        }
    }
}

/// Decimal places needed to distinguish ticks spaced `step` apart.
#[must_use]
pub fn precision_for_step(step: f64) -> usize {
    let step = step.abs();
    if !step.is_finite() || step == 0.0 {
        return 0;
    }
    let exponent = step.log10().floor();
    if exponent >= 0.0 {
        0
    } else {
        (-exponent) as usize
    }
}

/// Fixed-precision number with `,` thousands grouping, e.g. `12,500.5`.
#[must_use]
pub fn format_number(value: f64, precision: usize) -> String {
    if !value.is_finite() {
        return "nan".to_owned();
    }

    let text = format!("{:.*}", precision, value.abs());
    let (integer, fraction) = match text.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::with_capacity(text.len() + integer.len() / 3 + 1);
    let is_zero = text.chars().all(|ch| ch == '0' || ch == '.');
    if value < 0.0 && !is_zero {
        grouped.push('-');
    }
    for (index, digit) in integer.chars().enumerate() {
        if index > 0 && (integer.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }
    grouped
}

/// Label for a linear tick given the spacing between ticks.
#[must_use]
pub fn format_linear_tick(value: f64, step: f64) -> String {
    format_number(value, precision_for_step(step))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands_and_keeps_fraction() {
        assert_eq!(format_number(1234567.891, 2), "1,234,567.89");
        assert_eq!(format_number(-1000.0, 0), "-1,000");
        assert_eq!(format_number(-0.0001, 2), "0.00");
        assert_eq!(format_number(999.0, 0), "999");
    }

    #[test]
    fn precision_tracks_step_magnitude() {
        assert_eq!(precision_for_step(20.0), 0);
        assert_eq!(precision_for_step(0.5), 1);
        assert_eq!(precision_for_step(0.02), 2);
    }
}
