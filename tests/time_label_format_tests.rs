use chart_reactor::core::ticks::{MILLIS_PER_DAY, MILLIS_PER_HOUR, MILLIS_PER_MONTH, MILLIS_PER_YEAR};
use chart_reactor::core::TimeLabelFormat;

#[test]
fn bucket_boundaries_resolve_to_the_coarser_format() {
    assert_eq!(
        TimeLabelFormat::for_span_millis(3.0 * MILLIS_PER_YEAR),
        TimeLabelFormat::Year
    );
    assert_eq!(
        TimeLabelFormat::for_span_millis(3.0 * MILLIS_PER_MONTH),
        TimeLabelFormat::Month
    );
    assert_eq!(
        TimeLabelFormat::for_span_millis(3.0 * MILLIS_PER_DAY),
        TimeLabelFormat::Day
    );
    assert_eq!(
        TimeLabelFormat::for_span_millis(3.0 * MILLIS_PER_HOUR),
        TimeLabelFormat::HourMinute
    );
}

#[test]
fn spans_just_below_a_boundary_use_the_finer_format() {
    assert_eq!(
        TimeLabelFormat::for_span_millis(3.0 * MILLIS_PER_YEAR - 1.0),
        TimeLabelFormat::Month
    );
    assert_eq!(
        TimeLabelFormat::for_span_millis(3.0 * MILLIS_PER_DAY - 1.0),
        TimeLabelFormat::HourMinute
    );
    assert_eq!(
        TimeLabelFormat::for_span_millis(3.0 * MILLIS_PER_HOUR - 1.0),
        TimeLabelFormat::MinuteSecond
    );
}

#[test]
fn formats_render_in_utc() {
    // 2023-11-14T22:13:20Z
    let instant = 1_700_000_000_000.0;
    assert_eq!(TimeLabelFormat::Year.format(instant), "2023");
    assert_eq!(TimeLabelFormat::Month.format(instant), "Nov 2023");
    assert_eq!(TimeLabelFormat::Day.format(instant), "Nov 14");
    assert_eq!(TimeLabelFormat::HourMinute.format(instant), "22:13");
    assert_eq!(TimeLabelFormat::MinuteSecond.format(instant), "13:20");
}
