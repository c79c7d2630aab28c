use approx::assert_relative_eq;
use chart_reactor::core::{
    DomainResolution, Margin, ScaleKind, ScaleResolver, SeriesConfig, SortedSeries, Viewport,
    XEncoding,
};

fn viewport() -> Viewport {
    Viewport::new(400, 300).with_margin(Margin::new(20.0, 30.0, 30.0, 40.0))
}

fn sorted(records: &[(f64, f64)], encoding: XEncoding) -> SortedSeries {
    let config = SeriesConfig::builder("value")
        .x(|record: &(f64, f64)| Some(record.0))
        .y(|record: &(f64, f64)| Some(record.1))
        .build()
        .expect("series with both accessors");
    SortedSeries::resolve(records, &config, encoding)
}

#[test]
fn linear_domains_are_nice_and_zero_floored() {
    let series = sorted(&[(0.0, 12.0), (5.0, 47.0), (10.0, 33.0)], XEncoding::Raw);
    let visible = [&series];
    let resolver = ScaleResolver::new(&visible, viewport(), ScaleKind::Linear);

    let DomainResolution::Resolved(domains) = resolver.resolve_domains() else {
        panic!("expected a renderable domain");
    };
    assert_eq!(domains.x, (0.0, 10.0));
    assert_eq!(domains.y, (0.0, 50.0));
}

#[test]
fn y_range_runs_bottom_to_top_and_x_range_excludes_gutter() {
    let series = sorted(&[(0.0, 12.0), (10.0, 47.0)], XEncoding::Raw);
    let visible = [&series];
    let resolved = ScaleResolver::new(&visible, viewport(), ScaleKind::Linear)
        .resolve(25.0)
        .expect("valid viewport")
        .expect("renderable domain");

    assert_eq!(resolved.y.range(), (270.0, 20.0));
    assert_eq!(resolved.x.range(), (65.0, 370.0));
    assert_relative_eq!(resolved.y.map(50.0), 20.0);
    assert_relative_eq!(resolved.y.map(0.0), 270.0);
    assert_relative_eq!(resolved.x.invert(resolved.x.map(7.25)), 7.25, epsilon = 1e-9);
    assert!(resolved.time_label_format.is_none());
}

#[test]
fn time_override_is_used_verbatim() {
    let series = sorted(
        &[(1_700_000_000_000.0, 1.0), (1_700_000_500_000.0, 2.0)],
        XEncoding::EpochMillis,
    );
    let visible = [&series];
    let override_domain = (1_699_999_999_123.0, 1_700_000_777_456.0);
    let resolver = ScaleResolver::new(&visible, viewport(), ScaleKind::Time)
        .with_time_domain_override(Some(override_domain));

    let DomainResolution::Resolved(domains) = resolver.resolve_domains() else {
        panic!("expected a renderable domain");
    };
    assert_eq!(domains.x, override_domain);
}

#[test]
fn empty_or_undefined_series_have_no_renderable_domain() {
    let empty = sorted(&[], XEncoding::Raw);
    let visible = [&empty];
    let resolver = ScaleResolver::new(&visible, viewport(), ScaleKind::Linear);
    assert_eq!(resolver.resolve_domains(), DomainResolution::NoRenderableDomain);
    assert!(resolver.resolve(0.0).expect("no error").is_none());

    let config = SeriesConfig::builder("gaps")
        .x(|record: &(f64, f64)| Some(record.0))
        .y(|_: &(f64, f64)| None)
        .build()
        .expect("series with both accessors");
    let gaps = SortedSeries::resolve(&[(1.0, 1.0), (2.0, 2.0)], &config, XEncoding::Raw);
    let visible = [&gaps];
    assert_eq!(
        ScaleResolver::new(&visible, viewport(), ScaleKind::Linear).resolve_domains(),
        DomainResolution::NoRenderableDomain
    );
}

#[test]
fn single_value_domains_are_widened() {
    let series = sorted(&[(3.0, 0.0), (3.0, 0.0)], XEncoding::Raw);
    let visible = [&series];
    let DomainResolution::Resolved(domains) =
        ScaleResolver::new(&visible, viewport(), ScaleKind::Linear).resolve_domains()
    else {
        panic!("expected a renderable domain");
    };
    assert_eq!(domains.y, (0.0, 1.0));
    assert!(domains.x.0 < 3.0 && domains.x.1 > 3.0);
}

#[test]
fn too_narrow_viewport_is_an_error_not_a_degenerate_scale() {
    let series = sorted(&[(0.0, 1.0), (1.0, 2.0)], XEncoding::Raw);
    let visible = [&series];
    let resolver = ScaleResolver::new(&visible, viewport(), ScaleKind::Linear);
    assert!(resolver.resolve(400.0).is_err());
}

#[test]
fn epoch_second_inputs_are_normalized_to_millis() {
    let records = [(1_700_000_000.0, 1.0), (1_700_003_600.0, 2.0)];
    let config = SeriesConfig::builder("value")
        .x(|record: &(f64, f64)| Some(record.0))
        .y(|record: &(f64, f64)| Some(record.1))
        .build()
        .expect("series with both accessors");

    let encoding = XEncoding::detect(&records, &[&config], true);
    assert_eq!(encoding, XEncoding::EpochSeconds);
    let series = SortedSeries::resolve(&records, &config, encoding);
    assert_eq!(
        series.x_extent(),
        Some((1_700_000_000_000.0, 1_700_003_600_000.0))
    );

    let millis = [(1_700_000_000_000.0, 1.0)];
    assert_eq!(
        XEncoding::detect(&millis, &[&config], true),
        XEncoding::EpochMillis
    );
    assert_eq!(XEncoding::detect(&records, &[&config], false), XEncoding::Raw);
}
