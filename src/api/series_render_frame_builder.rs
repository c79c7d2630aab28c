use crate::core::{Scale, SeriesPoint};
use crate::render::{Color, LayerPrimitives, PathPrimitive};

/// One visible series as the frame builder sees it.
#[derive(Debug, Clone, Copy)]
pub(super) struct SeriesStroke<'a> {
    pub color: Color,
    pub points: &'a [SeriesPoint],
}

/// Projects every series into polylines, breaking the line wherever `y` is
/// undefined.
///
/// Runs are clipped to the x domain: segments crossing a bound end on it, and
/// points beyond a pinned time domain are not drawn.
pub(super) fn build_series_layer(
    strokes: &[SeriesStroke<'_>],
    x_scale: Scale,
    y_scale: Scale,
    stroke_width: f64,
) -> LayerPrimitives {
    let (d0, d1) = x_scale.domain();
    let bounds = (d0.min(d1), d0.max(d1));
    let project = |(x, y): (f64, f64)| (x_scale.map(x), y_scale.map(y));

    let mut layer = LayerPrimitives::default();
    for stroke in strokes {
        let mut run: Vec<(f64, f64)> = Vec::new();
        let mut flush = |run: &mut Vec<(f64, f64)>| {
            if !run.is_empty() {
                layer.paths.push(PathPrimitive::new(
                    std::mem::take(run),
                    stroke_width,
                    stroke.color,
                ));
            }
        };

        let mut previous: Option<(f64, f64)> = None;
        for point in stroke.points {
            let Some(y) = point.y else {
                flush(&mut run);
                previous = None;
                continue;
            };
            let current = (point.x, y);
            match previous {
                None if point.x >= bounds.0 && point.x <= bounds.1 => run.push(project(current)),
                None => {}
                Some(from) => match clip_segment(from, current, bounds) {
                    Some((start, end)) => {
                        if run.is_empty() {
                            run.push(project(start));
                        }
                        run.push(project(end));
                        if current.0 > bounds.1 {
                            flush(&mut run);
                        }
                    }
                    None => flush(&mut run),
                },
            }
            previous = Some(current);
        }
        flush(&mut run);
    }
    layer
}

/// Clips a segment with ascending x to `lo..=hi` on the x axis,
/// interpolating y at the crossed bounds.
fn clip_segment(
    from: (f64, f64),
    to: (f64, f64),
    (lo, hi): (f64, f64),
) -> Option<((f64, f64), (f64, f64))> {
    if to.0 < lo || from.0 > hi {
        return None;
    }
    let at = |x: f64| {
        let span = to.0 - from.0;
        if span == 0.0 {
            (x, to.1)
        } else {
            (x, from.1 + (to.1 - from.1) * (x - from.0) / span)
        }
    };
    let start = if from.0 < lo { at(lo) } else { from };
    let end = if to.0 > hi { at(hi) } else { to };
    Some((start, end))
}
